use crate::usage_reporting::domain::{Plan, Product, Report, ResolvedInstance};
use crate::usage_reporting::policies::{ManagedOfferings, PlanOrdering};
use std::collections::{BTreeMap, HashMap};

/// Per-offering plan counts, in first-observed order
#[derive(Debug, Default)]
struct PlanCounts {
    plans: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl PlanCounts {
    fn observe(&mut self, plan_name: &str) {
        match self.index.get(plan_name) {
            Some(&i) => self.plans[i].1 += 1,
            None => {
                self.index.insert(plan_name.to_string(), self.plans.len());
                self.plans.push((plan_name.to_string(), 1));
            }
        }
    }

    fn into_plans(self, ordering: PlanOrdering) -> Vec<Plan> {
        let mut plans = self.plans;
        if ordering == PlanOrdering::Lexicographic {
            plans.sort_by(|a, b| a.0.cmp(&b.0));
        }
        plans
            .into_iter()
            .map(|(name, count)| Plan::new(name, count))
            .collect()
    }
}

/// UsageAggregator service - folds resolved instances into a Report
///
/// Pure and infallible: unmanaged offerings are dropped, remaining instances
/// are counted per (offering, plan), products come out sorted by name and
/// plans follow the requested `PlanOrdering`.
pub struct UsageAggregator;

impl UsageAggregator {
    pub fn aggregate(instances: &[ResolvedInstance], ordering: PlanOrdering) -> Report {
        let mut products: BTreeMap<&str, PlanCounts> = BTreeMap::new();

        for instance in instances {
            if !ManagedOfferings::is_managed(instance.offering_name()) {
                continue;
            }
            products
                .entry(instance.offering_name())
                .or_default()
                .observe(instance.plan_name());
        }

        Report::new(
            products
                .into_iter()
                .map(|(name, counts)| Product::new(name, counts.into_plans(ordering)))
                .collect(),
        )
    }
}
