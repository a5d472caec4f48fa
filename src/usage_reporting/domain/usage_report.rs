use serde::{Deserialize, Serialize};

/// Plan entry in a usage report: one per distinct (offering, plan) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    plan_name: String,
    instance_count: u64,
}

impl Plan {
    pub fn new(plan_name: impl Into<String>, instance_count: u64) -> Self {
        Self {
            plan_name: plan_name.into(),
            instance_count,
        }
    }

    pub fn plan_name(&self) -> &str {
        &self.plan_name
    }

    pub fn instance_count(&self) -> u64 {
        self.instance_count
    }
}

/// Product entry in a usage report: one per managed offering observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    name: String,
    plans: Vec<Plan>,
}

impl Product {
    pub fn new(name: impl Into<String>, plans: Vec<Plan>) -> Self {
        Self {
            name: name.into(),
            plans,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn instance_count(&self) -> u64 {
        self.plans.iter().map(Plan::instance_count).sum()
    }
}

/// Report - root of the usage report handed to the presentation boundary
///
/// Serializes as `{"products":[{"name":..,"plans":[{"planName":..,"instanceCount":..}]}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Report {
    products: Vec<Product>,
}

impl Report {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    pub fn total_instances(&self) -> u64 {
        self.products.iter().map(Product::instance_count).sum()
    }
}
