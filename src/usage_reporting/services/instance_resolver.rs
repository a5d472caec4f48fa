use crate::usage_reporting::domain::{
    InstanceKind, PlanDetails, ResolvedInstance, ServiceInstanceRecord, UnresolvedInstance,
};
use std::collections::{BTreeSet, HashMap};

/// Outcome of resolving a single record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedInstance),
    Unresolved(UnresolvedInstance),
    /// User-provided instances never belong to an offering
    Skipped,
}

/// LookupTable - results of secondary catalog lookups for one invocation
///
/// Failed lookups are kept as their error text so every dependent instance
/// can carry the reason in its diagnostic.
#[derive(Debug, Default)]
pub struct LookupTable {
    plans: HashMap<String, Result<PlanDetails, String>>,
    offerings: HashMap<String, Result<String, String>>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_plan(&mut self, plan_guid: String, result: Result<PlanDetails, String>) {
        self.plans.insert(plan_guid, result);
    }

    pub fn insert_offering(&mut self, offering_guid: String, result: Result<String, String>) {
        self.offerings.insert(offering_guid, result);
    }

    pub fn plan(&self, plan_guid: &str) -> Option<&Result<PlanDetails, String>> {
        self.plans.get(plan_guid)
    }

    pub fn offering(&self, offering_guid: &str) -> Option<&Result<String, String>> {
        self.offerings.get(offering_guid)
    }

    fn resolved_plan(&self, plan_guid: Option<&str>) -> Option<&PlanDetails> {
        plan_guid
            .and_then(|guid| self.plans.get(guid))
            .and_then(|result| result.as_ref().ok())
    }
}

/// InstanceResolver service - joins raw records with catalog lookups
///
/// Works in two passes around the I/O done by the caller: first it names the
/// GUIDs that need a lookup, then it resolves every record against the
/// filled-in `LookupTable`.
pub struct InstanceResolver;

impl InstanceResolver {
    /// Distinct plan GUIDs whose name or offering is not inline
    pub fn pending_plan_guids(records: &[ServiceInstanceRecord]) -> Vec<String> {
        let guids: BTreeSet<&str> = records
            .iter()
            .filter(|r| r.kind() == InstanceKind::Managed)
            .filter(|r| {
                r.plan_name().is_none()
                    || (r.offering_name().is_none() && r.offering_guid().is_none())
            })
            .filter_map(|r| r.plan_guid())
            .collect();

        guids.into_iter().map(String::from).collect()
    }

    /// Distinct offering GUIDs still unnamed after plan lookups
    pub fn pending_offering_guids(
        records: &[ServiceInstanceRecord],
        table: &LookupTable,
    ) -> Vec<String> {
        let mut guids = BTreeSet::new();

        for record in records {
            if record.kind() != InstanceKind::Managed || record.offering_name().is_some() {
                continue;
            }
            let plan = table.resolved_plan(record.plan_guid());
            if plan.and_then(|p| p.offering_name.as_deref()).is_some() {
                continue;
            }
            let offering_guid = record
                .offering_guid()
                .or_else(|| plan.and_then(|p| p.offering_guid.as_deref()));
            if let Some(guid) = offering_guid {
                if table.offering(guid).is_none() {
                    guids.insert(guid.to_string());
                }
            }
        }

        guids.into_iter().collect()
    }

    pub fn resolve(record: &ServiceInstanceRecord, table: &LookupTable) -> Resolution {
        if record.kind() == InstanceKind::UserProvided {
            return Resolution::Skipped;
        }

        let plan_lookup = record.plan_guid().and_then(|guid| table.plan(guid));
        let plan = match plan_lookup {
            Some(Ok(plan)) => Some(plan),
            Some(Err(reason)) if record.plan_name().is_none() => {
                return unresolved(record, format!("plan lookup failed: {}", reason));
            }
            _ => None,
        };

        let plan_name = match record.plan_name().or(plan.map(|p| p.name.as_str())) {
            Some(name) => name.to_string(),
            None if record.plan_guid().is_none() => {
                return unresolved(record, "instance has no service plan");
            }
            None => return unresolved(record, "plan name could not be resolved"),
        };

        let offering_name = match Self::offering_name(record, plan, table) {
            Ok(name) => name,
            Err(reason) => return unresolved(record, reason),
        };

        match ResolvedInstance::new(offering_name, plan_name) {
            Ok(resolved) => Resolution::Resolved(resolved),
            Err(e) => unresolved(record, e.to_string()),
        }
    }

    fn offering_name(
        record: &ServiceInstanceRecord,
        plan: Option<&PlanDetails>,
        table: &LookupTable,
    ) -> Result<String, String> {
        if let Some(name) = record
            .offering_name()
            .or(plan.and_then(|p| p.offering_name.as_deref()))
        {
            return Ok(name.to_string());
        }

        let offering_guid = record
            .offering_guid()
            .or(plan.and_then(|p| p.offering_guid.as_deref()))
            .ok_or_else(|| "service offering is unknown".to_string())?;

        match table.offering(offering_guid) {
            Some(Ok(name)) => Ok(name.clone()),
            Some(Err(reason)) => Err(format!("offering lookup failed: {}", reason)),
            None => Err("offering name could not be resolved".to_string()),
        }
    }
}

fn unresolved(record: &ServiceInstanceRecord, reason: impl Into<String>) -> Resolution {
    Resolution::Unresolved(UnresolvedInstance::new(record, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(guid: &str, name: &str, offering_guid: Option<&str>) -> PlanDetails {
        PlanDetails {
            guid: guid.to_string(),
            name: name.to_string(),
            offering_guid: offering_guid.map(String::from),
            offering_name: None,
        }
    }

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_inline_record_needs_no_lookup() {
        let records = vec![ServiceInstanceRecord::managed("si-1", "db")
            .with_plan(s("plan-1"), s("10mb"))
            .with_offering(s("off-1"), s("p.mysql"))];

        assert!(InstanceResolver::pending_plan_guids(&records).is_empty());
        assert!(InstanceResolver::pending_offering_guids(&records, &LookupTable::new()).is_empty());

        let resolution = InstanceResolver::resolve(&records[0], &LookupTable::new());
        assert_eq!(
            resolution,
            Resolution::Resolved(
                ResolvedInstance::new("p.mysql".to_string(), "10mb".to_string()).unwrap()
            )
        );
    }

    #[test]
    fn test_pending_plan_guids_are_deduplicated() {
        let records: Vec<ServiceInstanceRecord> = (0..100)
            .map(|i| {
                ServiceInstanceRecord::managed(format!("si-{}", i), "db")
                    .with_plan(s(if i % 2 == 0 { "plan-a" } else { "plan-b" }), None)
            })
            .collect();

        assert_eq!(
            InstanceResolver::pending_plan_guids(&records),
            vec!["plan-a".to_string(), "plan-b".to_string()]
        );
    }

    #[test]
    fn test_user_provided_is_skipped() {
        let record = ServiceInstanceRecord::new("si-1", "creds", InstanceKind::UserProvided);
        assert!(InstanceResolver::pending_plan_guids(&[record.clone()]).is_empty());
        assert_eq!(
            InstanceResolver::resolve(&record, &LookupTable::new()),
            Resolution::Skipped
        );
    }

    #[test]
    fn test_resolve_through_plan_and_offering_lookups() {
        let records = vec![ServiceInstanceRecord::managed("si-1", "cache").with_plan(s("plan-1"), None)];

        let mut table = LookupTable::new();
        table.insert_plan("plan-1".to_string(), Ok(plan("plan-1", "medium", Some("off-1"))));

        assert_eq!(
            InstanceResolver::pending_offering_guids(&records, &table),
            vec!["off-1".to_string()]
        );

        table.insert_offering("off-1".to_string(), Ok("p.redis".to_string()));
        assert!(InstanceResolver::pending_offering_guids(&records, &table).is_empty());

        match InstanceResolver::resolve(&records[0], &table) {
            Resolution::Resolved(r) => {
                assert_eq!(r.offering_name(), "p.redis");
                assert_eq!(r.plan_name(), "medium");
            }
            other => panic!("expected resolved, got {:?}", other),
        }
    }

    #[test]
    fn test_plan_lookup_carrying_offering_name() {
        let record = ServiceInstanceRecord::managed("si-1", "queue").with_plan(s("plan-1"), None);
        let mut table = LookupTable::new();
        let mut details = plan("plan-1", "lemur", Some("off-1"));
        details.offering_name = s("p.rabbit");
        table.insert_plan("plan-1".to_string(), Ok(details));

        assert!(InstanceResolver::pending_offering_guids(&[record.clone()], &table).is_empty());
        match InstanceResolver::resolve(&record, &table) {
            Resolution::Resolved(r) => assert_eq!(r.offering_name(), "p.rabbit"),
            other => panic!("expected resolved, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_plan_lookup_is_unresolved() {
        let record = ServiceInstanceRecord::managed("si-1", "db").with_plan(s("plan-x"), None);
        let mut table = LookupTable::new();
        table.insert_plan("plan-x".to_string(), Err("status 404".to_string()));

        match InstanceResolver::resolve(&record, &table) {
            Resolution::Unresolved(u) => {
                assert_eq!(u.instance_guid, "si-1");
                assert!(u.reason.contains("plan lookup failed"));
                assert!(u.reason.contains("404"));
            }
            other => panic!("expected unresolved, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_offering_lookup_is_unresolved() {
        let record = ServiceInstanceRecord::managed("si-1", "db")
            .with_plan(s("plan-1"), s("10mb"))
            .with_offering(s("off-1"), None);
        let mut table = LookupTable::new();
        table.insert_offering("off-1".to_string(), Err("timed out".to_string()));

        match InstanceResolver::resolve(&record, &table) {
            Resolution::Unresolved(u) => assert!(u.reason.contains("offering lookup failed")),
            other => panic!("expected unresolved, got {:?}", other),
        }
    }

    #[test]
    fn test_managed_without_plan_is_unresolved() {
        let record = ServiceInstanceRecord::managed("si-1", "orphan");
        match InstanceResolver::resolve(&record, &LookupTable::new()) {
            Resolution::Unresolved(u) => assert_eq!(u.reason, "instance has no service plan"),
            other => panic!("expected unresolved, got {:?}", other),
        }
    }

    #[test]
    fn test_inline_plan_name_survives_failed_lookup() {
        // another record sharing the plan GUID triggered a failed lookup;
        // inline names still win for this one
        let record = ServiceInstanceRecord::managed("si-1", "db")
            .with_plan(s("plan-1"), s("10mb"))
            .with_offering(None, s("p.mysql"));
        let mut table = LookupTable::new();
        table.insert_plan("plan-1".to_string(), Err("boom".to_string()));

        assert!(matches!(
            InstanceResolver::resolve(&record, &table),
            Resolution::Resolved(_)
        ));
    }
}
