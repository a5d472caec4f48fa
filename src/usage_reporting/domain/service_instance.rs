use crate::shared::Result;
use std::fmt;

/// Kind of a service instance as reported by the control plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceKind {
    /// Provisioned from a broker offering and plan
    Managed,
    /// Credentials supplied by the user; has no plan or offering
    UserProvided,
}

/// ServiceInstanceRecord - a raw service instance as fetched from the API
///
/// Plan and offering may be known only by GUID, only by name, or both,
/// depending on how much the list payload inlined. Records are immutable
/// once the API client returns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInstanceRecord {
    guid: String,
    name: String,
    kind: InstanceKind,
    space_guid: Option<String>,
    plan_guid: Option<String>,
    plan_name: Option<String>,
    offering_guid: Option<String>,
    offering_name: Option<String>,
}

impl ServiceInstanceRecord {
    pub fn new(guid: impl Into<String>, name: impl Into<String>, kind: InstanceKind) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
            kind,
            space_guid: None,
            plan_guid: None,
            plan_name: None,
            offering_guid: None,
            offering_name: None,
        }
    }

    /// Shorthand for a managed instance
    pub fn managed(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(guid, name, InstanceKind::Managed)
    }

    pub fn with_space_guid(mut self, space_guid: impl Into<String>) -> Self {
        self.space_guid = Some(space_guid.into());
        self
    }

    pub fn with_plan(mut self, guid: Option<String>, name: Option<String>) -> Self {
        self.plan_guid = non_empty(guid);
        self.plan_name = non_empty(name);
        self
    }

    pub fn with_offering(mut self, guid: Option<String>, name: Option<String>) -> Self {
        self.offering_guid = non_empty(guid);
        self.offering_name = non_empty(name);
        self
    }

    pub fn guid(&self) -> &str {
        &self.guid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> InstanceKind {
        self.kind
    }

    pub fn space_guid(&self) -> Option<&str> {
        self.space_guid.as_deref()
    }

    pub fn plan_guid(&self) -> Option<&str> {
        self.plan_guid.as_deref()
    }

    pub fn plan_name(&self) -> Option<&str> {
        self.plan_name.as_deref()
    }

    pub fn offering_guid(&self) -> Option<&str> {
        self.offering_guid.as_deref()
    }

    pub fn offering_name(&self) -> Option<&str> {
        self.offering_name.as_deref()
    }

    /// True when both names were inlined and no secondary lookup is needed
    pub fn is_inline_resolved(&self) -> bool {
        self.plan_name.is_some() && self.offering_name.is_some()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// PlanDetails - result of a plan lookup against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDetails {
    pub guid: String,
    pub name: String,
    pub offering_guid: Option<String>,
    /// Present when the catalog returned the offering alongside the plan
    pub offering_name: Option<String>,
}

/// ResolvedInstance - the two dimensions a usage report groups by
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedInstance {
    offering_name: String,
    plan_name: String,
}

impl ResolvedInstance {
    pub fn new(offering_name: String, plan_name: String) -> Result<Self> {
        if offering_name.trim().is_empty() {
            anyhow::bail!("Offering name cannot be empty");
        }
        if plan_name.trim().is_empty() {
            anyhow::bail!("Plan name cannot be empty");
        }

        Ok(Self {
            offering_name,
            plan_name,
        })
    }

    pub fn offering_name(&self) -> &str {
        &self.offering_name
    }

    pub fn plan_name(&self) -> &str {
        &self.plan_name
    }
}

/// UnresolvedInstance - diagnostic for an instance dropped from the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedInstance {
    pub instance_guid: String,
    pub instance_name: String,
    pub reason: String,
}

impl UnresolvedInstance {
    pub fn new(record: &ServiceInstanceRecord, reason: impl Into<String>) -> Self {
        Self {
            instance_guid: record.guid().to_string(),
            instance_name: record.name().to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for UnresolvedInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.instance_name, self.instance_guid, self.reason
        )
    }
}
