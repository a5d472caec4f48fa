//! Cloud Controller V3 response bodies
//!
//! Only the fields the usage report reads are modelled; everything else in
//! the payload is ignored by serde.

use crate::usage_reporting::domain::{InstanceKind, PlanDetails, ServiceInstanceRecord};
use serde::Deserialize;
use std::collections::HashMap;

/// One page of `GET /v3/service_instances`
#[derive(Debug, Deserialize)]
pub struct ServiceInstancePage {
    pub pagination: Pagination,
    #[serde(default)]
    pub resources: Vec<ServiceInstanceResource>,
    #[serde(default)]
    pub included: Included,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<usize>,
    #[serde(default)]
    pub next: Option<Link>,
}

#[derive(Debug, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Deserialize)]
pub struct ServiceInstanceResource {
    pub guid: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub relationships: InstanceRelationships,
}

#[derive(Debug, Default, Deserialize)]
pub struct InstanceRelationships {
    #[serde(default)]
    pub space: Option<ToOne>,
    #[serde(default)]
    pub service_plan: Option<ToOne>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToOne {
    #[serde(default)]
    pub data: Option<GuidRef>,
}

#[derive(Debug, Deserialize)]
pub struct GuidRef {
    pub guid: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Included {
    #[serde(default)]
    pub service_plans: Vec<PlanResource>,
    #[serde(default)]
    pub service_offerings: Vec<OfferingResource>,
}

#[derive(Debug, Deserialize)]
pub struct PlanResource {
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub relationships: PlanRelationships,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlanRelationships {
    #[serde(default)]
    pub service_offering: Option<ToOne>,
}

#[derive(Debug, Deserialize)]
pub struct OfferingResource {
    pub guid: String,
    pub name: String,
}

/// `GET /v3/service_plans/:guid?include=service_offering`
#[derive(Debug, Deserialize)]
pub struct PlanResponse {
    #[serde(flatten)]
    pub plan: PlanResource,
    #[serde(default)]
    pub included: Included,
}

fn guid_of(to_one: Option<&ToOne>) -> Option<String> {
    to_one
        .and_then(|rel| rel.data.as_ref())
        .map(|data| data.guid.clone())
}

impl PlanResource {
    pub fn offering_guid(&self) -> Option<String> {
        guid_of(self.relationships.service_offering.as_ref())
    }
}

impl ServiceInstancePage {
    pub fn next_href(&self) -> Option<&str> {
        self.pagination.next.as_ref().map(|link| link.href.as_str())
    }

    /// Converts the page into records, joining names from `included`
    pub fn into_records(self) -> Vec<ServiceInstanceRecord> {
        let offerings: HashMap<&str, &str> = self
            .included
            .service_offerings
            .iter()
            .map(|o| (o.guid.as_str(), o.name.as_str()))
            .collect();
        let plans: HashMap<&str, &PlanResource> = self
            .included
            .service_plans
            .iter()
            .map(|p| (p.guid.as_str(), p))
            .collect();

        self.resources
            .iter()
            .map(|resource| {
                let kind = match resource.kind.as_deref() {
                    Some("user-provided") => InstanceKind::UserProvided,
                    _ => InstanceKind::Managed,
                };
                let mut record = ServiceInstanceRecord::new(&resource.guid, &resource.name, kind);

                if let Some(space_guid) = guid_of(resource.relationships.space.as_ref()) {
                    record = record.with_space_guid(space_guid);
                }

                let plan_guid = guid_of(resource.relationships.service_plan.as_ref());
                let plan = plan_guid.as_deref().and_then(|guid| plans.get(guid));
                let offering_guid = plan.and_then(|p| p.offering_guid());
                let offering_name = offering_guid
                    .as_deref()
                    .and_then(|guid| offerings.get(guid))
                    .map(|name| name.to_string());

                record
                    .with_plan(plan_guid.clone(), plan.map(|p| p.name.clone()))
                    .with_offering(offering_guid, offering_name)
            })
            .collect()
    }
}

impl PlanResponse {
    pub fn into_details(self) -> PlanDetails {
        let offering_guid = self.plan.offering_guid();
        let offering_name = offering_guid.as_deref().and_then(|guid| {
            self.included
                .service_offerings
                .iter()
                .find(|o| o.guid == guid)
                .map(|o| o.name.clone())
        });

        PlanDetails {
            guid: self.plan.guid,
            name: self.plan.name,
            offering_guid,
            offering_name,
        }
    }
}
