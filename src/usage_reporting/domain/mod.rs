pub mod service_instance;
pub mod usage_report;

pub use service_instance::{
    InstanceKind, PlanDetails, ResolvedInstance, ServiceInstanceRecord, UnresolvedInstance,
};
pub use usage_report::{Plan, Product, Report};
