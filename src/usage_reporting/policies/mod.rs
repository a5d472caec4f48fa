pub mod managed_offerings;
pub mod plan_ordering;

pub use managed_offerings::ManagedOfferings;
pub use plan_ordering::PlanOrdering;
