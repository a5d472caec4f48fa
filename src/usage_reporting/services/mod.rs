mod instance_resolver;
mod usage_aggregator;

pub use instance_resolver::{InstanceResolver, LookupTable, Resolution};
pub use usage_aggregator::UsageAggregator;
