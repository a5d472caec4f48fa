use crate::usage_reporting::policies::PlanOrdering;
use std::time::Duration;

/// Default deadline for fetching and resolving all instances
pub const DEFAULT_DEADLINE_SECS: u64 = 60;

/// Default bound on concurrent catalog lookups
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 10;

/// UsageReportRequest - Internal request DTO for the usage report use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageReportRequest {
    /// Order of plans within each product
    pub plan_ordering: PlanOrdering,
    /// Overall deadline for the fetch-and-resolve phase
    pub deadline: Duration,
    /// Maximum number of catalog lookups in flight, never zero
    max_concurrent_lookups: usize,
}

impl UsageReportRequest {
    pub fn new(plan_ordering: PlanOrdering, deadline: Duration) -> Self {
        Self {
            plan_ordering,
            deadline,
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
        }
    }

    pub fn with_max_concurrent_lookups(mut self, max_concurrent_lookups: usize) -> Self {
        self.max_concurrent_lookups = max_concurrent_lookups.max(1);
        self
    }

    pub fn max_concurrent_lookups(&self) -> usize {
        self.max_concurrent_lookups
    }
}

impl Default for UsageReportRequest {
    fn default() -> Self {
        Self::new(
            PlanOrdering::default(),
            Duration::from_secs(DEFAULT_DEADLINE_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request() {
        let request = UsageReportRequest::default();
        assert_eq!(request.plan_ordering, PlanOrdering::FirstSeen);
        assert_eq!(request.deadline, Duration::from_secs(60));
        assert_eq!(request.max_concurrent_lookups(), 10);
    }

    #[test]
    fn test_concurrency_is_at_least_one() {
        let request = UsageReportRequest::default().with_max_concurrent_lookups(0);
        assert_eq!(request.max_concurrent_lookups(), 1);
    }
}
