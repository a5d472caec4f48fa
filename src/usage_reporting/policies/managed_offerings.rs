/// Offering names counted by the usage report.
///
/// Managed database, cache and messaging offerings. Everything else,
/// including user-provided and third-party broker offerings, is left out.
const MANAGED_OFFERINGS: &[&str] = &["p.mysql", "p.pcc", "p.rabbit", "p.redis"];

/// ManagedOfferings policy - decides which offerings appear in a report
pub struct ManagedOfferings;

impl ManagedOfferings {
    /// Returns true if instances of this offering are reportable
    pub fn is_managed(offering_name: &str) -> bool {
        MANAGED_OFFERINGS.contains(&offering_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_managed_offerings() {
        for name in ["p.mysql", "p.pcc", "p.rabbit", "p.redis"] {
            assert!(ManagedOfferings::is_managed(name), "{} should be managed", name);
        }
    }

    #[test]
    fn test_unmanaged_offerings() {
        assert!(!ManagedOfferings::is_managed("p-mysql"));
        assert!(!ManagedOfferings::is_managed("P.MYSQL"));
        assert!(!ManagedOfferings::is_managed("elephantsql"));
        assert!(!ManagedOfferings::is_managed(""));
    }
}
