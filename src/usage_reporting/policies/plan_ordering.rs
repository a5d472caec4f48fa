use std::fmt;

/// Order of plans within a product
///
/// Products are always sorted by name. Plans are kept in the order each plan
/// was first observed unless sorting by name is requested, which makes the
/// report independent of the order the API returned instances in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanOrdering {
    #[default]
    FirstSeen,
    Lexicographic,
}

impl std::str::FromStr for PlanOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lexicographic" | "sorted" | "name" => Ok(PlanOrdering::Lexicographic),
            "first-seen" | "first_seen" | "observed" => Ok(PlanOrdering::FirstSeen),
            _ => Err(format!(
                "Invalid plan order: {}. Please specify 'lexicographic' or 'first-seen'",
                s
            )),
        }
    }
}

impl fmt::Display for PlanOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanOrdering::Lexicographic => write!(f, "lexicographic"),
            PlanOrdering::FirstSeen => write!(f, "first-seen"),
        }
    }
}
