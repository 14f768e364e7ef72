//! Query engine configuration

use std::time::Duration;

/// Resource budget for a single temporal query
///
/// Exhausting either limit never truncates an answer silently: since-when
/// queries report an unresolved timeline and applicability queries degrade
/// to `Uncertain`.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Wall-clock budget for one query, store reads included
    pub time_budget: Duration,

    /// Maximum number of claims a query will consider
    pub max_claims: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(2),
            max_claims: 5_000,
        }
    }
}

impl QueryConfig {
    /// Tight budget for interactive callers
    pub fn interactive() -> Self {
        Self {
            time_budget: Duration::from_millis(250),
            max_claims: 500,
        }
    }

    /// Generous budget for batch tooling
    pub fn batch() -> Self {
        Self {
            time_budget: Duration::from_secs(30),
            max_claims: 100_000,
        }
    }
}
