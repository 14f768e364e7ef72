//! Error types for temporal queries

use thiserror::Error;

/// Faults a temporal query can surface
///
/// Refusals, unknown orderings, and budget degradation are modeled in the
/// result records, not here; this enum covers the cases where no result
/// record can honestly be produced.
#[derive(Debug, Error)]
pub enum TemporalError {
    /// The underlying claim store failed
    #[error("claim store error: {0}")]
    Store(String),

    /// A non-refused query found no claims at all to cite
    #[error("no evidence recorded for capability '{capability}'")]
    NoEvidence {
        /// The capability the query targeted
        capability: String,
    },

    /// An applicability query referenced a claim the store does not hold
    #[error("claim not found: {0}")]
    ClaimNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TemporalError::NoEvidence {
            capability: "Feature X".to_string(),
        };
        assert!(err.to_string().contains("Feature X"));

        let err = TemporalError::Store("connection reset".to_string());
        assert!(err.to_string().contains("connection reset"));
    }
}
