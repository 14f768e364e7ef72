//! Versioned wire records
//!
//! The persisted encoding is decoupled from the in-memory types: the store
//! writes `OrderingRecord` JSON tagged with a schema version, and decodes it
//! back into `StoredOrdering` on read. Unknown future versions are a decode
//! error, not a silent misread.

use serde::{Deserialize, Serialize};
use veritor_ordering::{OrderingConfidence, StoredOrdering};

/// Current ordering record schema version
pub const ORDERING_SCHEMA_VERSION: u32 = 1;

/// Persisted form of a [`StoredOrdering`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderingRecord {
    /// Schema version tag; readers reject versions they do not know
    pub schema_version: u32,

    /// The axis this ordering covers
    pub axis_key: String,

    /// The values in inferred order
    pub values: Vec<String>,

    /// Confidence grade, as its string name
    pub confidence: String,

    /// How the order was derived
    pub strategy: String,

    /// Fingerprint of the value set the order was computed from
    pub input_fingerprint: String,

    /// Unix timestamp (seconds) of the computation
    pub computed_at: u64,
}

impl OrderingRecord {
    /// Encode a stored ordering at the current schema version
    pub fn from_ordering(ordering: &StoredOrdering) -> Self {
        Self {
            schema_version: ORDERING_SCHEMA_VERSION,
            axis_key: ordering.axis_key.clone(),
            values: ordering.values.clone(),
            confidence: ordering.confidence.as_str().to_string(),
            strategy: ordering.strategy.clone(),
            input_fingerprint: ordering.input_fingerprint.clone(),
            computed_at: ordering.computed_at,
        }
    }

    /// Decode back into the in-memory type
    ///
    /// Fails on unknown schema versions or confidence names.
    pub fn into_ordering(self) -> Result<StoredOrdering, String> {
        if self.schema_version != ORDERING_SCHEMA_VERSION {
            return Err(format!(
                "unsupported ordering schema version {}",
                self.schema_version
            ));
        }
        let confidence = OrderingConfidence::parse(&self.confidence)
            .ok_or_else(|| format!("unknown ordering confidence '{}'", self.confidence))?;
        Ok(StoredOrdering {
            axis_key: self.axis_key,
            values: self.values,
            confidence,
            strategy: self.strategy,
            input_fingerprint: self.input_fingerprint,
            computed_at: self.computed_at,
        })
    }
}
