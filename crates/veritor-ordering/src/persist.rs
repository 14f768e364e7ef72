//! Persisted orderings
//!
//! An inferred order is worth keeping only as long as the value set it was
//! computed from is unchanged. `StoredOrdering` carries a fingerprint of
//! that set, and `OrderingStore` implementations use it to decide whether a
//! cached order still applies.

use serde::{Deserialize, Serialize};

use crate::result::{OrderInferenceResult, OrderingConfidence};

/// A persisted axis ordering, tied to the value set it was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOrdering {
    /// The axis this ordering covers
    pub axis_key: String,

    /// The values in inferred order
    pub values: Vec<String>,

    /// Grade of trust the inference assigned
    pub confidence: OrderingConfidence,

    /// How the order was derived
    pub strategy: String,

    /// Fingerprint of the distinct value set the order was computed from
    pub input_fingerprint: String,

    /// Unix timestamp (seconds) of the computation
    pub computed_at: u64,
}

impl StoredOrdering {
    /// Build a stored ordering from a successful inference result
    ///
    /// Returns `None` when the result carries no order.
    pub fn from_result(result: &OrderInferenceResult, computed_at: u64) -> Option<Self> {
        let values = result.inferred_order.clone()?;
        Some(Self {
            axis_key: result.axis_key.clone(),
            input_fingerprint: fingerprint(&values),
            values,
            confidence: result.confidence,
            strategy: result.reason.clone(),
            computed_at,
        })
    }

    /// Whether this stored ordering was computed from exactly `values`
    pub fn matches_input(&self, values: &[String]) -> bool {
        self.input_fingerprint == fingerprint(values)
    }
}

/// Order-insensitive fingerprint of a value set
pub fn fingerprint(values: &[String]) -> String {
    let mut sorted: Vec<&str> = values.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.join("\u{1f}")
}

/// Storage for persisted orderings, keyed by axis
pub trait OrderingStore {
    /// Storage-specific error type
    type Error;

    /// Fetch the stored ordering for an axis, if any
    fn stored_ordering(&self, axis_key: &str) -> Result<Option<StoredOrdering>, Self::Error>;

    /// Persist an ordering, replacing any previous one for the same axis
    fn put_ordering(&mut self, ordering: StoredOrdering) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AxisOrderInferrer;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fingerprint_is_order_insensitive() {
        let a = fingerprint(&strings(&["2021", "2022", "2021 FPS01"]));
        let b = fingerprint(&strings(&["2022", "2021 FPS01", "2021"]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_distinguishes_sets() {
        let a = fingerprint(&strings(&["2021", "2022"]));
        let b = fingerprint(&strings(&["2021", "2022", "2023"]));
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_result_carries_the_order() {
        let inferrer = AxisOrderInferrer::new();
        let result = inferrer.infer_order("year", &strings(&["2022", "2019"]));
        let stored = StoredOrdering::from_result(&result, 1_700_000_000).unwrap();
        assert_eq!(stored.values, strings(&["2019", "2022"]));
        assert!(stored.matches_input(&strings(&["2019", "2022"])));
        assert!(stored.matches_input(&strings(&["2022", "2019"])));
        assert!(!stored.matches_input(&strings(&["2019", "2022", "2023"])));
    }

    #[test]
    fn test_from_result_refuses_unordered() {
        let inferrer = AxisOrderInferrer::new();
        let result = inferrer.infer_order("color", &strings(&["red", "blue"]));
        assert!(StoredOrdering::from_result(&result, 1_700_000_000).is_none());
    }
}
