//! Order inference result records

use serde::{Deserialize, Serialize};

/// Grade of trust in an inferred order
///
/// `Unknown` is a first-class, frequent outcome: the engine refuses to guess
/// rather than fabricate an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingConfidence {
    /// Numerically grounded: semver, plain numbers, years, composite
    /// year+patch codes
    Certain,

    /// Semantically grounded but not numeric: roman numerals, ordinal words,
    /// closed vocabulary rank tables
    Inferred,

    /// No supported strategy matched the full value set
    Unknown,
}

impl OrderingConfidence {
    /// Get the confidence name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderingConfidence::Certain => "certain",
            OrderingConfidence::Inferred => "inferred",
            OrderingConfidence::Unknown => "unknown",
        }
    }

    /// Parse a confidence from a string (storage layer use)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "certain" => Some(OrderingConfidence::Certain),
            "inferred" => Some(OrderingConfidence::Inferred),
            "unknown" => Some(OrderingConfidence::Unknown),
            _ => None,
        }
    }
}

/// Shape of a discovered order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Every value is comparable to every other
    Total,

    /// No order was discovered
    None,
}

/// Outcome of order inference for one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInferenceResult {
    /// The axis the inference ran over
    pub axis_key: String,

    /// Whether a total order was discovered
    pub is_orderable: bool,

    /// Shape of the discovered order
    pub order_type: OrderType,

    /// Grade of trust in the order
    pub confidence: OrderingConfidence,

    /// The values in inferred order; present iff `is_orderable`, and always
    /// a permutation of the input set
    pub inferred_order: Option<Vec<String>>,

    /// Which strategy ordered the set, or why none could
    pub reason: String,
}

impl OrderInferenceResult {
    /// A result refusing to order the given set
    pub fn unordered(axis_key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            axis_key: axis_key.into(),
            is_orderable: false,
            order_type: OrderType::None,
            confidence: OrderingConfidence::Unknown,
            inferred_order: None,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unordered_constructor() {
        let r = OrderInferenceResult::unordered("color", "no pattern");
        assert!(!r.is_orderable);
        assert_eq!(r.order_type, OrderType::None);
        assert_eq!(r.confidence, OrderingConfidence::Unknown);
        assert!(r.inferred_order.is_none());
    }

    #[test]
    fn test_confidence_roundtrip() {
        for c in [
            OrderingConfidence::Certain,
            OrderingConfidence::Inferred,
            OrderingConfidence::Unknown,
        ] {
            assert_eq!(OrderingConfidence::parse(c.as_str()), Some(c));
        }
        assert_eq!(OrderingConfidence::parse("sure"), None);
    }
}
