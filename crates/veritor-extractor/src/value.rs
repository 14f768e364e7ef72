//! Typed value records produced by extraction

use serde::{Deserialize, Serialize};

/// The closed set of value kinds extraction can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// A percentage, normalized to a [0, 1] fraction
    Percent,

    /// A dotted version identifier ("1.2", "v3.0.1", "TLS 1.3")
    Version,

    /// A number with a recognized unit (storage, duration)
    Number,

    /// An enabling/disabling statement
    Boolean,

    /// A member of a closed controlled vocabulary (frequency, severity, ...)
    Enum,

    /// Text carried no recognizable value
    NoValue,
}

impl ValueKind {
    /// Get the kind name as a string, used as the tolerance lookup key
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Percent => "percent",
            ValueKind::Version => "version",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Enum => "enum",
            ValueKind::NoValue => "no_value",
        }
    }
}

/// Comparison operator attached to a value
///
/// Defaulted to `Eq` when the claim wording carries no comparison word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueOperator {
    /// Stated exactly
    Eq,
    /// "minimum", "at least"
    Ge,
    /// "maximum", "at most"
    Le,
    /// "exceeds", "above"
    Gt,
    /// "below", "under"
    Lt,
    /// "approximately", "about"
    Approx,
}

/// Whether approximate comparison is ever meaningful for a value
///
/// Informational classification from extraction; the tolerance policy keeps
/// its own always-strict set and is authoritative for the numeric slack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparableClass {
    /// Identity-like values: versions, booleans, percents, enum tokens
    Strict,
    /// Magnitudes that may be stated with rounding
    Tolerant,
}

/// Normalized payload of an extracted value
///
/// Modeled as a sum type so callers must match on what was actually
/// extracted; there is no nullable field with an implicit meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizedValue {
    /// Numeric payload (percent as a fraction, number+unit as stated)
    Number(f64),
    /// Dotted version string, truncated to at most 3 levels
    Version(String),
    /// Enabling/disabling statement
    Boolean(bool),
    /// Canonical lowercase vocabulary token
    Token(String),
    /// No value present
    Absent,
}

/// A typed, comparable value parsed from claim text
///
/// Immutable: created once per claim-text parse, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedValue {
    /// Which pattern category matched
    pub kind: ValueKind,

    /// The exact text fragment the pattern matched
    pub raw_text: String,

    /// The normalized payload
    pub normalized: NormalizedValue,

    /// Unit token preserved verbatim (Number), "%" (Percent), or the
    /// vocabulary name that matched (Enum, used as a pseudo-kind for
    /// tolerance lookup)
    pub unit: Option<String>,

    /// Inferred comparison operator
    pub operator: ValueOperator,

    /// Comparability classification
    pub comparable_class: ComparableClass,
}

impl ExtractedValue {
    /// The record extraction produces when text carries no recognizable value
    pub fn no_value(raw_text: impl Into<String>) -> Self {
        Self {
            kind: ValueKind::NoValue,
            raw_text: raw_text.into(),
            normalized: NormalizedValue::Absent,
            unit: None,
            operator: ValueOperator::Eq,
            comparable_class: ComparableClass::Strict,
        }
    }

    /// Numeric payload, if this value carries one
    pub fn as_number(&self) -> Option<f64> {
        match self.normalized {
            NormalizedValue::Number(n) => Some(n),
            _ => None,
        }
    }
}
