//! Claim module - the unit of evidence everything else cites

use std::collections::BTreeMap;
use std::fmt;

use crate::{AuthorityLevel, TruthRegime};

/// Unique identifier for a claim based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability, which the temporal engine uses for
///   earliest-seen tie-breaking
/// - 128-bit uniqueness
/// - RFC 9562-standard format with broad ecosystem support
/// - No coordination required for distributed generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimId(u128);

impl ClaimId {
    /// Generate a new UUIDv7-based ClaimId
    ///
    /// # Examples
    ///
    /// ```
    /// use veritor_domain::ClaimId;
    ///
    /// let id = ClaimId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a ClaimId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a ClaimId from a UUIDv7 string
    ///
    /// # Examples
    ///
    /// ```
    /// use veritor_domain::ClaimId;
    ///
    /// let id = ClaimId::new();
    /// let parsed = ClaimId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for ClaimId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A claim extracted from a document
///
/// Claims are immutable once created; the extraction pipeline writes them,
/// the verification engine only reads them. The `verbatim_quote` is the exact
/// source sentence and is what citation lists carry, so it must never be
/// paraphrased.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,

    /// The capability this claim is evidence for (e.g. "at-rest encryption")
    pub capability: String,

    /// Free text of the claim as extracted
    pub text: String,

    /// Exact quote from the source document
    pub verbatim_quote: String,

    /// Identifier of the source document
    pub doc_id: String,

    /// Trust tier of the source document
    pub authority: AuthorityLevel,

    /// Epistemic category of the assertion
    pub regime: TruthRegime,

    /// Raw value observed per axis (e.g. release_id -> "2021 FPS02")
    ///
    /// BTreeMap so iteration order is deterministic.
    pub axis_context: BTreeMap<String, String>,

    /// When this claim was created (seconds since Unix epoch)
    pub created_at: u64,
}

impl Claim {
    /// Create a new claim with an empty axis context
    pub fn new(
        capability: impl Into<String>,
        text: impl Into<String>,
        verbatim_quote: impl Into<String>,
        doc_id: impl Into<String>,
        authority: AuthorityLevel,
        regime: TruthRegime,
        created_at: u64,
    ) -> Self {
        Self {
            id: ClaimId::new(),
            capability: capability.into(),
            text: text.into(),
            verbatim_quote: verbatim_quote.into(),
            doc_id: doc_id.into(),
            authority,
            regime,
            axis_context: BTreeMap::new(),
            created_at,
        }
    }

    /// Attach an axis value, consuming and returning the claim
    pub fn with_axis(mut self, axis_key: impl Into<String>, value: impl Into<String>) -> Self {
        self.axis_context.insert(axis_key.into(), value.into());
        self
    }

    /// The raw value this claim observed for an axis, if any
    pub fn axis_value(&self, axis_key: &str) -> Option<&str> {
        self.axis_context.get(axis_key).map(String::as_str)
    }
}
