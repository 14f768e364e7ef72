//! Serializable temporal query result records
//!
//! Every non-refused result carries a non-empty citation list. Conditionally
//! present fields (`timeline`, `removal_evidence`) are `Option`s so callers
//! must match on presence rather than trust a sentinel.

use serde::{Deserialize, Serialize};
use veritor_domain::Claim;
use veritor_ordering::OrderingConfidence;

/// A citation pointing back at a concrete claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimCitation {
    /// The cited claim's ID, rendered as a UUID string
    pub claim_id: String,

    /// Source document of the claim
    pub doc_id: String,

    /// The exact quote the claim was extracted from
    pub quote: String,
}

impl ClaimCitation {
    /// Cite a claim
    pub fn from_claim(claim: &Claim) -> Self {
        Self {
            claim_id: claim.id.to_string(),
            doc_id: claim.doc_id.clone(),
            quote: claim.verbatim_quote.clone(),
        }
    }
}

/// Answer to "since when has this capability existed?"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinceWhenResult {
    /// The capability queried
    pub capability: String,

    /// Earliest known context the capability appears in; absent only when
    /// the query could not resolve far enough to name one
    pub first_occurrence_context: Option<String>,

    /// Claims supporting the first occurrence; non-empty unless `refused`
    pub first_occurrence_claims: Vec<ClaimCitation>,

    /// The ordered contexts the capability appears in, earliest first;
    /// present only when ordering succeeded, never synthesized
    pub timeline: Option<Vec<String>>,

    /// Granularity of timeline positions; always document-cluster in this
    /// version
    pub timeline_basis: String,

    /// Confidence grade of the axis ordering behind the timeline
    pub ordering_confidence: OrderingConfidence,

    /// Whether the query was refused outright
    pub refused: bool,

    /// Why the query was refused, when it was
    pub refused_reason: Option<String>,

    /// Why the timeline could not be resolved, when it could not
    pub unresolved_reason: Option<String>,
}

/// Terminal outcome of an applicability query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicabilityStatus {
    /// The claim still holds at the latest known context
    Applicable,

    /// A later claim explicitly documents removal or deprecation
    Removed,

    /// Ordering, evidence density, or budget was insufficient to decide
    Uncertain,
}

impl ApplicabilityStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicabilityStatus::Applicable => "applicable",
            ApplicabilityStatus::Removed => "removed",
            ApplicabilityStatus::Uncertain => "uncertain",
        }
    }
}

/// Why a query came back `Uncertain`, and what to do about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncertaintyAnalysis {
    /// Rough confidence hint for the caller
    pub confidence_hint: String,

    /// Recommended next action, never a forced guess
    pub recommended_action: String,
}

impl UncertaintyAnalysis {
    /// The standard "go check by hand" analysis
    pub fn manual_review(hint: impl Into<String>) -> Self {
        Self {
            confidence_hint: hint.into(),
            recommended_action: "manual verification recommended".to_string(),
        }
    }
}

/// Answer to "does this claim still apply?"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StillApplicableResult {
    /// The claim that was checked, rendered as a UUID string
    pub claim_id: String,

    /// Terminal classification
    pub status: ApplicabilityStatus,

    /// Latest known context for the claim's capability, when resolvable
    pub latest_context: Option<String>,

    /// Claims the classification rests on; always non-empty
    pub supporting_claims: Vec<ClaimCitation>,

    /// The claim documenting removal; present iff `status == Removed`
    pub removal_evidence: Option<ClaimCitation>,

    /// Present iff `status == Uncertain`
    pub uncertainty_analysis: Option<UncertaintyAnalysis>,
}

/// Diff of the claims attached to two contexts of one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextDiff {
    /// First context compared
    pub context_a: String,

    /// Second context compared
    pub context_b: String,

    /// Claims observed in the first context
    pub claims_a: Vec<ClaimCitation>,

    /// Claims observed in the second context
    pub claims_b: Vec<ClaimCitation>,

    /// Claim texts present in the first context but not the second
    pub only_in_a: Vec<ClaimCitation>,

    /// Claim texts present in the second context but not the first
    pub only_in_b: Vec<ClaimCitation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritor_domain::{AuthorityLevel, Claim, TruthRegime};

    #[test]
    fn test_citation_from_claim() {
        let claim = Claim::new(
            "Feature X",
            "Feature X supports TLS 1.2",
            "supports TLS 1.2 at minimum",
            "doc-1",
            AuthorityLevel::Medium,
            TruthRegime::NormativeStrict,
            1_700_000_000,
        );
        let citation = ClaimCitation::from_claim(&claim);
        assert_eq!(citation.claim_id, claim.id.to_string());
        assert_eq!(citation.doc_id, "doc-1");
        assert_eq!(citation.quote, "supports TLS 1.2 at minimum");
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&ApplicabilityStatus::Uncertain).unwrap();
        assert_eq!(json, "\"uncertain\"");
    }
}
