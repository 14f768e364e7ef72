//! ClaimKey status - review state of a (capability, axis) pairing

/// Review state of the (capability, axis) pairing a temporal query targets
///
/// Produced by the upstream canonicalization/review pipeline and consumed
/// read-only here. A `Candidate` capability is machine-proposed and
/// unreviewed; its very existence is unverified, so the temporal engine
/// refuses to publish timelines for it no matter how much evidence exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimKeyStatus {
    /// Machine-proposed, not yet reviewed
    Candidate,

    /// Passed the review gate
    Validated,
}

impl ClaimKeyStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimKeyStatus::Candidate => "candidate",
            ClaimKeyStatus::Validated => "validated",
        }
    }

    /// Parse a status from a string (internal use)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "candidate" => Some(ClaimKeyStatus::Candidate),
            "validated" => Some(ClaimKeyStatus::Validated),
            _ => None,
        }
    }

    /// Whether queries against this key may be answered
    pub fn is_validated(&self) -> bool {
        matches!(self, ClaimKeyStatus::Validated)
    }
}

impl std::str::FromStr for ClaimKeyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid claim key status: {}", s))
    }
}
