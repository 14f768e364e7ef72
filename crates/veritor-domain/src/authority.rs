//! Authority level - trust tier of a claim's source document

/// Trust tier of a claim's source document
///
/// Assigned upstream from the document's trust classification (a signed
/// contract or spec ranks HIGH, a marketing slide ranks LOW). The tolerance
/// policy takes HIGH-authority values as exact regardless of phrasing.
///
/// The derived `Ord` follows the declaration order: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AuthorityLevel {
    /// Marketing and sales collateral
    Low,

    /// Product documentation, release notes
    Medium,

    /// Contracts, security whitepapers, signed specifications
    High,
}

impl AuthorityLevel {
    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorityLevel::Low => "low",
            AuthorityLevel::Medium => "medium",
            AuthorityLevel::High => "high",
        }
    }

    /// Parse a level from a string (internal use)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(AuthorityLevel::Low),
            "medium" => Some(AuthorityLevel::Medium),
            "high" => Some(AuthorityLevel::High),
            _ => None,
        }
    }
}

impl std::str::FromStr for AuthorityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid authority level: {}", s))
    }
}
