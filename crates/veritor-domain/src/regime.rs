//! Truth regime - the epistemic category of an assertion

/// Epistemic category of a claim's assertion
///
/// Classifies the *kind* of statement a claim makes, which decides how strict
/// a value comparison must be. Assigned per claim at extraction time and
/// immutable for the life of the claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TruthRegime {
    /// A hard requirement ("must use TLS 1.2"); always exact-match
    NormativeStrict,

    /// A bounded requirement ("within 30 days"); always exact-match
    NormativeBounded,

    /// Approximate or marketing-style language ("about 99% uptime");
    /// the only regime eligible for tolerance
    DescriptiveApprox,

    /// A statistical result (p-values, confidence intervals); already
    /// bounded, so always exact-match
    EmpiricalStatistical,
}

impl TruthRegime {
    /// Get the regime name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TruthRegime::NormativeStrict => "normative_strict",
            TruthRegime::NormativeBounded => "normative_bounded",
            TruthRegime::DescriptiveApprox => "descriptive_approx",
            TruthRegime::EmpiricalStatistical => "empirical_statistical",
        }
    }

    /// Parse a regime from a string (internal use)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normative_strict" => Some(TruthRegime::NormativeStrict),
            "normative_bounded" => Some(TruthRegime::NormativeBounded),
            "descriptive_approx" => Some(TruthRegime::DescriptiveApprox),
            "empirical_statistical" => Some(TruthRegime::EmpiricalStatistical),
            _ => None,
        }
    }
}

impl std::str::FromStr for TruthRegime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid truth regime: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for regime in [
            TruthRegime::NormativeStrict,
            TruthRegime::NormativeBounded,
            TruthRegime::DescriptiveApprox,
            TruthRegime::EmpiricalStatistical,
        ] {
            assert_eq!(TruthRegime::parse(regime.as_str()), Some(regime));
        }
        assert_eq!(TruthRegime::parse("marketing"), None);
    }
}
