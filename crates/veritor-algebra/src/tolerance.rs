//! Truth-regime-aware tolerance policy

use serde::{Deserialize, Serialize};
use veritor_domain::{AuthorityLevel, TruthRegime};
use veritor_extractor::{vocab, ValueKind};

/// Tolerance base rates and scaling, threaded explicitly so tests can
/// substitute alternate policies
///
/// The hedge scaling formula (`base * (1 + hedge * hedge_scale)`, capped at
/// `max_tolerance`) is an empirically chosen constant, not a derived law,
/// which is why it lives here rather than in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToleranceConfig {
    /// Base tolerance for percent-family units
    pub percent_base: f64,

    /// Base tolerance for duration-family units
    pub duration_base: f64,

    /// Base tolerance for everything else
    pub default_base: f64,

    /// How strongly hedged wording widens the base rate
    pub hedge_scale: f64,

    /// Hard upper bound on any computed tolerance
    pub max_tolerance: f64,

    /// Kinds and pseudo-kinds that never receive tolerance; these are binary
    /// or already bounded, and slack would hide a real discrepancy
    pub strict_kinds: Vec<String>,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            percent_base: 0.01,
            duration_base: 0.05,
            default_base: 0.02,
            hedge_scale: 0.5,
            max_tolerance: 0.10,
            strict_kinds: vec![
                "boolean".to_string(),
                "version".to_string(),
                "p_value".to_string(),
                "confidence_interval".to_string(),
            ],
        }
    }
}

impl ToleranceConfig {
    /// A policy that never grants slack, regardless of regime or wording
    pub fn exact() -> Self {
        Self {
            percent_base: 0.0,
            duration_base: 0.0,
            default_base: 0.0,
            hedge_scale: 0.0,
            max_tolerance: 0.0,
            ..Self::default()
        }
    }
}

/// One step of the tolerance decision, for audit output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum ToleranceRule {
    /// A high-authority source's stated value is taken as exact
    HighAuthority,

    /// Only descriptive/approximate claims may receive slack
    NonApproxRegime {
        /// The regime that pinned the result to zero
        regime: String,
    },

    /// The kind or pseudo-kind is in the always-strict set
    AlwaysStrictKind {
        /// The key that matched the strict set
        key: String,
    },

    /// A base rate was selected by unit family
    BaseRate {
        /// Which unit family matched
        family: String,
        /// The selected base rate
        base: f64,
    },

    /// The base rate was widened by hedged wording
    HedgeScaled {
        /// The hedge-strength signal, clamped to [0, 1]
        hedge: f64,
        /// The widened tolerance before capping
        scaled: f64,
    },

    /// The result hit the hard upper bound
    Capped {
        /// The configured cap
        cap: f64,
    },
}

/// The tolerance value plus the rules that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToleranceDecision {
    /// The computed tolerance, in [0, max_tolerance]
    pub tolerance: f64,

    /// The rules that fired, in decision order
    pub fired: Vec<ToleranceRule>,
}

/// Computes the numeric tolerance allowed for an "approximately equal"
/// verdict
///
/// Pure function of its inputs and the configuration; safe to call from any
/// number of concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct TolerancePolicy {
    config: ToleranceConfig,
}

impl TolerancePolicy {
    /// Create a policy with the given configuration
    pub fn new(config: ToleranceConfig) -> Self {
        Self { config }
    }

    /// Create a policy with default configuration
    pub fn default_config() -> Self {
        Self::new(ToleranceConfig::default())
    }

    /// Compute the tolerance for a comparison
    ///
    /// `unit` is the extracted value's unit token, or for enum values the
    /// vocabulary name acting as a pseudo-kind.
    pub fn get_tolerance(
        &self,
        kind: ValueKind,
        unit: Option<&str>,
        regime: TruthRegime,
        authority: AuthorityLevel,
        hedge_strength: f64,
    ) -> f64 {
        // Single code path: the explanation variant is the implementation,
        // so the audit trail can never diverge from the numeric result.
        self.explain_tolerance(kind, unit, regime, authority, hedge_strength)
            .tolerance
    }

    /// Compute the tolerance along with the rules that fired
    pub fn explain_tolerance(
        &self,
        kind: ValueKind,
        unit: Option<&str>,
        regime: TruthRegime,
        authority: AuthorityLevel,
        hedge_strength: f64,
    ) -> ToleranceDecision {
        let mut fired = Vec::new();

        // 1. High-authority sources are exact regardless of phrasing
        if authority == AuthorityLevel::High {
            fired.push(ToleranceRule::HighAuthority);
            return ToleranceDecision { tolerance: 0.0, fired };
        }

        // 2. Only approximate/marketing-style claims may receive slack
        if regime != TruthRegime::DescriptiveApprox {
            fired.push(ToleranceRule::NonApproxRegime { regime: regime.as_str().to_string() });
            return ToleranceDecision { tolerance: 0.0, fired };
        }

        // 3. Always-strict kinds and pseudo-kinds
        if let Some(key) = self.strict_key(kind, unit) {
            fired.push(ToleranceRule::AlwaysStrictKind { key });
            return ToleranceDecision { tolerance: 0.0, fired };
        }

        // 4. Base rate by unit family
        let (family, base) = self.base_rate(kind, unit);
        fired.push(ToleranceRule::BaseRate { family: family.to_string(), base });

        // 5. Hedge scaling, then cap
        let hedge = hedge_strength.clamp(0.0, 1.0);
        let mut tolerance = base;
        if hedge > 0.0 {
            tolerance = base * (1.0 + hedge * self.config.hedge_scale);
            fired.push(ToleranceRule::HedgeScaled { hedge, scaled: tolerance });
        }
        if tolerance > self.config.max_tolerance {
            tolerance = self.config.max_tolerance;
            fired.push(ToleranceRule::Capped { cap: self.config.max_tolerance });
        }

        ToleranceDecision { tolerance, fired }
    }

    fn strict_key(&self, kind: ValueKind, unit: Option<&str>) -> Option<String> {
        let kind_key = normalize_key(kind.as_str());
        if self.config.strict_kinds.iter().any(|k| normalize_key(k) == kind_key) {
            return Some(kind_key);
        }
        if let Some(unit) = unit {
            let unit_key = normalize_key(unit);
            if self.config.strict_kinds.iter().any(|k| normalize_key(k) == unit_key) {
                return Some(unit_key);
            }
        }
        None
    }

    fn base_rate(&self, kind: ValueKind, unit: Option<&str>) -> (&'static str, f64) {
        if kind == ValueKind::Percent || unit.is_some_and(vocab::is_percent_unit) {
            ("percent", self.config.percent_base)
        } else if unit.is_some_and(vocab::is_duration_unit) {
            ("duration", self.config.duration_base)
        } else {
            ("default", self.config.default_base)
        }
    }
}

/// Lowercase with separators folded to underscores, so "p-value" and
/// "P value" both key as "p_value"
fn normalize_key(key: &str) -> String {
    key.to_lowercase()
        .replace([' ', '-'], "_")
}
