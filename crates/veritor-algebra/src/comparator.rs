//! The comparison operation over extracted values

use serde::{Deserialize, Serialize};
use veritor_extractor::{ExtractedValue, NormalizedValue, ValueKind};

use crate::comparand::{compare_numeric, Comparand};

/// Outcome of comparing two claimed values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The two values assert the same fact (within the given tolerance)
    Equal,

    /// The two values provably assert different facts
    Unequal,

    /// The values cannot be compared (mismatched kind or unit, or composite
    /// bounds neither of which implies the other); surfaced for manual
    /// review, never raised as a fault
    Incomparable,
}

/// Versions encode into a single sortable number; each dot level gets this
/// much headroom.
const VERSION_LEVEL_RADIX: u64 = 1_000_000;

/// Decide whether two extracted values assert the same fact
///
/// Two values are `Incomparable` unless both have the same kind and (for
/// `Number`) the same unit. Version comparison is per-dot-level numeric,
/// never lexicographic, and tolerance never applies to it. Boolean and enum
/// equality is exact after normalization. For percent and number values,
/// equality uses the relative-difference check and inequality operators are
/// evaluated as implications.
///
/// Never raises on type mismatch: heterogeneous claim sets are expected, and
/// `Incomparable` is the correct outcome for them.
pub fn compare(a: &ExtractedValue, b: &ExtractedValue, tolerance: f64) -> Verdict {
    if a.kind != b.kind {
        return Verdict::Incomparable;
    }

    match a.kind {
        ValueKind::NoValue => Verdict::Incomparable,

        ValueKind::Boolean => match (&a.normalized, &b.normalized) {
            (NormalizedValue::Boolean(x), NormalizedValue::Boolean(y)) => {
                if x == y {
                    Verdict::Equal
                } else {
                    Verdict::Unequal
                }
            }
            _ => Verdict::Incomparable,
        },

        ValueKind::Enum => {
            // Tokens only compare within the same vocabulary
            if !units_match(a, b) {
                return Verdict::Incomparable;
            }
            match (&a.normalized, &b.normalized) {
                (NormalizedValue::Token(x), NormalizedValue::Token(y)) => {
                    if x == y {
                        Verdict::Equal
                    } else {
                        Verdict::Unequal
                    }
                }
                _ => Verdict::Incomparable,
            }
        }

        ValueKind::Version => compare_versions(a, b),

        ValueKind::Percent => compare_as_numbers(a, b, tolerance),

        ValueKind::Number => {
            if !units_match(a, b) {
                return Verdict::Incomparable;
            }
            compare_as_numbers(a, b, tolerance)
        }
    }
}

fn units_match(a: &ExtractedValue, b: &ExtractedValue) -> bool {
    match (&a.unit, &b.unit) {
        (Some(x), Some(y)) => x.to_lowercase() == y.to_lowercase(),
        (None, None) => true,
        _ => false,
    }
}

fn compare_as_numbers(a: &ExtractedValue, b: &ExtractedValue, tolerance: f64) -> Verdict {
    let (Some(ca), Some(cb)) = (
        Comparand::from_value(a, tolerance),
        Comparand::from_value(b, tolerance),
    ) else {
        return Verdict::Incomparable;
    };
    compare_numeric(ca, cb, tolerance)
}

/// Per-dot-level numeric version comparison with operator semantics
///
/// Levels encode into a single number so version operators reuse the numeric
/// implication logic, with tolerance pinned to zero (versions are
/// always-strict).
fn compare_versions(a: &ExtractedValue, b: &ExtractedValue) -> Verdict {
    let (Some(ka), Some(kb)) = (version_key(a), version_key(b)) else {
        return Verdict::Incomparable;
    };

    let lift = |value: &ExtractedValue, key: f64| {
        let mut lifted = value.clone();
        lifted.normalized = NormalizedValue::Number(key);
        // Approx never widens a version
        if lifted.operator == veritor_extractor::ValueOperator::Approx {
            lifted.operator = veritor_extractor::ValueOperator::Eq;
        }
        Comparand::from_value(&lifted, 0.0)
    };

    let (Some(ca), Some(cb)) = (lift(a, ka), lift(b, kb)) else {
        return Verdict::Incomparable;
    };
    compare_numeric(ca, cb, 0.0)
}

fn version_key(value: &ExtractedValue) -> Option<f64> {
    let NormalizedValue::Version(dotted) = &value.normalized else {
        return None;
    };
    let mut levels = [0u64; 3];
    for (i, part) in dotted.split('.').enumerate().take(3) {
        let level: u64 = part.parse().ok()?;
        if level >= VERSION_LEVEL_RADIX {
            return None;
        }
        levels[i] = level;
    }
    Some(
        (levels[0] * VERSION_LEVEL_RADIX * VERSION_LEVEL_RADIX
            + levels[1] * VERSION_LEVEL_RADIX
            + levels[2]) as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritor_extractor::extract;

    #[test]
    fn test_kind_mismatch_is_incomparable() {
        let percent = extract("99% uptime").unwrap();
        let version = extract("TLS 1.2").unwrap();
        assert_eq!(compare(&percent, &version, 0.1), Verdict::Incomparable);
    }

    #[test]
    fn test_unit_mismatch_is_incomparable() {
        let storage = extract("500 GB retained").unwrap();
        let duration = extract("500 days retained").unwrap();
        assert_eq!(compare(&storage, &duration, 0.1), Verdict::Incomparable);
    }

    #[test]
    fn test_percent_within_tolerance() {
        let a = extract("99% uptime").unwrap();
        let b = extract("99.5% uptime").unwrap();
        assert_eq!(compare(&a, &b, 0.01), Verdict::Equal);
        assert_eq!(compare(&a, &b, 0.0), Verdict::Unequal);
    }

    #[test]
    fn test_ge_claim_satisfied_by_larger_observation() {
        let requirement = extract("at least 99% uptime").unwrap();
        let observed = extract("99.9% uptime").unwrap();
        assert_eq!(compare(&requirement, &observed, 0.0), Verdict::Equal);

        let below = extract("95% uptime").unwrap();
        assert_eq!(compare(&requirement, &below, 0.0), Verdict::Unequal);
    }

    #[test]
    fn test_version_numeric_not_lexicographic() {
        let v_1_9 = extract("version 1.9").unwrap();
        let v_1_10 = extract("version 1.10").unwrap();
        // Lexicographically "1.10" < "1.9"; numerically it is greater
        assert_eq!(compare(&v_1_9, &v_1_10, 0.0), Verdict::Unequal);

        let minimum = extract("minimum TLS 1.2").unwrap();
        let observed = extract("TLS 1.3").unwrap();
        assert_eq!(compare(&minimum, &observed, 0.0), Verdict::Equal);
    }

    #[test]
    fn test_version_padding() {
        let a = extract("version 2.0").unwrap();
        let b = extract("version 2.0.0").unwrap();
        assert_eq!(compare(&a, &b, 0.0), Verdict::Equal);
    }

    #[test]
    fn test_version_ignores_tolerance() {
        let a = extract("version 1.2").unwrap();
        let b = extract("version 1.3").unwrap();
        assert_eq!(compare(&a, &b, 0.10), Verdict::Unequal);
    }

    #[test]
    fn test_boolean_exact() {
        let a = extract("MFA is required").unwrap();
        let b = extract("MFA is mandatory").unwrap();
        let c = extract("MFA is optional").unwrap();
        assert_eq!(compare(&a, &b, 0.1), Verdict::Equal);
        assert_eq!(compare(&a, &c, 0.1), Verdict::Unequal);
    }

    #[test]
    fn test_enum_vocabulary_scoping() {
        let daily = extract("backups run daily").unwrap();
        let weekly = extract("reports run weekly").unwrap();
        assert_eq!(compare(&daily, &weekly, 0.1), Verdict::Unequal);

        let edition = extract("Enterprise tier only").unwrap();
        assert_eq!(compare(&daily, &edition, 0.1), Verdict::Incomparable);
    }

    #[test]
    fn test_approx_operator_widens_to_interval() {
        let approx = extract("approximately 100 days").unwrap();
        let exact = extract("98 days").unwrap();
        assert_eq!(compare(&approx, &exact, 0.05), Verdict::Equal);
        assert_eq!(compare(&approx, &exact, 0.0), Verdict::Unequal);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use veritor_extractor::extract;

    proptest! {
        /// Property: comparison is total over arbitrary extraction results
        #[test]
        fn test_compare_never_panics(a in ".*", b in ".*", tol in 0.0f64..0.5) {
            if let (Some(va), Some(vb)) = (extract(&a), extract(&b)) {
                let _ = compare(&va, &vb, tol);
            }
        }

        /// Property: a value always equals itself at any tolerance
        #[test]
        fn test_compare_reflexive(n in 1u32..100_000u32, tol in 0.0f64..0.10) {
            let text = format!("{} GB", n);
            let v = extract(&text).unwrap();
            prop_assert_eq!(compare(&v, &v, tol), Verdict::Equal);
        }
    }
}
