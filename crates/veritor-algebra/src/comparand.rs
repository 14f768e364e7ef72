//! Composite comparison values
//!
//! Beyond the extraction kinds, comparison recognizes interval and
//! inequality composites (a value plus a bound). They exist only during
//! comparison and are never produced by extraction.

use veritor_extractor::{ExtractedValue, ValueOperator};

use crate::comparator::Verdict;

/// Guard against division by zero in the relative-difference check
const EPSILON: f64 = 1e-9;

/// A numeric value lifted into its comparison form
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparand {
    /// A point value, stated exactly
    Point(f64),

    /// A closed interval; `Approx`-operator values widen to this
    Interval(f64, f64),

    /// An inequality: a bound with a direction and strictness
    Inequality {
        /// The bound value
        bound: f64,
        /// True for lower bounds (`>=`, `>`), false for upper (`<=`, `<`)
        lower: bool,
        /// True for strict bounds (`>`, `<`)
        strict: bool,
    },
}

impl Comparand {
    /// Lift a numeric extracted value into its comparison form
    ///
    /// Returns `None` when the value carries no numeric payload.
    pub fn from_value(value: &ExtractedValue, tolerance: f64) -> Option<Self> {
        let n = value.as_number()?;
        Some(match value.operator {
            ValueOperator::Eq => Comparand::Point(n),
            ValueOperator::Approx => {
                let slack = n.abs().max(EPSILON) * tolerance;
                Comparand::Interval(n - slack, n + slack)
            }
            ValueOperator::Ge => Comparand::Inequality { bound: n, lower: true, strict: false },
            ValueOperator::Gt => Comparand::Inequality { bound: n, lower: true, strict: true },
            ValueOperator::Le => Comparand::Inequality { bound: n, lower: false, strict: false },
            ValueOperator::Lt => Comparand::Inequality { bound: n, lower: false, strict: true },
        })
    }
}

/// Relative-difference equality: `|a - b| / max(|a|, ε) <= tolerance`
pub(crate) fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() / a.abs().max(EPSILON) <= tolerance
}

fn point_satisfies(p: f64, bound: f64, lower: bool, strict: bool, tolerance: f64) -> bool {
    match (lower, strict) {
        (true, false) => p >= bound || approx_eq(bound, p, tolerance),
        (true, true) => p > bound,
        (false, false) => p <= bound || approx_eq(bound, p, tolerance),
        (false, true) => p < bound,
    }
}

/// Compare two numeric comparands
///
/// Inequalities are evaluated as logical implications rather than equality:
/// a claim "≥99%" is satisfied by an observed "99.9%". Mixed bounds whose
/// feasible regions overlap without one implying the other cannot be proven
/// to state the same fact and come back `Incomparable` for manual review.
pub(crate) fn compare_numeric(a: Comparand, b: Comparand, tolerance: f64) -> Verdict {
    use Comparand::*;

    match (a, b) {
        (Point(x), Point(y)) => verdict(approx_eq(x, y, tolerance)),

        (Point(p), Interval(lo, hi)) | (Interval(lo, hi), Point(p)) => verdict(
            (lo..=hi).contains(&p)
                || approx_eq(lo, p, tolerance)
                || approx_eq(hi, p, tolerance),
        ),

        (Point(p), Inequality { bound, lower, strict })
        | (Inequality { bound, lower, strict }, Point(p)) => {
            verdict(point_satisfies(p, bound, lower, strict, tolerance))
        }

        (Interval(a_lo, a_hi), Interval(b_lo, b_hi)) => {
            verdict(a_lo <= b_hi && b_lo <= a_hi)
        }

        (Interval(lo, hi), Inequality { bound, lower, strict })
        | (Inequality { bound, lower, strict }, Interval(lo, hi)) => {
            let lo_ok = point_satisfies(lo, bound, lower, strict, tolerance);
            let hi_ok = point_satisfies(hi, bound, lower, strict, tolerance);
            match (lo_ok, hi_ok) {
                (true, true) => Verdict::Equal,
                (false, false) => Verdict::Unequal,
                // The interval straddles the bound
                _ => Verdict::Incomparable,
            }
        }

        (
            Inequality { bound: x, lower: a_lower, strict: a_strict },
            Inequality { bound: y, lower: b_lower, strict: b_strict },
        ) => {
            if a_lower == b_lower {
                // Same direction: the same fact only if the bounds agree in
                // both value and strictness
                if !approx_eq(x, y, tolerance) {
                    Verdict::Unequal
                } else if a_strict == b_strict {
                    Verdict::Equal
                } else {
                    Verdict::Incomparable
                }
            } else {
                // Opposite directions: provably different facts only when the
                // feasible regions are disjoint
                let (lower_bound, upper_bound) = if a_lower { (x, y) } else { (y, x) };
                if lower_bound > upper_bound {
                    Verdict::Unequal
                } else {
                    Verdict::Incomparable
                }
            }
        }
    }
}

fn verdict(equal: bool) -> Verdict {
    if equal {
        Verdict::Equal
    } else {
        Verdict::Unequal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_vs_point_tolerance() {
        assert_eq!(
            compare_numeric(Comparand::Point(100.0), Comparand::Point(101.0), 0.02),
            Verdict::Equal
        );
        assert_eq!(
            compare_numeric(Comparand::Point(100.0), Comparand::Point(110.0), 0.02),
            Verdict::Unequal
        );
    }

    #[test]
    fn test_bound_satisfied_by_point() {
        let at_least_99 = Comparand::Inequality { bound: 0.99, lower: true, strict: false };
        assert_eq!(
            compare_numeric(at_least_99, Comparand::Point(0.999), 0.0),
            Verdict::Equal
        );
        assert_eq!(
            compare_numeric(at_least_99, Comparand::Point(0.95), 0.0),
            Verdict::Unequal
        );
    }

    #[test]
    fn test_strict_bound_excludes_boundary() {
        let above_5 = Comparand::Inequality { bound: 5.0, lower: true, strict: true };
        assert_eq!(compare_numeric(above_5, Comparand::Point(5.0), 0.05), Verdict::Unequal);
        assert_eq!(compare_numeric(above_5, Comparand::Point(5.1), 0.0), Verdict::Equal);
    }

    #[test]
    fn test_interval_straddling_bound_is_incomparable() {
        let interval = Comparand::Interval(4.0, 6.0);
        let at_least_5 = Comparand::Inequality { bound: 5.0, lower: true, strict: false };
        assert_eq!(compare_numeric(interval, at_least_5, 0.0), Verdict::Incomparable);
    }

    #[test]
    fn test_opposite_bounds() {
        let at_least_10 = Comparand::Inequality { bound: 10.0, lower: true, strict: false };
        let at_most_5 = Comparand::Inequality { bound: 5.0, lower: false, strict: false };
        assert_eq!(compare_numeric(at_least_10, at_most_5, 0.0), Verdict::Unequal);

        let at_most_20 = Comparand::Inequality { bound: 20.0, lower: false, strict: false };
        assert_eq!(compare_numeric(at_least_10, at_most_20, 0.0), Verdict::Incomparable);
    }
}
