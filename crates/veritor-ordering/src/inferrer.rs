//! The axis order inferrer

use crate::result::{OrderInferenceResult, OrderType, OrderingConfidence};
use crate::strategies::{
    NumericStrategy, OrderingStrategy, OrdinalStrategy, RankTableStrategy, RomanStrategy,
    SemverStrategy, YearSuffixStrategy,
};

/// Runs the strategy cascade over an axis's observed values
///
/// The cascade is fixed: numerically grounded strategies first, then
/// semantically grounded ones. The first strategy that orders the full set
/// wins. A strategy whose output is not a permutation of the input is
/// discarded and the cascade continues.
pub struct AxisOrderInferrer {
    strategies: Vec<Box<dyn OrderingStrategy>>,
}

impl Default for AxisOrderInferrer {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisOrderInferrer {
    /// Create an inferrer with the standard strategy cascade
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Box::new(SemverStrategy),
                Box::new(NumericStrategy),
                Box::new(YearSuffixStrategy),
                Box::new(RomanStrategy),
                Box::new(OrdinalStrategy),
                Box::new(RankTableStrategy),
            ],
        }
    }

    /// Infer an order for `values` under `axis_key`
    ///
    /// Duplicates in the input are collapsed before inference. Fewer than
    /// two distinct values cannot anchor an order. The returned order, when
    /// present, is always a permutation of the distinct input values.
    pub fn infer_order(&self, axis_key: &str, values: &[String]) -> OrderInferenceResult {
        let mut distinct: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
            if !distinct.contains(value) {
                distinct.push(value.clone());
            }
        }

        if distinct.len() < 2 {
            return OrderInferenceResult::unordered(
                axis_key,
                "fewer than two distinct values",
            );
        }

        for strategy in &self.strategies {
            let Some(order) = strategy.try_order(&distinct) else {
                continue;
            };
            if !is_permutation(&order, &distinct) {
                continue;
            }
            return OrderInferenceResult {
                axis_key: axis_key.to_string(),
                is_orderable: true,
                order_type: OrderType::Total,
                confidence: strategy.confidence(),
                inferred_order: Some(order),
                reason: format!("ordered by {} strategy", strategy.name()),
            };
        }

        OrderInferenceResult::unordered(axis_key, "no strategy covered the full value set")
    }
}

/// True iff `order` contains exactly the elements of `distinct`
fn is_permutation(order: &[String], distinct: &[String]) -> bool {
    order.len() == distinct.len() && distinct.iter().all(|v| order.contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_release_ids_with_patch_suffixes() {
        let inferrer = AxisOrderInferrer::new();
        let result = inferrer.infer_order(
            "release_id",
            &strings(&["2021 FPS02", "2021", "2021 FPS01", "2022"]),
        );
        assert!(result.is_orderable);
        assert_eq!(result.order_type, OrderType::Total);
        assert_eq!(result.confidence, OrderingConfidence::Certain);
        assert_eq!(
            result.inferred_order.unwrap(),
            strings(&["2021", "2021 FPS01", "2021 FPS02", "2022"])
        );
    }

    #[test]
    fn test_arbitrary_labels_are_refused() {
        let inferrer = AxisOrderInferrer::new();
        let result = inferrer.infer_order("color", &strings(&["red", "blue", "green"]));
        assert!(!result.is_orderable);
        assert_eq!(result.confidence, OrderingConfidence::Unknown);
        assert!(result.inferred_order.is_none());
    }

    #[test]
    fn test_mixed_patterns_never_partially_ordered() {
        // Two values parse as versions and two do not; no guessed partial
        // order may leak out
        let inferrer = AxisOrderInferrer::new();
        let result =
            inferrer.infer_order("release_id", &strings(&["alpha", "2.0", "beta", "1.0"]));
        assert!(!result.is_orderable);
        assert_eq!(result.confidence, OrderingConfidence::Unknown);
        assert!(result.inferred_order.is_none());
    }

    #[test]
    fn test_plain_years_are_numeric() {
        let inferrer = AxisOrderInferrer::new();
        let result = inferrer.infer_order("year", &strings(&["2022", "2019", "2021"]));
        assert_eq!(result.confidence, OrderingConfidence::Certain);
        assert_eq!(
            result.inferred_order.unwrap(),
            strings(&["2019", "2021", "2022"])
        );
    }

    #[test]
    fn test_versions_sorted_numerically_per_level() {
        let inferrer = AxisOrderInferrer::new();
        let result = inferrer.infer_order("version", &strings(&["1.10", "1.9", "1.2"]));
        assert_eq!(result.confidence, OrderingConfidence::Certain);
        assert_eq!(
            result.inferred_order.unwrap(),
            strings(&["1.2", "1.9", "1.10"])
        );
    }

    #[test]
    fn test_editions_ranked_with_inferred_confidence() {
        let inferrer = AxisOrderInferrer::new();
        let result = inferrer.infer_order(
            "edition",
            &strings(&["enterprise", "standard", "professional"]),
        );
        assert!(result.is_orderable);
        assert_eq!(result.confidence, OrderingConfidence::Inferred);
        assert_eq!(
            result.inferred_order.unwrap(),
            strings(&["standard", "professional", "enterprise"])
        );
    }

    #[test]
    fn test_roman_numerals_inferred() {
        let inferrer = AxisOrderInferrer::new();
        let result = inferrer.infer_order("phase", &strings(&["III", "I", "II"]));
        assert_eq!(result.confidence, OrderingConfidence::Inferred);
        assert_eq!(result.inferred_order.unwrap(), strings(&["I", "II", "III"]));
    }

    #[test]
    fn test_single_value_is_unordered() {
        let inferrer = AxisOrderInferrer::new();
        let result = inferrer.infer_order("release_id", &strings(&["2021"]));
        assert!(!result.is_orderable);
    }

    #[test]
    fn test_duplicates_collapse_before_inference() {
        let inferrer = AxisOrderInferrer::new();
        let result =
            inferrer.infer_order("year", &strings(&["2021", "2019", "2021", "2019"]));
        assert_eq!(
            result.inferred_order.unwrap(),
            strings(&["2019", "2021"])
        );
    }

    #[test]
    fn test_result_is_permutation_of_input() {
        let inferrer = AxisOrderInferrer::new();
        let values = strings(&["3.1", "1.0", "2.5", "10.0"]);
        let result = inferrer.infer_order("version", &values);
        let mut order = result.inferred_order.unwrap();
        order.sort();
        let mut expected = values.clone();
        expected.sort();
        assert_eq!(order, expected);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any output order is a permutation of the distinct input values
        #[test]
        fn prop_order_is_permutation(values in proptest::collection::vec("[a-z0-9. ]{1,12}", 0..12)) {
            let inferrer = AxisOrderInferrer::new();
            let result = inferrer.infer_order("axis", &values);
            if let Some(order) = result.inferred_order {
                let mut distinct: Vec<String> = Vec::new();
                for v in &values {
                    if !distinct.contains(v) {
                        distinct.push(v.clone());
                    }
                }
                prop_assert_eq!(order.len(), distinct.len());
                for v in &distinct {
                    prop_assert!(order.contains(v));
                }
            }
        }

        /// Unorderable results never carry an order
        #[test]
        fn prop_unknown_has_no_order(values in proptest::collection::vec("[a-z]{1,8}", 2..8)) {
            let inferrer = AxisOrderInferrer::new();
            let result = inferrer.infer_order("axis", &values);
            if !result.is_orderable {
                prop_assert!(result.inferred_order.is_none());
                prop_assert_eq!(result.confidence, OrderingConfidence::Unknown);
            }
        }
    }
}
