//! The ordering strategy cascade
//!
//! Each strategy is attempted on the entire value set: it either parses
//! every value and returns a full ordering, or abstains. Strategies also
//! abstain when two textually distinct values would collapse onto the same
//! sort key, since collapsing would break the bijection invariant.

use crate::result::OrderingConfidence;

/// A single ordering heuristic
///
/// `try_order` returns the full input in sorted order, or `None` when this
/// strategy cannot vouch for the whole set. First-success-wins evaluation
/// order lives in the inferrer.
pub trait OrderingStrategy: Send + Sync {
    /// Stable name, recorded in results and stored orderings
    fn name(&self) -> &'static str;

    /// Confidence grade this strategy's orderings carry
    fn confidence(&self) -> OrderingConfidence;

    /// Order the whole set, or abstain
    fn try_order(&self, values: &[String]) -> Option<Vec<String>>;
}

/// Parse every value to a sort key, abstaining on any miss or any key
/// collision, then sort
fn order_by_key<K: Ord>(
    values: &[String],
    parse: impl Fn(&str) -> Option<K>,
) -> Option<Vec<String>> {
    let mut keyed: Vec<(K, &String)> = Vec::with_capacity(values.len());
    for value in values {
        keyed.push((parse(value)?, value));
    }
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    // Distinct values sharing a sort key cannot be ordered honestly
    if keyed.windows(2).any(|w| w[0].0 == w[1].0) {
        return None;
    }
    Some(keyed.into_iter().map(|(_, v)| v.clone()).collect())
}

// ── Strategy 1: semantic versions ──

/// `major[.minor[.patch]]` with an optional leading `v` and an ignored
/// `-prerelease` suffix. Requires at least one dot in every value so plain
/// integers (years, counts) fall through to the numeric strategy.
pub struct SemverStrategy;

impl SemverStrategy {
    fn parse(value: &str) -> Option<(u64, u64, u64)> {
        let trimmed = value.trim();
        let trimmed = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        let base = trimmed.split('-').next()?;
        if !base.contains('.') {
            return None;
        }
        let mut levels = [0u64; 3];
        let mut count = 0;
        for part in base.split('.') {
            if count >= 3 {
                return None;
            }
            levels[count] = part.parse().ok()?;
            count += 1;
        }
        Some((levels[0], levels[1], levels[2]))
    }
}

impl OrderingStrategy for SemverStrategy {
    fn name(&self) -> &'static str {
        "semver"
    }

    fn confidence(&self) -> OrderingConfidence {
        OrderingConfidence::Certain
    }

    fn try_order(&self, values: &[String]) -> Option<Vec<String>> {
        order_by_key(values, |v| Self::parse(v))
    }
}

// ── Strategy 2: plain numbers ──

/// Integers and decimals, sorted numerically. NaN and infinities never parse
/// from the accepted grammar, so `total_cmp` is a plain numeric order here.
pub struct NumericStrategy;

#[derive(PartialEq)]
struct NumericKey(f64);

impl Eq for NumericKey {}

impl PartialOrd for NumericKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NumericKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl OrderingStrategy for NumericStrategy {
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn confidence(&self) -> OrderingConfidence {
        OrderingConfidence::Certain
    }

    fn try_order(&self, values: &[String]) -> Option<Vec<String>> {
        order_by_key(values, |v| {
            let trimmed = v.trim();
            if trimmed.is_empty()
                || !trimmed.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-')
            {
                return None;
            }
            trimmed.parse::<f64>().ok().map(NumericKey)
        })
    }
}

// ── Strategy 3: composite year plus suffix ──

/// Values like "2021", "2021 FPS01", "2022": a four-digit year with an
/// optional alphabetic suffix carrying its own embedded number. Bare years
/// sort before any suffixed variant of the same year. The suffix word must
/// be the same across the whole set; mixing "FPS" and "SP" suffixes leaves
/// their relative order undiscoverable, so the strategy abstains.
pub struct YearSuffixStrategy;

impl YearSuffixStrategy {
    /// (year, rank, suffix word); rank 0 for a bare year, suffix number + 1
    /// otherwise
    fn parse(value: &str) -> Option<(u32, u64, String)> {
        let mut tokens = value.trim().split_whitespace();
        let year_token = tokens.next()?;
        if year_token.len() != 4 || !year_token.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let year: u32 = year_token.parse().ok()?;

        let suffix: String = tokens.collect::<Vec<_>>().concat();
        if suffix.is_empty() {
            return Some((year, 0, String::new()));
        }

        let word: String = suffix.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
        let digits: String = suffix.chars().skip(word.len()).collect();
        if word.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let number: u64 = digits.parse().ok()?;
        Some((year, number + 1, word.to_uppercase()))
    }
}

impl OrderingStrategy for YearSuffixStrategy {
    fn name(&self) -> &'static str {
        "year_suffix"
    }

    fn confidence(&self) -> OrderingConfidence {
        OrderingConfidence::Certain
    }

    fn try_order(&self, values: &[String]) -> Option<Vec<String>> {
        let mut suffix_words: Vec<String> = Vec::new();
        for value in values {
            let (_, _, word) = Self::parse(value)?;
            if !word.is_empty() && !suffix_words.contains(&word) {
                suffix_words.push(word);
            }
        }
        if suffix_words.len() > 1 {
            return None;
        }
        order_by_key(values, |v| Self::parse(v).map(|(y, r, _)| (y, r)))
    }
}

// ── Strategy 4: roman numerals ──

/// Closed roman-numeral grammar. Only canonical forms parse: a value whose
/// numeral re-serializes differently ("IIII") is outside the grammar.
pub struct RomanStrategy;

impl RomanStrategy {
    fn parse(value: &str) -> Option<u32> {
        let upper = value.trim().to_uppercase();
        if upper.is_empty() {
            return None;
        }
        let digit = |c: char| -> Option<u32> {
            match c {
                'I' => Some(1),
                'V' => Some(5),
                'X' => Some(10),
                'L' => Some(50),
                'C' => Some(100),
                'D' => Some(500),
                'M' => Some(1000),
                _ => None,
            }
        };
        let mut total: i64 = 0;
        let chars: Vec<u32> = upper.chars().map(digit).collect::<Option<_>>()?;
        for (i, &v) in chars.iter().enumerate() {
            if chars.get(i + 1).is_some_and(|&next| next > v) {
                total -= i64::from(v);
            } else {
                total += i64::from(v);
            }
        }
        let total = u32::try_from(total).ok()?;
        if Self::to_roman(total)? != upper {
            return None;
        }
        Some(total)
    }

    fn to_roman(mut n: u32) -> Option<String> {
        if n == 0 || n > 3999 {
            return None;
        }
        const TABLE: &[(u32, &str)] = &[
            (1000, "M"),
            (900, "CM"),
            (500, "D"),
            (400, "CD"),
            (100, "C"),
            (90, "XC"),
            (50, "L"),
            (40, "XL"),
            (10, "X"),
            (9, "IX"),
            (5, "V"),
            (4, "IV"),
            (1, "I"),
        ];
        let mut out = String::new();
        for &(value, digits) in TABLE {
            while n >= value {
                out.push_str(digits);
                n -= value;
            }
        }
        Some(out)
    }
}

impl OrderingStrategy for RomanStrategy {
    fn name(&self) -> &'static str {
        "roman"
    }

    fn confidence(&self) -> OrderingConfidence {
        OrderingConfidence::Inferred
    }

    fn try_order(&self, values: &[String]) -> Option<Vec<String>> {
        order_by_key(values, |v| Self::parse(v))
    }
}

// ── Strategy 5: ordinal words ──

/// Closed lookup table of ordinal words
const ORDINAL_WORDS: &[&str] = &[
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
    "tenth", "eleventh", "twelfth",
];

/// "first", "second", ... ranked by table position
pub struct OrdinalStrategy;

impl OrderingStrategy for OrdinalStrategy {
    fn name(&self) -> &'static str {
        "ordinal_words"
    }

    fn confidence(&self) -> OrderingConfidence {
        OrderingConfidence::Inferred
    }

    fn try_order(&self, values: &[String]) -> Option<Vec<String>> {
        order_by_key(values, |v| {
            let lower = v.trim().to_lowercase();
            ORDINAL_WORDS.iter().position(|w| *w == lower)
        })
    }
}

// ── Strategy 6: controlled-vocabulary rank tables ──

/// Per-family rank tables, lowest tier first; a table applies only when it
/// contains every value in the set. These mirror the extraction vocabularies.
const RANK_TABLES: &[&[&str]] = &[
    &["standard", "professional", "enterprise"],
    &["basic", "standard", "premium"],
    &["low", "medium", "high", "critical"],
    &["annually", "quarterly", "monthly", "weekly", "daily", "continuous"],
];

/// Closed vocabulary rank tables (edition tiers, severities, frequencies)
pub struct RankTableStrategy;

impl OrderingStrategy for RankTableStrategy {
    fn name(&self) -> &'static str {
        "rank_table"
    }

    fn confidence(&self) -> OrderingConfidence {
        OrderingConfidence::Inferred
    }

    fn try_order(&self, values: &[String]) -> Option<Vec<String>> {
        for table in RANK_TABLES {
            let covers_all = values
                .iter()
                .all(|v| table.contains(&v.trim().to_lowercase().as_str()));
            if covers_all {
                return order_by_key(values, |v| {
                    let lower = v.trim().to_lowercase();
                    table.iter().position(|r| *r == lower)
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_semver_ordering() {
        let order = SemverStrategy.try_order(&strings(&["2.0", "1.0", "1.10", "1.9"])).unwrap();
        assert_eq!(order, strings(&["1.0", "1.9", "1.10", "2.0"]));
    }

    #[test]
    fn test_semver_requires_dot() {
        assert!(SemverStrategy.try_order(&strings(&["1", "2"])).is_none());
    }

    #[test]
    fn test_semver_prerelease_collision_abstains() {
        // "1.0" and "1.0-beta" share a sort key; collapsing them would break
        // the bijection
        assert!(SemverStrategy.try_order(&strings(&["1.0", "1.0-beta"])).is_none());
    }

    #[test]
    fn test_semver_padding_collision_abstains() {
        assert!(SemverStrategy.try_order(&strings(&["1.0", "1.0.0"])).is_none());
    }

    #[test]
    fn test_numeric_ordering() {
        let order = NumericStrategy.try_order(&strings(&["2022", "2019", "2021"])).unwrap();
        assert_eq!(order, strings(&["2019", "2021", "2022"]));
    }

    #[test]
    fn test_numeric_rejects_words() {
        assert!(NumericStrategy.try_order(&strings(&["2021", "alpha"])).is_none());
    }

    #[test]
    fn test_numeric_leading_zero_collision_abstains() {
        assert!(NumericStrategy.try_order(&strings(&["01", "1"])).is_none());
    }

    #[test]
    fn test_year_suffix_ordering() {
        let order = YearSuffixStrategy
            .try_order(&strings(&["2021 FPS02", "2021", "2021 FPS01", "2022"]))
            .unwrap();
        assert_eq!(order, strings(&["2021", "2021 FPS01", "2021 FPS02", "2022"]));
    }

    #[test]
    fn test_year_suffix_mixed_words_abstains() {
        assert!(YearSuffixStrategy
            .try_order(&strings(&["2021 FPS01", "2021 SP02"]))
            .is_none());
    }

    #[test]
    fn test_year_suffix_requires_embedded_number() {
        assert!(YearSuffixStrategy.try_order(&strings(&["2021 FPS", "2021"])).is_none());
    }

    #[test]
    fn test_roman_ordering() {
        let order = RomanStrategy.try_order(&strings(&["IV", "II", "IX", "I"])).unwrap();
        assert_eq!(order, strings(&["I", "II", "IV", "IX"]));
    }

    #[test]
    fn test_roman_rejects_non_canonical() {
        assert!(RomanStrategy.try_order(&strings(&["IIII", "V"])).is_none());
    }

    #[test]
    fn test_roman_case_collision_abstains() {
        assert!(RomanStrategy.try_order(&strings(&["iv", "IV"])).is_none());
    }

    #[test]
    fn test_ordinal_ordering() {
        let order = OrdinalStrategy.try_order(&strings(&["third", "first", "second"])).unwrap();
        assert_eq!(order, strings(&["first", "second", "third"]));
    }

    #[test]
    fn test_rank_table_editions() {
        let order = RankTableStrategy
            .try_order(&strings(&["enterprise", "standard", "professional"]))
            .unwrap();
        assert_eq!(order, strings(&["standard", "professional", "enterprise"]));
    }

    #[test]
    fn test_rank_table_requires_full_coverage() {
        assert!(RankTableStrategy
            .try_order(&strings(&["standard", "professional", "galactic"]))
            .is_none());
    }
}
