//! Pattern extraction over claim text

use std::sync::LazyLock;

use regex::Regex;

use crate::value::{ComparableClass, ExtractedValue, NormalizedValue, ValueKind, ValueOperator};
use crate::vocab::{
    DISABLING_PHRASES, DURATION_UNITS, ENABLING_PHRASES, ENUM_VOCABULARIES, HEDGE_PHRASES,
    STORAGE_UNITS,
};

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:%|percent\b)").unwrap());

// Dotted numeric token with an optional marker prefix. Pre-release suffixes
// are matched so they land in raw_text, but dropped from the normalization.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:v\.?\s*|version\s+|tls\s+|ssl\s+|http/)?(\d+(?:\.\d+){1,3})(-[0-9A-Za-z.]+)?\b")
        .unwrap()
});

static NUMBER_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    let units: Vec<String> = STORAGE_UNITS
        .iter()
        .chain(DURATION_UNITS.iter())
        .map(|u| regex::escape(u))
        .collect();
    Regex::new(&format!(r"(?i)\b(\d+(?:\.\d+)?)\s*({})\b", units.join("|"))).unwrap()
});

/// Parse claim text into a typed value
///
/// Deterministic and side-effect free. Categories are tried in precedence
/// order (percent > version > number+unit > boolean > enum); the first
/// category that matches wins. Text with no recognizable pattern yields
/// `None`, not an error.
pub fn extract(text: &str) -> Option<ExtractedValue> {
    let operator = infer_operator(text);

    extract_percent(text)
        .or_else(|| extract_version(text))
        .or_else(|| extract_number_unit(text))
        .or_else(|| extract_boolean(text))
        .or_else(|| extract_enum(text))
        .map(|mut value| {
            value.operator = operator;
            value
        })
}

/// Like [`extract`], but always produces a record
///
/// An extraction miss yields a `ValueKind::NoValue` record, so callers that
/// persist parse outcomes never have to invent a sentinel.
pub fn classify(text: &str) -> ExtractedValue {
    extract(text).unwrap_or_else(|| ExtractedValue::no_value(text))
}

fn extract_percent(text: &str) -> Option<ExtractedValue> {
    let caps = PERCENT_RE.captures(text)?;
    let number: f64 = caps.get(1)?.as_str().parse().ok()?;

    Some(ExtractedValue {
        kind: ValueKind::Percent,
        raw_text: caps.get(0)?.as_str().to_string(),
        normalized: NormalizedValue::Number(number / 100.0),
        unit: Some("%".to_string()),
        operator: ValueOperator::Eq,
        comparable_class: ComparableClass::Strict,
    })
}

fn extract_version(text: &str) -> Option<ExtractedValue> {
    let caps = VERSION_RE.captures(text)?;
    let whole = caps.get(0)?;
    let dotted = caps.get(1)?.as_str();

    // A dotted number immediately followed by a unit token is a quantity,
    // not a version ("1.5 GB" must fall through to number+unit).
    if followed_by_unit(text, whole.end()) {
        return None;
    }

    // Truncate to at most 3 levels; pre-release suffix is already excluded
    // from the capture.
    let normalized: String = dotted.split('.').take(3).collect::<Vec<_>>().join(".");

    Some(ExtractedValue {
        kind: ValueKind::Version,
        raw_text: whole.as_str().trim().to_string(),
        normalized: NormalizedValue::Version(normalized),
        unit: None,
        operator: ValueOperator::Eq,
        comparable_class: ComparableClass::Strict,
    })
}

fn followed_by_unit(text: &str, from: usize) -> bool {
    let rest = text[from..].trim_start();
    let next_word: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if next_word.is_empty() {
        return false;
    }
    let lower = next_word.to_lowercase();
    STORAGE_UNITS
        .iter()
        .chain(DURATION_UNITS.iter())
        .any(|u| u.to_lowercase() == lower)
}

fn extract_number_unit(text: &str) -> Option<ExtractedValue> {
    let caps = NUMBER_UNIT_RE.captures(text)?;
    let number: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str();

    Some(ExtractedValue {
        kind: ValueKind::Number,
        raw_text: caps.get(0)?.as_str().to_string(),
        // Unit preserved verbatim for later tolerance lookup
        unit: Some(unit.to_string()),
        normalized: NormalizedValue::Number(number),
        operator: ValueOperator::Eq,
        comparable_class: ComparableClass::Tolerant,
    })
}

fn extract_boolean(text: &str) -> Option<ExtractedValue> {
    let lower = text.to_lowercase();

    // Negations first, so "not required" never reads as "required"
    for phrase in DISABLING_PHRASES {
        if contains_phrase(&lower, phrase) {
            return Some(boolean_value(phrase, false));
        }
    }
    for phrase in ENABLING_PHRASES {
        if contains_phrase(&lower, phrase) {
            return Some(boolean_value(phrase, true));
        }
    }
    None
}

fn boolean_value(raw: &str, value: bool) -> ExtractedValue {
    ExtractedValue {
        kind: ValueKind::Boolean,
        raw_text: raw.to_string(),
        normalized: NormalizedValue::Boolean(value),
        unit: None,
        operator: ValueOperator::Eq,
        comparable_class: ComparableClass::Strict,
    }
}

fn extract_enum(text: &str) -> Option<ExtractedValue> {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    for vocab in ENUM_VOCABULARIES {
        for word in &words {
            if vocab.members.contains(word) {
                return Some(ExtractedValue {
                    kind: ValueKind::Enum,
                    raw_text: (*word).to_string(),
                    normalized: NormalizedValue::Token((*word).to_string()),
                    // Vocabulary name doubles as a pseudo-kind for tolerance
                    // lookup
                    unit: Some(vocab.name.to_string()),
                    operator: ValueOperator::Eq,
                    comparable_class: ComparableClass::Strict,
                });
            }
        }
    }
    None
}

/// Infer the comparison operator from the claim wording
///
/// Runs independently of kind matching; scans the whole text for comparison
/// phrases and defaults to `Eq`. Lower-bound wording is checked before the
/// bare "less than"/"more than" forms so "no less than" reads as `Ge`.
pub fn infer_operator(text: &str) -> ValueOperator {
    const OPERATOR_PHRASES: &[(&[&str], ValueOperator)] = &[
        (
            &["at least", "minimum", "no less than", "or later", "or higher", "or greater", "or more", "or newer"],
            ValueOperator::Ge,
        ),
        (&["at most", "maximum", "no more than", "up to"], ValueOperator::Le),
        (&["approximately", "about", "around", "roughly", "~"], ValueOperator::Approx),
        (&["exceeds", "more than", "greater than", "above"], ValueOperator::Gt),
        (&["less than", "fewer than", "below", "under"], ValueOperator::Lt),
    ];

    let lower = text.to_lowercase();
    for (phrases, operator) in OPERATOR_PHRASES {
        if phrases.iter().any(|p| contains_phrase(&lower, p)) {
            return *operator;
        }
    }
    ValueOperator::Eq
}

/// Estimate how hedged the claim wording is, as a [0, 1] signal
///
/// Each distinct hedge phrase contributes 0.25, saturating at 1.0. The
/// tolerance policy scales its base rate by this signal.
pub fn hedge_strength(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let hits = HEDGE_PHRASES
        .iter()
        .filter(|p| contains_phrase(&lower, p))
        .count();
    (hits as f64 * 0.25).min(1.0)
}

/// Phrase containment with word-boundary checks on alphabetic phrases
fn contains_phrase(text_lower: &str, phrase: &str) -> bool {
    if !phrase.chars().any(|c| c.is_ascii_alphabetic()) {
        return text_lower.contains(phrase);
    }
    let mut start = 0;
    while let Some(pos) = text_lower[start..].find(phrase) {
        let begin = start + pos;
        let end = begin + phrase.len();
        let left_ok = begin == 0
            || !text_lower[..begin]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_alphanumeric());
        let right_ok = end == text_lower.len()
            || !text_lower[end..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphanumeric());
        if left_ok && right_ok {
            return true;
        }
        start = begin + 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_percent() {
        let v = extract("99.9% uptime guaranteed").unwrap();
        assert_eq!(v.kind, ValueKind::Percent);
        assert_eq!(v.normalized, NormalizedValue::Number(0.999));
        assert_eq!(v.unit.as_deref(), Some("%"));

        let v = extract("backed up at 95 percent coverage").unwrap();
        assert_eq!(v.normalized, NormalizedValue::Number(0.95));
    }

    #[test]
    fn test_extract_version_with_operator() {
        // End-to-end scenario: "minimum TLS 1.2"
        let v = extract("minimum TLS 1.2").unwrap();
        assert_eq!(v.kind, ValueKind::Version);
        assert_eq!(v.normalized, NormalizedValue::Version("1.2".to_string()));
        assert_eq!(v.operator, ValueOperator::Ge);
    }

    #[test]
    fn test_extract_version_truncates_levels() {
        let v = extract("requires v2.1.4.9").unwrap();
        assert_eq!(v.normalized, NormalizedValue::Version("2.1.4".to_string()));
    }

    #[test]
    fn test_extract_version_ignores_prerelease() {
        let v = extract("runs 3.0.1-beta.2 in staging").unwrap();
        assert_eq!(v.normalized, NormalizedValue::Version("3.0.1".to_string()));
    }

    #[test]
    fn test_dotted_quantity_is_not_a_version() {
        let v = extract("includes 1.5 GB of storage").unwrap();
        assert_eq!(v.kind, ValueKind::Number);
        assert_eq!(v.normalized, NormalizedValue::Number(1.5));
        assert_eq!(v.unit.as_deref(), Some("GB"));
    }

    #[test]
    fn test_extract_number_unit_preserves_unit_verbatim() {
        let v = extract("retained for 90 days").unwrap();
        assert_eq!(v.kind, ValueKind::Number);
        assert_eq!(v.normalized, NormalizedValue::Number(90.0));
        assert_eq!(v.unit.as_deref(), Some("days"));
    }

    #[test]
    fn test_extract_boolean() {
        let v = extract("MFA is mandatory for all accounts").unwrap();
        assert_eq!(v.kind, ValueKind::Boolean);
        assert_eq!(v.normalized, NormalizedValue::Boolean(true));

        let v = extract("encryption is not required for internal traffic").unwrap();
        assert_eq!(v.normalized, NormalizedValue::Boolean(false));

        let v = extract("audit logging is optional").unwrap();
        assert_eq!(v.normalized, NormalizedValue::Boolean(false));
    }

    #[test]
    fn test_extract_enum_records_vocabulary() {
        let v = extract("backups run daily").unwrap();
        assert_eq!(v.kind, ValueKind::Enum);
        assert_eq!(v.normalized, NormalizedValue::Token("daily".to_string()));
        assert_eq!(v.unit.as_deref(), Some("frequency"));

        let v = extract("available in the Enterprise plan").unwrap();
        assert_eq!(v.normalized, NormalizedValue::Token("enterprise".to_string()));
        assert_eq!(v.unit.as_deref(), Some("edition"));
    }

    #[test]
    fn test_extraction_miss_is_none() {
        assert!(extract("the service is reliable and well documented").is_none());
        assert!(extract("").is_none());
    }

    #[test]
    fn test_classify_miss_is_no_value() {
        let v = classify("the service is reliable");
        assert_eq!(v.kind, ValueKind::NoValue);
    }

    #[test]
    fn test_operator_inference() {
        assert_eq!(infer_operator("at least 5 nodes"), ValueOperator::Ge);
        assert_eq!(infer_operator("no less than 12 hours"), ValueOperator::Ge);
        assert_eq!(infer_operator("maximum of 30 days"), ValueOperator::Le);
        assert_eq!(infer_operator("exceeds 99%"), ValueOperator::Gt);
        assert_eq!(infer_operator("below 100ms"), ValueOperator::Lt);
        assert_eq!(infer_operator("approximately 500 GB"), ValueOperator::Approx);
        assert_eq!(infer_operator("exactly 7 copies"), ValueOperator::Eq);
    }

    #[test]
    fn test_hedge_strength() {
        assert_eq!(hedge_strength("stores 500 GB"), 0.0);
        assert_eq!(hedge_strength("roughly 500 GB"), 0.25);
        assert_eq!(
            hedge_strength("typically around roughly about an estimated amount"),
            1.0
        );
    }

    #[test]
    fn test_phrase_boundaries() {
        // "optional" must not match inside "optionally"... it is its own word
        assert!(!contains_phrase("configure options here", "optional"));
        assert!(contains_phrase("this step is optional.", "optional"));
    }
}
