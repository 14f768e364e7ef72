//! Closed vocabularies used by extraction
//!
//! Matched case-insensitively against claim text. These are deliberately
//! closed lists: a token outside every vocabulary is an extraction miss,
//! not a guess.

/// Storage unit tokens, matched verbatim after the number
pub const STORAGE_UNITS: &[&str] = &[
    "PiB", "TiB", "GiB", "MiB", "KiB", "PB", "TB", "GB", "MB", "KB",
];

/// Duration unit tokens
pub const DURATION_UNITS: &[&str] = &[
    "minutes", "minute", "hours", "hour", "hrs", "days", "day", "weeks", "week", "months",
    "month", "years", "year",
];

/// Wording that asserts a capability is on/required
pub const ENABLING_PHRASES: &[&str] = &["enabled", "required", "mandatory", "enforced"];

/// Wording that asserts a capability is off/optional
///
/// Checked before the enabling list so "not required" never reads as
/// "required".
pub const DISABLING_PHRASES: &[&str] =
    &["not required", "not supported", "not enforced", "disabled", "optional"];

/// Hedge vocabulary: wording that qualifies a stated value
pub const HEDGE_PHRASES: &[&str] = &[
    "approximately", "roughly", "about", "around", "typically", "generally", "estimated",
    "circa", "up to",
];

/// A closed controlled vocabulary with a name used as a pseudo-kind for
/// tolerance lookup
pub struct EnumVocabulary {
    /// Vocabulary name, recorded in the extracted value's `unit` field
    pub name: &'static str,
    /// Canonical lowercase members
    pub members: &'static [&'static str],
}

/// The enum vocabularies, tried in order; first membership hit wins
pub const ENUM_VOCABULARIES: &[EnumVocabulary] = &[
    EnumVocabulary {
        name: "frequency",
        members: &["continuous", "daily", "weekly", "monthly", "quarterly", "annually"],
    },
    EnumVocabulary {
        name: "responsibility",
        members: &["customer", "provider", "shared"],
    },
    EnumVocabulary {
        name: "severity",
        members: &["critical", "high", "medium", "low"],
    },
    EnumVocabulary {
        name: "edition",
        members: &["standard", "professional", "enterprise"],
    },
];

/// Whether a unit token belongs to the duration family (tolerance lookup)
pub fn is_duration_unit(unit: &str) -> bool {
    let lower = unit.to_lowercase();
    DURATION_UNITS.iter().any(|u| *u == lower)
}

/// Whether a unit token denotes a percentage
pub fn is_percent_unit(unit: &str) -> bool {
    let lower = unit.to_lowercase();
    lower == "%" || lower == "percent"
}
