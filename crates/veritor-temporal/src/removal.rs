//! Removal-language detection
//!
//! The open-world rule means silence is never evidence of removal; only
//! explicit removal language in a claim's text counts. The phrase list is
//! deliberately short and conservative since a false positive here turns an
//! applicable capability into a removed one.

/// Phrases that explicitly document removal or deprecation
const REMOVAL_PHRASES: &[&str] = &[
    "removed",
    "was removed",
    "has been removed",
    "deprecated",
    "is deprecated",
    "discontinued",
    "no longer supported",
    "no longer available",
    "no longer included",
    "no longer offered",
    "dropped support for",
];

/// Whether `text` explicitly documents removal or deprecation
pub fn documents_removal(text: &str) -> bool {
    let lower = text.to_lowercase();
    REMOVAL_PHRASES.iter().any(|phrase| contains_phrase(&lower, phrase))
}

/// Word-boundary containment check on already-lowercased text
fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(phrase) {
        let begin = start + pos;
        let end = begin + phrase.len();
        let before_ok = begin == 0
            || !haystack[..begin]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());
        let after_ok = end == haystack.len()
            || !haystack[end..].chars().next().is_some_and(|c| c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        start = end;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_removal_language() {
        assert!(documents_removal("Feature X was removed in this release"));
        assert!(documents_removal("Feature X is deprecated"));
        assert!(documents_removal("support for Feature X has been discontinued"));
        assert!(documents_removal("Feature X is no longer supported"));
    }

    #[test]
    fn test_silence_is_not_removal() {
        assert!(!documents_removal("Feature X supports TLS 1.2"));
        assert!(!documents_removal(""));
    }

    #[test]
    fn test_word_boundaries() {
        // "unremoved" must not match "removed"
        assert!(!documents_removal("the unremoved feature stays"));
    }
}
