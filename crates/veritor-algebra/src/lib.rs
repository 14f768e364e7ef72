//! Veritor Value Algebra
//!
//! Comparison semantics and tolerance policy over extracted claim values.
//!
//! # Overview
//!
//! The comparator decides whether two claimed values assert the same fact,
//! possibly stated with different precision or wording. Mismatched kinds or
//! units produce an `Incomparable` verdict: a legitimate terminal state
//! surfaced for manual review, never an error.
//!
//! The tolerance policy decides how much numeric slack an "approximately
//! equal" verdict may use, from the claim's truth regime, the source's
//! authority level, and how hedged the wording is. It is a pure function
//! over an explicit configuration value.
//!
//! # Example
//!
//! ```
//! use veritor_algebra::{compare, Verdict};
//! use veritor_extractor::extract;
//!
//! let requirement = extract("uptime of at least 99%").unwrap();
//! let observed = extract("99.9% uptime").unwrap();
//! assert_eq!(compare(&requirement, &observed, 0.0), Verdict::Equal);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod comparand;
mod comparator;
mod tolerance;

pub use comparand::Comparand;
pub use comparator::{compare, Verdict};
pub use tolerance::{ToleranceConfig, ToleranceDecision, TolerancePolicy, ToleranceRule};
