//! Veritor Value Extractor
//!
//! Parses free-text claim wording into typed, comparable values.
//!
//! # Overview
//!
//! `extract` turns "minimum TLS 1.2" into a typed value record (kind
//! `Version`, normalized `"1.2"`, operator `Ge`) that the value algebra can
//! compare. It is a deterministic, side-effect-free pattern matcher: text
//! with no recognizable value yields `None`, never an error. Extraction
//! misses are normal and frequent.
//!
//! # Pattern precedence
//!
//! Categories are tried in a fixed order, first match wins:
//! percent > version > number+unit > boolean > enum.
//!
//! Operator inference runs independently of kind matching by scanning for
//! comparison wording ("at least", "below", "approximately"), defaulting to
//! `Eq`.
//!
//! # Example
//!
//! ```
//! use veritor_extractor::{extract, ValueKind, ValueOperator};
//!
//! let value = extract("minimum TLS 1.2").unwrap();
//! assert_eq!(value.kind, ValueKind::Version);
//! assert_eq!(value.operator, ValueOperator::Ge);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod extract;
mod value;
pub mod vocab;

pub use extract::{classify, extract, hedge_strength, infer_operator};
pub use value::{ComparableClass, ExtractedValue, NormalizedValue, ValueKind, ValueOperator};
