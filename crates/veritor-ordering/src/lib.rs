//! Veritor Axis Order Inference
//!
//! Determines whether the raw values observed for one axis (a release
//! identifier, an edition, a year) form a discoverable total order, and with
//! what confidence.
//!
//! # Overview
//!
//! A fixed cascade of strategies is attempted against the *entire* value
//! set; the first strategy under which every value parses wins. Partial
//! coverage never yields a partial or guessed order: if no strategy covers
//! the full set, the result is `UNKNOWN` with no order. Every successful
//! strategy must return a permutation of its input (the bijection
//! invariant); a strategy that would collapse two distinct values onto one
//! sort key abstains instead.
//!
//! # Example
//!
//! ```
//! use veritor_ordering::{AxisOrderInferrer, OrderingConfidence};
//!
//! let inferrer = AxisOrderInferrer::new();
//! let values = ["2021 FPS02", "2021", "2021 FPS01", "2022"].map(String::from);
//! let result = inferrer.infer_order("release_id", &values);
//!
//! assert!(result.is_orderable);
//! assert_eq!(result.confidence, OrderingConfidence::Certain);
//! assert_eq!(
//!     result.inferred_order.unwrap(),
//!     vec!["2021", "2021 FPS01", "2021 FPS02", "2022"]
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod inferrer;
mod persist;
mod result;
mod strategies;

pub use inferrer::AxisOrderInferrer;
pub use persist::{OrderingStore, StoredOrdering};
pub use result::{OrderInferenceResult, OrderType, OrderingConfidence};
pub use strategies::OrderingStrategy;
