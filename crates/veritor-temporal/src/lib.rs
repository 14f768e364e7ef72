//! Veritor Temporal Query Engine
//!
//! Answers "since when has this capability existed?" and "does this claim
//! still apply?" over a store of versioned claims, without ever fabricating
//! authority:
//!
//! - Queries against unreviewed (candidate) claim keys are refused outright.
//! - Timelines are emitted only when the axis order was actually discovered.
//! - `Removed` requires a claim that explicitly documents removal at a later
//!   context; silence is never evidence of removal.
//! - Every non-refused result cites the concrete claims it rests on.
//! - Budget exhaustion degrades to an explicit unresolved answer, never a
//!   truncated one presented as complete.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod engine;
mod error;
mod removal;
mod types;

pub use config::QueryConfig;
pub use engine::TemporalQueryEngine;
pub use error::TemporalError;
pub use removal::documents_removal;
pub use types::{
    ApplicabilityStatus, ClaimCitation, ContextDiff, SinceWhenResult, StillApplicableResult,
    UncertaintyAnalysis,
};
