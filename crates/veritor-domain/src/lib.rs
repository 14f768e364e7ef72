//! Veritor Domain Layer
//!
//! This crate contains the core vocabulary of the claim verification engine.
//! It stays close to zero external dependencies and defines the fundamental
//! records, closed enums, and trait interfaces that all other layers depend
//! upon.
//!
//! ## Key Concepts
//!
//! - **Claim**: a free-text assertion extracted from a document, with a
//!   verbatim quote and per-axis context values
//! - **Authority Level**: trust tier of the claim's source document
//! - **Truth Regime**: the epistemic category of the assertion (strict
//!   requirement vs. rounded marketing figure vs. statistical result)
//! - **ClaimKey status**: whether a (capability, axis) pairing has passed a
//!   review gate; unreviewed capabilities never get published timelines
//!
//! ## Architecture
//!
//! - Pure domain vocabulary only
//! - Infrastructure implementations (SQLite store, backfill job) live in
//!   other crates
//! - Trait definitions for the claim store and the injected document
//!   clustering function

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod authority;
pub mod claim;
pub mod regime;
pub mod status;
pub mod traits;

// Re-exports for convenience
pub use authority::AuthorityLevel;
pub use claim::{Claim, ClaimId};
pub use regime::TruthRegime;
pub use status::ClaimKeyStatus;
pub use traits::{ClaimStore, ClusterMap, IdentityClusterMap};
