//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the verification engine and
//! infrastructure. Implementations live in other crates (veritor-store).

use crate::{Claim, ClaimId};

/// Trait for storing and retrieving claims
///
/// The temporal engine only reads; `insert_claim` exists for the ingestion
/// boundary and for tests.
pub trait ClaimStore {
    /// Error type for store operations
    type Error;

    /// Insert a new claim into the store
    fn insert_claim(&mut self, claim: Claim) -> Result<ClaimId, Self::Error>;

    /// Get a claim by ID
    fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, Self::Error>;

    /// All claims recorded as evidence for a capability
    fn claims_for_capability(&self, capability: &str) -> Result<Vec<Claim>, Self::Error>;

    /// All claims whose axis context carries the given value for an axis
    fn claims_for_context(&self, axis_key: &str, value: &str) -> Result<Vec<Claim>, Self::Error>;

    /// All distinct raw values observed for an axis across the whole store
    fn distinct_axis_values(&self, axis_key: &str) -> Result<Vec<String>, Self::Error>;

    /// All distinct axis keys observed across the whole store
    fn distinct_axis_keys(&self) -> Result<Vec<String>, Self::Error>;
}

/// Trait for the document clustering function
///
/// Grouping documents into "versions" of the same subject is owned upstream;
/// the temporal engine only consumes the mapping. Tests substitute a trivial
/// one-document-per-cluster implementation.
pub trait ClusterMap {
    /// The cluster a document belongs to
    fn cluster_of(&self, doc_id: &str) -> String;
}

/// One-document-per-cluster mapping, the documented test double
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityClusterMap;

impl ClusterMap for IdentityClusterMap {
    fn cluster_of(&self, doc_id: &str) -> String {
        doc_id.to_string()
    }
}
