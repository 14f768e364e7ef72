//! In-memory store, the workspace's standard test double

use std::collections::BTreeMap;

use veritor_domain::{Claim, ClaimId, ClaimStore};
use veritor_ordering::{OrderingStore, StoredOrdering};

/// In-memory claim and ordering store
///
/// Backed by plain collections, infallible in practice. Exported for tests
/// across the workspace; the error type is `String` so callers exercising
/// failure paths can inject one with [`MemoryStore::fail_with`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    claims: Vec<Claim>,
    orderings: BTreeMap<String, StoredOrdering>,
    fail_message: Option<String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with `message`
    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.fail_message = Some(message.into());
    }

    /// Number of claims held
    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }

    fn check(&self) -> Result<(), String> {
        match &self.fail_message {
            Some(msg) => Err(msg.clone()),
            None => Ok(()),
        }
    }
}

impl ClaimStore for MemoryStore {
    type Error = String;

    fn insert_claim(&mut self, claim: Claim) -> Result<ClaimId, Self::Error> {
        self.check()?;
        let id = claim.id;
        self.claims.push(claim);
        Ok(id)
    }

    fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, Self::Error> {
        self.check()?;
        Ok(self.claims.iter().find(|c| c.id == id).cloned())
    }

    fn claims_for_capability(&self, capability: &str) -> Result<Vec<Claim>, Self::Error> {
        self.check()?;
        Ok(self
            .claims
            .iter()
            .filter(|c| c.capability == capability)
            .cloned()
            .collect())
    }

    fn claims_for_context(&self, axis_key: &str, value: &str) -> Result<Vec<Claim>, Self::Error> {
        self.check()?;
        Ok(self
            .claims
            .iter()
            .filter(|c| c.axis_value(axis_key) == Some(value))
            .cloned()
            .collect())
    }

    fn distinct_axis_values(&self, axis_key: &str) -> Result<Vec<String>, Self::Error> {
        self.check()?;
        let mut values: Vec<String> = Vec::new();
        for claim in &self.claims {
            if let Some(value) = claim.axis_value(axis_key) {
                if !values.iter().any(|v| v == value) {
                    values.push(value.to_string());
                }
            }
        }
        Ok(values)
    }

    fn distinct_axis_keys(&self) -> Result<Vec<String>, Self::Error> {
        self.check()?;
        let mut keys: Vec<String> = Vec::new();
        for claim in &self.claims {
            for key in claim.axis_context.keys() {
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }
        Ok(keys)
    }
}

impl OrderingStore for MemoryStore {
    type Error = String;

    fn stored_ordering(&self, axis_key: &str) -> Result<Option<StoredOrdering>, Self::Error> {
        self.check()?;
        Ok(self.orderings.get(axis_key).cloned())
    }

    fn put_ordering(&mut self, ordering: StoredOrdering) -> Result<(), Self::Error> {
        self.check()?;
        self.orderings.insert(ordering.axis_key.clone(), ordering);
        Ok(())
    }
}
