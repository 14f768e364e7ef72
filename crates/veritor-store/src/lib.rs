//! Veritor Storage Layer
//!
//! SQLite-backed implementation of the claim and ordering store traits, plus
//! [`MemoryStore`], the in-memory double the rest of the workspace tests
//! against.
//!
//! Claims are written once by the extraction pipeline and only read here.
//! Axis orderings are upserted keyed by axis, with an input-set fingerprint
//! so recomputation is idempotent.
//!
//! # Examples
//!
//! ```no_run
//! use veritor_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for claim operations
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod memory;
pub mod wire;

pub use memory::MemoryStore;

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;
use tracing::debug;
use veritor_domain::{AuthorityLevel, Claim, ClaimId, ClaimStore, TruthRegime};
use veritor_ordering::{OrderingStore, StoredOrdering};

use wire::OrderingRecord;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Wire record encode/decode failure
    #[error("wire format error: {0}")]
    Wire(#[from] serde_json::Error),
}

/// SQLite-based claim and ordering store
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// `SqliteStore` instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    fn claim_id_to_bytes(id: ClaimId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    fn bytes_to_claim_id(bytes: &[u8]) -> Result<ClaimId, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "expected 16 bytes for ClaimId, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(ClaimId::from_value(u128::from_be_bytes(arr)))
    }

    fn row_to_claim(row: &rusqlite::Row<'_>) -> rusqlite::Result<Claim> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_claim_id(&id_bytes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Blob, Box::new(e))
        })?;

        let authority_str: String = row.get(5)?;
        let authority = AuthorityLevel::parse(&authority_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                rusqlite::types::Type::Text,
                format!("unknown authority level '{authority_str}'").into(),
            )
        })?;

        let regime_str: String = row.get(6)?;
        let regime = TruthRegime::parse(&regime_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                6,
                rusqlite::types::Type::Text,
                format!("unknown truth regime '{regime_str}'").into(),
            )
        })?;

        let context_json: String = row.get(7)?;
        let axis_context: BTreeMap<String, String> =
            serde_json::from_str(&context_json).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    7,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(Claim {
            id,
            capability: row.get(1)?,
            text: row.get(2)?,
            verbatim_quote: row.get(3)?,
            doc_id: row.get(4)?,
            authority,
            regime,
            axis_context,
            created_at: row.get::<_, i64>(8)? as u64,
        })
    }

    const CLAIM_COLUMNS: &'static str =
        "id, capability, text, verbatim_quote, doc_id, authority, regime, axis_context, created_at";
}

impl ClaimStore for SqliteStore {
    type Error = StoreError;

    fn insert_claim(&mut self, claim: Claim) -> Result<ClaimId, Self::Error> {
        let id_bytes = Self::claim_id_to_bytes(claim.id);
        let context_json = serde_json::to_string(&claim.axis_context)?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO claims (id, capability, text, verbatim_quote, doc_id, authority, regime, axis_context, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                &id_bytes,
                &claim.capability,
                &claim.text,
                &claim.verbatim_quote,
                &claim.doc_id,
                claim.authority.as_str(),
                claim.regime.as_str(),
                &context_json,
                claim.created_at as i64,
            ],
        )?;
        for (axis_key, axis_value) in &claim.axis_context {
            tx.execute(
                "INSERT INTO claim_axes (claim_id, axis_key, axis_value) VALUES (?1, ?2, ?3)",
                params![&id_bytes, axis_key, axis_value],
            )?;
        }
        tx.commit()?;

        debug!(claim_id = %claim.id, capability = %claim.capability, "claim inserted");
        Ok(claim.id)
    }

    fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, Self::Error> {
        let id_bytes = Self::claim_id_to_bytes(id);
        let claim = self
            .conn
            .query_row(
                &format!("SELECT {} FROM claims WHERE id = ?1", Self::CLAIM_COLUMNS),
                params![&id_bytes],
                Self::row_to_claim,
            )
            .optional()?;
        Ok(claim)
    }

    fn claims_for_capability(&self, capability: &str) -> Result<Vec<Claim>, Self::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM claims WHERE capability = ?1 ORDER BY created_at, id",
            Self::CLAIM_COLUMNS
        ))?;
        let claims = stmt
            .query_map(params![capability], Self::row_to_claim)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(claims)
    }

    fn claims_for_context(&self, axis_key: &str, value: &str) -> Result<Vec<Claim>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.capability, c.text, c.verbatim_quote, c.doc_id, c.authority,
                    c.regime, c.axis_context, c.created_at
             FROM claims c
             JOIN claim_axes a ON a.claim_id = c.id
             WHERE a.axis_key = ?1 AND a.axis_value = ?2
             ORDER BY c.created_at, c.id",
        )?;
        let claims = stmt
            .query_map(params![axis_key, value], Self::row_to_claim)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(claims)
    }

    fn distinct_axis_values(&self, axis_key: &str) -> Result<Vec<String>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT axis_value FROM claim_axes WHERE axis_key = ?1 ORDER BY axis_value",
        )?;
        let values = stmt
            .query_map(params![axis_key], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(values)
    }

    fn distinct_axis_keys(&self) -> Result<Vec<String>, Self::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT axis_key FROM claim_axes ORDER BY axis_key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}

impl OrderingStore for SqliteStore {
    type Error = StoreError;

    fn stored_ordering(&self, axis_key: &str) -> Result<Option<StoredOrdering>, Self::Error> {
        let record_json: Option<String> = self
            .conn
            .query_row(
                "SELECT record FROM axis_orderings WHERE axis_key = ?1",
                params![axis_key],
                |row| row.get(0),
            )
            .optional()?;
        match record_json {
            Some(json) => {
                let record: OrderingRecord = serde_json::from_str(&json)?;
                let ordering = record.into_ordering().map_err(StoreError::InvalidData)?;
                Ok(Some(ordering))
            }
            None => Ok(None),
        }
    }

    fn put_ordering(&mut self, ordering: StoredOrdering) -> Result<(), Self::Error> {
        // Idempotence: a recomputation from the same value set writes the
        // same fingerprint; skip the write so repeated backfill runs are
        // no-ops
        let existing: Option<String> = self
            .conn
            .query_row(
                "SELECT input_fingerprint FROM axis_orderings WHERE axis_key = ?1",
                params![&ordering.axis_key],
                |row| row.get(0),
            )
            .optional()?;
        if existing.as_deref() == Some(ordering.input_fingerprint.as_str()) {
            debug!(axis_key = %ordering.axis_key, "ordering unchanged, skipping write");
            return Ok(());
        }

        let record_json = serde_json::to_string(&OrderingRecord::from_ordering(&ordering))?;
        self.conn.execute(
            "INSERT INTO axis_orderings (axis_key, record, input_fingerprint, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(axis_key) DO UPDATE SET
                 record = excluded.record,
                 input_fingerprint = excluded.input_fingerprint,
                 updated_at = excluded.updated_at",
            params![
                &ordering.axis_key,
                &record_json,
                &ordering.input_fingerprint,
                ordering.computed_at as i64,
            ],
        )?;
        debug!(axis_key = %ordering.axis_key, "ordering written");
        Ok(())
    }
}
