//! Veritor Ordering Backfill
//!
//! Batch repair job that keeps persisted axis orderings in line with the
//! values actually observed in the claim store.
//!
//! # Overview
//!
//! New documents keep introducing new axis values (a new release id, a new
//! edition), which silently invalidates previously inferred orderings. The
//! backfill job re-runs order inference for every axis whose stored ordering
//! no longer matches the observed value set:
//!
//! - Inference is a pure function of the value set, so the job is idempotent
//!   and safe to re-run after interruption.
//! - An ordering is persisted only after the bijection check passes at the
//!   write boundary; a failed check is a per-axis failure, never a crash of
//!   the run.
//! - Axes with no discoverable order are recorded as abstentions, not
//!   errors.
//!
//! # Usage
//!
//! ## One-time sweep
//!
//! ```no_run
//! use veritor_backfill::{Backfill, BackfillConfig};
//! use veritor_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new("veritor.db")?;
//! let mut backfill = Backfill::default_config();
//!
//! let metrics = backfill.run(&mut store)?;
//! println!("{}", metrics.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Background worker
//!
//! ```no_run
//! use veritor_backfill::{BackfillConfig, BackfillWorker};
//! use veritor_store::SqliteStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteStore::new("veritor.db")?;
//!     let mut worker = BackfillWorker::new(BackfillConfig::default());
//!     worker.run(store).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod backfill;
mod config;
mod error;
mod metrics;
mod worker;

pub use backfill::Backfill;
pub use config::BackfillConfig;
pub use error::BackfillError;
pub use metrics::BackfillMetrics;
pub use worker::BackfillWorker;
