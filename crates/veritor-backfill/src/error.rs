//! Error types for backfill operations

use thiserror::Error;

/// Errors that can occur during backfill operations
///
/// Per-axis failures (including bijection rejections) are recorded in the
/// run's metrics and never abort the run; this enum covers whole-run
/// failures only.
#[derive(Debug, Error)]
pub enum BackfillError {
    /// The axis listing itself could not be read
    #[error("storage error: {0}")]
    Store(String),

    /// The worker's shutdown signal listener could not be installed
    #[error("worker error: {0}")]
    Worker(String),
}
