//! Background worker for continuous backfill operation

use std::fmt::Display;

use tokio::time::interval;
use veritor_domain::ClaimStore;
use veritor_ordering::OrderingStore;

use crate::{Backfill, BackfillConfig, BackfillError, BackfillMetrics};

/// Background worker that runs the backfill job on a schedule
///
/// # Examples
///
/// ```no_run
/// use veritor_backfill::{BackfillConfig, BackfillWorker};
/// use veritor_store::SqliteStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = SqliteStore::new("veritor.db")?;
///     let mut worker = BackfillWorker::new(BackfillConfig::default());
///
///     // Run indefinitely (until Ctrl+C)
///     worker.run(store).await?;
///     Ok(())
/// }
/// ```
pub struct BackfillWorker {
    backfill: Backfill,
    interval: std::time::Duration,
}

impl BackfillWorker {
    /// Create a new background worker with the given configuration
    pub fn new(config: BackfillConfig) -> Self {
        let interval = config.sweep_interval();
        Self {
            backfill: Backfill::new(config),
            interval,
        }
    }

    /// Create a worker with default configuration
    pub fn default_config() -> Self {
        Self::new(BackfillConfig::default())
    }

    /// Run the worker until a shutdown signal (Ctrl+C) is received
    ///
    /// A failed sweep is logged and the next one still runs; independent
    /// sweeps over current store contents recover on their own.
    pub async fn run<S>(&mut self, mut store: S) -> Result<(), BackfillError>
    where
        S: ClaimStore + OrderingStore,
        <S as ClaimStore>::Error: Display,
        <S as OrderingStore>::Error: Display,
    {
        let mut ticker = interval(self.interval);

        tracing::info!("backfill worker started (interval: {:?})", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.backfill.run(&mut store) {
                        Ok(run) => {
                            tracing::info!(
                                "sweep completed: {} scanned, {} written, {} abstained, {} failed",
                                run.axes_scanned,
                                run.orderings_written,
                                run.abstentions,
                                run.total_failures()
                            );
                        }
                        Err(e) => {
                            tracing::error!("sweep failed: {}", e);
                        }
                    }
                }
                res = tokio::signal::ctrl_c() => {
                    res.map_err(|e| {
                        BackfillError::Worker(format!("signal listener failed: {e}"))
                    })?;
                    tracing::info!("shutdown signal received, stopping backfill worker");
                    break;
                }
            }
        }

        tracing::info!(
            "backfill worker stopped. Final metrics:\n{}",
            self.backfill.metrics().summary()
        );
        Ok(())
    }

    /// Run for a specific number of cycles (useful for testing)
    pub async fn run_cycles<S>(
        &mut self,
        mut store: S,
        cycles: usize,
    ) -> Result<(), BackfillError>
    where
        S: ClaimStore + OrderingStore,
        <S as ClaimStore>::Error: Display,
        <S as OrderingStore>::Error: Display,
    {
        let mut ticker = interval(self.interval);

        for cycle in 0..cycles {
            ticker.tick().await;
            tracing::debug!("starting sweep cycle {}/{}", cycle + 1, cycles);
            self.backfill.run(&mut store)?;
        }

        tracing::info!(
            "backfill finished {} cycles. Final metrics:\n{}",
            cycles,
            self.backfill.metrics().summary()
        );
        Ok(())
    }

    /// Get a reference to the cumulative metrics
    pub fn metrics(&self) -> &BackfillMetrics {
        self.backfill.metrics()
    }

    /// Reset the cumulative metrics counters
    pub fn reset_metrics(&mut self) {
        self.backfill.reset_metrics();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritor_domain::{AuthorityLevel, Claim, TruthRegime};
    use veritor_store::MemoryStore;

    fn claim(capability: &str, axis: &str, value: &str) -> Claim {
        Claim::new(
            capability,
            format!("{capability} is supported"),
            format!("{capability} is supported here"),
            format!("doc-{value}"),
            AuthorityLevel::Medium,
            TruthRegime::NormativeStrict,
            1_700_000_000,
        )
        .with_axis(axis, value)
    }

    #[tokio::test]
    async fn test_worker_creation() {
        let worker = BackfillWorker::default_config();
        assert_eq!(worker.metrics().sweep_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_cycles() {
        let mut store = MemoryStore::new();
        store.insert_claim(claim("Feature X", "release_id", "2021")).unwrap();
        store.insert_claim(claim("Feature X", "release_id", "2022")).unwrap();

        let mut worker = BackfillWorker::new(BackfillConfig::default());
        worker.run_cycles(store, 2).await.unwrap();

        let metrics = worker.metrics();
        assert_eq!(metrics.sweep_count, 2);
        // First cycle writes, second finds the fingerprint unchanged
        assert_eq!(metrics.orderings_written, 1);
        assert_eq!(metrics.unchanged, 1);
    }

    #[tokio::test]
    async fn test_reset_metrics() {
        let mut store = MemoryStore::new();
        store.insert_claim(claim("Feature X", "release_id", "2021")).unwrap();
        store.insert_claim(claim("Feature X", "release_id", "2022")).unwrap();

        let mut worker = BackfillWorker::new(BackfillConfig::default());
        worker.run_cycles(store, 1).await.unwrap();
        assert_eq!(worker.metrics().sweep_count, 1);

        worker.reset_metrics();
        assert_eq!(worker.metrics().sweep_count, 0);
    }
}
