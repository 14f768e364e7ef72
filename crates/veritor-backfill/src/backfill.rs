//! The ordering backfill job

use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};
use veritor_domain::ClaimStore;
use veritor_ordering::{AxisOrderInferrer, OrderingStore, StoredOrdering};

use crate::{BackfillConfig, BackfillError, BackfillMetrics};

/// Recomputes persisted axis orderings from the currently observed values
///
/// One axis at a time: list the distinct values, skip the axis when the
/// stored ordering's input fingerprint still matches, otherwise re-run
/// inference and upsert. A failed axis is recorded and the run continues;
/// only a failure to list the axes aborts the whole run. Since inference is
/// a pure function of the value set, the job is idempotent and safe to
/// re-run after interruption.
pub struct Backfill {
    config: BackfillConfig,
    inferrer: AxisOrderInferrer,
    metrics: BackfillMetrics,
}

impl Backfill {
    /// Create a backfill job with the given configuration
    pub fn new(config: BackfillConfig) -> Self {
        Self {
            config,
            inferrer: AxisOrderInferrer::new(),
            metrics: BackfillMetrics::new(),
        }
    }

    /// Create a backfill job with default configuration
    pub fn default_config() -> Self {
        Self::new(BackfillConfig::default())
    }

    /// Run one sweep over every known axis
    ///
    /// Returns this run's metrics; cumulative metrics are kept on the job.
    pub fn run<S>(&mut self, store: &mut S) -> Result<BackfillMetrics, BackfillError>
    where
        S: ClaimStore + OrderingStore,
        <S as ClaimStore>::Error: Display,
        <S as OrderingStore>::Error: Display,
    {
        let axes = ClaimStore::distinct_axis_keys(store)
            .map_err(|e| BackfillError::Store(e.to_string()))?;
        debug!(axis_count = axes.len(), "backfill sweep starting");

        let mut run = BackfillMetrics::new();
        for axis_key in axes {
            run.record_scan();
            self.backfill_axis(store, &axis_key, &mut run);
        }
        run.record_sweep();

        self.metrics.merge(&run);
        Ok(run)
    }

    fn backfill_axis<S>(&self, store: &mut S, axis_key: &str, run: &mut BackfillMetrics)
    where
        S: ClaimStore + OrderingStore,
        <S as ClaimStore>::Error: Display,
        <S as OrderingStore>::Error: Display,
    {
        let values = match ClaimStore::distinct_axis_values(store, axis_key) {
            Ok(values) => values,
            Err(e) => {
                warn!(axis_key, error = %e, "failed to list axis values");
                run.record_failure(axis_key, e.to_string());
                return;
            }
        };

        if !self.config.recompute_all {
            match store.stored_ordering(axis_key) {
                Ok(Some(stored)) if stored.matches_input(&values) => {
                    debug!(axis_key, "stored ordering still current");
                    run.record_unchanged();
                    return;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(axis_key, error = %e, "failed to read stored ordering");
                    run.record_failure(axis_key, e.to_string());
                    return;
                }
            }
        }

        let result = self.inferrer.infer_order(axis_key, &values);
        let Some(order) = &result.inferred_order else {
            debug!(axis_key, reason = %result.reason, "no discoverable order, abstaining");
            run.record_abstention();
            return;
        };

        // Re-verify the bijection at the write boundary; an order that is
        // not a permutation of the observed set must never be persisted
        if !is_permutation(order, &values) {
            warn!(axis_key, "inferred order failed the bijection check, write rejected");
            run.record_failure(axis_key, "bijection check failed".to_string());
            return;
        }

        let Some(ordering) = StoredOrdering::from_result(&result, unix_now()) else {
            run.record_failure(axis_key, "inference result carried no order".to_string());
            return;
        };

        if self.config.dry_run {
            info!(
                axis_key,
                value_count = ordering.values.len(),
                confidence = ordering.confidence.as_str(),
                "dry run: would write ordering"
            );
            return;
        }

        match store.put_ordering(ordering) {
            Ok(()) => {
                debug!(axis_key, "ordering written");
                run.record_write();
            }
            Err(e) => {
                warn!(axis_key, error = %e, "ordering write failed");
                run.record_failure(axis_key, e.to_string());
            }
        }
    }

    /// Cumulative metrics across all runs
    pub fn metrics(&self) -> &BackfillMetrics {
        &self.metrics
    }

    /// Reset the cumulative metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

/// True iff `order` holds exactly the distinct elements of `values`
fn is_permutation(order: &[String], values: &[String]) -> bool {
    let mut distinct: Vec<&String> = Vec::new();
    for value in values {
        if !distinct.contains(&value) {
            distinct.push(value);
        }
    }
    order.len() == distinct.len() && distinct.iter().all(|v| order.contains(v))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
