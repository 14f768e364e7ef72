//! Configuration for the ordering backfill job

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the backfill service
///
/// # Examples
///
/// ```
/// use veritor_backfill::BackfillConfig;
///
/// // Default configuration (hourly sweeps)
/// let config = BackfillConfig::default();
/// assert_eq!(config.sweep_interval_minutes, 60);
///
/// // Frequent sweeps for fast-moving corpora
/// let config = BackfillConfig::frequent();
/// assert_eq!(config.sweep_interval_minutes, 15);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackfillConfig {
    /// How often to run the sweep cycle (in minutes)
    /// Default: every 60 minutes
    pub sweep_interval_minutes: u64,

    /// Recompute every axis even when the stored ordering's input
    /// fingerprint still matches the observed value set
    /// Default: false
    #[serde(default)]
    pub recompute_all: bool,

    /// Dry-run mode: log what would be written without writing
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for BackfillConfig {
    fn default() -> Self {
        Self {
            sweep_interval_minutes: 60,
            recompute_all: false,
            dry_run: false,
        }
    }
}

impl BackfillConfig {
    /// Frequent sweeps, for corpora where new releases land often
    pub fn frequent() -> Self {
        Self {
            sweep_interval_minutes: 15,
            ..Self::default()
        }
    }

    /// Infrequent sweeps, for mostly-static corpora
    pub fn relaxed() -> Self {
        Self {
            sweep_interval_minutes: 240,
            ..Self::default()
        }
    }

    /// The sweep interval as a `Duration`
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_minutes * 60)
    }
}
