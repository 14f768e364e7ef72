//! Metrics collection for backfill operations

/// Metrics collected during backfill runs
#[derive(Debug, Clone, Default)]
pub struct BackfillMetrics {
    /// Axes examined
    pub axes_scanned: usize,

    /// Orderings actually persisted
    pub orderings_written: usize,

    /// Axes skipped because the stored ordering was still current
    pub unchanged: usize,

    /// Axes where no strategy covered the value set
    pub abstentions: usize,

    /// Per-axis failures, with the axis key and a diagnostic
    pub failures: Vec<(String, String)>,

    /// Completed sweep cycles
    pub sweep_count: usize,
}

impl BackfillMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an axis being examined
    pub fn record_scan(&mut self) {
        self.axes_scanned += 1;
    }

    /// Record a persisted ordering
    pub fn record_write(&mut self) {
        self.orderings_written += 1;
    }

    /// Record an axis whose stored ordering was still current
    pub fn record_unchanged(&mut self) {
        self.unchanged += 1;
    }

    /// Record an abstention (no discoverable order)
    pub fn record_abstention(&mut self) {
        self.abstentions += 1;
    }

    /// Record a per-axis failure
    pub fn record_failure(&mut self, axis_key: impl Into<String>, message: impl Into<String>) {
        self.failures.push((axis_key.into(), message.into()));
    }

    /// Record a sweep cycle completion
    pub fn record_sweep(&mut self) {
        self.sweep_count += 1;
    }

    /// Total per-axis failures
    pub fn total_failures(&self) -> usize {
        self.failures.len()
    }

    /// Fold another run's counts into this one
    pub fn merge(&mut self, other: &BackfillMetrics) {
        self.axes_scanned += other.axes_scanned;
        self.orderings_written += other.orderings_written;
        self.unchanged += other.unchanged;
        self.abstentions += other.abstentions;
        self.failures.extend(other.failures.iter().cloned());
        self.sweep_count += other.sweep_count;
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Backfill Metrics Summary".to_string(),
            "========================".to_string(),
            format!("Sweep cycles: {}", self.sweep_count),
            format!("Axes scanned: {}", self.axes_scanned),
            format!("Orderings written: {}", self.orderings_written),
            format!("Unchanged: {}", self.unchanged),
            format!("Abstentions: {}", self.abstentions),
        ];
        if !self.failures.is_empty() {
            lines.push(format!("Failures: {}", self.total_failures()));
            for (axis, message) in &self.failures {
                lines.push(format!("  {axis}: {message}"));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut metrics = BackfillMetrics::new();
        metrics.record_scan();
        metrics.record_scan();
        metrics.record_write();
        metrics.record_abstention();
        metrics.record_failure("release_id", "bijection check failed");
        metrics.record_sweep();

        assert_eq!(metrics.axes_scanned, 2);
        assert_eq!(metrics.orderings_written, 1);
        assert_eq!(metrics.abstentions, 1);
        assert_eq!(metrics.total_failures(), 1);
        assert_eq!(metrics.sweep_count, 1);
    }

    #[test]
    fn test_merge_and_reset() {
        let mut total = BackfillMetrics::new();
        let mut run = BackfillMetrics::new();
        run.record_scan();
        run.record_write();
        run.record_sweep();

        total.merge(&run);
        total.merge(&run);
        assert_eq!(total.axes_scanned, 2);
        assert_eq!(total.orderings_written, 2);
        assert_eq!(total.sweep_count, 2);

        total.reset();
        assert_eq!(total.axes_scanned, 0);
    }

    #[test]
    fn test_summary() {
        let mut metrics = BackfillMetrics::new();
        metrics.record_scan();
        metrics.record_failure("edition", "store write refused");
        metrics.record_sweep();

        let summary = metrics.summary();
        assert!(summary.contains("Sweep cycles: 1"));
        assert!(summary.contains("Axes scanned: 1"));
        assert!(summary.contains("edition: store write refused"));
    }
}
