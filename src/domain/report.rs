// Load report domain model - per-metric outcome of one load batch
use super::metrics::Metric;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricStatus {
    Rendered,
    Failed { reason: String },
    TimedOut,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricOutcome {
    pub metric: Metric,
    #[serde(flatten)]
    pub status: MetricStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub epoch: u64,
    pub outcomes: Vec<MetricOutcome>,
    pub duration_ms: u64,
}

impl LoadReport {
    pub fn new(epoch: u64, outcomes: Vec<MetricOutcome>, duration_ms: u64) -> Self {
        Self {
            epoch,
            outcomes,
            duration_ms,
        }
    }

    /// Report for a batch that was aborted before finishing
    pub fn cancelled(epoch: u64, duration_ms: u64) -> Self {
        let outcomes = Metric::ALL
            .iter()
            .map(|&metric| MetricOutcome {
                metric,
                status: MetricStatus::Cancelled,
            })
            .collect();
        Self::new(epoch, outcomes, duration_ms)
    }

    pub fn status_of(&self, metric: Metric) -> Option<&MetricStatus> {
        self.outcomes
            .iter()
            .find(|o| o.metric == metric)
            .map(|o| &o.status)
    }

    pub fn is_cancelled(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.status == MetricStatus::Cancelled)
    }

    pub fn rendered(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == MetricStatus::Rendered)
            .count()
    }

    /// Metrics that failed or timed out
    pub fn failed(&self) -> Vec<Metric> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, MetricStatus::Failed { .. } | MetricStatus::TimedOut))
            .map(|o| o.metric)
            .collect()
    }
}

/// Progress of a load batch, streamed to clients as it happens
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LoadEvent {
    Started { epoch: u64 },
    Metric(MetricOutcome),
    Complete(LoadReport),
}
