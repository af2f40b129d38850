// Statistics service - loads every metric concurrently and mounts the results
use crate::application::chart_builder::ChartBuilder;
use crate::application::chart_registry::ChartRegistry;
use crate::application::fetch_error::FetchError;
use crate::application::notification_service::NotificationCenter;
use crate::application::stats_repository::StatsRepository;
use crate::domain::chart::ChartConfig;
use crate::domain::metrics::Metric;
use crate::domain::notification::Severity;
use crate::domain::report::{LoadEvent, LoadReport, MetricOutcome, MetricStatus};
use crate::domain::summary::SummaryCards;
use futures::future::{join_all, AbortHandle, Abortable};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};

pub const SUCCESS_MESSAGE: &str = "Estadísticas actualizadas";
pub const FAILURE_MESSAGE: &str = "Error al cargar estadísticas";

/// Batch currently loading, identified by the registry epoch it renders into
struct InFlight {
    epoch: u64,
    abort: AbortHandle,
}

pub struct StatsService {
    repository: Arc<dyn StatsRepository>,
    registry: Arc<Mutex<ChartRegistry>>,
    builder: ChartBuilder,
    notifications: Arc<NotificationCenter>,
    request_timeout: Duration,
    in_flight: Mutex<Option<InFlight>>,
}

impl StatsService {
    pub fn new(
        repository: Arc<dyn StatsRepository>,
        registry: ChartRegistry,
        builder: ChartBuilder,
        notifications: Arc<NotificationCenter>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            registry: Arc::new(Mutex::new(registry)),
            builder,
            notifications,
            request_timeout,
            in_flight: Mutex::new(None),
        }
    }

    pub fn registry(&self) -> &Arc<Mutex<ChartRegistry>> {
        &self.registry
    }

    pub fn notifications(&self) -> &Arc<NotificationCenter> {
        &self.notifications
    }

    /// Clear the dashboard and load every metric again.
    ///
    /// A batch still in flight is cancelled first. The returned report holds
    /// one outcome per metric; a batch that gets superseded reports every
    /// metric as cancelled and emits no notification.
    pub async fn load(&self) -> LoadReport {
        self.run_batch(None).await
    }

    /// Run a load in the background, streaming one event per finished metric
    /// and a final `Complete` event.
    pub fn load_with_progress(self: &Arc<Self>) -> mpsc::Receiver<LoadEvent> {
        let (tx, rx) = mpsc::channel(Metric::ALL.len() + 2);
        let service = Arc::clone(self);
        tokio::spawn(async move {
            service.run_batch(Some(tx)).await;
        });
        rx
    }

    /// Cancel any batch in flight and destroy every chart. Returns how many charts were destroyed.
    pub async fn teardown(&self) -> usize {
        let mut in_flight = self.in_flight.lock().await;
        if let Some(batch) = in_flight.take() {
            tracing::info!("Cancelling statistics batch {}", batch.epoch);
            batch.abort.abort();
        }
        let destroyed = self.registry.lock().await.clear();
        tracing::debug!("Teardown destroyed {} charts", destroyed);
        destroyed
    }

    async fn run_batch(&self, progress: Option<mpsc::Sender<LoadEvent>>) -> LoadReport {
        let started = Instant::now();
        let (abort, registration) = AbortHandle::new_pair();

        let epoch = {
            let mut in_flight = self.in_flight.lock().await;
            if let Some(previous) = in_flight.take() {
                tracing::info!("Superseding statistics batch {}", previous.epoch);
                previous.abort.abort();
            }

            let mut registry = self.registry.lock().await;
            registry.clear();
            let epoch = registry.epoch();
            if let Err(e) = registry.write_cards(epoch, &SummaryCards::loading()) {
                tracing::warn!("Could not show card placeholders: {}", e);
            }

            *in_flight = Some(InFlight { epoch, abort });
            epoch
        };

        tracing::info!("Loading statistics (batch {})", epoch);
        send(&progress, LoadEvent::Started { epoch }).await;

        let fetchers = Metric::ALL.iter().map(|&metric| {
            let progress = progress.clone();
            async move {
                let outcome = MetricOutcome {
                    metric,
                    status: self.fetch_metric(metric, epoch).await,
                };
                send(&progress, LoadEvent::Metric(outcome.clone())).await;
                outcome
            }
        });
        let result = Abortable::new(join_all(fetchers), registration).await;

        // A teardown or newer load may have taken the slot after the fetchers
        // finished; the batch is still superseded then.
        let still_current = {
            let mut in_flight = self.in_flight.lock().await;
            let current = in_flight.as_ref().is_some_and(|b| b.epoch == epoch);
            if current {
                *in_flight = None;
            }
            current
        };

        let duration_ms = started.elapsed().as_millis() as u64;
        let report = match result {
            Ok(outcomes) if still_current => LoadReport::new(epoch, outcomes, duration_ms),
            _ => LoadReport::cancelled(epoch, duration_ms),
        };

        if report.is_cancelled() {
            tracing::info!("Statistics batch {} cancelled after {}ms", epoch, duration_ms);
        } else {
            tracing::info!(
                "Statistics batch {} finished in {}ms: {}/{} rendered",
                epoch,
                duration_ms,
                report.rendered(),
                report.outcomes.len()
            );
            self.announce(&report);
        }

        send(&progress, LoadEvent::Complete(report.clone())).await;
        report
    }

    /// Fetcher boundary: every error stops here and becomes the metric's status
    async fn fetch_metric(&self, metric: Metric, epoch: u64) -> MetricStatus {
        match self.render_metric(metric, epoch).await {
            Ok(()) => {
                tracing::debug!("Metric {} rendered", metric);
                MetricStatus::Rendered
            }
            Err(FetchError::StaleEpoch { .. }) => {
                tracing::debug!("Metric {} arrived for a superseded batch", metric);
                MetricStatus::Cancelled
            }
            Err(e) => {
                tracing::warn!("Error loading {}: {}", metric, e);
                if metric == Metric::SummaryCards {
                    let registry = self.registry.lock().await;
                    if let Err(e) = registry.write_cards(epoch, &SummaryCards::zeroed()) {
                        tracing::debug!("Could not reset summary cards: {}", e);
                    }
                }
                match e {
                    FetchError::Timeout(_) => MetricStatus::TimedOut,
                    other => MetricStatus::Failed {
                        reason: other.to_string(),
                    },
                }
            }
        }
    }

    /// Bound one backend request by the configured timeout
    async fn bounded<T>(&self, request: impl Future<Output = Result<T, FetchError>>) -> Result<T, FetchError> {
        tokio::time::timeout(self.request_timeout, request)
            .await
            .unwrap_or(Err(FetchError::Timeout(self.request_timeout)))
    }

    async fn render_metric(&self, metric: Metric, epoch: u64) -> Result<(), FetchError> {
        let repo = &self.repository;
        let builder = &self.builder;

        let config: ChartConfig = match metric {
            Metric::TopProducts => builder.top_products(&self.bounded(repo.top_products()).await?),
            Metric::FrequentCustomers => {
                builder.frequent_customers(&self.bounded(repo.frequent_customers()).await?)
            }
            Metric::WeeklySales => builder.weekly_sales(&self.bounded(repo.weekly_sales()).await?),
            Metric::MonthlyRevenue => builder.monthly_revenue(&self.bounded(repo.monthly_revenue()).await?),
            Metric::TopCustomersByRevenue => {
                builder.top_customers_by_revenue(&self.bounded(repo.top_customers_by_revenue()).await?)
            }
            Metric::StockVsSold => builder.stock_vs_sold(&self.bounded(repo.stock_vs_sold()).await?),
            Metric::SummaryCards => {
                let summary = self.bounded(repo.sales_summary()).await?;
                let customers = self.bounded(repo.frequent_customers()).await?;
                let cards = SummaryCards::from_summary(&summary, customers.len());
                return self.registry.lock().await.write_cards(epoch, &cards);
            }
        };

        let (Some(name), Some(mount_point)) = (metric.chart_name(), metric.mount_point()) else {
            return Ok(());
        };
        self.registry
            .lock()
            .await
            .render(epoch, name, mount_point, config)
    }

    fn announce(&self, report: &LoadReport) {
        let failed = report.failed();
        if failed.is_empty() {
            self.notifications.notify(SUCCESS_MESSAGE, Severity::Success);
        } else if failed.len() == report.outcomes.len() {
            self.notifications.notify(FAILURE_MESSAGE, Severity::Danger);
        } else {
            let names: Vec<&str> = failed.iter().map(|m| m.caption()).collect();
            self.notifications.notify(
                format!("No se pudieron cargar: {}", names.join(", ")),
                Severity::Warning,
            );
        }
    }
}

async fn send(progress: &Option<mpsc::Sender<LoadEvent>>, event: LoadEvent) {
    if let Some(tx) = progress {
        let _ = tx.send(event).await;
    }
}
