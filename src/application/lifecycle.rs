// Lifecycle binding - statistics container shown/hidden events
use crate::application::stats_service::StatsService;
use crate::domain::report::LoadEvent;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerEvent {
    Shown,
    Hidden,
}

#[derive(Debug)]
pub enum LifecycleAction {
    /// A load batch started; its progress arrives on the receiver
    Loading(mpsc::Receiver<LoadEvent>),
    /// Charts were torn down
    TornDown { destroyed: usize },
}

#[derive(Clone)]
pub struct LifecycleBinding {
    service: Arc<StatsService>,
}

impl LifecycleBinding {
    pub fn new(service: Arc<StatsService>) -> Self {
        Self { service }
    }

    pub async fn dispatch(&self, event: ContainerEvent) -> LifecycleAction {
        match event {
            ContainerEvent::Shown => LifecycleAction::Loading(self.on_shown()),
            ContainerEvent::Hidden => LifecycleAction::TornDown {
                destroyed: self.on_hidden().await,
            },
        }
    }

    /// Container opened: load every metric. Re-entrant calls supersede the running batch.
    pub fn on_shown(&self) -> mpsc::Receiver<LoadEvent> {
        tracing::info!("Statistics container shown");
        self.service.load_with_progress()
    }

    /// Container closed: cancel loading and destroy the charts
    pub async fn on_hidden(&self) -> usize {
        tracing::info!("Statistics container hidden");
        self.service.teardown().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_builder::ChartBuilder;
    use crate::application::chart_registry::ChartRegistry;
    use crate::application::fetch_error::FetchError;
    use crate::application::notification_service::NotificationCenter;
    use crate::application::stats_repository::StatsRepository;
    use crate::domain::metrics::*;
    use crate::domain::theme::Theme;
    use crate::infrastructure::canvas_surface::CanvasSurface;
    use async_trait::async_trait;
    use chrono::Locale;
    use std::time::Duration;

    /// Backend with no data at all
    struct EmptyRepository;

    #[async_trait]
    impl StatsRepository for EmptyRepository {
        async fn top_products(&self) -> Result<Vec<ProductSales>, FetchError> {
            Ok(Vec::new())
        }
        async fn frequent_customers(&self) -> Result<Vec<CustomerPurchases>, FetchError> {
            Ok(Vec::new())
        }
        async fn weekly_sales(&self) -> Result<Vec<DailySales>, FetchError> {
            Ok(Vec::new())
        }
        async fn monthly_revenue(&self) -> Result<Vec<MonthlyRevenue>, FetchError> {
            Ok(Vec::new())
        }
        async fn top_customers_by_revenue(&self) -> Result<Vec<CustomerRevenue>, FetchError> {
            Ok(Vec::new())
        }
        async fn stock_vs_sold(&self) -> Result<Vec<StockLevel>, FetchError> {
            Ok(Vec::new())
        }
        async fn sales_summary(&self) -> Result<SalesSummary, FetchError> {
            Ok(SalesSummary::default())
        }
    }

    fn binding() -> (Arc<CanvasSurface>, LifecycleBinding) {
        let surface = Arc::new(CanvasSurface::statistics_modal());
        let service = StatsService::new(
            Arc::new(EmptyRepository),
            ChartRegistry::new(surface.clone()),
            ChartBuilder::new(Theme::festive(), Locale::es_MX),
            Arc::new(NotificationCenter::new(Duration::from_secs(5))),
            Duration::from_secs(5),
        );
        (surface, LifecycleBinding::new(Arc::new(service)))
    }

    async fn drain(mut rx: mpsc::Receiver<LoadEvent>) -> Vec<LoadEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_hidden_without_charts_is_noop() {
        let (surface, binding) = binding();
        match binding.dispatch(ContainerEvent::Hidden).await {
            LifecycleAction::TornDown { destroyed } => assert_eq!(destroyed, 0),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(surface.live_charts(), 0);
    }

    #[tokio::test]
    async fn test_shown_then_hidden() {
        let (surface, binding) = binding();
        let LifecycleAction::Loading(rx) = binding.dispatch(ContainerEvent::Shown).await else {
            panic!("shown should start loading");
        };
        let events = drain(rx).await;
        assert!(matches!(events.last(), Some(LoadEvent::Complete(_))));
        // Empty datasets still mount charts
        assert_eq!(surface.live_charts(), Metric::CHARTS.len());
        assert_eq!(surface.text_of("statClientesCard").as_deref(), Some("0"));

        assert_eq!(binding.on_hidden().await, Metric::CHARTS.len());
        assert_eq!(surface.live_charts(), 0);
    }

    #[test]
    fn test_event_names() {
        let event: ContainerEvent = serde_json::from_str("\"shown\"").unwrap();
        assert_eq!(event, ContainerEvent::Shown);
        let event: ContainerEvent = serde_json::from_str("\"hidden\"").unwrap();
        assert_eq!(event, ContainerEvent::Hidden);
    }
}
