// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::chart_builder::ChartBuilder;
use crate::application::chart_registry::ChartRegistry;
use crate::application::lifecycle::LifecycleBinding;
use crate::application::notification_service::NotificationCenter;
use crate::application::stats_service::StatsService;
use crate::infrastructure::canvas_surface::CanvasSurface;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_repository::HttpStatsRepository;
use crate::presentation::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let theme = config.theme()?;
    let theme_name = theme.name.clone();
    let locale = config.locale()?;

    // Create repository and surface (infrastructure layer)
    let repository = Arc::new(HttpStatsRepository::from_config(&config));
    let surface = Arc::new(CanvasSurface::statistics_modal());

    // Create services (application layer)
    let notifications = Arc::new(NotificationCenter::new(config.notification_duration()));
    let stats_service = Arc::new(StatsService::new(
        repository,
        ChartRegistry::new(surface.clone()),
        ChartBuilder::new(theme, locale),
        notifications.clone(),
        config.request_timeout(),
    ));

    // Create application state
    let state = Arc::new(AppState {
        lifecycle: LifecycleBinding::new(stats_service),
        surface,
        notifications,
    });

    // Build router (presentation layer)
    let router = presentation::router(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!(
        "Starting sales-stats-dashboard on {} (backend {}, theme {})",
        addr,
        config.backend.base_url,
        theme_name
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
