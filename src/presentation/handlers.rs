// HTTP request handlers
use crate::application::lifecycle::{ContainerEvent, LifecycleAction};
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Container lifecycle: `shown` streams load progress, `hidden` tears the charts down
pub async fn modal_event(
    Path(event): Path<ContainerEvent>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.lifecycle.dispatch(event).await {
        LifecycleAction::Loading(rx) => stream_from_receiver(rx).into_response(),
        LifecycleAction::TornDown { .. } => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Mounted charts and summary card texts
pub async fn get_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let dashboard = state.surface.snapshot();
    match json_response(&dashboard, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

pub async fn list_notifications(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.notifications.active())
}

pub async fn dismiss_notification(
    Path(id): Path<u64>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    if state.notifications.dismiss(id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_builder::ChartBuilder;
    use crate::application::chart_registry::ChartRegistry;
    use crate::application::lifecycle::LifecycleBinding;
    use crate::application::notification_service::NotificationCenter;
    use crate::application::stats_service::StatsService;
    use crate::domain::metrics::Metric;
    use crate::domain::theme::Theme;
    use crate::infrastructure::canvas_surface::CanvasSurface;
    use crate::infrastructure::http_repository::HttpStatsRepository;
    use crate::presentation::router;
    use axum::routing::get;
    use axum::Router;
    use chrono::Locale;
    use serde_json::{json, Value};
    use std::time::Duration;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Shop backend where everything but the stock endpoint answers
    async fn shop_backend() -> String {
        let router = Router::new()
            .route(
                "/estadisticas/productos-mas-vendidos",
                get(|| async { Json(json!([{"nombre": "Baguette", "cantidad_vendida": "12"}])) }),
            )
            .route(
                "/estadisticas/usuarios-mas-compras",
                get(|| async { Json(json!([{"nombre": "Ana", "total_compras": "4"}])) }),
            )
            .route(
                "/estadisticas/ventas-ultima-semana",
                get(|| async { Json(json!([{"fecha": "2024-12-25", "total_ventas": "9"}])) }),
            )
            .route(
                "/estadisticas/ingresos-mensuales",
                get(|| async { Json(json!([{"mes_nombre": "Diciembre", "ingresos": "1234.5"}])) }),
            )
            .route(
                "/estadisticas/top-usuarios-ingresos",
                get(|| async { Json(json!([{"nombre": "Ana", "ingresos_totales": "900"}])) }),
            )
            .route(
                "/historial/estadisticas",
                get(|| async { Json(json!({"total_ventas": 31, "ingresos_totales": 1234.5})) }),
            );
        serve(router).await
    }

    async fn dashboard_service() -> String {
        let surface = Arc::new(CanvasSurface::statistics_modal());
        let notifications = Arc::new(NotificationCenter::new(Duration::from_secs(5)));
        let service = StatsService::new(
            Arc::new(HttpStatsRepository::new(&shop_backend().await)),
            ChartRegistry::new(surface.clone()),
            ChartBuilder::new(Theme::festive(), Locale::es_MX),
            notifications.clone(),
            Duration::from_secs(5),
        );
        let state = Arc::new(AppState {
            lifecycle: LifecycleBinding::new(Arc::new(service)),
            surface,
            notifications,
        });
        serve(router(state)).await
    }

    #[tokio::test]
    async fn test_show_load_and_hide() {
        let base = dashboard_service().await;
        let client = reqwest::Client::new();

        let health = client.get(format!("{base}/healthz")).send().await.unwrap();
        assert_eq!(health.text().await.unwrap(), "ok");

        let shown = client.post(format!("{base}/modal/shown")).send().await.unwrap();
        assert_eq!(shown.status(), 200);
        let body = shown.text().await.unwrap();
        let events: Vec<Value> = body.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(events.first().unwrap()["event"], "started");
        let complete = events.last().unwrap();
        assert_eq!(complete["event"], "complete");
        let stock = complete["outcomes"]
            .as_array()
            .unwrap()
            .iter()
            .find(|o| o["metric"] == "stock_vs_sold")
            .unwrap();
        assert_eq!(stock["status"], "failed");

        let dashboard: Value = client
            .get(format!("{base}/dashboard"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(dashboard["charts"].as_array().unwrap().len(), Metric::CHARTS.len() - 1);
        assert_eq!(dashboard["cards"]["statIngresosCard"], "$1,234.50");
        let products = dashboard["charts"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["mount_point"] == "chartProductosMasVendidos")
            .unwrap();
        assert_eq!(products["config"]["data"]["datasets"][0]["data"][0], json!(12));

        let notifications: Vec<Value> = client
            .get(format!("{base}/notifications"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0]["severity"], "warning");
        let id = notifications[0]["id"].as_u64().unwrap();

        let dismissed = client
            .delete(format!("{base}/notifications/{id}"))
            .send()
            .await
            .unwrap();
        assert_eq!(dismissed.status(), 204);
        let again = client
            .delete(format!("{base}/notifications/{id}"))
            .send()
            .await
            .unwrap();
        assert_eq!(again.status(), 404);

        let hidden = client.post(format!("{base}/modal/hidden")).send().await.unwrap();
        assert_eq!(hidden.status(), 204);
        let dashboard: Value = client
            .get(format!("{base}/dashboard"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(dashboard["charts"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_event_is_rejected() {
        let base = dashboard_service().await;
        let response = reqwest::Client::new()
            .post(format!("{base}/modal/minimized"))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }
}
