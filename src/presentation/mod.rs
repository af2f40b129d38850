// Presentation layer - HTTP routes
pub mod app_state;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dismiss_notification, get_dashboard, health_check, list_notifications, modal_event,
};
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/modal/:event", post(modal_event))
        .route("/dashboard", get(get_dashboard))
        .route("/notifications", get(list_notifications))
        .route("/notifications/:id", delete(dismiss_notification))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
