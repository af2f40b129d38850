// Application state for HTTP handlers
use crate::application::chart_surface::ChartSurface;
use crate::application::lifecycle::LifecycleBinding;
use crate::application::notification_service::NotificationCenter;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub lifecycle: LifecycleBinding,
    pub surface: Arc<dyn ChartSurface>,
    pub notifications: Arc<NotificationCenter>,
}
