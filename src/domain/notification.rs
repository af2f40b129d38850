// Notification domain model
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Danger,
    Warning,
    Info,
}

impl Severity {
    /// Bootstrap icon class
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "bi-check-circle-fill",
            Severity::Danger => "bi-exclamation-triangle-fill",
            Severity::Warning => "bi-exclamation-circle-fill",
            Severity::Info => "bi-info-circle-fill",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Severity::Success => "#27ae60",
            Severity::Danger => "#e7b13cff",
            Severity::Warning => "#a4f312ff",
            Severity::Info => "#b419d3ff",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notification {
    pub fn new(id: u64, severity: Severity, message: String, duration: Duration) -> Self {
        Self {
            id,
            severity,
            message,
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.duration
    }

    pub fn view(&self) -> NotificationView {
        NotificationView {
            id: self.id,
            severity: self.severity,
            icon: self.severity.icon(),
            color: self.severity.color(),
            message: self.message.clone(),
            duration_ms: self.duration.as_millis() as u64,
        }
    }
}

/// Wire form of a notification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationView {
    pub id: u64,
    pub severity: Severity,
    pub icon: &'static str,
    pub color: &'static str,
    pub message: String,
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_danger_icon_and_color_ignore_message() {
        for message in ["", "Estadísticas actualizadas", "success", "<b>info</b>"] {
            let view = Notification::new(1, Severity::Danger, message.to_string(), Duration::from_secs(5)).view();
            assert_eq!(view.icon, "bi-exclamation-triangle-fill");
            assert_eq!(view.color, "#e7b13cff");
        }
    }

    #[test]
    fn test_expiry() {
        let n = Notification::new(1, Severity::Info, "hola".to_string(), Duration::from_millis(100));
        assert!(!n.is_expired(n.created_at));
        assert!(!n.is_expired(n.created_at + Duration::from_millis(99)));
        assert!(n.is_expired(n.created_at + Duration::from_millis(100)));
    }
}
