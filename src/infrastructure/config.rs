use crate::domain::chart::ChartKind;
use crate::domain::metrics::Metric;
use crate::domain::theme::Theme;
use anyhow::anyhow;
use chrono::Locale;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Path overrides, keyed by metric
    #[serde(default)]
    pub endpoints: HashMap<Metric, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplaySettings {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub chart_kinds: HashMap<Metric, ChartKind>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationSettings {
    #[serde(default = "default_notification_ms")]
    pub duration_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            theme: default_theme(),
            chart_kinds: HashMap::new(),
        }
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            duration_ms: default_notification_ms(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_locale() -> String {
    "es_MX".to_string()
}

fn default_theme() -> String {
    "festive".to_string()
}

fn default_notification_ms() -> u64 {
    5_000
}

impl DashboardConfig {
    /// Theme preset with the per-metric chart type overrides applied
    pub fn theme(&self) -> anyhow::Result<Theme> {
        let theme = Theme::preset(&self.display.theme).ok_or_else(|| {
            anyhow!(
                "unknown theme '{}', expected one of {:?}",
                self.display.theme,
                Theme::PRESETS
            )
        })?;
        Ok(theme.with_kinds(&self.display.chart_kinds))
    }

    pub fn locale(&self) -> anyhow::Result<Locale> {
        Locale::try_from(self.display.locale.as_str())
            .map_err(|_| anyhow!("unknown locale '{}'", self.display.locale))
    }

    pub fn endpoint(&self, metric: Metric) -> &str {
        self.backend
            .endpoints
            .get(&metric)
            .map(String::as_str)
            .unwrap_or_else(|| metric.default_endpoint())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.backend.request_timeout_ms)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notifications.duration_ms)
    }
}

/// Load `config/dashboard.*`, overridden by `DASHBOARD__SECTION__KEY` environment variables
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> DashboardConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse("[backend]\nbase_url = \"http://panaderia.local\"\n");

        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.notification_duration(), Duration::from_secs(5));
        assert_eq!(config.endpoint(Metric::WeeklySales), "/estadisticas/ventas-ultima-semana");
        assert_eq!(config.locale().unwrap(), Locale::es_MX);
        assert_eq!(config.theme().unwrap(), Theme::festive());
    }

    #[test]
    fn test_overrides() {
        let config = parse(
            r#"
            [backend]
            base_url = "http://panaderia.local"
            request_timeout_ms = 2500

            [backend.endpoints]
            summary_cards = "/v2/historial/estadisticas"

            [display]
            locale = "en_US"
            theme = "classic"

            [display.chart_kinds]
            weekly_sales = "bar"
            "#,
        );

        assert_eq!(config.request_timeout(), Duration::from_millis(2500));
        assert_eq!(config.endpoint(Metric::SummaryCards), "/v2/historial/estadisticas");
        assert_eq!(config.endpoint(Metric::TopProducts), "/estadisticas/productos-mas-vendidos");
        assert_eq!(config.locale().unwrap(), Locale::en_US);

        let theme = config.theme().unwrap();
        assert_eq!(theme.name, "classic");
        assert_eq!(theme.kind_for(Metric::WeeklySales), ChartKind::Bar);
        assert_eq!(theme.kind_for(Metric::FrequentCustomers), ChartKind::Radar);
    }

    #[test]
    fn test_unknown_theme_and_locale() {
        let config = parse(
            "[backend]\nbase_url = \"http://x\"\n[display]\ntheme = \"neon\"\nlocale = \"xx_YY\"\n",
        );
        assert!(config.theme().is_err());
        assert!(config.locale().is_err());
    }
}
