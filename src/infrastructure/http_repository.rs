// HTTP statistics repository backed by the shop's REST endpoints
use crate::application::fetch_error::FetchError;
use crate::application::stats_repository::StatsRepository;
use crate::domain::metrics::{
    CustomerPurchases, CustomerRevenue, DailySales, Metric, MonthlyRevenue, ProductSales,
    SalesSummary, StockLevel,
};
use crate::infrastructure::config::DashboardConfig;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct HttpStatsRepository {
    client: reqwest::Client,
    base_url: String,
    endpoints: HashMap<Metric, String>,
}

impl HttpStatsRepository {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoints: HashMap::new(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        let mut repository = Self::new(&config.backend.base_url);
        repository.endpoints = Metric::ALL
            .iter()
            .map(|&m| (m, config.endpoint(m).to_string()))
            .collect();
        repository
    }

    fn url_for(&self, metric: Metric) -> String {
        let path = self
            .endpoints
            .get(&metric)
            .map(String::as_str)
            .unwrap_or_else(|| metric.default_endpoint());
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn fetch<T: DeserializeOwned>(&self, metric: Metric) -> Result<T, FetchError> {
        let url = self.url_for(metric);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl StatsRepository for HttpStatsRepository {
    async fn top_products(&self) -> Result<Vec<ProductSales>, FetchError> {
        self.fetch(Metric::TopProducts).await
    }

    async fn frequent_customers(&self) -> Result<Vec<CustomerPurchases>, FetchError> {
        self.fetch(Metric::FrequentCustomers).await
    }

    async fn weekly_sales(&self) -> Result<Vec<DailySales>, FetchError> {
        self.fetch(Metric::WeeklySales).await
    }

    async fn monthly_revenue(&self) -> Result<Vec<MonthlyRevenue>, FetchError> {
        self.fetch(Metric::MonthlyRevenue).await
    }

    async fn top_customers_by_revenue(&self) -> Result<Vec<CustomerRevenue>, FetchError> {
        self.fetch(Metric::TopCustomersByRevenue).await
    }

    async fn stock_vs_sold(&self) -> Result<Vec<StockLevel>, FetchError> {
        self.fetch(Metric::StockVsSold).await
    }

    async fn sales_summary(&self) -> Result<SalesSummary, FetchError> {
        self.fetch(Metric::SummaryCards).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    /// Serve a fake shop backend on an ephemeral port
    async fn backend() -> String {
        let router = Router::new()
            .route(
                "/estadisticas/productos-mas-vendidos",
                get(|| async { Json(json!([{"nombre": "Baguette", "cantidad_vendida": "12"}])) }),
            )
            .route(
                "/estadisticas/ingresos-mensuales",
                get(|| async { Json(json!([{"mes_nombre": "Diciembre", "ingresos": "1234.5"}])) }),
            )
            .route(
                "/estadisticas/stock-vs-vendido",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "db down") }),
            )
            .route("/estadisticas/usuarios-mas-compras", get(|| async { "<html>oops</html>" }))
            .route(
                "/v2/resumen",
                get(|| async { Json(json!({"total_ventas": "7", "ingresos_totales": 80.5})) }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_fetches_and_coerces_records() {
        let repository = HttpStatsRepository::new(&backend().await);

        let products = repository.top_products().await.unwrap();
        assert_eq!(products[0].nombre, "Baguette");
        assert_eq!(products[0].cantidad_vendida, 12);

        let months = repository.monthly_revenue().await.unwrap();
        assert_eq!(months[0].ingresos, 1234.5);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let repository = HttpStatsRepository::new(&backend().await);
        match repository.stock_vs_sold().await {
            Err(FetchError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "db down");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_a_decode_error() {
        let repository = HttpStatsRepository::new(&backend().await);
        let err = repository.frequent_customers().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_endpoint_override() {
        let mut repository = HttpStatsRepository::new(&backend().await);
        repository
            .endpoints
            .insert(Metric::SummaryCards, "/v2/resumen".to_string());

        let summary = repository.sales_summary().await.unwrap();
        assert_eq!(summary.total_ventas, 7);
        assert_eq!(summary.ingresos_totales, 80.5);
        assert_eq!(summary.products_sold(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let repository = HttpStatsRepository::new("http://127.0.0.1:1");
        let err = repository.weekly_sales().await.unwrap_err();
        assert!(matches!(err, FetchError::Request(_)), "got {err:?}");
    }
}
