// Repository trait for statistics data access
use crate::application::fetch_error::FetchError;
use crate::domain::metrics::{
    CustomerPurchases, CustomerRevenue, DailySales, MonthlyRevenue, ProductSales, SalesSummary,
    StockLevel,
};
use async_trait::async_trait;

#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Best selling products with units sold
    async fn top_products(&self) -> Result<Vec<ProductSales>, FetchError>;

    /// Customers ranked by number of purchases
    async fn frequent_customers(&self) -> Result<Vec<CustomerPurchases>, FetchError>;

    /// Sales per day over the last week
    async fn weekly_sales(&self) -> Result<Vec<DailySales>, FetchError>;

    async fn monthly_revenue(&self) -> Result<Vec<MonthlyRevenue>, FetchError>;

    /// Customers ranked by revenue
    async fn top_customers_by_revenue(&self) -> Result<Vec<CustomerRevenue>, FetchError>;

    async fn stock_vs_sold(&self) -> Result<Vec<StockLevel>, FetchError>;

    /// Aggregate numbers behind the summary cards
    async fn sales_summary(&self) -> Result<SalesSummary, FetchError>;
}
