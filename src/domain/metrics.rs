// Metric domain model - the seven statistics shown on the dashboard
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// One statistic loaded from the backend, each with its own endpoint and mount point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TopProducts,
    FrequentCustomers,
    WeeklySales,
    MonthlyRevenue,
    TopCustomersByRevenue,
    StockVsSold,
    SummaryCards,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::TopProducts,
        Metric::FrequentCustomers,
        Metric::WeeklySales,
        Metric::MonthlyRevenue,
        Metric::TopCustomersByRevenue,
        Metric::StockVsSold,
        Metric::SummaryCards,
    ];

    /// Metrics rendered as charts (everything but the summary cards)
    pub const CHARTS: [Metric; 6] = [
        Metric::TopProducts,
        Metric::FrequentCustomers,
        Metric::WeeklySales,
        Metric::MonthlyRevenue,
        Metric::TopCustomersByRevenue,
        Metric::StockVsSold,
    ];

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Metric::TopProducts => "/estadisticas/productos-mas-vendidos",
            Metric::FrequentCustomers => "/estadisticas/usuarios-mas-compras",
            Metric::WeeklySales => "/estadisticas/ventas-ultima-semana",
            Metric::MonthlyRevenue => "/estadisticas/ingresos-mensuales",
            Metric::TopCustomersByRevenue => "/estadisticas/top-usuarios-ingresos",
            Metric::StockVsSold => "/estadisticas/stock-vs-vendido",
            Metric::SummaryCards => "/historial/estadisticas",
        }
    }

    /// Logical name the chart handle is registered under
    pub fn chart_name(&self) -> Option<&'static str> {
        match self {
            Metric::TopProducts => Some("productosMasVendidos"),
            Metric::FrequentCustomers => Some("usuariosMasCompras"),
            Metric::WeeklySales => Some("ventasSemana"),
            Metric::MonthlyRevenue => Some("ingresosMensuales"),
            Metric::TopCustomersByRevenue => Some("topUsuariosIngresos"),
            Metric::StockVsSold => Some("stockVsVendido"),
            Metric::SummaryCards => None,
        }
    }

    /// Canvas id the chart is mounted on
    pub fn mount_point(&self) -> Option<&'static str> {
        match self {
            Metric::TopProducts => Some("chartProductosMasVendidos"),
            Metric::FrequentCustomers => Some("chartUsuariosMasCompras"),
            Metric::WeeklySales => Some("chartVentasSemana"),
            Metric::MonthlyRevenue => Some("chartIngresosMensuales"),
            Metric::TopCustomersByRevenue => Some("chartTopUsuariosIngresos"),
            Metric::StockVsSold => Some("chartStockVsVendido"),
            Metric::SummaryCards => None,
        }
    }

    /// Name shown to the user in notifications
    pub fn caption(&self) -> &'static str {
        match self {
            Metric::TopProducts => "productos más vendidos",
            Metric::FrequentCustomers => "clientes frecuentes",
            Metric::WeeklySales => "ventas de la semana",
            Metric::MonthlyRevenue => "ingresos mensuales",
            Metric::TopCustomersByRevenue => "mejores clientes",
            Metric::StockVsSold => "inventario vs vendido",
            Metric::SummaryCards => "resumen",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::TopProducts => "top_products",
            Metric::FrequentCustomers => "frequent_customers",
            Metric::WeeklySales => "weekly_sales",
            Metric::MonthlyRevenue => "monthly_revenue",
            Metric::TopCustomersByRevenue => "top_customers_by_revenue",
            Metric::StockVsSold => "stock_vs_sold",
            Metric::SummaryCards => "summary_cards",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductSales {
    #[serde(default, deserialize_with = "lenient_text")]
    pub nombre: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub cantidad_vendida: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerPurchases {
    #[serde(default, deserialize_with = "lenient_text")]
    pub nombre: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub total_compras: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailySales {
    #[serde(default, deserialize_with = "lenient_text")]
    pub fecha: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub total_ventas: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyRevenue {
    #[serde(default, deserialize_with = "lenient_text")]
    pub mes_nombre: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mes: String,
    #[serde(default, deserialize_with = "lenient_float")]
    pub ingresos: f64,
}

impl MonthlyRevenue {
    /// Month name when present, otherwise the raw month
    pub fn label(&self) -> &str {
        if self.mes_nombre.is_empty() {
            &self.mes
        } else {
            &self.mes_nombre
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerRevenue {
    #[serde(default, deserialize_with = "lenient_text")]
    pub nombre: String,
    #[serde(default, deserialize_with = "lenient_float")]
    pub ingresos_totales: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockLevel {
    #[serde(default, deserialize_with = "lenient_text")]
    pub nombre: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub stock_actual: i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub cantidad_vendida: i64,
}

/// Payload of the sales history summary endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalesSummary {
    #[serde(default, deserialize_with = "lenient_int")]
    pub total_ventas: i64,
    #[serde(default, deserialize_with = "lenient_float")]
    pub ingresos_totales: f64,
    #[serde(default, deserialize_with = "lenient_list")]
    pub productos_mas_vendidos: Vec<ProductSales>,
}

impl SalesSummary {
    /// Units sold across the listed products, clamped at the `i64` bounds
    pub fn products_sold(&self) -> i64 {
        self.productos_mas_vendidos
            .iter()
            .fold(0i64, |acc, p| acc.saturating_add(p.cantidad_vendida))
    }
}

/// Integer coercion: numbers are truncated, strings contribute their leading
/// integer prefix ("12 uds" -> 12), anything else is zero.
pub fn coerce_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => leading_int(s).unwrap_or(0),
        _ => 0,
    }
}

/// Float coercion: numbers as-is, strings contribute their leading decimal
/// prefix ("1234.5 MXN" -> 1234.5), anything else is zero.
pub fn coerce_float(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => leading_float(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

fn leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(s.starts_with(['+', '-']));
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    s[..end].trim_end_matches('.').parse().ok()
}

fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(coerce_int(&Value::deserialize(deserializer)?))
}

fn lenient_float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(coerce_float(&Value::deserialize(deserializer)?))
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<ProductSales>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}
