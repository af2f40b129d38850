// Summary card domain model
use super::metrics::SalesSummary;

pub const TOTAL_SALES_CARD: &str = "statTotalVentasCard";
pub const REVENUE_CARD: &str = "statIngresosCard";
pub const PRODUCTS_CARD: &str = "statProductosCard";
pub const CUSTOMERS_CARD: &str = "statClientesCard";

pub const CARD_IDS: [&str; 4] = [TOTAL_SALES_CARD, REVENUE_CARD, PRODUCTS_CARD, CUSTOMERS_CARD];

pub const LOADING_TEXT: &str = "...";

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCards {
    pub total_sales: String,
    pub revenue: String,
    pub products_sold: String,
    pub active_customers: String,
}

impl SummaryCards {
    pub fn from_summary(summary: &SalesSummary, active_customers: usize) -> Self {
        Self {
            total_sales: summary.total_ventas.to_string(),
            revenue: format_money(summary.ingresos_totales),
            products_sold: summary.products_sold().to_string(),
            active_customers: active_customers.to_string(),
        }
    }

    pub fn loading() -> Self {
        Self {
            total_sales: LOADING_TEXT.to_string(),
            revenue: LOADING_TEXT.to_string(),
            products_sold: LOADING_TEXT.to_string(),
            active_customers: LOADING_TEXT.to_string(),
        }
    }

    /// Values shown when the summary could not be loaded
    pub fn zeroed() -> Self {
        Self {
            total_sales: "0".to_string(),
            revenue: "$0".to_string(),
            products_sold: "0".to_string(),
            active_customers: "0".to_string(),
        }
    }

    /// (element id, text) pairs in card order
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            (TOTAL_SALES_CARD, self.total_sales.as_str()),
            (REVENUE_CARD, self.revenue.as_str()),
            (PRODUCTS_CARD, self.products_sold.as_str()),
            (CUSTOMERS_CARD, self.active_customers.as_str()),
        ]
    }
}

/// `$` + amount with two decimals and comma thousands separators
pub fn format_money(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(999.999), "$1,000.00");
        assert_eq!(format_money(1234567.891), "$1,234,567.89");
        assert_eq!(format_money(-50.0), "-$50.00");
        assert_eq!(format_money(f64::NAN), "$0.00");
    }

    #[test]
    fn test_cards_from_summary() {
        let summary = SalesSummary {
            total_ventas: 42,
            ingresos_totales: 15300.0,
            productos_mas_vendidos: Vec::new(),
        };
        let cards = SummaryCards::from_summary(&summary, 3);
        assert_eq!(cards.total_sales, "42");
        assert_eq!(cards.revenue, "$15,300.00");
        assert_eq!(cards.products_sold, "0");
        assert_eq!(cards.active_customers, "3");
        assert_eq!(cards.entries()[1], (REVENUE_CARD, "$15,300.00"));
    }
}
