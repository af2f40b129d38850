// Chart builder - shapes metric records into chart configurations
use crate::domain::chart::{ChartConfig, ChartFamily, ChartKind, DataValue, Dataset, Paint};
use crate::domain::metrics::{
    CustomerPurchases, CustomerRevenue, DailySales, Metric, MonthlyRevenue, ProductSales,
    StockLevel,
};
use crate::domain::theme::{with_alpha, Theme};
use chrono::{Locale, NaiveDate};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct ChartBuilder {
    theme: Theme,
    locale: Locale,
}

impl ChartBuilder {
    pub fn new(theme: Theme, locale: Locale) -> Self {
        Self { theme, locale }
    }

    pub fn top_products(&self, records: &[ProductSales]) -> ChartConfig {
        let metric = Metric::TopProducts;
        let kind = self.theme.kind_for(metric);
        let colors = self.theme.palette_slice(records.len());
        let borders = colors.iter().map(|c| with_alpha(c, "1")).collect();

        let dataset = Dataset::new(
            "Cantidad Vendida",
            records.iter().map(|p| DataValue::Count(p.cantidad_vendida)).collect(),
            Paint::PerItem(colors),
            Paint::PerItem(borders),
            2,
        );

        let mut options = self.options(metric, kind, AxisValues::Counts);
        if kind == ChartKind::Bar {
            options["indexAxis"] = json!("y");
        }
        ChartConfig::new(kind, records.iter().map(|p| p.nombre.clone()).collect(), vec![dataset], options)
    }

    pub fn frequent_customers(&self, records: &[CustomerPurchases]) -> ChartConfig {
        let metric = Metric::FrequentCustomers;
        let kind = self.theme.kind_for(metric);
        let accents = &self.theme.accents;
        let (background, border) = self.paints(kind, records.len(), &accents.bar_fill, &accents.bar_border);

        let dataset = Dataset::new(
            "Total de Compras",
            records.iter().map(|u| DataValue::Count(u.total_compras)).collect(),
            background,
            border,
            3,
        );
        ChartConfig::new(
            kind,
            records.iter().map(|u| u.nombre.clone()).collect(),
            vec![dataset],
            self.options(metric, kind, AxisValues::Counts),
        )
    }

    pub fn weekly_sales(&self, records: &[DailySales]) -> ChartConfig {
        let metric = Metric::WeeklySales;
        let kind = self.theme.kind_for(metric);
        let accents = &self.theme.accents;
        let (background, border) = self.paints(kind, records.len(), &accents.line_fill, &accents.line_stroke);

        let mut dataset = Dataset::new(
            "Ventas",
            records.iter().map(|v| DataValue::Count(v.total_ventas)).collect(),
            background,
            border,
            3,
        );
        if matches!(kind, ChartKind::Line | ChartKind::Radar) {
            dataset = dataset
                .with("fill", json!(true))
                .with("tension", json!(0.4))
                .with("pointRadius", json!(6))
                .with("pointHoverRadius", json!(8))
                .with("pointBackgroundColor", json!("#fff"))
                .with("pointBorderColor", json!(accents.line_stroke))
                .with("pointBorderWidth", json!(3));
        }

        let labels = records
            .iter()
            .map(|v| format_day_label(&v.fecha, self.locale))
            .collect();
        ChartConfig::new(kind, labels, vec![dataset], self.options(metric, kind, AxisValues::Counts))
    }

    pub fn monthly_revenue(&self, records: &[MonthlyRevenue]) -> ChartConfig {
        let metric = Metric::MonthlyRevenue;
        let kind = self.theme.kind_for(metric);
        let accents = &self.theme.accents;
        let (background, border) = self.paints(kind, records.len(), &accents.revenue_fill, &accents.bar_border);

        let dataset = Dataset::new(
            "Ingresos ($)",
            records.iter().map(|m| DataValue::Amount(m.ingresos)).collect(),
            background,
            border,
            3,
        );
        ChartConfig::new(
            kind,
            records.iter().map(|m| m.label().to_string()).collect(),
            vec![dataset],
            self.options(metric, kind, AxisValues::Money),
        )
    }

    pub fn top_customers_by_revenue(&self, records: &[CustomerRevenue]) -> ChartConfig {
        let metric = Metric::TopCustomersByRevenue;
        let kind = self.theme.kind_for(metric);

        let dataset = Dataset::new(
            "Ingresos ($)",
            records.iter().map(|u| DataValue::Amount(u.ingresos_totales)).collect(),
            Paint::PerItem(self.theme.palette_slice(records.len().max(5))),
            Paint::from("#fff"),
            3,
        );
        ChartConfig::new(
            kind,
            records.iter().map(|u| u.nombre.clone()).collect(),
            vec![dataset],
            self.options(metric, kind, AxisValues::Money),
        )
    }

    pub fn stock_vs_sold(&self, records: &[StockLevel]) -> ChartConfig {
        let metric = Metric::StockVsSold;
        let kind = self.theme.kind_for(metric);
        let accents = &self.theme.accents;

        let stock = Dataset::new(
            "Stock Actual",
            records.iter().map(|p| DataValue::Count(p.stock_actual)).collect(),
            Paint::from(accents.stock_fill.as_str()),
            Paint::Solid(with_alpha(&accents.stock_fill, "1")),
            2,
        );
        let sold = Dataset::new(
            "Cantidad Vendida",
            records.iter().map(|p| DataValue::Count(p.cantidad_vendida)).collect(),
            Paint::from(accents.sold_fill.as_str()),
            Paint::Solid(with_alpha(&accents.sold_fill, "1")),
            2,
        );
        ChartConfig::new(
            kind,
            records.iter().map(|p| p.nombre.clone()).collect(),
            vec![stock, sold],
            self.options(metric, kind, AxisValues::Counts),
        )
    }

    /// Solid accent colors for axis charts, one palette color per slice otherwise
    fn paints(&self, kind: ChartKind, items: usize, fill: &str, border: &str) -> (Paint, Paint) {
        match kind {
            ChartKind::Bar | ChartKind::Line | ChartKind::Radar => (Paint::from(fill), Paint::from(border)),
            ChartKind::PolarArea | ChartKind::Pie | ChartKind::Doughnut => {
                (Paint::PerItem(self.theme.palette_slice(items)), Paint::from("#fff"))
            }
        }
    }

    fn options(&self, metric: Metric, kind: ChartKind, values: AxisValues) -> Value {
        let text = &self.theme.text_color;
        let grid = json!({ "color": "rgba(44, 62, 80, 0.1)" });
        let title = json!({
            "display": true,
            "text": chart_title(metric),
            "font": { "size": 16, "weight": "bold" },
            "color": text,
        });
        let mut value_ticks = json!({ "color": text });
        if values == AxisValues::Counts {
            value_ticks["stepSize"] = json!(1);
        }

        let multi_series = metric == Metric::StockVsSold;
        let (legend, scales) = match kind.family() {
            ChartFamily::Cartesian => {
                let legend = if multi_series {
                    json!({
                        "position": "top",
                        "labels": { "color": text, "font": { "size": 12, "weight": "bold" } },
                    })
                } else {
                    json!({ "display": false })
                };
                let value_axis = json!({ "beginAtZero": true, "ticks": value_ticks, "grid": grid });
                let category_axis = json!({ "ticks": { "color": text, "font": { "weight": "bold" } } });
                // Horizontal bars put the values on x
                let scales = if metric == Metric::TopProducts && kind == ChartKind::Bar {
                    json!({ "x": value_axis, "y": category_axis })
                } else {
                    json!({ "x": category_axis, "y": value_axis })
                };
                (legend, Some(scales))
            }
            ChartFamily::Radial => {
                let legend = if kind == ChartKind::PolarArea || multi_series {
                    json!({ "position": "right", "labels": { "color": text } })
                } else {
                    json!({ "display": false })
                };
                let scales = json!({ "r": { "beginAtZero": true, "ticks": value_ticks, "grid": grid } });
                (legend, Some(scales))
            }
            ChartFamily::Circular => {
                let legend = json!({
                    "position": "right",
                    "labels": { "color": text, "font": { "size": 12, "weight": "bold" }, "padding": 15 },
                });
                (legend, None)
            }
        };

        let mut options = json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": { "legend": legend, "title": title },
        });
        if let Some(scales) = scales {
            options["scales"] = scales;
        }
        options
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisValues {
    Counts,
    Money,
}

pub fn chart_title(metric: Metric) -> &'static str {
    match metric {
        Metric::TopProducts => "🥖 Panes más populares",
        Metric::FrequentCustomers => "👥 Clientes más frecuentes",
        Metric::WeeklySales => "📅 Tendencia de ventas semanal",
        Metric::MonthlyRevenue => "💰 Evolución de ingresos",
        Metric::TopCustomersByRevenue => "⭐ Mejores clientes",
        Metric::StockVsSold => "📦 Inventario vs Rotación",
        Metric::SummaryCards => "Resumen",
    }
}

/// Short weekday and day of month for a `YYYY-MM-DD` date (a longer timestamp
/// contributes its date part). The calendar date is used as written.
///
/// The pattern is always `"%a, %-d"`; the locale only supplies the weekday
/// names ("mié, 25" for `es_MX`, "Wed, 25" for `en_US`).
pub fn format_day_label(raw: &str, locale: Locale) -> String {
    let date_part = raw.trim().get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format_localized("%a, %-d", locale).to_string(),
        Err(_) => raw.to_string(),
    }
}
