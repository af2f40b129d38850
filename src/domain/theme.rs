// Chart themes - palette and chart type per metric
use super::chart::ChartKind;
use super::metrics::Metric;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Accents {
    pub bar_fill: String,
    pub bar_border: String,
    pub line_fill: String,
    pub line_stroke: String,
    pub revenue_fill: String,
    pub stock_fill: String,
    pub sold_fill: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub palette: Vec<String>,
    pub accents: Accents,
    pub text_color: String,
    pub kinds: HashMap<Metric, ChartKind>,
}

impl Theme {
    pub const PRESETS: [&'static str; 2] = ["festive", "classic"];

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "festive" => Some(Self::festive()),
            "classic" => Some(Self::classic()),
            _ => None,
        }
    }

    pub fn festive() -> Self {
        Self {
            name: "festive".to_string(),
            palette: to_strings(&[
                "rgba(168, 28, 13, 0.8)",
                "rgba(39, 174, 96, 0.8)",
                "rgba(18, 243, 224, 0.8)",
                "rgba(117, 191, 240, 0.8)",
                "rgba(155, 89, 182, 0.8)",
                "rgba(155, 22, 160, 0.8)",
                "rgba(231, 60, 89, 0.8)",
                "rgba(9, 110, 51, 0.8)",
                "rgba(131, 110, 26, 0.8)",
                "rgba(142, 68, 173, 0.8)",
            ]),
            accents: Accents {
                bar_fill: "rgba(10, 168, 241, 0.8)".to_string(),
                bar_border: "rgba(198, 24, 204, 0.8)".to_string(),
                line_fill: "rgba(151, 5, 73, 0.6)".to_string(),
                line_stroke: "rgba(241, 14, 82, 0.8)".to_string(),
                revenue_fill: "rgba(245, 61, 153, 0.8)".to_string(),
                stock_fill: "rgba(22, 160, 133, 0.8)".to_string(),
                sold_fill: "rgba(55, 221, 119, 0.8)".to_string(),
            },
            text_color: "#2c3e50".to_string(),
            kinds: HashMap::from([
                (Metric::TopProducts, ChartKind::Bar),
                (Metric::FrequentCustomers, ChartKind::Bar),
                (Metric::WeeklySales, ChartKind::Line),
                (Metric::MonthlyRevenue, ChartKind::Bar),
                (Metric::TopCustomersByRevenue, ChartKind::Doughnut),
                (Metric::StockVsSold, ChartKind::Bar),
            ]),
        }
    }

    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            palette: to_strings(&[
                "rgba(52, 152, 219, 0.8)",
                "rgba(46, 204, 113, 0.8)",
                "rgba(241, 196, 15, 0.8)",
                "rgba(231, 76, 60, 0.8)",
                "rgba(155, 89, 182, 0.8)",
                "rgba(26, 188, 156, 0.8)",
                "rgba(230, 126, 34, 0.8)",
                "rgba(52, 73, 94, 0.8)",
                "rgba(149, 165, 166, 0.8)",
                "rgba(192, 57, 43, 0.8)",
            ]),
            accents: Accents {
                bar_fill: "rgba(52, 152, 219, 0.8)".to_string(),
                bar_border: "rgba(41, 128, 185, 0.8)".to_string(),
                line_fill: "rgba(46, 204, 113, 0.6)".to_string(),
                line_stroke: "rgba(39, 174, 96, 0.8)".to_string(),
                revenue_fill: "rgba(241, 196, 15, 0.8)".to_string(),
                stock_fill: "rgba(52, 73, 94, 0.8)".to_string(),
                sold_fill: "rgba(230, 126, 34, 0.8)".to_string(),
            },
            text_color: "#34495e".to_string(),
            kinds: HashMap::from([
                (Metric::TopProducts, ChartKind::PolarArea),
                (Metric::FrequentCustomers, ChartKind::Radar),
                (Metric::WeeklySales, ChartKind::Line),
                (Metric::MonthlyRevenue, ChartKind::Line),
                (Metric::TopCustomersByRevenue, ChartKind::Pie),
                (Metric::StockVsSold, ChartKind::Bar),
            ]),
        }
    }

    pub fn kind_for(&self, metric: Metric) -> ChartKind {
        self.kinds.get(&metric).copied().unwrap_or(ChartKind::Bar)
    }

    pub fn with_kinds(mut self, overrides: &HashMap<Metric, ChartKind>) -> Self {
        self.kinds.extend(overrides.iter().map(|(m, k)| (*m, *k)));
        self
    }

    /// The first `n` palette colors, cycling when the palette is shorter
    pub fn palette_slice(&self, n: usize) -> Vec<String> {
        self.palette.iter().cycle().take(n).cloned().collect()
    }
}

/// Rewrite the alpha channel of an `rgba(...)` color; other notations pass through.
pub fn with_alpha(color: &str, alpha: &str) -> String {
    match (color.strip_prefix("rgba("), color.rfind(',')) {
        (Some(_), Some(idx)) if color.ends_with(')') => format!("{}, {})", &color[..idx], alpha),
        _ => color.to_string(),
    }
}

fn to_strings(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha() {
        assert_eq!(with_alpha("rgba(22, 160, 133, 0.8)", "1"), "rgba(22, 160, 133, 1)");
        assert_eq!(with_alpha("#fff", "1"), "#fff");
    }

    #[test]
    fn test_presets_cover_every_chart() {
        for name in Theme::PRESETS {
            let theme = Theme::preset(name).unwrap();
            for metric in Metric::CHARTS {
                assert!(theme.kinds.contains_key(&metric), "{name} misses {metric}");
            }
        }
        assert!(Theme::preset("neon").is_none());
    }

    #[test]
    fn test_kind_overrides() {
        let overrides = HashMap::from([(Metric::WeeklySales, ChartKind::Bar)]);
        let theme = Theme::festive().with_kinds(&overrides);
        assert_eq!(theme.kind_for(Metric::WeeklySales), ChartKind::Bar);
        assert_eq!(theme.kind_for(Metric::TopCustomersByRevenue), ChartKind::Doughnut);
    }

    #[test]
    fn test_palette_slice() {
        let theme = Theme::festive();
        assert_eq!(theme.palette_slice(5), theme.palette[..5].to_vec());
        assert_eq!(theme.palette_slice(12).len(), 12);
        assert_eq!(theme.palette_slice(12)[10], theme.palette[0]);
    }
}
