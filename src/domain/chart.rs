// Chart configuration domain model (Chart.js document shape)
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Bar,
    Line,
    Radar,
    PolarArea,
    Pie,
    Doughnut,
}

/// Axis layout family, which decides the shape of the chart options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFamily {
    Cartesian,
    Radial,
    Circular,
}

impl ChartKind {
    pub fn family(&self) -> ChartFamily {
        match self {
            ChartKind::Bar | ChartKind::Line => ChartFamily::Cartesian,
            ChartKind::Radar | ChartKind::PolarArea => ChartFamily::Radial,
            ChartKind::Pie | ChartKind::Doughnut => ChartFamily::Circular,
        }
    }
}

/// A single plotted value. Counts stay integers on the wire, amounts floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataValue {
    Count(i64),
    Amount(f64),
}

/// Color for a dataset: one for every element, or one per element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Solid(String),
    PerItem(Vec<String>),
}

impl From<&str> for Paint {
    fn from(color: &str) -> Self {
        Paint::Solid(color.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<DataValue>,
    pub background_color: Paint,
    pub border_color: Paint,
    pub border_width: u32,
    /// Line styling and other library-specific keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Dataset {
    pub fn new(label: impl Into<String>, data: Vec<DataValue>, background: Paint, border: Paint, border_width: u32) -> Self {
        Self {
            label: label.into(),
            data,
            background_color: background,
            border_color: border,
            border_width,
            extra: Map::new(),
        }
    }

    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: Value,
}

impl ChartConfig {
    pub fn new(kind: ChartKind, labels: Vec<String>, datasets: Vec<Dataset>, options: Value) -> Self {
        Self {
            kind,
            data: ChartData { labels, datasets },
            options,
        }
    }
}
