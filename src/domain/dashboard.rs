// Dashboard domain model - what is currently mounted on the surface
use super::chart::ChartConfig;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct MountedChart {
    pub handle: u64,
    pub mount_point: String,
    pub config: ChartConfig,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Dashboard {
    pub charts: Vec<MountedChart>,
    pub cards: BTreeMap<String, String>,
}

impl Dashboard {
    pub fn new(charts: Vec<MountedChart>, cards: BTreeMap<String, String>) -> Self {
        Self { charts, cards }
    }

    pub fn chart_at(&self, mount_point: &str) -> Option<&MountedChart> {
        self.charts.iter().find(|c| c.mount_point == mount_point)
    }
}
