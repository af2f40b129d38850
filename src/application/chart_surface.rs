// Chart surface trait - the named mount points charts and cards are drawn on
use crate::application::fetch_error::FetchError;
use crate::domain::chart::ChartConfig;
use crate::domain::dashboard::Dashboard;

/// Opaque reference to a chart mounted on a surface
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ChartHandle {
    id: u64,
    mount_point: String,
}

impl ChartHandle {
    pub fn new(id: u64, mount_point: impl Into<String>) -> Self {
        Self {
            id,
            mount_point: mount_point.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }
}

pub trait ChartSurface: Send + Sync {
    /// Mount a chart on the given canvas
    fn mount(&self, mount_point: &str, config: ChartConfig) -> Result<ChartHandle, FetchError>;

    /// Tear a chart down and release its canvas. Returns false if it was already gone.
    fn destroy(&self, handle: ChartHandle) -> bool;

    /// Replace the text content of an element
    fn set_text(&self, element_id: &str, text: &str) -> Result<(), FetchError>;

    fn snapshot(&self) -> Dashboard;
}
