// In-process chart surface holding mounted chart documents and card texts
use crate::application::chart_surface::{ChartHandle, ChartSurface};
use crate::application::fetch_error::FetchError;
use crate::domain::chart::ChartConfig;
use crate::domain::dashboard::{Dashboard, MountedChart};
use crate::domain::metrics::Metric;
use crate::domain::summary::CARD_IDS;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
pub struct CanvasSurface {
    canvases: HashSet<String>,
    text_elements: HashSet<String>,
    state: Mutex<SurfaceState>,
}

#[derive(Debug, Default)]
struct SurfaceState {
    next_id: u64,
    mounted: HashMap<String, (u64, ChartConfig)>,
    texts: BTreeMap<String, String>,
}

impl CanvasSurface {
    pub fn new<I, J>(canvases: I, text_elements: J) -> Self
    where
        I: IntoIterator<Item = String>,
        J: IntoIterator<Item = String>,
    {
        Self {
            canvases: canvases.into_iter().collect(),
            text_elements: text_elements.into_iter().collect(),
            state: Mutex::new(SurfaceState::default()),
        }
    }

    /// Surface with the six chart canvases and four summary cards of the statistics modal
    pub fn statistics_modal() -> Self {
        Self::new(
            Metric::CHARTS
                .iter()
                .filter_map(|m| m.mount_point())
                .map(String::from),
            CARD_IDS.iter().map(|id| id.to_string()),
        )
    }

    /// Number of charts currently mounted
    pub fn live_charts(&self) -> usize {
        self.lock().mounted.len()
    }

    pub fn text_of(&self, element_id: &str) -> Option<String> {
        self.lock().texts.get(element_id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChartSurface for CanvasSurface {
    fn mount(&self, mount_point: &str, config: ChartConfig) -> Result<ChartHandle, FetchError> {
        if !self.canvases.contains(mount_point) {
            return Err(FetchError::MissingMountPoint(mount_point.to_string()));
        }

        let mut state = self.lock();
        if state.mounted.contains_key(mount_point) {
            return Err(FetchError::MountPointBusy(mount_point.to_string()));
        }

        state.next_id += 1;
        let id = state.next_id;
        state.mounted.insert(mount_point.to_string(), (id, config));
        tracing::debug!("Mounted chart {} on {}", id, mount_point);
        Ok(ChartHandle::new(id, mount_point))
    }

    fn destroy(&self, handle: ChartHandle) -> bool {
        let mut state = self.lock();
        match state.mounted.get(handle.mount_point()) {
            Some((id, _)) if *id == handle.id() => {
                state.mounted.remove(handle.mount_point());
                tracing::debug!("Destroyed chart {} on {}", handle.id(), handle.mount_point());
                true
            }
            _ => false,
        }
    }

    fn set_text(&self, element_id: &str, text: &str) -> Result<(), FetchError> {
        if !self.text_elements.contains(element_id) {
            return Err(FetchError::MissingMountPoint(element_id.to_string()));
        }
        self.lock()
            .texts
            .insert(element_id.to_string(), text.to_string());
        Ok(())
    }

    fn snapshot(&self) -> Dashboard {
        let state = self.lock();
        let mut charts: Vec<MountedChart> = state
            .mounted
            .iter()
            .map(|(mount_point, (id, config))| MountedChart {
                handle: *id,
                mount_point: mount_point.clone(),
                config: config.clone(),
            })
            .collect();
        charts.sort_by_key(|c| c.handle);
        Dashboard::new(charts, state.texts.clone())
    }
}
