// Chart registry - owns every live chart handle of the dashboard
use crate::application::chart_surface::{ChartHandle, ChartSurface};
use crate::application::fetch_error::FetchError;
use crate::domain::chart::ChartConfig;
use crate::domain::summary::SummaryCards;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps logical chart names to their mounted handles.
///
/// Each `clear()` starts a new epoch. Renders are tagged with the epoch their
/// batch was started in and rejected once the registry has moved on, so a
/// superseded batch can never mount a second chart under a name.
pub struct ChartRegistry {
    surface: Arc<dyn ChartSurface>,
    charts: HashMap<String, ChartHandle>,
    epoch: u64,
}

impl ChartRegistry {
    pub fn new(surface: Arc<dyn ChartSurface>) -> Self {
        Self {
            surface,
            charts: HashMap::new(),
            epoch: 0,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Register a handle under `name`, destroying whatever was registered there before.
    /// Returns true when a prior handle was replaced.
    pub fn register(&mut self, name: &str, handle: ChartHandle) -> bool {
        match self.charts.insert(name.to_string(), handle) {
            Some(prior) => {
                tracing::debug!("Replacing chart '{}', destroying handle {}", name, prior.id());
                self.surface.destroy(prior);
                true
            }
            None => false,
        }
    }

    /// Mount `config` on `mount_point` and register it under `name`.
    pub fn render(
        &mut self,
        epoch: u64,
        name: &str,
        mount_point: &str,
        config: ChartConfig,
    ) -> Result<(), FetchError> {
        self.check_epoch(epoch)?;

        // The canvas has to be free before the library will draw on it again
        if let Some(prior) = self.charts.remove(name) {
            self.surface.destroy(prior);
        }

        let handle = self.surface.mount(mount_point, config)?;
        self.register(name, handle);
        Ok(())
    }

    /// Write summary card texts for the batch started in `epoch`
    pub fn write_cards(&self, epoch: u64, cards: &SummaryCards) -> Result<(), FetchError> {
        self.check_epoch(epoch)?;
        for (element_id, text) in cards.entries() {
            self.surface.set_text(element_id, text)?;
        }
        Ok(())
    }

    /// Destroy every chart and start a new epoch. Returns how many charts were destroyed.
    pub fn clear(&mut self) -> usize {
        let destroyed = self.charts.len();
        for (name, handle) in self.charts.drain() {
            tracing::debug!("Destroying chart '{}'", name);
            self.surface.destroy(handle);
        }
        self.epoch += 1;
        destroyed
    }

    fn check_epoch(&self, epoch: u64) -> Result<(), FetchError> {
        if epoch == self.epoch {
            Ok(())
        } else {
            Err(FetchError::StaleEpoch {
                epoch,
                current: self.epoch,
            })
        }
    }
}
