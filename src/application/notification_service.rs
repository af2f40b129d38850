// Notification center - transient, auto-dismissing messages
use crate::domain::notification::{Notification, NotificationView, Severity};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Container for notifications. Entries stack without deduplication and each
/// one removes itself once its display duration has elapsed.
#[derive(Debug)]
pub struct NotificationCenter {
    entries: Mutex<Vec<Notification>>,
    next_id: AtomicU64,
    duration: Duration,
}

impl NotificationCenter {
    pub fn new(duration: Duration) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            duration,
        }
    }

    pub fn notify(self: &Arc<Self>, message: impl Into<String>, severity: Severity) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let notification = Notification::new(id, severity, message.into(), self.duration);
        tracing::info!("Notification {} [{:?}]: {}", id, severity, notification.message);
        self.lock().push(notification);

        // Expiry timer; `active()` also drops expired entries when no runtime is around
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let center = Arc::downgrade(self);
            let duration = self.duration;
            runtime.spawn(async move {
                tokio::time::sleep(duration).await;
                if let Some(center) = center.upgrade() {
                    center.dismiss(id);
                }
            });
        }

        id
    }

    /// Remove a notification before it expires. Returns false if it is already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|n| n.id != id);
        entries.len() != before
    }

    pub fn active(&self) -> Vec<NotificationView> {
        self.active_at(Instant::now())
    }

    pub fn active_at(&self, now: Instant) -> Vec<NotificationView> {
        let mut entries = self.lock();
        entries.retain(|n| !n.is_expired(now));
        entries.iter().map(Notification::view).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
