use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::models::Notification;

struct Visible {
    seq: u64,
    notification: Notification,
    expiry: JoinHandle<()>,
}

/// Delivers engine events to the UI layer
///
/// Every dispatched event goes onto the event stream; in addition one
/// notification at a time is "currently visible" (last-write-wins) and
/// auto-hides after the display window unless dismissed first. Dispatching
/// spawns the expiry timer, so a tokio runtime must be current.
pub struct NotificationDispatcher {
    events_tx: mpsc::UnboundedSender<Notification>,
    events_rx: Mutex<Option<mpsc::UnboundedReceiver<Notification>>>,
    visible: Arc<Mutex<Option<Visible>>>,
    display_window: Duration,
    seq: AtomicU64,
}

impl NotificationDispatcher {
    pub fn new(display_window: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
            visible: Arc::new(Mutex::new(None)),
            display_window,
            seq: AtomicU64::new(0),
        }
    }

    /// Hand the event stream receiver to the UI layer; yields once
    pub fn take_events(&self) -> Option<mpsc::UnboundedReceiver<Notification>> {
        self.events_rx
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }

    /// Make an event visible immediately and schedule its expiry
    pub fn dispatch(&self, notification: Notification) {
        tracing::debug!(?notification, "dispatching notification");

        // The stream keeps every logical event even when the visible slot
        // coalesces; a dropped receiver just means no UI is listening
        let _ = self.events_tx.send(notification.clone());

        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let visible = Arc::clone(&self.visible);
        let window = self.display_window;

        let expiry = tokio::spawn({
            let visible = Arc::clone(&visible);
            async move {
                tokio::time::sleep(window).await;
                let mut slot = visible.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                // Only expire the notification this timer was armed for
                if slot.as_ref().map(|v| v.seq) == Some(seq) {
                    *slot = None;
                }
            }
        });

        let mut slot = self
            .visible
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = slot.replace(Visible {
            seq,
            notification,
            expiry,
        }) {
            previous.expiry.abort();
        }
    }

    /// Manually hide the current notification before its expiry
    pub fn dismiss(&self) {
        let mut slot = self
            .visible
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = slot.take() {
            previous.expiry.abort();
        }
    }

    /// The currently visible notification, if any
    pub fn current(&self) -> Option<Notification> {
        self.visible
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(|v| v.notification.clone())
    }
}
