use std::collections::HashMap;

use crate::models::ItemStatus;

/// Tracks per-item availability: Available -> Sold, Sold is terminal
///
/// The engine consults the monitor on every "sold" event so repeated events
/// for the same item stay no-ops.
#[derive(Debug, Default)]
pub struct DisruptionMonitor {
    statuses: HashMap<String, ItemStatus>,
}

impl DisruptionMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, item_id: &str) -> ItemStatus {
        self.statuses
            .get(item_id)
            .copied()
            .unwrap_or(ItemStatus::Available)
    }

    /// Record a sold event; true only on the first Available -> Sold transition
    pub fn mark_sold(&mut self, item_id: &str) -> bool {
        match self.statuses.get(item_id) {
            Some(ItemStatus::Sold) => false,
            _ => {
                self.statuses.insert(item_id.to_string(), ItemStatus::Sold);
                true
            }
        }
    }
}
