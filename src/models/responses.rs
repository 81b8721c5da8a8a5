use serde::{Deserialize, Serialize};

use crate::models::domain::{OptimizationMode, SearchRequest, Stop};

/// Read-only view of the current route for the UI layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSnapshot {
    pub stops: Vec<Stop>,
    pub mode: Option<OptimizationMode>,
}

impl RouteSnapshot {
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }
}

/// Read-only view of the standing search requests with embedded matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsSnapshot {
    pub requests: Vec<SearchRequest>,
}
