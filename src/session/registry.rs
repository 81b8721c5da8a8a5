use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreateAlertRequest, Position, SearchRequest};
use crate::session::engine::EngineError;

/// Owner of the standing search requests
///
/// Mutated only under the engine's single-writer lock: the user creates and
/// deletes requests, the scan loop appends matches and bumps timestamps.
#[derive(Debug, Default)]
pub struct AlertRegistry {
    requests: Vec<SearchRequest>,
}

impl AlertRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new search request from validated user input
    ///
    /// Rejects bad input synchronously; nothing is registered on failure.
    pub fn create(
        &mut self,
        req: CreateAlertRequest,
        origin: Position,
    ) -> Result<SearchRequest, EngineError> {
        req.validate()
            .map_err(|e| EngineError::InvalidInput(e.to_string()))?;
        if !req.bounds_coherent() {
            return Err(EngineError::InvalidInput(
                "minPrice must not exceed maxPrice".to_string(),
            ));
        }

        let request = SearchRequest {
            id: Uuid::new_v4(),
            query: req.query,
            radius_km: req.radius_km,
            min_price: req.min_price,
            max_price: req.max_price,
            origin,
            is_active: true,
            matches: vec![],
            last_checked: None,
            created_at: Utc::now(),
        };
        self.requests.push(request.clone());
        Ok(request)
    }

    /// Remove a request; unknown ids are a no-op
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.requests.len();
        self.requests.retain(|r| r.id != id);
        self.requests.len() != before
    }

    /// Requests in insertion order
    pub fn list(&self) -> &[SearchRequest] {
        &self.requests
    }

    pub fn get(&self, id: Uuid) -> Option<&SearchRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut SearchRequest> {
        self.requests.iter_mut().find(|r| r.id == id)
    }
}
