use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::core::distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box};
use crate::core::scoring::{MatchScorer, TokenOverlapScorer};
use crate::models::{InventoryItem, Match, SearchRequest};

/// Result of a single scan cycle
#[derive(Debug)]
pub struct ScanResult {
    pub new_matches: Vec<Match>,
    pub total_candidates: usize,
}

/// Scan orchestrator - runs the per-request filtering pipeline over inventory
///
/// # Pipeline Stages
/// 1. Geospatial bounding box pre-filter
/// 2. Exact radius check (Haversine)
/// 3. Price bounds filter
/// 4. Dedup against already-matched item ids
/// 5. Scoring against the acceptance threshold
#[derive(Clone)]
pub struct AlertMatcher {
    scorer: Arc<dyn MatchScorer>,
    score_threshold: f64,
}

impl AlertMatcher {
    pub fn new(scorer: Arc<dyn MatchScorer>, score_threshold: f64) -> Self {
        Self {
            scorer,
            score_threshold,
        }
    }

    pub fn with_default_scorer(score_threshold: f64) -> Self {
        Self::new(Arc::new(TokenOverlapScorer), score_threshold)
    }

    /// Run one scan of the inventory snapshot for a search request
    ///
    /// Returns only matches not already present on the request; the caller
    /// appends them and updates the request's `last_checked` timestamp.
    pub fn scan(&self, request: &SearchRequest, items: &[InventoryItem]) -> ScanResult {
        let total_candidates = items.len();
        let bbox = calculate_bounding_box(request.origin, request.radius_km);

        let new_matches = items
            .iter()
            // Stage 1: cheap geospatial pre-filter
            .filter(|item| is_within_bounding_box(item.position, &bbox))
            // Stage 2 & 3: exact radius and price constraints
            .filter(|item| within_constraints(request, item))
            // Stage 4: a request accumulates each item at most once
            .filter(|item| !request.has_matched(&item.id))
            // Stage 5: score against the acceptance threshold
            .filter_map(|item| {
                let score = self.scorer.score(&request.query, item);
                if score < self.score_threshold {
                    return None;
                }
                Some(Match {
                    id: Uuid::new_v4(),
                    item_id: item.id.clone(),
                    item_title: item.title.clone(),
                    score,
                    distance_km: haversine_distance(request.origin, item.position),
                    found_at: Utc::now(),
                })
            })
            .collect();

        ScanResult {
            new_matches,
            total_candidates,
        }
    }
}

/// Exact radius and price-bound checks for a candidate item
#[inline]
fn within_constraints(request: &SearchRequest, item: &InventoryItem) -> bool {
    if haversine_distance(request.origin, item.position) > request.radius_km {
        return false;
    }
    if let Some(min) = request.min_price {
        if item.price < min {
            return false;
        }
    }
    if let Some(max) = request.max_price {
        if item.price > max {
            return false;
        }
    }
    true
}
