use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A sale location eligible for inclusion in a route
///
/// Stops are immutable once created; the engine stores owned copies of
/// feed-provided values and never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub position: Position,
    /// Reference price used for value-based ranking
    pub price: f64,
    pub title: String,
}

/// The optimization objective for route planning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationMode {
    /// Minimize total travel distance (nearest-neighbor heuristic)
    Fastest,
    /// Highest reference price first (stable sort)
    ByValue,
}

/// An item in the inventory feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    /// The sale (route stop) this item belongs to
    #[serde(rename = "saleId")]
    pub sale_id: String,
    pub title: String,
    pub category: String,
    pub price: f64,
    pub position: Position,
}

/// A standing "in search of" query matched against future inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub id: Uuid,
    pub query: String,
    #[serde(rename = "radiusKm")]
    pub radius_km: f64,
    #[serde(rename = "minPrice")]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<f64>,
    /// Requester location captured when the request was created
    pub origin: Position,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    /// Accumulated matches, append-only across the request's lifetime
    pub matches: Vec<Match>,
    #[serde(rename = "lastChecked")]
    pub last_checked: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl SearchRequest {
    /// Whether an item id has already been matched for this request
    pub fn has_matched(&self, item_id: &str) -> bool {
        self.matches.iter().any(|m| m.item_id == item_id)
    }
}

/// A confirmed correspondence between a SearchRequest and an inventory item
///
/// Immutable once created; appended to its parent request and removed only
/// with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    #[serde(rename = "itemId")]
    pub item_id: String,
    #[serde(rename = "itemTitle")]
    pub item_title: String,
    /// Match confidence, 0-100
    pub score: f64,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "foundAt")]
    pub found_at: DateTime<Utc>,
}

/// Tracked availability of an inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Available,
    /// Terminal state
    Sold,
}

/// Event delivered to the UI notification stream
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Notification {
    /// A standing search matched a new inventory item
    Match {
        #[serde(rename = "requestId")]
        request_id: Uuid,
        query: String,
        #[serde(rename = "itemTitle")]
        item_title: String,
        score: f64,
    },
    /// A stop committed to the active route became invalid
    Disruption {
        #[serde(rename = "stopId")]
        stop_id: String,
        #[serde(rename = "stopTitle")]
        stop_title: String,
    },
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
