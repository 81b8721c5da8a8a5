//! Treasure Engine - itinerary planning and alerting for Local Treasures
//!
//! This library implements the route-planning and alerting engine of the
//! Local Treasures garage-sale app: multi-stop itineraries over selected
//! sales, reordering under two optimization objectives, disruption-aware
//! route invalidation, and continuous matching of standing searches against
//! a live inventory feed with notification dispatch.

pub mod config;
pub mod core;
pub mod models;
pub mod services;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    haversine_distance, AlertMatcher, MatchScorer, RoutePlanner, TokenOverlapScorer,
};
pub use models::{
    CreateAlertRequest, InventoryItem, Match, Notification, OptimizationMode, Position,
    RouteSnapshot, SearchRequest, Stop,
};
pub use services::{InMemoryFeed, InventoryFeed, LocationError, LocationProvider, StaticLocation};
pub use session::{Engine, EngineError};
