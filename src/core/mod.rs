// Core algorithm exports
pub mod distance;
pub mod matcher;
pub mod planner;
pub mod scoring;

pub use distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box};
pub use matcher::{AlertMatcher, ScanResult};
pub use planner::{plan_by_value, plan_fastest, RoutePlanner};
pub use scoring::{MatchScorer, TokenOverlapScorer};
