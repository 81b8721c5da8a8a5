use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a standing search alert
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAlertRequest {
    #[validate(length(min = 1, message = "query must not be empty"))]
    pub query: String,
    #[validate(range(min = 0.1, message = "radius must be positive"))]
    #[serde(alias = "radius_km", rename = "radiusKm")]
    pub radius_km: f64,
    #[validate(range(min = 0.0, message = "price bound must be non-negative"))]
    #[serde(default)]
    #[serde(alias = "min_price", rename = "minPrice")]
    pub min_price: Option<f64>,
    #[validate(range(min = 0.0, message = "price bound must be non-negative"))]
    #[serde(default)]
    #[serde(alias = "max_price", rename = "maxPrice")]
    pub max_price: Option<f64>,
}

impl CreateAlertRequest {
    /// Bound coherence, on top of derive-level field validation
    pub fn bounds_coherent(&self) -> bool {
        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}
