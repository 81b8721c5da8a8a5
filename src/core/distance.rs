use crate::models::{BoundingBox, Position};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two positions in kilometers
///
/// Symmetric and non-negative; zero only for identical positions. The engine
/// uses it as a relative ranking metric, not a road-distance contract.
#[inline]
pub fn haversine_distance(a: Position, b: Position) -> f64 {
    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Calculate a bounding box around a center position
///
/// Much faster than Haversine for pre-filtering scan candidates.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
pub fn calculate_bounding_box(center: Position, radius_km: f64) -> BoundingBox {
    // 1 degree latitude is approximately 111 km
    let lat_delta = radius_km / 111.0;

    // 1 degree longitude varies by latitude
    let lon_delta = radius_km / (111.0 * center.latitude.to_radians().cos().abs());

    BoundingBox {
        min_lat: center.latitude - lat_delta,
        max_lat: center.latitude + lat_delta,
        min_lon: center.longitude - lon_delta,
        max_lon: center.longitude + lon_delta,
    }
}

/// Check if a position is within a bounding box
#[inline]
pub fn is_within_bounding_box(pos: Position, bbox: &BoundingBox) -> bool {
    pos.latitude >= bbox.min_lat
        && pos.latitude <= bbox.max_lat
        && pos.longitude >= bbox.min_lon
        && pos.longitude <= bbox.max_lon
}
