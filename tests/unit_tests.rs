// Unit tests for Treasure Engine

use treasure_engine::core::{
    distance::haversine_distance,
    matcher::AlertMatcher,
    planner::{plan_by_value, plan_fastest, RoutePlanner},
};
use treasure_engine::models::{InventoryItem, OptimizationMode, Position, SearchRequest, Stop};

use chrono::Utc;
use uuid::Uuid;

fn stop(id: &str, lat: f64, lon: f64, price: f64) -> Stop {
    Stop {
        id: id.to_string(),
        position: Position::new(lat, lon),
        price,
        title: format!("Sale {}", id),
    }
}

fn search_request(query: &str, radius_km: f64, bounds: (Option<f64>, Option<f64>)) -> SearchRequest {
    SearchRequest {
        id: Uuid::new_v4(),
        query: query.to_string(),
        radius_km,
        min_price: bounds.0,
        max_price: bounds.1,
        origin: Position::new(37.7749, -122.4194),
        is_active: true,
        matches: vec![],
        last_checked: None,
        created_at: Utc::now(),
    }
}

#[test]
fn test_distance_symmetric_and_zero_on_equal() {
    let positions = [
        Position::new(37.7749, -122.4194),
        Position::new(37.80, -122.44),
        Position::new(-33.87, 151.21),
        Position::new(0.0, 0.0),
    ];

    for a in positions {
        assert_eq!(haversine_distance(a, a), 0.0);
        for b in positions {
            assert_eq!(haversine_distance(a, b), haversine_distance(b, a));
            assert!(haversine_distance(a, b) >= 0.0);
        }
    }
}

#[test]
fn test_by_value_sorted_descending() {
    let stops = vec![
        stop("a", 37.76, -122.42, 15.0),
        stop("b", 37.77, -122.43, 90.0),
        stop("c", 37.78, -122.44, 40.0),
        stop("d", 37.79, -122.45, 5.0),
    ];

    let ordered = plan_by_value(&stops);
    for pair in ordered.windows(2) {
        assert!(pair[0].price >= pair[1].price);
    }
}

#[test]
fn test_by_value_stable_on_ties() {
    let stops = vec![
        stop("first", 37.76, -122.42, 25.0),
        stop("second", 37.77, -122.43, 25.0),
        stop("third", 37.78, -122.44, 25.0),
    ];

    let ordered = plan_by_value(&stops);
    let ids: Vec<&str> = ordered.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[test]
fn test_fastest_visits_every_stop_exactly_once() {
    let stops: Vec<Stop> = (0..12)
        .map(|i| {
            stop(
                &format!("s{:02}", i),
                37.70 + (i as f64) * 0.011,
                -122.40 - ((i * 7) % 5) as f64 * 0.013,
                10.0 + i as f64,
            )
        })
        .collect();

    let ordered = plan_fastest(&stops, None);
    assert_eq!(ordered.len(), stops.len());

    let mut ids: Vec<&str> = ordered.iter().map(|s| s.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), stops.len(), "no stop is revisited or dropped");
}

#[test]
fn test_fastest_collinear_by_increasing_distance_from_anchor() {
    let anchor = Position::new(37.70, -122.42);
    let stops = vec![
        stop("d2", 37.72, -122.42, 1.0),
        stop("d0", 37.70, -122.42, 1.0),
        stop("d1", 37.71, -122.42, 1.0),
    ];

    let ordered = plan_fastest(&stops, Some(anchor));
    let ids: Vec<&str> = ordered.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["d0", "d1", "d2"]);
}

#[test]
fn test_remove_absent_stop_leaves_route_unchanged() {
    let mut planner = RoutePlanner::new();
    planner.add_stop(stop("a", 37.76, -122.42, 50.0));
    planner.add_stop(stop("b", 37.77, -122.43, 10.0));
    planner.add_stop(stop("c", 37.78, -122.44, 30.0));
    let before: Vec<String> = planner.stops().iter().map(|s| s.id.clone()).collect();

    planner.remove_stop("ghost");

    let after: Vec<String> = planner.stops().iter().map(|s| s.id.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_optimize_same_mode_twice_is_idempotent() {
    let mut planner = RoutePlanner::new();
    for (i, price) in [40.0, 10.0, 75.0, 20.0].iter().enumerate() {
        planner.add_stop(stop(
            &format!("s{}", i),
            37.70 + i as f64 * 0.02,
            -122.42,
            *price,
        ));
    }

    let first = planner.optimize(OptimizationMode::Fastest, None);
    let second = planner.optimize(OptimizationMode::Fastest, None);

    let first_ids: Vec<&str> = first.stops.iter().map(|s| s.id.as_str()).collect();
    let second_ids: Vec<&str> = second.stops.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(first_ids, second_ids);
}

#[test]
fn test_matches_always_within_radius_and_bounds() {
    let matcher = AlertMatcher::with_default_scorer(0.0);
    let request = search_request("typewriter", 5.0, (Some(20.0), Some(60.0)));

    // Spread of typewriters at varying distances and prices
    let items: Vec<InventoryItem> = (0..30)
        .map(|i| InventoryItem {
            id: format!("item-{}", i),
            sale_id: format!("sale-{}", i),
            title: "Vintage Typewriter".to_string(),
            category: "Antiques".to_string(),
            price: 5.0 + (i * 7) as f64,
            position: Position::new(37.7749 + i as f64 * 0.01, -122.4194),
        })
        .collect();

    let result = matcher.scan(&request, &items);
    assert!(!result.new_matches.is_empty());

    for m in &result.new_matches {
        assert!(m.distance_km <= request.radius_km, "match outside radius");
        let item = items.iter().find(|i| i.id == m.item_id).unwrap();
        assert!(item.price >= 20.0 && item.price <= 60.0, "match outside price bounds");
    }
}
