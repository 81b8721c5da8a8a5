// Criterion benchmarks for Treasure Engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chrono::Utc;
use uuid::Uuid;

use treasure_engine::core::{
    distance::haversine_distance,
    matcher::AlertMatcher,
    planner::{plan_by_value, plan_fastest},
};
use treasure_engine::models::{InventoryItem, Position, SearchRequest, Stop};

fn create_stops(count: usize) -> Vec<Stop> {
    (0..count)
        .map(|i| Stop {
            id: format!("sale-{:04}", i),
            position: Position::new(
                37.70 + ((i * 13) % 100) as f64 * 0.001,
                -122.50 + ((i * 7) % 100) as f64 * 0.001,
            ),
            price: 5.0 + ((i * 37) % 200) as f64,
            title: format!("Sale {}", i),
        })
        .collect()
}

fn create_items(count: usize) -> Vec<InventoryItem> {
    (0..count)
        .map(|i| InventoryItem {
            id: format!("item-{:04}", i),
            sale_id: format!("sale-{:04}", i % 50),
            title: if i % 5 == 0 {
                "Vintage Typewriter".to_string()
            } else {
                "Mid-Century Teak Desk".to_string()
            },
            category: "Antiques".to_string(),
            price: 5.0 + ((i * 37) % 200) as f64,
            position: Position::new(
                37.70 + ((i * 13) % 100) as f64 * 0.001,
                -122.50 + ((i * 7) % 100) as f64 * 0.001,
            ),
        })
        .collect()
}

fn create_request() -> SearchRequest {
    SearchRequest {
        id: Uuid::new_v4(),
        query: "typewriter".to_string(),
        radius_km: 10.0,
        min_price: None,
        max_price: None,
        origin: Position::new(37.7749, -122.4194),
        is_active: true,
        matches: vec![],
        last_checked: None,
        created_at: Utc::now(),
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(Position::new(37.7749, -122.4194)),
                black_box(Position::new(37.80, -122.44)),
            )
        });
    });
}

fn bench_plan_fastest(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_fastest");
    for size in [10, 50, 200] {
        let stops = create_stops(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &stops, |b, stops| {
            b.iter(|| plan_fastest(black_box(stops), None));
        });
    }
    group.finish();
}

fn bench_plan_by_value(c: &mut Criterion) {
    let stops = create_stops(200);
    c.bench_function("plan_by_value_200", |b| {
        b.iter(|| plan_by_value(black_box(&stops)));
    });
}

fn bench_scan(c: &mut Criterion) {
    let matcher = AlertMatcher::with_default_scorer(40.0);
    let request = create_request();
    let mut group = c.benchmark_group("alert_scan");
    for size in [100, 1000] {
        let items = create_items(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| matcher.scan(black_box(&request), black_box(items)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_plan_fastest,
    bench_plan_by_value,
    bench_scan
);
criterion_main!(benches);
