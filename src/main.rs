use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use treasure_engine::config::Settings;
use treasure_engine::services::{demo_feed, InventoryFeed};
use treasure_engine::{
    CreateAlertRequest, Engine, InventoryItem, OptimizationMode, Position, StaticLocation, Stop,
};

/// Build one selectable stop per sale from the feed's inventory
///
/// The stop's reference price is the priciest item at that sale.
fn stops_from_feed(items: &[InventoryItem]) -> Vec<Stop> {
    let mut by_sale: BTreeMap<&str, &InventoryItem> = BTreeMap::new();
    for item in items {
        by_sale
            .entry(item.sale_id.as_str())
            .and_modify(|best| {
                if item.price > best.price {
                    *best = item;
                }
            })
            .or_insert(item);
    }
    by_sale
        .into_iter()
        .map(|(sale_id, item)| Stop {
            id: sale_id.to_string(),
            position: item.position,
            price: item.price,
            title: format!("Garage Sale {}", sale_id.trim_start_matches("sale-")),
        })
        .collect()
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Treasure Engine session simulation...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // A busy Saturday of local sales
    let feed = Arc::new(demo_feed(12));
    let home = Position::new(37.7749, -122.4194);
    let engine = Engine::new(feed.clone(), Arc::new(StaticLocation(home)), &settings);

    // Forward the notification stream to the log, standing in for the UI
    if let Some(mut events) = engine.take_events() {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                info!(?event, "notification");
            }
        });
    }

    // Select a handful of stops and plan a visiting route
    let stops = stops_from_feed(&feed.snapshot());
    for stop in stops.iter().take(5).cloned() {
        engine.add_stop(stop);
    }

    let fastest = engine.optimize(OptimizationMode::Fastest, Some(home)).await;
    info!(
        order = ?fastest.stops.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
        "fastest route"
    );

    let by_value = engine.optimize(OptimizationMode::ByValue, None).await;
    info!(
        order = ?by_value.stops.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
        "by-value route"
    );

    // A standing search; the matching loop picks up the arrival below
    match engine.create_alert(CreateAlertRequest {
        query: "typewriter".to_string(),
        radius_km: 8.0,
        min_price: None,
        max_price: Some(100.0),
    }) {
        Ok(request) => info!(request_id = %request.id, "watching for typewriters"),
        Err(e) => error!("could not create alert: {}", e),
    }

    feed.push(InventoryItem {
        id: "item-late-1".to_string(),
        sale_id: "sale-2".to_string(),
        title: "Vintage Typewriter".to_string(),
        category: "Antiques".to_string(),
        price: 45.0,
        position: Position::new(37.765, -122.425),
    });

    // Let the initial scan fire
    tokio::time::sleep(Duration::from_millis(
        settings.matching.initial_scan_delay_ms + 500,
    ))
    .await;

    for request in engine.alerts().requests {
        info!(
            query = %request.query,
            matches = request.matches.len(),
            "alert status"
        );
    }

    // One of the routed sales sells its headline item
    if let Some(first_stop) = engine.route().stops.first().cloned() {
        if let Some(item) = feed
            .snapshot()
            .into_iter()
            .find(|i| i.sale_id == first_stop.id)
        {
            engine.item_sold(&item.id);
        }
    }

    // Give the disruption notification its display window
    tokio::time::sleep(Duration::from_secs(settings.notification.display_window_secs)).await;

    let route = engine.route();
    info!(
        remaining = ?route.stops.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
        "final route"
    );
    info!("Session simulation complete");
}
