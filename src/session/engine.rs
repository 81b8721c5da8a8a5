use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Settings;
use crate::core::matcher::AlertMatcher;
use crate::core::planner::{plan_by_value, plan_fastest, RoutePlanner};
use crate::core::scoring::MatchScorer;
use crate::models::{
    AlertsSnapshot, CreateAlertRequest, Notification, OptimizationMode, Position, RouteSnapshot,
    SearchRequest, Stop,
};
use crate::services::{InventoryFeed, LocationError, LocationProvider};
use crate::session::disruption::DisruptionMonitor;
use crate::session::notify::NotificationDispatcher;
use crate::session::registry::AlertRegistry;

/// User-visible engine failures
///
/// Deletes and removes of unknown ids are no-op successes, and stale
/// optimization or scan results are discarded silently, so neither appears
/// here.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("location unavailable: {0}")]
    LocationUnavailable(#[from] LocationError),
}

struct EngineState {
    planner: RoutePlanner,
    registry: AlertRegistry,
    monitor: DisruptionMonitor,
    scan_tasks: HashMap<Uuid, JoinHandle<()>>,
}

/// Single-session engine: route planning, standing search alerts,
/// disruption handling and notification dispatch
///
/// All mutable state lives behind one mutex (single-writer discipline); scan
/// tasks and optimization hold the lock only to read inputs and apply
/// results, never while computing.
pub struct Engine {
    state: Arc<Mutex<EngineState>>,
    dispatcher: Arc<NotificationDispatcher>,
    feed: Arc<dyn InventoryFeed>,
    location: Arc<dyn LocationProvider>,
    matcher: AlertMatcher,
    initial_scan_delay: Duration,
    scan_interval: Duration,
}

impl Engine {
    pub fn new(
        feed: Arc<dyn InventoryFeed>,
        location: Arc<dyn LocationProvider>,
        settings: &Settings,
    ) -> Self {
        Self::build(
            feed,
            location,
            AlertMatcher::with_default_scorer(settings.matching.score_threshold),
            settings,
        )
    }

    /// Engine with a caller-provided scoring function
    pub fn with_scorer(
        feed: Arc<dyn InventoryFeed>,
        location: Arc<dyn LocationProvider>,
        scorer: Arc<dyn MatchScorer>,
        settings: &Settings,
    ) -> Self {
        Self::build(
            feed,
            location,
            AlertMatcher::new(scorer, settings.matching.score_threshold),
            settings,
        )
    }

    fn build(
        feed: Arc<dyn InventoryFeed>,
        location: Arc<dyn LocationProvider>,
        matcher: AlertMatcher,
        settings: &Settings,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(EngineState {
                planner: RoutePlanner::new(),
                registry: AlertRegistry::new(),
                monitor: DisruptionMonitor::new(),
                scan_tasks: HashMap::new(),
            })),
            dispatcher: Arc::new(NotificationDispatcher::new(Duration::from_secs(
                settings.notification.display_window_secs,
            ))),
            feed,
            location,
            matcher,
            initial_scan_delay: Duration::from_millis(settings.matching.initial_scan_delay_ms),
            scan_interval: Duration::from_secs(settings.matching.scan_interval_secs),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // --- Route operations ---

    /// Append a stop to the route; idempotent if already selected
    pub fn add_stop(&self, stop: Stop) {
        self.lock().planner.add_stop(stop);
    }

    /// Remove a stop from the route; no-op for unknown ids
    pub fn remove_stop(&self, id: &str) -> bool {
        self.lock().planner.remove_stop(id)
    }

    pub fn clear_route(&self) {
        self.lock().planner.clear();
    }

    pub fn route(&self) -> RouteSnapshot {
        self.lock().planner.snapshot()
    }

    /// Reorder the route under the given objective
    ///
    /// The ordering is computed off the engine lock on a blocking thread, so
    /// route mutations stay responsive during a large O(n²) plan; a result
    /// whose input set changed in the meantime is discarded, not applied.
    pub async fn optimize(
        &self,
        mode: OptimizationMode,
        anchor: Option<Position>,
    ) -> RouteSnapshot {
        let (stops, generation) = {
            let state = self.lock();
            (state.planner.stops().to_vec(), state.planner.generation())
        };

        let planned = tokio::task::spawn_blocking(move || match mode {
            OptimizationMode::Fastest => plan_fastest(&stops, anchor),
            OptimizationMode::ByValue => plan_by_value(&stops),
        })
        .await;

        let mut state = self.lock();
        match planned {
            Ok(order) => {
                if !state.planner.apply(mode, order, generation) {
                    debug!(?mode, "route changed mid-optimization, discarding stale ordering");
                }
            }
            Err(e) => warn!("optimization task did not complete: {}", e),
        }
        state.planner.snapshot()
    }

    // --- Alert operations ---

    /// Register a standing search and schedule its scan loop
    pub fn create_alert(&self, req: CreateAlertRequest) -> Result<SearchRequest, EngineError> {
        let origin = self.location.current_position()?;

        let mut state = self.lock();
        let request = state.registry.create(req, origin)?;
        info!(request_id = %request.id, query = %request.query, "created search alert");

        let task = self.spawn_scan_loop(request.id);
        state.scan_tasks.insert(request.id, task);
        Ok(request)
    }

    /// Delete a standing search, cancelling its pending scan work
    ///
    /// A scan already in flight completes against the feed but its result is
    /// discarded when it finds the request gone.
    pub fn delete_alert(&self, id: Uuid) -> bool {
        let mut state = self.lock();
        if let Some(task) = state.scan_tasks.remove(&id) {
            task.abort();
        }
        let deleted = state.registry.delete(id);
        if deleted {
            info!(request_id = %id, "deleted search alert");
        }
        deleted
    }

    pub fn alerts(&self) -> AlertsSnapshot {
        AlertsSnapshot {
            requests: self.lock().registry.list().to_vec(),
        }
    }

    // --- Disruption handling ---

    /// React to an external "item sold" event
    ///
    /// First transition removes the item's sale from the active route (if
    /// selected) and emits a disruption notification. The route is not
    /// re-optimized automatically; rerouting stays an explicit user action.
    pub fn item_sold(&self, item_id: &str) {
        let Some(item) = self.feed.snapshot().into_iter().find(|i| i.id == item_id) else {
            debug!(item_id, "sold event for unknown item, ignoring");
            return;
        };

        let removed = {
            let mut state = self.lock();
            if !state.monitor.mark_sold(item_id) {
                return;
            }
            let stop = state
                .planner
                .stops()
                .iter()
                .find(|s| s.id == item.sale_id)
                .cloned();
            if let Some(ref stop) = stop {
                state.planner.remove_stop(&stop.id);
            }
            stop
        };

        if let Some(stop) = removed {
            info!(stop_id = %stop.id, "stop removed from route after sold item");
            self.dispatcher.dispatch(Notification::Disruption {
                stop_id: stop.id,
                stop_title: stop.title,
            });
        }
    }

    // --- Notifications ---

    /// Hand the notification stream to the UI layer; yields once
    pub fn take_events(&self) -> Option<mpsc::UnboundedReceiver<Notification>> {
        self.dispatcher.take_events()
    }

    pub fn current_notification(&self) -> Option<Notification> {
        self.dispatcher.current()
    }

    pub fn dismiss_notification(&self) {
        self.dispatcher.dismiss()
    }

    // --- Scan loop ---

    fn spawn_scan_loop(&self, request_id: Uuid) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let feed = Arc::clone(&self.feed);
        let dispatcher = Arc::clone(&self.dispatcher);
        let matcher = self.matcher.clone();
        let initial_delay = self.initial_scan_delay;
        let interval = self.scan_interval;

        tokio::spawn(async move {
            tokio::time::sleep(initial_delay).await;
            loop {
                let request = {
                    let state = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                    state.registry.get(request_id).cloned()
                };
                let Some(request) = request else {
                    // Deleted while this task was sleeping
                    break;
                };

                if request.is_active {
                    let items = feed.snapshot();
                    let result = matcher.scan(&request, &items);
                    debug!(
                        request_id = %request_id,
                        candidates = result.total_candidates,
                        new_matches = result.new_matches.len(),
                        "scan cycle complete"
                    );

                    let notifications: Vec<Notification> = result
                        .new_matches
                        .iter()
                        .map(|m| Notification::Match {
                            request_id,
                            query: request.query.clone(),
                            item_title: m.item_title.clone(),
                            score: m.score,
                        })
                        .collect();

                    let applied = {
                        let mut state =
                            state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                        match state.registry.get_mut(request_id) {
                            Some(target) => {
                                target.last_checked = Some(Utc::now());
                                target.matches.extend(result.new_matches);
                                true
                            }
                            // Deleted mid-scan: the result must not
                            // resurrect the request
                            None => false,
                        }
                    };

                    if applied {
                        for notification in notifications {
                            dispatcher.dispatch(notification);
                        }
                    } else {
                        debug!(request_id = %request_id, "discarding scan result for deleted request");
                        break;
                    }
                }

                tokio::time::sleep(interval).await;
            }
        })
    }
}

impl Drop for Engine {
    /// Closing the session aborts all scan loops; each task holds an Arc to
    /// the engine state and would keep rescanning otherwise
    fn drop(&mut self) {
        let mut state = self.lock();
        for task in state.scan_tasks.drain().map(|(_, task)| task) {
            task.abort();
        }
    }
}
