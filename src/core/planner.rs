use std::cmp::Ordering;

use crate::core::distance::haversine_distance;
use crate::models::{OptimizationMode, Position, RouteSnapshot, Stop};

/// Owner of the ordered list of selected stops
///
/// Mutations are serialized by the caller (single-writer discipline). Every
/// mutation bumps a generation counter so an optimization computed against an
/// older stop set can be detected and discarded on completion.
#[derive(Debug, Default)]
pub struct RoutePlanner {
    stops: Vec<Stop>,
    mode: Option<OptimizationMode>,
    generation: u64,
}

impl RoutePlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stop if not already present; idempotent, never fails
    pub fn add_stop(&mut self, stop: Stop) {
        if self.stops.iter().any(|s| s.id == stop.id) {
            return;
        }
        self.stops.push(stop);
        self.generation += 1;
    }

    /// Remove the stop with the given id; no-op if absent
    pub fn remove_stop(&mut self, id: &str) -> bool {
        let before = self.stops.len();
        self.stops.retain(|s| s.id != id);
        if self.stops.len() != before {
            self.generation += 1;
            return true;
        }
        false
    }

    /// Empty the route
    pub fn clear(&mut self) {
        if !self.stops.is_empty() {
            self.stops.clear();
            self.generation += 1;
        }
        self.mode = None;
    }

    pub fn contains(&self, id: &str) -> bool {
        self.stops.iter().any(|s| s.id == id)
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> RouteSnapshot {
        RouteSnapshot {
            stops: self.stops.clone(),
            mode: self.mode,
        }
    }

    /// Compute a new ordering without mutating the route
    ///
    /// Routes with fewer than 2 stops are returned unchanged.
    pub fn plan(&self, mode: OptimizationMode, anchor: Option<Position>) -> Vec<Stop> {
        if self.stops.len() < 2 {
            return self.stops.clone();
        }
        match mode {
            OptimizationMode::Fastest => plan_fastest(&self.stops, anchor),
            OptimizationMode::ByValue => plan_by_value(&self.stops),
        }
    }

    /// Install a computed ordering, unless the route changed since it was
    /// planned
    ///
    /// Returns false (and discards the ordering) when the generation moved,
    /// which is the staleness check backing cancellable optimization.
    pub fn apply(
        &mut self,
        mode: OptimizationMode,
        order: Vec<Stop>,
        expected_generation: u64,
    ) -> bool {
        if self.generation != expected_generation {
            return false;
        }
        self.stops = order;
        self.mode = Some(mode);
        self.generation += 1;
        true
    }

    /// Compute and install an ordering synchronously
    pub fn optimize(&mut self, mode: OptimizationMode, anchor: Option<Position>) -> RouteSnapshot {
        let order = self.plan(mode, anchor);
        let generation = self.generation;
        self.apply(mode, order, generation);
        self.snapshot()
    }
}

/// Nearest-neighbor visiting order
///
/// A greedy heuristic, not a guaranteed optimal tour; O(n²) in stop count.
/// Seeded from the stop nearest the anchor when one is given, otherwise from
/// the northernmost stop so repeated runs are deterministic. All ties break
/// toward the lowest stop id.
pub fn plan_fastest(stops: &[Stop], anchor: Option<Position>) -> Vec<Stop> {
    if stops.len() < 2 {
        return stops.to_vec();
    }

    let mut remaining: Vec<Stop> = stops.to_vec();
    let seed_idx = match anchor {
        Some(origin) => nearest_index(&remaining, origin),
        None => northernmost_index(&remaining),
    };

    let mut ordered = Vec::with_capacity(remaining.len());
    let seed = remaining.swap_remove(seed_idx);
    let mut current = seed.position;
    ordered.push(seed);

    while !remaining.is_empty() {
        let next_idx = nearest_index(&remaining, current);
        let next = remaining.swap_remove(next_idx);
        current = next.position;
        ordered.push(next);
    }

    ordered
}

/// Stable descending sort by reference price; ties preserve prior order
pub fn plan_by_value(stops: &[Stop]) -> Vec<Stop> {
    let mut ordered = stops.to_vec();
    // Vec::sort_by is stable, which is the contract for equal prices
    ordered.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal));
    ordered
}

fn nearest_index(stops: &[Stop], from: Position) -> usize {
    let mut best_idx = 0;
    let mut best_dist = haversine_distance(from, stops[0].position);
    for (idx, stop) in stops.iter().enumerate().skip(1) {
        let dist = haversine_distance(from, stop.position);
        if wins(dist, &stop.id, best_dist, &stops[best_idx].id) {
            best_idx = idx;
            best_dist = dist;
        }
    }
    best_idx
}

fn northernmost_index(stops: &[Stop]) -> usize {
    let mut best_idx = 0;
    for (idx, stop) in stops.iter().enumerate().skip(1) {
        let best = &stops[best_idx];
        let better = match stop.position.latitude.partial_cmp(&best.position.latitude) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Equal) => stop.id < best.id,
            _ => false,
        };
        if better {
            best_idx = idx;
        }
    }
    best_idx
}

#[inline]
fn wins(dist: f64, id: &str, best_dist: f64, best_id: &str) -> bool {
    match dist.partial_cmp(&best_dist) {
        Some(Ordering::Less) => true,
        Some(Ordering::Equal) => id < best_id,
        _ => false,
    }
}
