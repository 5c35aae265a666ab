//! The search loop shared by BFS, Dijkstra and A*.
//!
//! # Loop
//!
//! ```text
//! push start
//! while pop (u, key):
//!     skip if u is already finalized          (stale duplicate)
//!     observer.on_visit(u)
//!     stop if u == goal
//!     finalize u
//!     for (edge, v) in neighbors(u), v not finalized:
//!         cost = best_cost[u] + weight(edge)
//!         if cost < best_cost[v]:
//!             record (cost, cost + h(v), pred = u) for v; push v
//! ```
//!
//! The three algorithms differ only in frontier, weight policy and
//! heuristic:
//!
//! | Algorithm | Frontier          | Weight                  | Heuristic     |
//! |-----------|-------------------|-------------------------|---------------|
//! | BFS       | `FifoFrontier`    | `Hops`                  | `Zero`        |
//! | Dijkstra  | `MinHeapFrontier` | `Distance`/`TravelTime` | `Zero`        |
//! | A*        | `MinHeapFrontier` | `Distance`              | `GreatCircle` |
//!
//! # Cost units
//!
//! `Route::total_cost` is in the weight policy's unit: hops for BFS,
//! kilometres for distance Dijkstra and A*, hours for travel-time Dijkstra.

use tracing::{debug, debug_span};

use rg_core::{CostMode, GeoPoint, NodeId, SpeedTable};
use rg_graph::RoadGraph;

use crate::frontier::{FifoFrontier, Frontier, MinHeapFrontier};
use crate::observer::SearchObserver;
use crate::path::{Route, reconstruct};
use crate::router::RouteAlgorithm;
use crate::state::SearchState;
use crate::stats::SearchStats;
use crate::weight::{EdgeWeight, Heuristic};
use crate::{SearchError, SearchResult};

// ── SearchQuery ───────────────────────────────────────────────────────────────

/// Algorithm plus weight policy for one search.
///
/// Constructed only through the named constructors, which keeps A* on
/// distance weights (the only policy its heuristic bounds from below).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchQuery {
    algorithm: RouteAlgorithm,
    weight:    EdgeWeight,
}

impl SearchQuery {
    /// Fewest hops.
    pub fn bfs() -> Self {
        Self { algorithm: RouteAlgorithm::Bfs, weight: EdgeWeight::Hops }
    }

    /// Cheapest route under `mode`, with the default [`SpeedTable`].
    pub fn dijkstra(mode: CostMode) -> Self {
        Self {
            algorithm: RouteAlgorithm::Dijkstra,
            weight:    EdgeWeight::for_cost_mode(mode, SpeedTable::default()),
        }
    }

    /// Cheapest route under `mode`, with caller-supplied speeds.
    ///
    /// # Errors
    ///
    /// [`SearchError::Core`] wrapping [`CoreError::InvalidSpeed`] if any
    /// speed is zero, negative or not finite.
    ///
    /// [`CoreError::InvalidSpeed`]: rg_core::CoreError::InvalidSpeed
    pub fn dijkstra_with_speeds(mode: CostMode, speeds: SpeedTable) -> SearchResult<Self> {
        Ok(Self {
            algorithm: RouteAlgorithm::Dijkstra,
            weight:    EdgeWeight::for_cost_mode(mode, speeds.validated()?),
        })
    }

    /// Shortest road distance, guided by great-circle distance to the goal.
    pub fn a_star() -> Self {
        Self { algorithm: RouteAlgorithm::AStar, weight: EdgeWeight::Distance }
    }

    pub fn algorithm(&self) -> RouteAlgorithm {
        self.algorithm
    }

    pub fn weight(&self) -> EdgeWeight {
        self.weight
    }

    pub fn heuristic(&self) -> Heuristic {
        match self.algorithm {
            RouteAlgorithm::AStar => Heuristic::GreatCircle,
            RouteAlgorithm::Bfs | RouteAlgorithm::Dijkstra => Heuristic::Zero,
        }
    }
}

// ── SearchOutcome ─────────────────────────────────────────────────────────────

/// Route (or `None` when the goal is unreachable) plus effort counters.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub route: Option<Route>,
    pub stats: SearchStats,
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Run `query` from `start` to `goal`.
///
/// # Errors
///
/// [`SearchError::UnknownLocation`] if `start` or `goal` is not an
/// intersection of `graph`.  An unreachable goal is `Ok` with
/// `route: None`.
pub fn search<O: SearchObserver + ?Sized>(
    graph: &RoadGraph,
    start: GeoPoint,
    goal: GeoPoint,
    query: &SearchQuery,
    observer: &mut O,
) -> SearchResult<SearchOutcome> {
    let start_id = graph.node_id(start).ok_or(SearchError::UnknownLocation(start))?;
    let goal_id = graph.node_id(goal).ok_or(SearchError::UnknownLocation(goal))?;

    let span = debug_span!("search", algorithm = %query.algorithm(), %start, %goal);
    let _enter = span.enter();

    let exploration = match query.algorithm() {
        RouteAlgorithm::Bfs => explore(graph, start_id, goal_id, query, FifoFrontier::new(), observer),
        RouteAlgorithm::Dijkstra | RouteAlgorithm::AStar => {
            explore(graph, start_id, goal_id, query, MinHeapFrontier::new(), observer)
        }
    };

    let stats = exploration.stats;
    debug!(
        reached = exploration.reached,
        popped = stats.popped,
        stale_skipped = stats.stale_skipped,
        expanded = stats.expanded,
        pushed = stats.pushed,
        frontier_residual = stats.frontier_residual,
        "search finished"
    );

    let route = if exploration.reached {
        Some(reconstruct(graph, &exploration.state, start_id, goal_id)?)
    } else {
        None
    };
    Ok(SearchOutcome { route, stats })
}

/// Route with the fewest road segments.
pub fn bfs<O: SearchObserver + ?Sized>(
    graph: &RoadGraph,
    start: GeoPoint,
    goal: GeoPoint,
    observer: &mut O,
) -> SearchResult<Option<Route>> {
    search(graph, start, goal, &SearchQuery::bfs(), observer).map(|o| o.route)
}

/// Cheapest route by road length ([`CostMode::DistanceOnly`]) or by travel
/// time for a mode.
pub fn dijkstra<O: SearchObserver + ?Sized>(
    graph: &RoadGraph,
    start: GeoPoint,
    goal: GeoPoint,
    mode: CostMode,
    observer: &mut O,
) -> SearchResult<Option<Route>> {
    search(graph, start, goal, &SearchQuery::dijkstra(mode), observer).map(|o| o.route)
}

/// [`dijkstra`] with the mode given by name (`"distance"`, `"car"`, `"bus"`,
/// `"walk"` or `"flight"`, any case).
///
/// # Errors
///
/// [`SearchError::UnknownMode`] for any other name, checked before the
/// locations are looked up.
pub fn dijkstra_by_name<O: SearchObserver + ?Sized>(
    graph: &RoadGraph,
    start: GeoPoint,
    goal: GeoPoint,
    mode: &str,
    observer: &mut O,
) -> SearchResult<Option<Route>> {
    let mode: CostMode = mode.parse()?;
    dijkstra(graph, start, goal, mode, observer)
}

/// Shortest route by road length, guided by great-circle distance.
pub fn a_star<O: SearchObserver + ?Sized>(
    graph: &RoadGraph,
    start: GeoPoint,
    goal: GeoPoint,
    observer: &mut O,
) -> SearchResult<Option<Route>> {
    search(graph, start, goal, &SearchQuery::a_star(), observer).map(|o| o.route)
}

// ── Search loop ───────────────────────────────────────────────────────────────

/// Everything a finished loop leaves behind.
pub(crate) struct Exploration {
    pub(crate) reached: bool,
    pub(crate) state:   SearchState,
    pub(crate) stats:   SearchStats,
}

pub(crate) fn explore<F: Frontier, O: SearchObserver + ?Sized>(
    graph: &RoadGraph,
    start: NodeId,
    goal: NodeId,
    query: &SearchQuery,
    mut frontier: F,
    observer: &mut O,
) -> Exploration {
    let weight = query.weight();
    let heuristic = query.heuristic();
    let goal_pos = graph.location(goal).unwrap_or(GeoPoint::new(0.0, 0.0));

    let start_key = heuristic.estimate_node(graph, start, goal_pos);
    let mut state = SearchState::new(start, start_key);
    let mut stats = SearchStats::default();

    frontier.push(start, start_key);
    stats.pushed += 1;

    let mut reached = false;
    while let Some((node, key)) = frontier.pop() {
        stats.popped += 1;
        if state.is_processed(node) || key > state.priority_key(node) {
            stats.stale_skipped += 1;
            continue;
        }

        if let Some(location) = graph.location(node) {
            observer.on_visit(location);
        }

        if node == goal {
            reached = true;
            break;
        }

        state.mark_processed(node);
        stats.expanded += 1;

        let base = state.best_cost(node);
        for (edge, next) in graph.neighbors(node) {
            if state.is_processed(next) {
                continue;
            }
            let cost = base + weight.weight(edge);
            if cost < state.best_cost(next) {
                let key = cost + heuristic.estimate_node(graph, next, goal_pos);
                state.relax(next, node, cost, key);
                frontier.push(next, key);
                stats.pushed += 1;
            }
        }
    }

    stats.frontier_residual = frontier.len();
    Exploration { reached, state, stats }
}
