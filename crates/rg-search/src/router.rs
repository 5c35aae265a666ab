//! Routing trait and the three built-in routers.
//!
//! # Pluggability
//!
//! Callers that pick an algorithm at runtime (a CLI flag, a config value)
//! hold a `Box<dyn Router>` from [`select_router`] instead of matching on the
//! algorithm at every call site.  Each router wraps one of the free
//! functions in [`engine`](crate::engine) and carries the settings that
//! function needs.

use std::fmt;
use std::str::FromStr;

use rg_core::{CoreError, CostMode, GeoPoint, SpeedTable};
use rg_graph::RoadGraph;

use crate::engine::{SearchQuery, search};
use crate::observer::SearchObserver;
use crate::path::Route;
use crate::SearchResult;

// ── RouteAlgorithm ────────────────────────────────────────────────────────────

/// Which search algorithm answers a query.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RouteAlgorithm {
    Bfs,
    Dijkstra,
    #[default]
    AStar,
}

impl RouteAlgorithm {
    pub const ALL: [RouteAlgorithm; 3] =
        [RouteAlgorithm::Bfs, RouteAlgorithm::Dijkstra, RouteAlgorithm::AStar];

    pub fn as_str(self) -> &'static str {
        match self {
            RouteAlgorithm::Bfs      => "bfs",
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar    => "astar",
        }
    }

    /// Shorthand for [`select_router`].
    pub fn router(self, mode: CostMode) -> Box<dyn Router> {
        select_router(self, mode)
    }
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteAlgorithm {
    type Err = CoreError;

    /// Accepts `bfs`, `dijkstra`, `astar` or `a*`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs"          => Ok(RouteAlgorithm::Bfs),
            "dijkstra"     => Ok(RouteAlgorithm::Dijkstra),
            "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            _ => Err(CoreError::Parse(format!("unknown route algorithm {s:?}"))),
        }
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable point-to-point routing over a shared [`RoadGraph`].
///
/// Routers hold no per-query state, so one instance may serve many threads
/// at once.
pub trait Router: Send + Sync {
    fn algorithm(&self) -> RouteAlgorithm;

    /// Route from `start` to `goal`, reporting every finalized location to
    /// `observer`.
    ///
    /// Returns `Ok(None)` if no route exists.
    fn route(
        &self,
        graph:    &RoadGraph,
        start:    GeoPoint,
        goal:     GeoPoint,
        observer: &mut dyn SearchObserver,
    ) -> SearchResult<Option<Route>>;
}

// ── BfsRouter ─────────────────────────────────────────────────────────────────

/// Fewest road segments, ignoring lengths.
#[derive(Copy, Clone, Debug, Default)]
pub struct BfsRouter;

impl Router for BfsRouter {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Bfs
    }

    fn route(
        &self,
        graph:    &RoadGraph,
        start:    GeoPoint,
        goal:     GeoPoint,
        observer: &mut dyn SearchObserver,
    ) -> SearchResult<Option<Route>> {
        search(graph, start, goal, &SearchQuery::bfs(), observer).map(|o| o.route)
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Cheapest route under a fixed [`CostMode`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DijkstraRouter {
    pub mode: CostMode,
    speeds:   SpeedTable,
}

impl DijkstraRouter {
    pub fn new(mode: CostMode) -> Self {
        Self { mode, speeds: SpeedTable::default() }
    }

    /// Replace the default speeds.
    ///
    /// # Errors
    ///
    /// Fails if `speeds` does not pass [`SpeedTable::validate`].
    pub fn with_speeds(mut self, speeds: SpeedTable) -> SearchResult<Self> {
        self.speeds = speeds.validated()?;
        Ok(self)
    }

    pub fn speeds(&self) -> &SpeedTable {
        &self.speeds
    }
}

impl Router for DijkstraRouter {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn route(
        &self,
        graph:    &RoadGraph,
        start:    GeoPoint,
        goal:     GeoPoint,
        observer: &mut dyn SearchObserver,
    ) -> SearchResult<Option<Route>> {
        let query = SearchQuery::dijkstra_with_speeds(self.mode, self.speeds)?;
        search(graph, start, goal, &query, observer).map(|o| o.route)
    }
}

// ── AStarRouter ───────────────────────────────────────────────────────────────

/// Shortest road distance with the great-circle heuristic.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStarRouter;

impl Router for AStarRouter {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn route(
        &self,
        graph:    &RoadGraph,
        start:    GeoPoint,
        goal:     GeoPoint,
        observer: &mut dyn SearchObserver,
    ) -> SearchResult<Option<Route>> {
        search(graph, start, goal, &SearchQuery::a_star(), observer).map(|o| o.route)
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// Router for `algorithm`.  `mode` only matters for Dijkstra; BFS counts
/// hops and A* always measures distance.
pub fn select_router(algorithm: RouteAlgorithm, mode: CostMode) -> Box<dyn Router> {
    match algorithm {
        RouteAlgorithm::Bfs      => Box::new(BfsRouter),
        RouteAlgorithm::Dijkstra => Box::new(DijkstraRouter::new(mode)),
        RouteAlgorithm::AStar    => Box::new(AStarRouter),
    }
}
