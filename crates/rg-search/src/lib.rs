//! `rg-search` — shortest-path queries over a [`RoadGraph`](rg_graph::RoadGraph).
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`engine`]   | `search`, `bfs`, `dijkstra`, `dijkstra_by_name`, `a_star`     |
//! | [`router`]   | `Router` trait, `BfsRouter`, `DijkstraRouter`, `AStarRouter`  |
//! | [`weight`]   | `EdgeWeight` (hops / distance / travel time), `Heuristic`     |
//! | [`frontier`] | `Frontier` trait, `FifoFrontier`, `MinHeapFrontier`           |
//! | [`state`]    | `SearchState` (per-query costs and predecessors)              |
//! | [`path`]     | `Route` and predecessor-chain reconstruction                  |
//! | [`observer`] | `SearchObserver` visitation hook, `NoopObserver`, `VisitLog`  |
//! | [`stats`]    | `SearchStats`                                                 |
//! | [`error`]    | `SearchError`, `SearchResult<T>`                              |
//!
//! # Example
//!
//! ```
//! use rg_core::{CostMode, GeoPoint, RoadType};
//! use rg_graph::RoadGraph;
//! use rg_search::{NoopObserver, dijkstra};
//!
//! let (a, b, c) = (GeoPoint::new(1.0, 1.0), GeoPoint::new(4.0, -1.0), GeoPoint::new(8.0, -1.0));
//! let mut g = RoadGraph::new();
//! for p in [a, b, c] {
//!     g.add_vertex(p);
//! }
//! g.add_edge(a, b, "main", RoadType::CityStreet, 5.0).unwrap();
//! g.add_edge(b, c, "main", RoadType::CityStreet, 3.0).unwrap();
//!
//! let route = dijkstra(&g, a, c, CostMode::DistanceOnly, &mut NoopObserver).unwrap().unwrap();
//! assert_eq!(route.points, vec![a, b, c]);
//! assert_eq!(route.total_cost, 8.0);
//! ```

pub mod engine;
pub mod error;
pub mod frontier;
pub mod observer;
pub mod path;
pub mod router;
pub mod state;
pub mod stats;
pub mod weight;

#[cfg(test)]
mod tests;

pub use engine::{SearchOutcome, SearchQuery, a_star, bfs, dijkstra, dijkstra_by_name, search};
pub use error::{SearchError, SearchResult};
pub use frontier::{FifoFrontier, Frontier, MinHeapFrontier};
pub use observer::{NoopObserver, SearchObserver, VisitLog};
pub use path::Route;
pub use router::{AStarRouter, BfsRouter, DijkstraRouter, RouteAlgorithm, Router, select_router};
pub use state::{Label, SearchState};
pub use stats::SearchStats;
pub use weight::{EdgeWeight, Heuristic};
