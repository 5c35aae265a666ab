//! Edge weight policies and the A* heuristic.
//!
//! | Policy       | Weight of one edge                          |
//! |--------------|---------------------------------------------|
//! | `Hops`       | `1`                                         |
//! | `Distance`   | `length_km`                                 |
//! | `TravelTime` | `length_km / speed(road_type, mode)` hours  |
//!
//! The great-circle heuristic is in kilometres, so it is only a lower bound
//! on remaining cost under `Distance`.  [`SearchQuery`](crate::SearchQuery)
//! never pairs it with another policy.

use rg_core::{CostMode, GeoPoint, NodeId, SpeedTable, TravelMode};
use rg_graph::{Edge, RoadGraph};

/// How much traversing one edge costs.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum EdgeWeight {
    /// Every edge costs 1.
    Hops,
    /// Segment length in kilometres.
    #[default]
    Distance,
    /// Travel time in hours for `mode`, from `speeds`.
    TravelTime { mode: TravelMode, speeds: SpeedTable },
}

impl EdgeWeight {
    /// Weight policy matching a Dijkstra cost mode.
    pub fn for_cost_mode(mode: CostMode, speeds: SpeedTable) -> Self {
        match mode {
            CostMode::DistanceOnly     => EdgeWeight::Distance,
            CostMode::TravelTime(mode) => EdgeWeight::TravelTime { mode, speeds },
        }
    }

    #[inline]
    pub fn weight(&self, edge: &Edge) -> f64 {
        match self {
            EdgeWeight::Hops => 1.0,
            EdgeWeight::Distance => edge.length_km,
            EdgeWeight::TravelTime { mode, speeds } => {
                speeds.travel_hours(edge.length_km, edge.road_type, *mode)
            }
        }
    }
}

/// Estimate of the remaining cost from a node to the goal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// No estimate; plain Dijkstra / BFS ordering.
    #[default]
    Zero,
    /// Great-circle distance to the goal in kilometres.
    GreatCircle,
}

impl Heuristic {
    #[inline]
    pub fn estimate(self, from: GeoPoint, goal: GeoPoint) -> f64 {
        match self {
            Heuristic::Zero        => 0.0,
            Heuristic::GreatCircle => from.distance_km(goal),
        }
    }

    /// [`estimate`](Self::estimate) for a node handle of `graph`.  A foreign
    /// handle estimates to `0`, which keeps the heuristic admissible.
    #[inline]
    pub(crate) fn estimate_node(self, graph: &RoadGraph, node: NodeId, goal: GeoPoint) -> f64 {
        match self {
            Heuristic::Zero => 0.0,
            _ => graph.location(node).map_or(0.0, |p| self.estimate(p, goal)),
        }
    }
}
