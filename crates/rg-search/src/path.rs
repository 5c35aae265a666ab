//! Routes and their reconstruction from the predecessor map.

use tracing::error;

use rg_core::{GeoPoint, NodeId};
use rg_graph::RoadGraph;

use crate::state::SearchState;
use crate::weight::EdgeWeight;
use crate::{SearchError, SearchResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a successful query: the intersections from start to goal,
/// both inclusive, and the cost the search recorded at the goal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Route {
    pub points:     Vec<GeoPoint>,
    pub nodes:      Vec<NodeId>,
    /// In the unit of the query's weight policy: hops, km, or hours.
    pub total_cost: f64,
}

impl Route {
    pub fn start(&self) -> Option<GeoPoint> {
        self.points.first().copied()
    }

    pub fn goal(&self) -> Option<GeoPoint> {
        self.points.last().copied()
    }

    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// `true` if start and goal are the same intersection.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Walk the route edge by edge and sum `weight`, taking the cheapest
    /// segment wherever parallel segments join two consecutive nodes.
    ///
    /// Returns `None` if some consecutive pair is not joined by any segment
    /// of `graph`.
    pub fn rewalk_cost(&self, graph: &RoadGraph, weight: &EdgeWeight) -> Option<f64> {
        let mut total = 0.0;
        for hop in self.nodes.windows(2) {
            let (from, to) = (hop[0], hop[1]);
            let cheapest = graph
                .neighbors(from)
                .filter(|&(_, target)| target == to)
                .map(|(edge, _)| weight.weight(edge))
                .min_by(f64::total_cmp)?;
            total += cheapest;
        }
        Some(total)
    }

    /// Road length of the route in kilometres.
    pub fn length_km(&self, graph: &RoadGraph) -> Option<f64> {
        self.rewalk_cost(graph, &EdgeWeight::Distance)
    }
}

// ── Reconstruction ────────────────────────────────────────────────────────────

/// Follow predecessor links from `goal` back to `start` and return the route
/// in start → goal order.
///
/// A chain longer than the vertex count must contain a cycle, so the walk
/// gives up there with [`SearchError::DisconnectedState`], as it does when a
/// link is missing before `start` is reached.
pub(crate) fn reconstruct(
    graph: &RoadGraph,
    state: &SearchState,
    start: NodeId,
    goal: NodeId,
) -> SearchResult<Route> {
    let limit = graph.vertex_count();
    let mut nodes = vec![goal];
    let mut current = goal;

    while current != start {
        let next = match state.predecessor(current) {
            Some(prev) if nodes.len() < limit => prev,
            _ => return Err(disconnected(graph, start, goal, limit)),
        };
        nodes.push(next);
        current = next;
    }
    nodes.reverse();

    let points = nodes
        .iter()
        .map(|&n| graph.require_location(n))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Route { points, nodes, total_cost: state.best_cost(goal) })
}

fn disconnected(graph: &RoadGraph, start: NodeId, goal: NodeId, limit: usize) -> SearchError {
    let start = graph.location(start).unwrap_or(GeoPoint::new(f64::NAN, f64::NAN));
    let goal = graph.location(goal).unwrap_or(GeoPoint::new(f64::NAN, f64::NAN));
    error!(%start, %goal, limit, "predecessor chain broken; search bookkeeping is inconsistent");
    SearchError::DisconnectedState { start, goal, limit }
}
