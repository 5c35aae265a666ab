//! Per-query search state.
//!
//! Costs, priorities and predecessors live here, keyed by `NodeId`, and never
//! on the graph.  Every query allocates a fresh `SearchState` and drops it
//! when it returns, so searches sharing one `&RoadGraph` cannot see each
//! other's bookkeeping.
//!
//! Nodes absent from the map have an implicit cost of `+∞` and no
//! predecessor.

use rustc_hash::{FxHashMap, FxHashSet};

use rg_core::NodeId;

/// Best-known data for one discovered node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Label {
    /// Cumulative cost from the start along the best path found so far.
    pub best_cost:    f64,
    /// Frontier ordering key: `best_cost`, or `best_cost + heuristic` for A*.
    pub priority_key: f64,
    /// Previous node on that path; `None` only for the start.
    pub predecessor:  Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct SearchState {
    labels:    FxHashMap<NodeId, Label>,
    processed: FxHashSet<NodeId>,
}

impl SearchState {
    /// State for a search rooted at `start` with the given start key.
    pub fn new(start: NodeId, start_priority: f64) -> Self {
        let mut labels = FxHashMap::default();
        labels.insert(
            start,
            Label { best_cost: 0.0, priority_key: start_priority, predecessor: None },
        );
        Self { labels, processed: FxHashSet::default() }
    }

    #[inline]
    pub fn label(&self, node: NodeId) -> Option<&Label> {
        self.labels.get(&node)
    }

    #[inline]
    pub fn best_cost(&self, node: NodeId) -> f64 {
        self.labels.get(&node).map_or(f64::INFINITY, |l| l.best_cost)
    }

    #[inline]
    pub fn priority_key(&self, node: NodeId) -> f64 {
        self.labels.get(&node).map_or(f64::INFINITY, |l| l.priority_key)
    }

    #[inline]
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.labels.get(&node).and_then(|l| l.predecessor)
    }

    #[inline]
    pub fn is_processed(&self, node: NodeId) -> bool {
        self.processed.contains(&node)
    }

    /// Finalize `node`.  Returns `false` if it was already finalized.
    pub fn mark_processed(&mut self, node: NodeId) -> bool {
        self.processed.insert(node)
    }

    /// Record a path to `node` through `via` if it strictly improves on the
    /// best known cost.  Returns whether the label changed.
    pub fn relax(&mut self, node: NodeId, via: NodeId, cost: f64, priority_key: f64) -> bool {
        if cost < self.best_cost(node) {
            self.labels.insert(
                node,
                Label { best_cost: cost, priority_key, predecessor: Some(via) },
            );
            true
        } else {
            false
        }
    }

    /// Nodes ever placed on the frontier, the start included.
    pub fn discovered_count(&self) -> usize {
        self.labels.len()
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }
}
