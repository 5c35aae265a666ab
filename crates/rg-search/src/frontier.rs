//! Frontier queues: discovered-but-not-finalized nodes.
//!
//! Entries are never updated in place.  A relaxation that improves a node
//! pushes a second entry, and the search discards the outdated one when it
//! is popped (lazy deletion).
//!
//! | Frontier          | Pop order                         | Used by         |
//! |-------------------|-----------------------------------|-----------------|
//! | `FifoFrontier`    | discovery order                   | BFS             |
//! | `MinHeapFrontier` | smallest key, then smallest node  | Dijkstra, A*    |

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use rg_core::NodeId;

/// Queue of `(node, key)` entries.
pub trait Frontier {
    fn push(&mut self, node: NodeId, key: f64);

    fn pop(&mut self) -> Option<(NodeId, f64)>;

    /// Entries currently queued, stale duplicates included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── FIFO ──────────────────────────────────────────────────────────────────────

/// First-in first-out frontier.  Keys are carried but do not affect order;
/// under uniform edge weights discovery order already is cost order.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<(NodeId, f64)>,
}

impl FifoFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for FifoFrontier {
    fn push(&mut self, node: NodeId, key: f64) {
        self.queue.push_back((node, key));
    }

    fn pop(&mut self) -> Option<(NodeId, f64)> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

// ── Min-heap ──────────────────────────────────────────────────────────────────

/// Heap entry ordered by key (`f64::total_cmp`), ties broken by `NodeId` so
/// pop order is deterministic.
#[derive(Copy, Clone, Debug)]
struct HeapEntry {
    key:  f64,
    node: NodeId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .total_cmp(&other.key)
            .then_with(|| self.node.cmp(&other.node))
    }
}

/// Priority frontier popping the smallest key first.
#[derive(Debug, Default)]
pub struct MinHeapFrontier {
    // Reverse makes BinaryHeap (max) behave as a min-heap.
    heap: BinaryHeap<Reverse<HeapEntry>>,
}

impl MinHeapFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for MinHeapFrontier {
    fn push(&mut self, node: NodeId, key: f64) {
        self.heap.push(Reverse(HeapEntry { key, node }));
    }

    fn pop(&mut self) -> Option<(NodeId, f64)> {
        self.heap.pop().map(|Reverse(e)| (e.node, e.key))
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
