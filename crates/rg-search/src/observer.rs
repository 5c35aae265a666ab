//! Visitation hook for search instrumentation.

use rg_core::GeoPoint;

/// Callback invoked by every search each time a node is taken off the
/// frontier and finalized, in pop order.  The goal is reported too.
///
/// Observers only watch: nothing they do changes the search.  Any
/// `FnMut(GeoPoint)` closure is an observer.
///
/// # Example: visualizer feed
///
/// ```rust,ignore
/// let mut frames = Vec::new();
/// bfs(&graph, start, goal, &mut |p: GeoPoint| frames.push(p))?;
/// ```
pub trait SearchObserver {
    fn on_visit(&mut self, _location: GeoPoint) {}
}

impl<F: FnMut(GeoPoint)> SearchObserver for F {
    fn on_visit(&mut self, location: GeoPoint) {
        self(location)
    }
}

/// A [`SearchObserver`] that does nothing.  Use when you need to call a
/// query but don't want visitation callbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Records every visited location in pop order.
#[derive(Debug, Clone, Default)]
pub struct VisitLog {
    pub visited: Vec<GeoPoint>,
}

impl VisitLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

impl SearchObserver for VisitLog {
    fn on_visit(&mut self, location: GeoPoint) {
        self.visited.push(location);
    }
}
