//! Search error type.
//!
//! "No route" is not an error: queries return `Ok(None)` for it.

use thiserror::Error;

use rg_core::{CoreError, GeoPoint};
use rg_graph::GraphError;

/// Errors produced by `rg-search`.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Start or goal is not an intersection of the graph.
    #[error("no intersection at {0}")]
    UnknownLocation(GeoPoint),

    /// A travel-mode string named no supported mode.
    #[error("unknown travel mode {0:?} (expected distance, car, bus, walk or flight)")]
    UnknownMode(String),

    /// The predecessor chain recorded during the search does not lead from
    /// the goal back to the start.  Indicates broken relaxation bookkeeping.
    #[error("predecessor chain from {goal} does not reach {start} within {limit} steps")]
    DisconnectedState { start: GeoPoint, goal: GeoPoint, limit: usize },

    #[error(transparent)]
    Core(CoreError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl From<CoreError> for SearchError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownMode(mode) => SearchError::UnknownMode(mode),
            other => SearchError::Core(other),
        }
    }
}

pub type SearchResult<T> = Result<T, SearchError>;
