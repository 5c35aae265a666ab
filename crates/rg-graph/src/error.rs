//! Graph-store error type.

use thiserror::Error;

use rg_core::{GeoPoint, NodeId};

/// Errors produced by `rg-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("no intersection at {0}; add the vertex before connecting it")]
    UnknownVertex(GeoPoint),

    #[error("invalid road length {length_km} km from {from} to {to} (must be a positive, finite number)")]
    InvalidLength { from: GeoPoint, to: GeoPoint, length_km: f64 },

    #[error("invalid coordinate {0} (latitude and longitude must be finite)")]
    InvalidCoordinate(GeoPoint),

    #[error("graph is full: {what} count exceeds the u32 handle range")]
    CapacityExceeded { what: &'static str },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("map line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "loader")]
    #[error("map read error: {0}")]
    Csv(#[from] csv::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
