//! `rg-graph` — the road graph store.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `RoadGraph` (adjacency + coordinate index + R-tree), `Edge` |
//! | [`loader`]  | `load_map`, `load_map_reader` (feature = `"loader"` only)   |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag     | Effect                                                      |
//! |----------|-------------------------------------------------------------|
//! | `loader` | Enables the text map loader via the `csv` crate (default).  |
//! | `serde`  | Derives `Serialize`/`Deserialize` on public types.          |

pub mod error;
pub mod network;

#[cfg(feature = "loader")]
pub mod loader;


pub use error::{GraphError, GraphResult};
pub use network::{Edge, Neighbors, RoadGraph};

#[cfg(feature = "loader")]
pub use loader::{load_map, load_map_reader};
