//! Road graph representation.
//!
//! # Data layout
//!
//! Intersections are stored in insertion order and addressed by `NodeId`
//! (their position).  A hash index maps each `GeoPoint` to its `NodeId`, so
//! identity-by-coordinate lookups never scan the node list.
//!
//! ```text
//! node_pos[n]  : GeoPoint of node n
//! node_out[n]  : EdgeIds leaving n, in insertion order (duplicates allowed)
//! edges[e]     : Edge { from, to, road_name, road_type, length_km }
//! ```
//!
//! Handles are checked against the `u32` range when a node or edge is
//! inserted, so positions of stored elements always convert back losslessly.
//!
//! Unlike a CSR layout the per-node edge lists can grow after construction,
//! which is what the incremental `add_vertex` / `add_edge` loader interface
//! needs.  Search code only ever borrows the graph immutably.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId`, for
//! snapping arbitrary positions (a map click, a geocoded address) to the
//! closest intersection before routing.

use std::fmt;

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use rg_core::{DEFAULT_LENGTH_KM, EdgeId, GeoPoint, NodeId, RoadType};

use crate::{GraphError, GraphResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lon]` point with
/// the associated `NodeId`.
#[derive(Clone, Debug)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Good enough to rank
    /// candidates within a city; callers needing kilometres use
    /// `GeoPoint::distance_km` on the result.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── Edge ──────────────────────────────────────────────────────────────────────

/// One directed road segment.  A two-way road is two `Edge`s.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from:      NodeId,
    pub to:        NodeId,
    pub road_name: String,
    pub road_type: RoadType,
    /// Always `> 0` and finite; enforced by [`RoadGraph::add_edge`].
    pub length_km: f64,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} {:?} [{}, {:.3} km]",
            self.from, self.to, self.road_name, self.road_type, self.length_km
        )
    }
}

// ── Neighbors ─────────────────────────────────────────────────────────────────

/// Lazy iterator over the `(edge, target)` pairs leaving one node, in edge
/// insertion order.
///
/// Cheap to clone; a clone taken before iterating replays the same sequence.
#[derive(Clone)]
pub struct Neighbors<'a> {
    edges: &'a [Edge],
    out:   std::slice::Iter<'a, EdgeId>,
}

impl<'a> Iterator for Neighbors<'a> {
    type Item = (&'a Edge, NodeId);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.out.next()?;
        let edge = &self.edges[id.index()];
        Some((edge, edge.to))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.out.size_hint()
    }
}

impl ExactSizeIterator for Neighbors<'_> {}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Directed road graph keyed by intersection coordinate.
///
/// Holds no per-search state, so any number of searches may borrow the same
/// `&RoadGraph` at once.
#[derive(Clone)]
pub struct RoadGraph {
    // ── Node data (indexed by NodeId) ─────────────────────────────────────
    node_pos: Vec<GeoPoint>,
    node_out: Vec<Vec<EdgeId>>,
    index:    FxHashMap<GeoPoint, NodeId>,

    // ── Edge data (indexed by EdgeId) ─────────────────────────────────────
    edges: Vec<Edge>,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<NodeEntry>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Pre-allocate for the expected number of vertices and edges to reduce
    /// reallocations when bulk-loading a map.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            node_pos:    Vec::with_capacity(vertices),
            node_out:    Vec::with_capacity(vertices),
            index:       FxHashMap::with_capacity_and_hasher(vertices, Default::default()),
            edges:       Vec::with_capacity(edges),
            spatial_idx: RTree::new(),
        }
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Add an intersection at `location`.
    ///
    /// Returns `true` if a node was inserted, `false` if one already exists
    /// at exactly that coordinate (the graph is left unchanged).  Locations
    /// [`try_add_vertex`](Self::try_add_vertex) rejects are logged and also
    /// reported as `false`.
    pub fn add_vertex(&mut self, location: GeoPoint) -> bool {
        match self.try_add_vertex(location) {
            Ok(inserted) => inserted,
            Err(err) => {
                warn!(%location, %err, "intersection rejected");
                false
            }
        }
    }

    /// [`add_vertex`](Self::add_vertex) that reports why a location cannot
    /// become an intersection.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidCoordinate`] if latitude or longitude is `NaN`
    ///   or infinite.
    /// - [`GraphError::CapacityExceeded`] if the graph already holds
    ///   `u32::MAX + 1` intersections.
    pub fn try_add_vertex(&mut self, location: GeoPoint) -> GraphResult<bool> {
        if !(location.lat().is_finite() && location.lon().is_finite()) {
            return Err(GraphError::InvalidCoordinate(location));
        }
        if self.index.contains_key(&location) {
            warn!(%location, "intersection already exists in the graph");
            return Ok(false);
        }
        let id = NodeId::try_from(self.node_pos.len())
            .map_err(|_| GraphError::CapacityExceeded { what: "intersection" })?;
        self.node_pos.push(location);
        self.node_out.push(Vec::new());
        self.index.insert(location, id);
        self.spatial_idx.insert(NodeEntry { point: location.as_array(), id });
        Ok(true)
    }

    /// [`add_vertex`](Self::add_vertex) from raw latitude/longitude.
    pub fn add_vertex_lat_lon(&mut self, lat: f64, lon: f64) -> bool {
        self.add_vertex(GeoPoint::new(lat, lon))
    }

    /// Add a **directed** road segment from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::UnknownVertex`] if either endpoint was never added.
    /// - [`GraphError::InvalidLength`] if `length_km` is not a positive,
    ///   finite number.
    /// - [`GraphError::CapacityExceeded`] past `u32::MAX + 1` segments.
    ///
    /// On error the graph is unchanged.
    pub fn add_edge(
        &mut self,
        from: GeoPoint,
        to: GeoPoint,
        road_name: impl Into<String>,
        road_type: RoadType,
        length_km: f64,
    ) -> GraphResult<EdgeId> {
        let from_id = self.require_node(from)?;
        let to_id = self.require_node(to)?;
        if !(length_km > 0.0 && length_km.is_finite()) {
            debug!(%from, %to, length_km, "rejecting road segment with invalid length");
            return Err(GraphError::InvalidLength { from, to, length_km });
        }

        let id = EdgeId::try_from(self.edges.len())
            .map_err(|_| GraphError::CapacityExceeded { what: "road segment" })?;
        self.edges.push(Edge {
            from: from_id,
            to: to_id,
            road_name: road_name.into(),
            road_type,
            length_km,
        });
        self.node_out[from_id.index()].push(id);
        Ok(id)
    }

    /// [`add_edge`](Self::add_edge) with [`DEFAULT_LENGTH_KM`], for map
    /// sources that do not record segment lengths.
    pub fn add_edge_default_length(
        &mut self,
        from: GeoPoint,
        to: GeoPoint,
        road_name: impl Into<String>,
        road_type: RoadType,
    ) -> GraphResult<EdgeId> {
        self.add_edge(from, to, road_name, road_type, DEFAULT_LENGTH_KM)
    }

    fn require_node(&self, location: GeoPoint) -> GraphResult<NodeId> {
        self.node_id(location).ok_or(GraphError::UnknownVertex(location))
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Handle of the intersection at exactly `location`.
    #[inline]
    pub fn node_id(&self, location: GeoPoint) -> Option<NodeId> {
        self.index.get(&location).copied()
    }

    /// `true` if an intersection exists at exactly `location`.
    #[inline]
    pub fn contains(&self, location: GeoPoint) -> bool {
        self.index.contains_key(&location)
    }

    #[inline]
    pub fn location(&self, node: NodeId) -> Option<GeoPoint> {
        self.node_pos.get(node.index()).copied()
    }

    /// Like [`location`](Self::location) but fails with
    /// [`GraphError::NodeNotFound`] for a foreign handle.
    pub fn require_location(&self, node: NodeId) -> GraphResult<GeoPoint> {
        self.location(node).ok_or(GraphError::NodeNotFound(node))
    }

    #[inline]
    pub fn edge(&self, edge: EdgeId) -> Option<&Edge> {
        self.edges.get(edge.index())
    }

    /// All intersection coordinates, in insertion order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = GeoPoint> + '_ {
        self.node_pos.iter().copied()
    }

    /// All road segments with their handles, in insertion order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeId(i as u32), e))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// `(edge, target)` pairs leaving `node`.  Empty for an unknown handle.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> Neighbors<'_> {
        let out = self
            .node_out
            .get(node.index())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        Neighbors { edges: &self.edges, out: out.iter() }
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.node_out.get(node.index()).map_or(0, Vec::len)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest intersection to `pos`.
    ///
    /// Returns `None` only if the graph has no vertices.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&pos.as_array())
            .map(|e| e.id)
    }

    /// Return up to `k` nearest intersections to `pos`, nearest first.
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        self.spatial_idx
            .nearest_neighbor_iter(&pos.as_array())
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}

impl Default for RoadGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoadGraph {
    /// One header line, then one line per intersection with its outgoing
    /// segments indented beneath it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "RoadGraph: {} vertices, {} edges",
            self.vertex_count(),
            self.edge_count()
        )?;
        for (i, pos) in self.node_pos.iter().enumerate() {
            let node = NodeId(i as u32);
            writeln!(f, "{node} {pos}")?;
            for (edge, _) in self.neighbors(node) {
                writeln!(f, "    {edge}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for RoadGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoadGraph")
            .field("vertices", &self.vertex_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}
