//! Text map loader — enabled with the `loader` Cargo feature (on by default).
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use rg_graph::load_map;
//!
//! let graph = load_map(Path::new("data/maps/utc.map"))?;
//! ```
//!
//! # Format
//!
//! One directed road segment per line, fields separated by spaces:
//!
//! ```text
//! # lat1     lon1         lat2        lon2         name           type
//! 32.8660691 -117.2172932 32.8660691  -117.2166094 "VOIGT DR"     "city street"
//! 32.8660691 -117.2166094 32.8660691  -117.2172932 "VOIGT DR"     "city street"
//! 32.8655958 -117.2164584 32.8659558  -117.2164584 "LIGHTHOUSE"   residential
//! ```
//!
//! Quoted fields may contain spaces.  An unquoted road type that spans
//! several words (`city street`) is joined back together.  Lines starting
//! with `#` and blank lines are skipped.  Road names must be non-empty.
//!
//! Both endpoints of every line are added as intersections, so the file
//! needs no separate vertex section.  A segment's length is the great-circle
//! distance between its endpoints ([`DEFAULT_LENGTH_KM`] when they
//! coincide).

use std::io::Read;
use std::path::Path;

use tracing::info;

use rg_core::{DEFAULT_LENGTH_KM, GeoPoint, RoadType};

use crate::network::RoadGraph;
use crate::{GraphError, GraphResult};

// ── Public entry points ───────────────────────────────────────────────────────

/// Load a road graph from a map file.
///
/// # Errors
///
/// Returns [`GraphError::Io`] if the file cannot be opened,
/// [`GraphError::Parse`] for a malformed line, and [`GraphError::Csv`] for
/// read failures inside the record reader.
pub fn load_map(path: &Path) -> GraphResult<RoadGraph> {
    let file = std::fs::File::open(path)?;
    let graph = load_map_reader(file)?;
    info!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "loaded road map"
    );
    Ok(graph)
}

/// Like [`load_map`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for maps embedded in a
/// binary.
pub fn load_map_reader<R: Read>(reader: R) -> GraphResult<RoadGraph> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut graph = RoadGraph::new();
    let mut record = csv::StringRecord::new();

    while csv_reader.read_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line());
        // Runs of spaces produce empty fields; drop them.
        let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
        if fields.is_empty() {
            continue;
        }
        let segment = parse_segment(&fields, line)?;
        segment.insert_into(&mut graph)?;
    }

    Ok(graph)
}

// ── Line parsing ──────────────────────────────────────────────────────────────

struct MapSegment<'a> {
    from:      GeoPoint,
    to:        GeoPoint,
    road_name: &'a str,
    road_type: RoadType,
}

impl MapSegment<'_> {
    fn insert_into(&self, graph: &mut RoadGraph) -> GraphResult<()> {
        for point in [self.from, self.to] {
            if !graph.contains(point) {
                graph.try_add_vertex(point)?;
            }
        }
        let length_km = match self.from.distance_km(self.to) {
            d if d > 0.0 => d,
            _ => DEFAULT_LENGTH_KM,
        };
        graph.add_edge(self.from, self.to, self.road_name, self.road_type, length_km)?;
        Ok(())
    }
}

fn parse_segment<'a>(fields: &[&'a str], line: u64) -> GraphResult<MapSegment<'a>> {
    if fields.len() < 6 {
        return Err(GraphError::Parse {
            line,
            message: format!(
                "expected `lat1 lon1 lat2 lon2 name type`, found {} field(s)",
                fields.len()
            ),
        });
    }

    let coord = |i: usize| -> GraphResult<f64> {
        let bad = |reason: String| GraphError::Parse {
            line,
            message: format!("field {} ({:?}): {reason}", i + 1, fields[i]),
        };
        match fields[i].parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => Err(bad("coordinate must be finite".to_string())),
            Err(e) => Err(bad(e.to_string())),
        }
    };

    Ok(MapSegment {
        from:      GeoPoint::new(coord(0)?, coord(1)?),
        to:        GeoPoint::new(coord(2)?, coord(3)?),
        road_name: fields[4],
        road_type: RoadType::from_label(&fields[5..].join(" ")),
    })
}
