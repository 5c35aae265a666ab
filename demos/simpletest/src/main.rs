//! simpletest — smallest end-to-end run of the roadgraph crates.
//!
//! Loads a six-intersection map (embedded below, or the file named by the
//! first argument), then routes between two corners with every algorithm
//! and travel mode and logs what each one found.
//!
//! ```text
//! cargo run -p simpletest
//! RUST_LOG=rg_search=debug cargo run -p simpletest -- path/to/map.txt
//! ```

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use rg_core::{CostMode, GeoPoint, TravelMode};
use rg_graph::{RoadGraph, load_map, load_map_reader};
use rg_search::{
    Route, RouteAlgorithm, SearchQuery, SearchStats, VisitLog, dijkstra_by_name, search,
    select_router,
};

// ── Map ───────────────────────────────────────────────────────────────────────

// `lat1 lon1 lat2 lon2 road_name road_type`, one one-way segment per line.
// Two rows of downtown blocks; the alley along the north edge has a road
// class outside the speed table and routes at the fallback speed.
const MAP: &str = "\
# downtown grid
30.690 -88.050 30.690 -88.040 government city street
30.690 -88.040 30.690 -88.030 government city street
30.700 -88.050 30.700 -88.040 dauphin residential
30.700 -88.040 30.700 -88.030 dauphin residential
30.690 -88.050 30.700 -88.050 water city street
30.690 -88.040 30.700 -88.040 royal residential
30.690 -88.030 30.700 -88.030 st_joseph residential
30.700 -88.030 30.690 -88.030 st_joseph residential
30.700 -88.050 30.700 -88.030 alley service
";

const START: (f64, f64) = (30.690, -88.050);
const GOAL:  (f64, f64) = (30.700, -88.030);

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging()?;

    let graph = match std::env::args().nth(1) {
        Some(path) => load_map(Path::new(&path)).with_context(|| format!("loading {path}"))?,
        None => load_map_reader(Cursor::new(MAP)).context("loading embedded map")?,
    };
    info!(vertices = graph.vertex_count(), edges = graph.edge_count(), "map ready");

    let start = GeoPoint::from(START);
    let goal = GeoPoint::from(GOAL);

    // Every algorithm through the runtime selector.
    for algorithm in RouteAlgorithm::ALL {
        let router = select_router(algorithm, CostMode::DistanceOnly);
        let mut log = VisitLog::new();
        let t0 = Instant::now();
        let route = router.route(&graph, start, goal, &mut log)?;
        report(&graph, &algorithm.to_string(), route.as_ref(), log.len(), t0);
    }

    // Travel time for each mode, with effort counters.
    for mode in TravelMode::ALL {
        let t0 = Instant::now();
        let outcome = search(&graph, start, goal, &SearchQuery::dijkstra(mode.into()), &mut |_: GeoPoint| {})?;
        report(&graph, &format!("dijkstra/{mode}"), outcome.route.as_ref(), outcome.stats.visited(), t0);
        log_stats(&outcome.stats);
    }

    // Unknown names come back as errors, not panics.
    if let Err(err) = dijkstra_by_name(&graph, start, goal, "hovercraft", &mut |_: GeoPoint| {}) {
        warn!(%err, "rejected travel mode");
    }

    Ok(())
}

fn report(graph: &RoadGraph, label: &str, route: Option<&Route>, visited: usize, t0: Instant) {
    let elapsed_us = t0.elapsed().as_micros() as u64;
    match route {
        Some(route) => info!(
            query = label,
            hops = route.hop_count(),
            cost = route.total_cost,
            length_km = route.length_km(graph).unwrap_or(f64::NAN),
            visited,
            elapsed_us,
            "route found"
        ),
        None => info!(query = label, visited, elapsed_us, "no route"),
    }
}

fn log_stats(stats: &SearchStats) {
    info!(
        popped = stats.popped,
        stale_skipped = stats.stale_skipped,
        expanded = stats.expanded,
        stale_ratio = stats.stale_ratio(),
        "search effort"
    );
}
