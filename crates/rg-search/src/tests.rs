//! Unit tests for rg-search.
//!
//! Small hand-built graphs pin exact routes and costs; seeded random graphs
//! cross-check the algorithms against each other.

#[cfg(test)]
mod helpers {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use rg_core::{GeoPoint, RoadType};
    use rg_graph::RoadGraph;

    pub fn p(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon)
    }

    pub const A: (f64, f64) = (1.0, 1.0);
    pub const B: (f64, f64) = (4.0, -1.0);
    pub const C: (f64, f64) = (8.0, -1.0);
    /// Isolated: a vertex with no segments.
    pub const D: (f64, f64) = (9.0, 9.0);

    pub fn a() -> GeoPoint { p(A.0, A.1) }
    pub fn b() -> GeoPoint { p(B.0, B.1) }
    pub fn c() -> GeoPoint { p(C.0, C.1) }
    pub fn d() -> GeoPoint { p(D.0, D.1) }

    /// One-way line plus an isolated vertex.
    ///
    ///   a:(1,1) --5 km--> b:(4,-1) --3 km--> c:(8,-1)      d:(9,9)
    pub fn line_graph() -> RoadGraph {
        let mut g = RoadGraph::new();
        for pt in [a(), b(), c(), d()] {
            g.add_vertex(pt);
        }
        g.add_edge(a(), b(), "main", RoadType::CityStreet, 5.0).unwrap();
        g.add_edge(b(), c(), "main", RoadType::CityStreet, 3.0).unwrap();
        g
    }

    /// Two ways from `s` to `t`:
    ///
    ///   s --connector 6 km--> t
    ///   s --city 4 km--> m --city 4 km--> t
    ///
    /// Shortest by distance is the connector; fastest by car is via `m`.
    pub fn fork_graph() -> (RoadGraph, GeoPoint, GeoPoint, GeoPoint) {
        let (s, m, t) = (p(0.0, 0.0), p(0.0, 0.03), p(0.0, 0.05));
        let mut g = RoadGraph::new();
        for pt in [s, m, t] {
            g.add_vertex(pt);
        }
        g.add_edge(s, t, "bypass", RoadType::Connector, 6.0).unwrap();
        g.add_edge(s, m, "high st", RoadType::CityStreet, 4.0).unwrap();
        g.add_edge(m, t, "high st", RoadType::CityStreet, 4.0).unwrap();
        (g, s, m, t)
    }

    /// Random directed graph in a small box.  Every segment is at least as
    /// long as the great-circle distance between its ends (times `1.05..2`),
    /// or exactly `1.0` when `unit` is set.
    pub fn random_graph(seed: u64, vertices: usize, edges: usize, unit: bool) -> (RoadGraph, Vec<GeoPoint>) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut g = RoadGraph::with_capacity(vertices, edges);
        let mut pts = Vec::with_capacity(vertices);
        while pts.len() < vertices {
            let pt = p(rng.gen_range(0.0..0.5), rng.gen_range(0.0..0.5));
            if g.add_vertex(pt) {
                pts.push(pt);
            }
        }
        let mut added = 0;
        while added < edges {
            let from = pts[rng.gen_range(0..vertices)];
            let to = pts[rng.gen_range(0..vertices)];
            if from == to {
                continue;
            }
            let length = if unit { 1.0 } else { from.distance_km(to) * rng.gen_range(1.05..2.0) };
            let road_type = if rng.gen_bool(0.5) { RoadType::CityStreet } else { RoadType::Residential };
            g.add_edge(from, to, "r", road_type, length).unwrap();
            added += 1;
        }
        (g, pts)
    }

    pub fn approx(x: f64, y: f64) -> bool {
        (x - y).abs() <= 1e-9 * x.abs().max(y.abs()).max(1.0)
    }
}

// ── Basic routes ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod routes {
    use rg_core::CostMode;

    use super::helpers::{a, b, c, d, line_graph, p};
    use crate::{NoopObserver, a_star, bfs, dijkstra, dijkstra_by_name};

    #[test]
    fn dijkstra_follows_the_line() {
        let g = line_graph();
        let route = dijkstra(&g, a(), c(), CostMode::DistanceOnly, &mut NoopObserver)
            .unwrap()
            .unwrap();
        assert_eq!(route.points, vec![a(), b(), c()]);
        assert_eq!(route.total_cost, 8.0);
        assert_eq!(route.hop_count(), 2);
    }

    #[test]
    fn single_segment_costs_its_length() {
        let g = line_graph();
        let r1 = dijkstra(&g, a(), b(), CostMode::DistanceOnly, &mut NoopObserver).unwrap().unwrap();
        assert_eq!(r1.points, vec![a(), b()]);
        assert_eq!(r1.total_cost, 5.0);

        let r2 = dijkstra(&g, b(), c(), CostMode::DistanceOnly, &mut NoopObserver).unwrap().unwrap();
        assert_eq!(r2.total_cost, 3.0);
    }

    #[test]
    fn bfs_counts_hops() {
        let g = line_graph();
        let route = bfs(&g, a(), c(), &mut NoopObserver).unwrap().unwrap();
        assert_eq!(route.points, vec![a(), b(), c()]);
        assert_eq!(route.total_cost, 2.0);
        assert_eq!(route.length_km(&g), Some(8.0));
    }

    #[test]
    fn a_star_follows_the_line() {
        let g = line_graph();
        let route = a_star(&g, a(), c(), &mut NoopObserver).unwrap().unwrap();
        assert_eq!(route.points, vec![a(), b(), c()]);
        assert_eq!(route.total_cost, 8.0);
    }

    #[test]
    fn isolated_goal_has_no_route() {
        let g = line_graph();
        assert!(bfs(&g, a(), d(), &mut NoopObserver).unwrap().is_none());
        assert!(dijkstra(&g, a(), d(), CostMode::DistanceOnly, &mut NoopObserver).unwrap().is_none());
        assert!(a_star(&g, a(), d(), &mut NoopObserver).unwrap().is_none());
        assert!(dijkstra_by_name(&g, a(), d(), "car", &mut NoopObserver).unwrap().is_none());
    }

    #[test]
    fn segments_are_one_way() {
        let g = line_graph();
        assert!(bfs(&g, c(), a(), &mut NoopObserver).unwrap().is_none());
        assert!(dijkstra(&g, b(), a(), CostMode::DistanceOnly, &mut NoopObserver).unwrap().is_none());
    }

    #[test]
    fn start_equals_goal() {
        let g = line_graph();
        for route in [
            bfs(&g, b(), b(), &mut NoopObserver).unwrap().unwrap(),
            dijkstra(&g, b(), b(), CostMode::DistanceOnly, &mut NoopObserver).unwrap().unwrap(),
            a_star(&g, b(), b(), &mut NoopObserver).unwrap().unwrap(),
        ] {
            assert_eq!(route.points, vec![b()]);
            assert_eq!(route.total_cost, 0.0);
            assert!(route.is_trivial());
        }
        // Even an isolated vertex reaches itself.
        let route = bfs(&g, d(), d(), &mut NoopObserver).unwrap().unwrap();
        assert_eq!(route.start(), Some(d()));
        assert_eq!(route.goal(), Some(p(9.0, 9.0)));
    }

    #[test]
    fn parallel_segments_use_the_shortest() {
        let mut g = line_graph();
        g.add_edge(a(), b(), "bypass", rg_core::RoadType::Connector, 2.0).unwrap();
        let route = dijkstra(&g, a(), c(), CostMode::DistanceOnly, &mut NoopObserver).unwrap().unwrap();
        assert_eq!(route.total_cost, 5.0);
        assert_eq!(route.length_km(&g), Some(5.0));
    }
}

// ── Travel time ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod travel_time {
    use rg_core::{CoreError, CostMode, RoadType, SpeedTable, TravelMode};
    use rg_graph::RoadGraph;

    use super::helpers::{approx, fork_graph, p};
    use crate::{
        DijkstraRouter, EdgeWeight, NoopObserver, Router, SearchError, SearchQuery, dijkstra,
        dijkstra_by_name, search,
    };

    fn city_segment(length_km: f64, road_type: RoadType) -> RoadGraph {
        let mut g = RoadGraph::new();
        g.add_vertex(p(0.0, 0.0));
        g.add_vertex(p(0.0, 0.1));
        g.add_edge(p(0.0, 0.0), p(0.0, 0.1), "s", road_type, length_km).unwrap();
        g
    }

    fn hours(g: &RoadGraph, mode: TravelMode) -> f64 {
        dijkstra(g, p(0.0, 0.0), p(0.0, 0.1), mode.into(), &mut NoopObserver)
            .unwrap()
            .unwrap()
            .total_cost
    }

    #[test]
    fn walking_a_city_street() {
        let g = city_segment(7.2, RoadType::CityStreet);
        assert_eq!(hours(&g, TravelMode::Walk), 1.0);
    }

    #[test]
    fn bus_on_a_city_street() {
        let g = city_segment(7.2, RoadType::CityStreet);
        assert!(approx(hours(&g, TravelMode::Bus), 0.09));
        assert!(approx(hours(&g, TravelMode::Car), 0.09));
    }

    #[test]
    fn flight_ignores_road_type() {
        let g = city_segment(9.0, RoadType::Residential);
        assert!(approx(hours(&g, TravelMode::Flight), 0.01));
    }

    #[test]
    fn other_roads_use_fallback_speed() {
        let g = city_segment(4.0, RoadType::Other);
        assert!(approx(hours(&g, TravelMode::Car), 0.1));
        assert!(approx(hours(&g, TravelMode::Walk), 4.0 / 7.2));
    }

    #[test]
    fn mode_changes_the_route() {
        let (g, s, m, t) = fork_graph();

        let shortest = dijkstra(&g, s, t, CostMode::DistanceOnly, &mut NoopObserver).unwrap().unwrap();
        assert_eq!(shortest.points, vec![s, t]);
        assert_eq!(shortest.total_cost, 6.0);

        // 6 km at 40 km/h = 0.15 h; 8 km at 80 km/h = 0.1 h.
        let fastest = dijkstra(&g, s, t, TravelMode::Car.into(), &mut NoopObserver).unwrap().unwrap();
        assert_eq!(fastest.points, vec![s, m, t]);
        assert!(approx(fastest.total_cost, 0.1));

        // Walking speed does not depend on road type.
        let walk = dijkstra(&g, s, t, TravelMode::Walk.into(), &mut NoopObserver).unwrap().unwrap();
        assert_eq!(walk.points, vec![s, t]);
    }

    #[test]
    fn custom_speeds() {
        let (g, s, m, t) = fork_graph();
        let speeds = SpeedTable { connector_kmh: 120.0, ..SpeedTable::default() };
        let query = SearchQuery::dijkstra_with_speeds(TravelMode::Bus.into(), speeds).unwrap();
        let route = search(&g, s, t, &query, &mut NoopObserver).unwrap().route.unwrap();
        assert_eq!(route.points, vec![s, t]);
        assert!(approx(route.total_cost, 0.05));
        assert!(!route.nodes.contains(&g.node_id(m).unwrap()));
        assert!(approx(route.rewalk_cost(&g, &query.weight()).unwrap(), 0.05));
    }

    #[test]
    fn invalid_speeds_are_rejected() {
        let negative = SpeedTable { residential_kmh: -60.0, ..SpeedTable::default() };
        let err = SearchQuery::dijkstra_with_speeds(TravelMode::Car.into(), negative).unwrap_err();
        assert!(
            matches!(err, SearchError::Core(CoreError::InvalidSpeed { setting: "residential_kmh", .. })),
            "{err:?}",
        );

        let zero = SpeedTable { city_street_kmh: 0.0, residential_kmh: 0.0, ..SpeedTable::default() };
        let err = SearchQuery::dijkstra_with_speeds(TravelMode::Bus.into(), zero).unwrap_err();
        assert!(matches!(err, SearchError::Core(CoreError::InvalidSpeed { kmh, .. }) if kmh == 0.0), "{err:?}");

        // Checked even when the mode never reads the bad entry.
        let nan = SpeedTable { flight_kmh: f64::NAN, ..SpeedTable::default() };
        assert!(SearchQuery::dijkstra_with_speeds(CostMode::DistanceOnly, nan).is_err());
    }

    #[test]
    fn router_rejects_invalid_speeds() {
        let (g, s, m, t) = fork_graph();
        let bad = SpeedTable { connector_kmh: -1.0, ..SpeedTable::default() };
        assert!(DijkstraRouter::new(TravelMode::Car.into()).with_speeds(bad).is_err());

        let fast = SpeedTable { city_street_kmh: 200.0, ..SpeedTable::default() };
        let router = DijkstraRouter::new(TravelMode::Car.into()).with_speeds(fast).unwrap();
        assert_eq!(router.speeds().city_street_kmh, 200.0);
        let route = router.route(&g, s, t, &mut NoopObserver).unwrap().unwrap();
        assert_eq!(route.points, vec![s, m, t]);
        assert!(approx(route.total_cost, 0.04));
    }

    #[test]
    fn mode_names_are_case_insensitive() {
        let (g, s, _, t) = fork_graph();
        let by_name = dijkstra_by_name(&g, s, t, "Car", &mut NoopObserver).unwrap().unwrap();
        let typed = dijkstra(&g, s, t, TravelMode::Car.into(), &mut NoopObserver).unwrap().unwrap();
        assert_eq!(by_name, typed);

        let distance = dijkstra_by_name(&g, s, t, "distance", &mut NoopObserver).unwrap().unwrap();
        assert_eq!(distance.total_cost, 6.0);
    }

    #[test]
    fn weight_policy_for_mode() {
        let speeds = SpeedTable::default();
        assert_eq!(EdgeWeight::for_cost_mode(CostMode::DistanceOnly, speeds), EdgeWeight::Distance);
        assert_eq!(
            EdgeWeight::for_cost_mode(TravelMode::Walk.into(), speeds),
            EdgeWeight::TravelTime { mode: TravelMode::Walk, speeds },
        );
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod errors {
    use rg_core::CostMode;

    use super::helpers::{a, c, line_graph, p};
    use crate::{NoopObserver, SearchError, a_star, bfs, dijkstra, dijkstra_by_name};

    #[test]
    fn unknown_mode_name() {
        let g = line_graph();
        let err = dijkstra_by_name(&g, a(), c(), "boat", &mut NoopObserver).unwrap_err();
        assert!(matches!(err, SearchError::UnknownMode(ref m) if m == "boat"), "{err:?}");
    }

    #[test]
    fn mode_is_checked_before_locations() {
        let g = line_graph();
        let err = dijkstra_by_name(&g, p(0.0, 0.0), c(), "teleport", &mut NoopObserver).unwrap_err();
        assert!(matches!(err, SearchError::UnknownMode(_)), "{err:?}");
    }

    #[test]
    fn unknown_start() {
        let g = line_graph();
        let missing = p(0.0, 0.0);
        let err = bfs(&g, missing, c(), &mut NoopObserver).unwrap_err();
        assert!(matches!(err, SearchError::UnknownLocation(pt) if pt == missing), "{err:?}");
    }

    #[test]
    fn unknown_goal() {
        let g = line_graph();
        let missing = p(1.0, 1.0000001);
        for err in [
            bfs(&g, a(), missing, &mut NoopObserver).unwrap_err(),
            dijkstra(&g, a(), missing, CostMode::DistanceOnly, &mut NoopObserver).unwrap_err(),
            a_star(&g, a(), missing, &mut NoopObserver).unwrap_err(),
        ] {
            assert!(matches!(err, SearchError::UnknownLocation(pt) if pt == missing), "{err:?}");
        }
    }

    #[test]
    fn error_messages() {
        let err = SearchError::UnknownMode("boat".into());
        assert!(err.to_string().contains("boat"));
        let err = SearchError::UnknownLocation(p(2.0, 3.0));
        assert!(err.to_string().contains("(2, 3)"));
    }
}

// ── Frontier and state ────────────────────────────────────────────────────────

#[cfg(test)]
mod frontier {
    use rg_core::NodeId;

    use crate::{FifoFrontier, Frontier, MinHeapFrontier, SearchState};

    #[test]
    fn fifo_keeps_push_order() {
        let mut f = FifoFrontier::new();
        f.push(NodeId(3), 9.0);
        f.push(NodeId(1), 1.0);
        f.push(NodeId(2), 5.0);
        assert_eq!(f.len(), 3);
        assert_eq!(f.pop(), Some((NodeId(3), 9.0)));
        assert_eq!(f.pop(), Some((NodeId(1), 1.0)));
        assert_eq!(f.pop(), Some((NodeId(2), 5.0)));
        assert!(f.is_empty());
        assert_eq!(f.pop(), None);
    }

    #[test]
    fn min_heap_pops_smallest_then_lowest_id() {
        let mut f = MinHeapFrontier::new();
        f.push(NodeId(5), 2.0);
        f.push(NodeId(4), 2.0);
        f.push(NodeId(9), 0.5);
        f.push(NodeId(1), 7.0);
        let order: Vec<_> = std::iter::from_fn(|| f.pop()).collect();
        assert_eq!(
            order,
            vec![(NodeId(9), 0.5), (NodeId(4), 2.0), (NodeId(5), 2.0), (NodeId(1), 7.0)],
        );
    }

    #[test]
    fn min_heap_keeps_duplicates() {
        let mut f = MinHeapFrontier::new();
        f.push(NodeId(1), 5.0);
        f.push(NodeId(1), 2.0);
        assert_eq!(f.len(), 2);
        assert_eq!(f.pop(), Some((NodeId(1), 2.0)));
        assert_eq!(f.pop(), Some((NodeId(1), 5.0)));
    }

    #[test]
    fn state_defaults_to_infinity() {
        let s = SearchState::new(NodeId(0), 0.0);
        assert_eq!(s.best_cost(NodeId(0)), 0.0);
        assert_eq!(s.best_cost(NodeId(7)), f64::INFINITY);
        assert_eq!(s.predecessor(NodeId(0)), None);
        assert_eq!(s.discovered_count(), 1);
    }

    #[test]
    fn relax_requires_strict_improvement() {
        let mut s = SearchState::new(NodeId(0), 0.0);
        assert!(s.relax(NodeId(1), NodeId(0), 4.0, 4.0));
        assert!(!s.relax(NodeId(1), NodeId(2), 4.0, 4.0));
        assert_eq!(s.predecessor(NodeId(1)), Some(NodeId(0)));
        assert!(s.relax(NodeId(1), NodeId(2), 3.0, 3.5));
        assert_eq!(s.predecessor(NodeId(1)), Some(NodeId(2)));
        assert_eq!(s.priority_key(NodeId(1)), 3.5);
    }

    #[test]
    fn processed_is_set_once() {
        let mut s = SearchState::new(NodeId(0), 0.0);
        assert!(!s.is_processed(NodeId(0)));
        assert!(s.mark_processed(NodeId(0)));
        assert!(!s.mark_processed(NodeId(0)));
        assert_eq!(s.processed_count(), 1);
    }
}

// ── Lazy deletion ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod lazy_deletion {
    use rg_core::{CostMode, GeoPoint, RoadType};
    use rg_graph::RoadGraph;

    use super::helpers::p;
    use crate::{NoopObserver, SearchQuery, VisitLog, search};

    /// `b` is first reached at cost 5 directly, then improved to 2 via `a`,
    /// leaving a stale heap entry behind.
    ///
    ///   s --1--> a --1--> b --10--> t
    ///   s --5-----------> b
    fn diamond() -> (RoadGraph, [GeoPoint; 4]) {
        let pts = [p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(2.0, 2.0)];
        let [s, a, b, t] = pts;
        let mut g = RoadGraph::new();
        for pt in pts {
            g.add_vertex(pt);
        }
        g.add_edge(s, a, "x", RoadType::Residential, 1.0).unwrap();
        g.add_edge(s, b, "x", RoadType::Residential, 5.0).unwrap();
        g.add_edge(a, b, "x", RoadType::Residential, 1.0).unwrap();
        g.add_edge(b, t, "x", RoadType::Residential, 10.0).unwrap();
        (g, pts)
    }

    #[test]
    fn stale_entry_is_skipped() {
        let (g, [s, a, b, t]) = diamond();
        let mut log = VisitLog::new();
        let outcome = search(&g, s, t, &SearchQuery::dijkstra(CostMode::DistanceOnly), &mut log).unwrap();

        let route = outcome.route.unwrap();
        assert_eq!(route.points, vec![s, a, b, t]);
        assert_eq!(route.total_cost, 12.0);

        let stats = outcome.stats;
        assert_eq!(stats.pushed, 5);
        assert_eq!(stats.popped, 5);
        assert_eq!(stats.stale_skipped, 1);
        assert_eq!(stats.expanded, 3);
        assert_eq!(stats.frontier_residual, 0);
        assert_eq!(stats.visited(), 4);
        assert_eq!(stats.stale_ratio(), 0.2);

        // `b` is reported once even though it was queued twice.
        assert_eq!(log.visited, vec![s, a, b, t]);
    }

    #[test]
    fn early_exit_leaves_frontier_entries() {
        let (g, [s, _, b, _]) = diamond();
        let outcome = search(&g, s, b, &SearchQuery::dijkstra(CostMode::DistanceOnly), &mut NoopObserver).unwrap();
        assert_eq!(outcome.route.unwrap().total_cost, 2.0);
        // The stale cost-5 entry for `b` is never popped.
        assert_eq!(outcome.stats.frontier_residual, 1);
        assert_eq!(outcome.stats.stale_skipped, 0);
    }

    #[test]
    fn unreachable_goal_drains_the_frontier() {
        let (g, [s, _, _, t]) = diamond();
        let outcome = search(&g, t, s, &SearchQuery::bfs(), &mut NoopObserver).unwrap();
        assert!(outcome.route.is_none());
        assert_eq!(outcome.stats.frontier_residual, 0);
        assert_eq!(outcome.stats.expanded, 1);
    }
}

// ── Visitation hook ───────────────────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use rg_core::{CostMode, GeoPoint, RoadType};
    use rg_graph::RoadGraph;

    use super::helpers::{a, b, c, d, line_graph, p};
    use crate::{NoopObserver, VisitLog, a_star, bfs, dijkstra};

    #[test]
    fn line_is_visited_in_order() {
        let g = line_graph();
        let mut log = VisitLog::new();
        bfs(&g, a(), c(), &mut log).unwrap();
        assert_eq!(log.visited, vec![a(), b(), c()]);

        let mut order = Vec::new();
        dijkstra(&g, a(), c(), CostMode::DistanceOnly, &mut |pt: GeoPoint| order.push(pt)).unwrap();
        assert_eq!(order, vec![a(), b(), c()]);
    }

    #[test]
    fn bfs_visits_by_level() {
        // Star: hub -> 3 spokes, first spoke -> far.
        let hub = p(0.0, 0.0);
        let spokes = [p(0.0, 0.1), p(0.1, 0.0), p(0.0, -0.1)];
        let far = p(0.0, 0.2);
        let mut g = RoadGraph::new();
        g.add_vertex(hub);
        for s in spokes {
            g.add_vertex(s);
            g.add_edge(hub, s, "spoke", RoadType::Residential, 1.0).unwrap();
        }
        g.add_vertex(far);
        g.add_edge(spokes[0], far, "out", RoadType::Residential, 1.0).unwrap();

        let mut log = VisitLog::new();
        let route = bfs(&g, hub, far, &mut log).unwrap().unwrap();
        assert_eq!(route.points, vec![hub, spokes[0], far]);
        assert_eq!(log.visited, vec![hub, spokes[0], spokes[1], spokes[2], far]);
    }

    #[test]
    fn unreachable_goal_is_not_reported() {
        let g = line_graph();
        let mut count = 0;
        let route = a_star(&g, a(), d(), &mut |_: GeoPoint| count += 1).unwrap();
        assert!(route.is_none());
        assert_eq!(count, 3);
    }

    #[test]
    fn observer_does_not_change_result() {
        let g = line_graph();
        let mut log = VisitLog::new();
        let watched = dijkstra(&g, a(), c(), CostMode::DistanceOnly, &mut log).unwrap();
        let plain = dijkstra(&g, a(), c(), CostMode::DistanceOnly, &mut NoopObserver).unwrap();
        assert_eq!(watched, plain);
        assert_eq!(log.len(), 3);
    }
}

// ── Reconstruction ────────────────────────────────────────────────────────────

#[cfg(test)]
mod reconstruction {
    use rg_core::NodeId;

    use super::helpers::{a, c, line_graph};
    use crate::path::reconstruct;
    use crate::{SearchError, SearchState};

    #[test]
    fn walks_back_to_start() {
        let g = line_graph();
        let (n0, n1, n2) = (NodeId(0), NodeId(1), NodeId(2));
        let mut s = SearchState::new(n0, 0.0);
        s.relax(n1, n0, 5.0, 5.0);
        s.relax(n2, n1, 8.0, 8.0);
        let route = reconstruct(&g, &s, n0, n2).unwrap();
        assert_eq!(route.nodes, vec![n0, n1, n2]);
        assert_eq!(route.total_cost, 8.0);
    }

    #[test]
    fn missing_link_is_disconnected() {
        let g = line_graph();
        let mut s = SearchState::new(NodeId(0), 0.0);
        // n2's predecessor n1 was never labelled.
        s.relax(NodeId(2), NodeId(1), 8.0, 8.0);
        let err = reconstruct(&g, &s, NodeId(0), NodeId(2)).unwrap_err();
        assert!(
            matches!(err, SearchError::DisconnectedState { start, goal, .. } if start == a() && goal == c()),
            "{err:?}",
        );
    }

    #[test]
    fn cycle_is_disconnected() {
        let g = line_graph();
        let mut s = SearchState::new(NodeId(0), 0.0);
        s.relax(NodeId(1), NodeId(2), 1.0, 1.0);
        s.relax(NodeId(2), NodeId(1), 1.0, 1.0);
        let err = reconstruct(&g, &s, NodeId(0), NodeId(2)).unwrap_err();
        assert!(matches!(err, SearchError::DisconnectedState { limit: 4, .. }), "{err:?}");
    }
}

// ── Cross-checks on random graphs ─────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use rg_core::{CostMode, RoadType, TravelMode};

    use super::helpers::{approx, random_graph};
    use crate::{NoopObserver, SearchQuery, a_star, bfs, dijkstra, search};

    #[test]
    fn bfs_matches_dijkstra_on_unit_lengths() {
        for seed in 0..20 {
            let (g, pts) = random_graph(seed, 40, 90, true);
            for i in 0..10 {
                let (s, t) = (pts[i], pts[pts.len() - 1 - i]);
                let by_bfs = bfs(&g, s, t, &mut NoopObserver).unwrap();
                let by_dij = dijkstra(&g, s, t, CostMode::DistanceOnly, &mut NoopObserver).unwrap();
                match (by_bfs, by_dij) {
                    (Some(x), Some(y)) => {
                        assert_eq!(x.total_cost, y.total_cost, "seed {seed} pair {i}");
                        assert_eq!(x.total_cost, x.hop_count() as f64);
                    }
                    (None, None) => {}
                    (x, y) => panic!("seed {seed} pair {i}: bfs {x:?} vs dijkstra {y:?}"),
                }
            }
        }
    }

    #[test]
    fn a_star_matches_dijkstra_on_geometric_lengths() {
        for seed in 100..120 {
            let (g, pts) = random_graph(seed, 60, 150, false);
            for i in 0..15 {
                let (s, t) = (pts[i], pts[pts.len() - 1 - i]);
                let by_astar = a_star(&g, s, t, &mut NoopObserver).unwrap();
                let by_dij = dijkstra(&g, s, t, CostMode::DistanceOnly, &mut NoopObserver).unwrap();
                match (by_astar, by_dij) {
                    (Some(x), Some(y)) => assert!(
                        approx(x.total_cost, y.total_cost),
                        "seed {seed} pair {i}: {} vs {}",
                        x.total_cost,
                        y.total_cost,
                    ),
                    (None, None) => {}
                    (x, y) => panic!("seed {seed} pair {i}: a* {x:?} vs dijkstra {y:?}"),
                }
            }
        }
    }

    #[test]
    fn route_cost_equals_rewalked_cost() {
        let modes = [
            CostMode::DistanceOnly,
            CostMode::TravelTime(TravelMode::Car),
            CostMode::TravelTime(TravelMode::Bus),
            CostMode::TravelTime(TravelMode::Walk),
            CostMode::TravelTime(TravelMode::Flight),
        ];
        for seed in 200..210 {
            let (mut g, pts) = random_graph(seed, 50, 120, false);
            // Parallel city-street twins 30% longer: shorter to walk or fly
            // the original, faster to drive the twin when the original is
            // residential.
            let twins: Vec<_> = g
                .edges()
                .take(40)
                .map(|(_, e)| (e.from, e.to, e.length_km * 1.3))
                .collect();
            for (from, to, length_km) in twins {
                let (from, to) = (g.location(from).unwrap(), g.location(to).unwrap());
                g.add_edge(from, to, "twin", RoadType::CityStreet, length_km).unwrap();
            }

            for mode in modes {
                let query = SearchQuery::dijkstra(mode);
                for i in 0..10 {
                    let (s, t) = (pts[i], pts[pts.len() - 1 - i]);
                    let Some(route) = search(&g, s, t, &query, &mut NoopObserver).unwrap().route else {
                        continue;
                    };
                    assert_eq!(route.start(), Some(s));
                    assert_eq!(route.goal(), Some(t));
                    let rewalked = route.rewalk_cost(&g, &query.weight()).unwrap();
                    assert!(approx(rewalked, route.total_cost), "seed {seed} mode {mode} pair {i}");
                }
            }
        }
    }
}

// ── Concurrency ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod concurrency {
    use rg_core::CostMode;

    use super::helpers::random_graph;
    use crate::{NoopObserver, Route, a_star, dijkstra};

    #[test]
    fn searches_share_one_graph() {
        let (g, pts) = random_graph(7, 80, 200, false);
        let pairs: Vec<_> = (0..16).map(|i| (pts[i], pts[pts.len() - 1 - i])).collect();

        let sequential: Vec<Option<Route>> = pairs
            .iter()
            .map(|&(s, t)| dijkstra(&g, s, t, CostMode::DistanceOnly, &mut NoopObserver).unwrap())
            .collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = pairs
                .chunks(4)
                .map(|chunk| {
                    let g = &g;
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|&(s, t)| {
                                // Interleave a second algorithm to mix search states.
                                a_star(g, s, t, &mut NoopObserver).unwrap();
                                dijkstra(g, s, t, CostMode::DistanceOnly, &mut NoopObserver).unwrap()
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            let parallel: Vec<Option<Route>> =
                handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
            assert_eq!(parallel, sequential);
        });
    }
}

// ── Routers ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routers {
    use rg_core::{CoreError, CostMode, GeoPoint, TravelMode};

    use super::helpers::{a, c, fork_graph, line_graph};
    use crate::{
        AStarRouter, DijkstraRouter, Heuristic, NoopObserver, RouteAlgorithm, Router, SearchQuery,
        VisitLog, select_router,
    };

    fn assert_send_sync<T: Send + Sync + ?Sized>() {}

    #[test]
    fn boxed_router_is_thread_safe() {
        assert_send_sync::<dyn Router>();
    }

    #[test]
    fn selector_picks_algorithm() {
        for algorithm in RouteAlgorithm::ALL {
            let router = select_router(algorithm, CostMode::DistanceOnly);
            assert_eq!(router.algorithm(), algorithm);
            assert_eq!(algorithm.router(TravelMode::Bus.into()).algorithm(), algorithm);
        }
    }

    #[test]
    fn every_router_finds_the_line() {
        let g = line_graph();
        for algorithm in RouteAlgorithm::ALL {
            let router = select_router(algorithm, CostMode::DistanceOnly);
            let mut log = VisitLog::new();
            let route = router.route(&g, a(), c(), &mut log).unwrap().unwrap();
            assert_eq!(route.start(), Some(a()));
            assert_eq!(route.goal(), Some(c()));
            assert_eq!(log.len(), 3, "{algorithm}");
        }
    }

    #[test]
    fn dijkstra_router_uses_its_mode() {
        let (g, s, m, t) = fork_graph();
        let by_car = DijkstraRouter::new(TravelMode::Car.into());
        let route = by_car.route(&g, s, t, &mut NoopObserver).unwrap().unwrap();
        assert_eq!(route.points, vec![s, m, t]);

        let mut seen = Vec::new();
        let route = AStarRouter.route(&g, s, t, &mut |pt: GeoPoint| seen.push(pt)).unwrap().unwrap();
        assert_eq!(route.points, vec![s, t]);
        assert_eq!(seen.last(), Some(&t));
    }

    #[test]
    fn algorithm_names() {
        assert_eq!("BFS".parse::<RouteAlgorithm>().unwrap(), RouteAlgorithm::Bfs);
        assert_eq!(" dijkstra ".parse::<RouteAlgorithm>().unwrap(), RouteAlgorithm::Dijkstra);
        assert_eq!("a*".parse::<RouteAlgorithm>().unwrap(), RouteAlgorithm::AStar);
        assert_eq!(RouteAlgorithm::default().to_string(), "astar");
        assert!(matches!("dfs".parse::<RouteAlgorithm>(), Err(CoreError::Parse(_))));
    }

    #[test]
    fn queries_pair_heuristic_with_algorithm() {
        assert_eq!(SearchQuery::a_star().heuristic(), Heuristic::GreatCircle);
        assert_eq!(SearchQuery::bfs().heuristic(), Heuristic::Zero);
        assert_eq!(SearchQuery::dijkstra(TravelMode::Walk.into()).heuristic(), Heuristic::Zero);
        assert_eq!(SearchQuery::a_star().algorithm(), RouteAlgorithm::AStar);
    }
}
