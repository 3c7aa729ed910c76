mod common;

use common::{EVERY_DAY, segment, station};
use headway::{
    graph::{EdgeKind, Error, GraphBuilder},
    shared::geo::Distance,
    store::Store,
};

/// Three stations on one trip, each pair far beyond walking range, plus a
/// fourth station on its own line a short walk from the first.
fn spread_network() -> Store {
    Store::new()
        .with_stations(vec![
            station("A", "Ashmont", 40.000, -75.0),
            station("B", "Braddock", 40.040, -75.0),
            station("C", "Cynwyd", 40.080, -75.0),
            station("D", "Darby", 40.005, -75.0),
        ])
        .unwrap()
        .with_segments(vec![
            segment("A", "red-1", 0, "Red", EVERY_DAY, 100, 100),
            segment("B", "red-1", 1, "Red", EVERY_DAY, 200, 200),
            segment("C", "red-1", 2, "Red", EVERY_DAY, 300, 300),
            segment("D", "grn-1", 0, "Green", EVERY_DAY, 100, 100),
        ])
        .unwrap()
}

#[test]
fn scheduled_edges_link_only_the_immediate_successor() {
    let store = spread_network();
    let graph = GraphBuilder::new(&store).build().unwrap();
    let a = store.station_by_id("A").unwrap().index;
    let b = store.station_by_id("B").unwrap().index;
    let c = store.station_by_id("C").unwrap().index;

    let rides: Vec<u32> = graph
        .neighbors(a)
        .iter()
        .filter(|edge| edge.kind == EdgeKind::Ride)
        .map(|edge| edge.target)
        .collect();
    // A links to B but never straight to C; multi-hop rides are discovered
    // by traversal.
    assert_eq!(rides, vec![b]);

    let rides: Vec<u32> = graph
        .neighbors(b)
        .iter()
        .filter(|edge| edge.kind == EdgeKind::Ride)
        .map(|edge| edge.target)
        .collect();
    assert_eq!(rides, vec![c]);

    // The last stop of a trip has no onward ride.
    assert!(graph.neighbors(c).is_empty());
}

#[test]
fn walk_edges_are_symmetric_and_carry_the_target_context() {
    let store = spread_network();
    let graph = GraphBuilder::new(&store).build().unwrap();
    let a = store.station_by_id("A").unwrap().index;
    let d = store.station_by_id("D").unwrap().index;

    let a_walks: Vec<_> = graph
        .neighbors(a)
        .iter()
        .filter(|edge| edge.kind == EdgeKind::Walk)
        .collect();
    assert_eq!(a_walks.len(), 1);
    assert_eq!(a_walks[0].target, d);
    assert_eq!(store.line_name(a_walks[0].line), "Green");

    let d_walks: Vec<_> = graph
        .neighbors(d)
        .iter()
        .filter(|edge| edge.kind == EdgeKind::Walk)
        .collect();
    assert_eq!(d_walks.len(), 1);
    assert_eq!(d_walks[0].target, a);
    assert_eq!(store.line_name(d_walks[0].line), "Red");
}

#[test]
fn no_walk_edge_beyond_the_threshold() {
    let store = spread_network();
    let graph = GraphBuilder::new(&store).build().unwrap();
    let a = store.station_by_id("A").unwrap().index;
    let b = store.station_by_id("B").unwrap().index;

    // A and B are about 2.8 miles apart; neither direction gets a walk edge.
    assert!(
        graph
            .neighbors(a)
            .iter()
            .all(|edge| !(edge.target == b && edge.kind == EdgeKind::Walk))
    );
    assert!(
        graph
            .neighbors(b)
            .iter()
            .all(|edge| !(edge.target == a && edge.kind == EdgeKind::Walk))
    );
}

#[test]
fn widening_the_walk_distance_adds_edges() {
    let store = spread_network();
    let graph = GraphBuilder::new(&store)
        .walk_distance(Distance::from_miles(5.0))
        .build()
        .unwrap();
    let a = store.station_by_id("A").unwrap().index;
    let b = store.station_by_id("B").unwrap().index;

    assert!(
        graph
            .neighbors(a)
            .iter()
            .any(|edge| edge.target == b && edge.kind == EdgeKind::Walk)
    );
}

#[test]
fn empty_station_set_fails_fast() {
    let store = Store::new();
    assert!(matches!(
        GraphBuilder::new(&store).build(),
        Err(Error::EmptyNetwork)
    ));
}
