mod common;

use common::{EVERY_DAY, segment, station};
use headway::{
    shared::geo::{Coordinate, Distance},
    store::{Error, SegmentRecord, StationRecord, Store},
};

#[test]
fn duplicate_station_is_rejected() {
    let result = Store::new().with_stations(vec![
        station("A", "Ashmont", 40.0, -75.0),
        station("A", "Ashmont again", 41.0, -75.0),
    ]);
    assert!(matches!(result, Err(Error::DuplicateStation(id)) if id == "A"));
}

#[test]
fn segment_with_unknown_station_is_rejected() {
    let result = Store::new()
        .with_stations(vec![station("A", "Ashmont", 40.0, -75.0)])
        .unwrap()
        .with_segments(vec![segment("B", "red-1", 0, "Red", EVERY_DAY, 100, 100)]);
    assert!(matches!(result, Err(Error::UnknownStation(id)) if id == "B"));
}

#[test]
fn segment_arriving_before_departing_is_rejected() {
    let result = Store::new()
        .with_stations(vec![station("A", "Ashmont", 40.0, -75.0)])
        .unwrap()
        .with_segments(vec![segment("A", "red-1", 0, "Red", EVERY_DAY, 200, 100)]);
    assert!(matches!(result, Err(Error::MalformedSegment { .. })));
}

#[test]
fn unknown_station_fields_are_rejected_at_the_boundary() {
    let row = serde_json::json!({
        "id": "A",
        "lat": 40.0,
        "long": -75.0,
        "name": "Ashmont",
        "stop_code": "90A",
        "agency": "SEPTA",
        "wheelchair_boarding": 1,
    });
    assert!(serde_json::from_value::<StationRecord>(row).is_err());
}

#[test]
fn unknown_segment_fields_are_rejected_at_the_boundary() {
    let row = serde_json::json!({
        "station_id": "A",
        "trip_id": "red-1",
        "sequence_index": 0,
        "line_name": "Red",
        "agency": "SEPTA",
        "monday": true,
        "tuesday": true,
        "wednesday": true,
        "thursday": true,
        "friday": true,
        "saturday": false,
        "sunday": false,
        "departure": 28800,
        "arrival": 28800,
        "shape_dist_traveled": 0.4,
    });
    assert!(serde_json::from_value::<SegmentRecord>(row).is_err());
}

#[test]
fn stations_near_respects_the_threshold() {
    let store = common::red_blue_network();
    let origin = Coordinate::from(common::near_a());

    let near = store.stations_near(&origin, Distance::from_miles(0.75));
    let ids: Vec<&str> = near.iter().map(|s| &*s.id).collect();
    assert_eq!(ids, vec!["A"]);

    let wider = store.stations_near(&origin, Distance::from_miles(5.0));
    assert_eq!(wider.len(), 3);
    // Ascending station index order.
    assert_eq!(&*wider[0].id, "A");
    assert_eq!(&*wider[2].id, "C");
}

#[test]
fn contexts_collect_distinct_lines_per_station() {
    let store = common::red_blue_network();
    let b = store.station_by_id("B").unwrap();

    let contexts = store.contexts_at(b.index);
    let lines: Vec<&str> = contexts
        .iter()
        .map(|context| store.line_name(context.line))
        .collect();
    assert_eq!(lines, vec!["Red", "Blue"]);

    let red = store.line_by_name("Red").unwrap();
    assert!(contexts.iter().any(|context| context.line == red));
    assert!(store.line_by_name("Orange").is_none());
}

#[test]
fn segments_between_requires_a_shared_trip_in_order() {
    let store = common::red_blue_network();
    let a = store.station_by_id("A").unwrap().index;
    let b = store.station_by_id("B").unwrap().index;
    let c = store.station_by_id("C").unwrap().index;

    let pairs = store.segments_between(a, b);
    assert_eq!(pairs.len(), 1);
    assert_eq!(store.line_name(pairs[0].0.line), "Red");
    assert!(pairs[0].0.sequence < pairs[0].1.sequence);

    // A and C never appear on the same trip.
    assert!(store.segments_between(a, c).is_empty());
    // Direction matters: the Red trip never travels B -> A.
    assert!(store.segments_between(b, a).is_empty());
}
