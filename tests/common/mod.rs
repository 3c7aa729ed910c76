#![allow(dead_code)]

use headway::store::{SegmentRecord, StationRecord, Store};

pub const MON_FRI: [bool; 7] = [true, true, true, true, true, false, false];
pub const EVERY_DAY: [bool; 7] = [true; 7];
pub const NEVER: [bool; 7] = [false; 7];

pub fn station(id: &str, name: &str, lat: f64, long: f64) -> StationRecord {
    StationRecord {
        id: id.to_string(),
        lat,
        long,
        name: name.to_string(),
        stop_code: format!("90{}", id),
        agency: "SEPTA".to_string(),
    }
}

pub fn segment(
    station_id: &str,
    trip_id: &str,
    sequence_index: u32,
    line_name: &str,
    days: [bool; 7],
    departure: u32,
    arrival: u32,
) -> SegmentRecord {
    SegmentRecord {
        station_id: station_id.to_string(),
        trip_id: trip_id.to_string(),
        sequence_index,
        line_name: line_name.to_string(),
        agency: "SEPTA".to_string(),
        monday: days[0],
        tuesday: days[1],
        wednesday: days[2],
        thursday: days[3],
        friday: days[4],
        saturday: days[5],
        sunday: days[6],
        departure,
        arrival,
    }
}

/// Three stations on a line of longitude: A rides the Red line to B, C is a
/// short walk past B and reachable from it on the Blue line.
///
/// Red runs A -> B on weekdays, departing 08:00:00 and arriving 08:15:00;
/// Blue runs B -> C departing 08:20:00 and arriving 08:30:00. A-B is far
/// beyond walking range, B-C is within it.
pub fn red_blue_network() -> Store {
    Store::new()
        .with_stations(vec![
            station("A", "Ashmont", 40.0000, -75.0),
            station("B", "Braddock", 40.0400, -75.0),
            station("C", "Cynwyd", 40.0501, -75.0),
        ])
        .unwrap()
        .with_segments(vec![
            segment("A", "red-1", 0, "Red", MON_FRI, 28800, 28800),
            segment("B", "red-1", 1, "Red", MON_FRI, 29700, 29700),
            segment("B", "blue-7", 0, "Blue", MON_FRI, 30000, 30000),
            segment("C", "blue-7", 1, "Blue", MON_FRI, 30600, 30600),
        ])
        .unwrap()
}

/// Coordinates a short walk from station A of [`red_blue_network`].
pub fn near_a() -> (f64, f64) {
    (40.0010, -75.0)
}

/// Coordinates a short walk from station C of [`red_blue_network`], and out
/// of walking range of station B.
pub fn near_c() -> (f64, f64) {
    (40.0530, -75.0)
}
