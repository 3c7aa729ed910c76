use std::{collections::HashMap, sync::Arc};

mod entities;
mod records;
pub use entities::*;
pub use records::*;

use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::shared::{
    geo::{Coordinate, Distance},
    time::Time,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("duplicate station id: {0}")]
    DuplicateStation(String),
    #[error("segment references unknown station id: {0}")]
    UnknownStation(String),
    #[error("segment at station {station} on trip {trip} arrives before it departs")]
    MalformedSegment { station: String, trip: String },
}

type TripKey = (u32, Arc<str>, Arc<str>);

/// Validated, immutable holder of stations and timetable segments.
///
/// Built once from boundary records, then only queried. Construction is
/// fail-fast: a malformed record poisons the whole load and nothing partial
/// is published.
#[derive(Debug, Clone, Default)]
pub struct Store {
    stations: Box<[Station]>,
    segments: Box<[RouteSegment]>,
    lines: Box<[Arc<str>]>,

    station_lookup: HashMap<Arc<str>, usize>,
    line_lookup: HashMap<Arc<str>, u32>,
    /// Distinct (line, agency) contexts per station, in segment order.
    station_contexts: Box<[Box<[LineContext]>]>,
    /// Segment indices per (line, agency, trip) grouping, each ordered by
    /// sequence; groupings in first-seen order so iteration is deterministic.
    trips: Box<[Box<[u32]>]>,
    /// Segment indices per station.
    station_segments: Box<[Box<[u32]>]>,
}

impl Store {
    pub fn new() -> Self {
        Default::default()
    }

    /// Loads the station set. Must be called before [`Store::with_segments`].
    pub fn with_stations(mut self, records: Vec<StationRecord>) -> Result<Self, Error> {
        let mut station_lookup: HashMap<Arc<str>, usize> = HashMap::new();
        let mut stations: Vec<Station> = Vec::with_capacity(records.len());
        for (i, record) in records.into_iter().enumerate() {
            let station = Station {
                index: i as u32,
                id: record.id.into(),
                name: record.name.into(),
                stop_code: record.stop_code.into(),
                agency: record.agency.into(),
                coordinate: Coordinate {
                    latitude: record.lat,
                    longitude: record.long,
                },
            };
            if station_lookup
                .insert(station.id.clone(), i)
                .is_some()
            {
                return Err(Error::DuplicateStation(station.id.to_string()));
            }
            stations.push(station);
        }
        debug!(stations = stations.len(), "loaded stations");
        self.stations = stations.into();
        self.station_lookup = station_lookup;
        self.station_contexts = vec![Box::default(); self.stations.len()].into();
        self.station_segments = vec![Box::default(); self.stations.len()].into();
        Ok(self)
    }

    /// Loads the timetable and builds the derived indexes.
    pub fn with_segments(mut self, records: Vec<SegmentRecord>) -> Result<Self, Error> {
        let mut line_lookup: HashMap<Arc<str>, u32> = HashMap::new();
        let mut lines: Vec<Arc<str>> = Vec::new();
        let mut segments: Vec<RouteSegment> = Vec::with_capacity(records.len());
        let mut contexts: Vec<Vec<LineContext>> = vec![Vec::new(); self.stations.len()];
        let mut trip_order: HashMap<TripKey, usize> = HashMap::new();
        let mut trips: Vec<Vec<u32>> = Vec::new();
        let mut by_station: Vec<Vec<u32>> = vec![Vec::new(); self.stations.len()];

        for (i, record) in records.into_iter().enumerate() {
            let station_idx = *self
                .station_lookup
                .get(record.station_id.as_str())
                .ok_or_else(|| Error::UnknownStation(record.station_id.clone()))?;
            if record.arrival < record.departure {
                return Err(Error::MalformedSegment {
                    station: record.station_id,
                    trip: record.trip_id,
                });
            }

            let line = match line_lookup.get(record.line_name.as_str()) {
                Some(line) => *line,
                None => {
                    let line = lines.len() as u32;
                    let name: Arc<str> = record.line_name.clone().into();
                    line_lookup.insert(name.clone(), line);
                    lines.push(name);
                    line
                }
            };

            let segment = RouteSegment {
                index: i as u32,
                station_idx: station_idx as u32,
                trip: record.trip_id.clone().into(),
                sequence: record.sequence_index,
                line,
                agency: record.agency.clone().into(),
                service: record.weekday_flags().into(),
                departure: Time::from_seconds(record.departure),
                arrival: Time::from_seconds(record.arrival),
            };

            let known = contexts[station_idx]
                .iter()
                .any(|ctx| ctx.line == line && ctx.agency == segment.agency);
            if !known {
                contexts[station_idx].push(LineContext {
                    line,
                    agency: segment.agency.clone(),
                });
            }

            let trip_idx = *trip_order
                .entry((line, segment.agency.clone(), segment.trip.clone()))
                .or_insert_with(|| {
                    trips.push(Vec::new());
                    trips.len() - 1
                });
            trips[trip_idx].push(i as u32);
            by_station[station_idx].push(i as u32);
            segments.push(segment);
        }

        for trip in trips.iter_mut() {
            trip.sort_by_key(|idx| segments[*idx as usize].sequence);
        }

        debug!(
            segments = segments.len(),
            lines = lines.len(),
            trips = trips.len(),
            "loaded timetable"
        );

        self.segments = segments.into();
        self.lines = lines.into();
        self.line_lookup = line_lookup;
        self.station_contexts = contexts.into_iter().map(Into::into).collect();
        self.trips = trips.into_iter().map(Into::into).collect();
        self.station_segments = by_station.into_iter().map(Into::into).collect();
        Ok(self)
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, idx: u32) -> &Station {
        &self.stations[idx as usize]
    }

    pub fn station_by_id(&self, id: &str) -> Option<&Station> {
        let index = self.station_lookup.get(id)?;
        Some(&self.stations[*index])
    }

    pub fn segment(&self, idx: u32) -> &RouteSegment {
        &self.segments[idx as usize]
    }

    pub fn line_name(&self, line: u32) -> &str {
        &self.lines[line as usize]
    }

    pub fn line_by_name(&self, name: &str) -> Option<u32> {
        self.line_lookup.get(name).copied()
    }

    /// Stations within `within` of `coord`, in ascending station index order.
    pub fn stations_near(&self, coord: &Coordinate, within: Distance) -> Vec<&Station> {
        self.stations
            .par_iter()
            .filter(|station| station.coordinate.distance(coord) <= within)
            .collect()
    }

    /// Distinct (line, agency) pairs under which scheduled service calls at
    /// the station. Empty for stations with no timetable entries.
    pub fn contexts_at(&self, station_idx: u32) -> &[LineContext] {
        &self.station_contexts[station_idx as usize]
    }

    /// Every scheduled trip as its segment indices ordered by sequence.
    pub fn trips(&self) -> impl Iterator<Item = &[u32]> {
        self.trips.iter().map(|trip| &**trip)
    }

    /// Same-trip segment pairs connecting two stations, earlier sequence
    /// first. This is the resolver's per-leg lookup.
    pub fn segments_between(&self, a: u32, b: u32) -> Vec<(&RouteSegment, &RouteSegment)> {
        let mut pairs = Vec::new();
        for &ia in self.station_segments[a as usize].iter() {
            let seg_a = &self.segments[ia as usize];
            for &ib in self.station_segments[b as usize].iter() {
                let seg_b = &self.segments[ib as usize];
                if seg_a.line == seg_b.line
                    && seg_a.agency == seg_b.agency
                    && seg_a.trip == seg_b.trip
                    && seg_a.sequence < seg_b.sequence
                {
                    pairs.push((seg_a, seg_b));
                }
            }
        }
        pairs
    }
}
