use std::sync::Arc;

use crate::shared::{
    geo::Coordinate,
    time::{ServiceDays, Time},
};

/// A physical station passengers can board at. Immutable once loaded.
#[derive(Debug, Default, Clone)]
pub struct Station {
    /// The internal index used for O(1) array lookups in the store.
    pub index: u32,
    /// Unique external identifier.
    pub id: Arc<str>,
    /// Human-readable name (e.g., "Suburban Station").
    pub name: Arc<str>,
    /// External stop code from the source feed.
    pub stop_code: Arc<str>,
    /// The agency operating the station.
    pub agency: Arc<str>,
    pub coordinate: Coordinate,
}

/// One scheduled call of a trip at a station.
#[derive(Debug, Clone)]
pub struct RouteSegment {
    /// The internal index of this segment.
    pub index: u32,
    /// Internal index of the station the segment originates at.
    pub station_idx: u32,
    /// Identifier of the trip this hop belongs to.
    pub trip: Arc<str>,
    /// Position of the station within the trip.
    pub sequence: u32,
    /// Interned line index, resolvable via [`Store::line_name`].
    ///
    /// [`Store::line_name`]: crate::store::Store::line_name
    pub line: u32,
    pub agency: Arc<str>,
    /// Which weekdays the trip runs on.
    pub service: ServiceDays,
    /// Scheduled departure, seconds since midnight of the service day.
    pub departure: Time,
    /// Scheduled arrival, seconds since midnight of the service day.
    pub arrival: Time,
}

/// A (line, agency) pair under which scheduled service calls at a station.
#[derive(Debug, Clone)]
pub struct LineContext {
    pub line: u32,
    pub agency: Arc<str>,
}
