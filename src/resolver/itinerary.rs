use serde::Serialize;

use crate::shared::time::Weekday;

/// One resolved stop of an itinerary, ready for the surrounding application.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryStop {
    pub station_id: String,
    pub lat: f64,
    pub long: f64,
    pub name: String,
    pub agency: String,
    pub line: String,
    /// Wall-clock time of day, "HH:MM:SS".
    pub time: String,
    pub weekday: Weekday,
}

/// A fully time-stamped trip. Produced fresh per request, never persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Itinerary {
    pub stops: Vec<ItineraryStop>,
}

impl Itinerary {
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
