use serde::{Deserialize, Serialize};

/// Station row as handed over by the ingestion layer.
///
/// The struct is closed: rows carrying fields the engine does not know about
/// are rejected at the boundary instead of being passed through.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StationRecord {
    pub id: String,
    pub lat: f64,
    pub long: f64,
    pub name: String,
    pub stop_code: String,
    pub agency: String,
}

/// One scheduled hop of a trip as handed over by the ingestion layer.
///
/// `departure` and `arrival` are seconds since midnight of the service day
/// and may exceed 86 400 for service running past midnight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmentRecord {
    pub station_id: String,
    pub trip_id: String,
    pub sequence_index: u32,
    pub line_name: String,
    pub agency: String,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
    pub departure: u32,
    pub arrival: u32,
}

impl SegmentRecord {
    pub(crate) fn weekday_flags(&self) -> [bool; 7] {
        [
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
            self.saturday,
            self.sunday,
        ]
    }
}
