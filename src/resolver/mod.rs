mod itinerary;
pub use itinerary::*;

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    planner::Leg,
    shared::time::{next_service_offset, ServiceOffset, Time, Weekday},
    store::{RouteSegment, Station, Store},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("no future scheduled service connects {from} to {to}")]
    Unresolvable { from: String, to: String },
}

/// Turns a leg sequence into clock times by matching weekly service
/// calendars.
///
/// Legs are resolved strictly in path order; each leg's arrival becomes the
/// lower bound for the next leg's departure, with the running weekday
/// advancing across midnight rollovers.
pub struct Resolver<'a> {
    store: &'a Store,
    weekday: Weekday,
    time: Time,
}

impl<'a> Resolver<'a> {
    /// A resolver starting from the current local weekday and time.
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            weekday: Weekday::today(),
            time: Time::now(),
        }
    }

    pub fn departing_at(mut self, weekday: Weekday, time: Time) -> Self {
        self.weekday = weekday;
        self.time = time;
        self
    }

    /// Resolves every leg or nothing: a leg with no matching future service
    /// aborts the whole itinerary rather than fabricating a time.
    pub fn resolve(&self, legs: &[Leg]) -> Result<Itinerary, Error> {
        let (mut now, carried) = self.time.normalized();
        let mut day = self.weekday.plus(carried);
        let mut stops: Vec<ItineraryStop> = Vec::with_capacity(legs.len() + 1);
        let mut last_station: Option<u32> = None;

        for leg in legs {
            let entry = self.store.station(leg.entry);
            let exit = self.store.station(leg.exit);

            let Some((departure, arrival, offset)) = self.next_departure(leg, day, now) else {
                warn!(from = %entry.id, to = %exit.id, "no future service for leg");
                return Err(Error::Unresolvable {
                    from: entry.id.to_string(),
                    to: exit.id.to_string(),
                });
            };

            // The day the trip's schedule is written against; times of
            // 24:00:00 and later spill past it into following weekdays.
            let service_day = day.plus(offset.days_ahead);
            let (dep_time, dep_days) = departure.departure.normalized();
            let (arr_time, arr_days) = arrival.arrival.normalized();
            let dep_day = service_day.plus(dep_days);
            let arr_day = service_day.plus(arr_days);

            debug!(
                from = %entry.id,
                to = %exit.id,
                line = self.store.line_name(departure.line),
                departs = %dep_time.to_hms_string(),
                day = %dep_day,
                "resolved leg"
            );

            if last_station != Some(leg.entry) {
                stops.push(self.stop(entry, departure.line, dep_time, dep_day));
            }
            stops.push(self.stop(exit, departure.line, arr_time, arr_day));

            last_station = Some(leg.exit);
            day = arr_day;
            now = arr_time;
        }

        Ok(Itinerary { stops })
    }

    /// The same-trip segment pair serving this leg with the smallest wait
    /// from the current weekday and time. Ties keep the first pair in store
    /// order, so resolution is deterministic.
    fn next_departure(
        &self,
        leg: &Leg,
        day: Weekday,
        now: Time,
    ) -> Option<(&RouteSegment, &RouteSegment, ServiceOffset)> {
        let mut best: Option<(&RouteSegment, &RouteSegment, ServiceOffset)> = None;
        for (departure, arrival) in self.store.segments_between(leg.entry, leg.exit) {
            let Some(offset) = next_service_offset(&departure.service, day, now, departure.departure)
            else {
                continue;
            };
            match &best {
                Some((_, _, leader)) if offset.wait >= leader.wait => {}
                _ => best = Some((departure, arrival, offset)),
            }
        }
        best
    }

    fn stop(&self, station: &Station, line: u32, time: Time, weekday: Weekday) -> ItineraryStop {
        ItineraryStop {
            station_id: station.id.to_string(),
            lat: station.coordinate.latitude,
            long: station.coordinate.longitude,
            name: station.name.to_string(),
            agency: station.agency.to_string(),
            line: self.store.line_name(line).to_string(),
            time: time.to_hms_string(),
            weekday,
        }
    }
}
