use std::fmt::Display;

use chrono::{Datelike, Local, Timelike};
use serde::Serialize;

pub const SECONDS_PER_DAY: u32 = 86_400;

/// Seconds since midnight of the service day.
///
/// Values of 86 400 or more are legal and represent service that continues
/// past midnight relative to the day the trip started on. They stay in this
/// encoding until [`Time::normalized`] converts them to a wall-clock time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time(u32);

impl From<u32> for Time {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Time {
    pub fn now() -> Self {
        let now = Local::now();
        Self(now.num_seconds_from_midnight())
    }

    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }

    /// Wall-clock time of day plus the number of whole days folded away.
    ///
    /// `90000` (25:00:00 on the service day) becomes `(01:00:00, 1)`.
    pub const fn normalized(&self) -> (Self, u32) {
        (Self(self.0 % SECONDS_PER_DAY), self.0 / SECONDS_PER_DAY)
    }

    pub fn to_hms_string(&self) -> String {
        let h = self.0 / 3600;
        let m = (self.0 % 3600) / 60;
        let s = self.0 % 60;
        format!("{:02}:{:02}:{:02}", h, m, s)
    }

    pub fn from_hms(time: &str) -> Option<Self> {
        const HOUR_TO_SEC: u32 = 60 * 60;
        const MINUTE_TO_SEC: u32 = 60;
        let mut split = time.split(':');
        let hours: u32 = split.next()?.parse().ok()?;
        let minutes: u32 = split.next()?.parse().ok()?;
        let seconds: u32 = split.next()?.parse().ok()?;
        if split.next().is_some() {
            return None;
        }
        Some(Self(hours * HOUR_TO_SEC + minutes * MINUTE_TO_SEC + seconds))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

impl Weekday {
    pub fn today() -> Self {
        Local::now().weekday().into()
    }

    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// The weekday `days` days forward from this one.
    pub const fn plus(&self, days: u32) -> Self {
        WEEKDAYS[(*self as usize + days as usize) % 7]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        WEEKDAYS[value.num_days_from_monday() as usize]
    }
}

/// Weekly service calendar, one flag per weekday starting from Monday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceDays([bool; 7]);

impl From<[bool; 7]> for ServiceDays {
    fn from(value: [bool; 7]) -> Self {
        Self(value)
    }
}

impl ServiceDays {
    pub const fn new(days: [bool; 7]) -> Self {
        Self(days)
    }

    pub const fn runs_on(&self, day: Weekday) -> bool {
        self.0[day.index()]
    }
}

/// The next scheduled occurrence relative to a current weekday and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOffset {
    /// Seconds until the scheduled time is reached.
    pub wait: u32,
    /// Whole days skipped forward to land on a day the service runs.
    pub days_ahead: u32,
}

/// Finds how long until `scheduled` next occurs, given a weekly calendar and
/// the current weekday and time of day.
///
/// If the service runs today and the scheduled time has not passed, the wait
/// is the plain difference. Otherwise the calendar is scanned one day at a
/// time, up to a full week, and the wait spans the skipped days. Returns
/// `None` when no weekday flag is set.
pub fn next_service_offset(
    service: &ServiceDays,
    today: Weekday,
    now: Time,
    scheduled: Time,
) -> Option<ServiceOffset> {
    if service.runs_on(today) && scheduled >= now {
        return Some(ServiceOffset {
            wait: scheduled.as_seconds() - now.as_seconds(),
            days_ahead: 0,
        });
    }

    for days in 1..=7 {
        if service.runs_on(today.plus(days)) {
            return Some(ServiceOffset {
                wait: days * SECONDS_PER_DAY + scheduled.as_seconds()
                    - now.as_seconds() % SECONDS_PER_DAY,
                days_ahead: days,
            });
        }
    }

    None
}

#[test]
fn parse_unparse() {
    for time in ["00:00:00", "00:00:30", "00:30:00", "12:00:00", "23:59:59"] {
        let parsed = Time::from_hms(time).unwrap();
        assert_eq!(time, parsed.to_hms_string());
    }
}

#[test]
fn valid_time() {
    assert_eq!(Time::from_hms("00:00:00").unwrap().as_seconds(), 0);
    assert_eq!(Time::from_hms("00:01:30").unwrap().as_seconds(), 90);
    assert_eq!(Time::from_hms("01:01:30").unwrap().as_seconds(), 3690);
    assert_eq!(Time::from_hms("25:00:00").unwrap().as_seconds(), 90000);
}

#[test]
fn invalid_time() {
    assert!(Time::from_hms("00:00:0a").is_none());
    assert!(Time::from_hms("00:00").is_none());
    assert!(Time::from_hms("00:00:00:00").is_none());
}

#[test]
fn normalize_past_midnight() {
    let (time, days) = Time::from_seconds(90000).normalized();
    assert_eq!(time.to_hms_string(), "01:00:00");
    assert_eq!(days, 1);
}

#[test]
fn normalize_plain_time() {
    let (time, days) = Time::from_seconds(28800).normalized();
    assert_eq!(time.as_seconds(), 28800);
    assert_eq!(days, 0);
}

#[test]
fn weekday_wraps_forward() {
    assert_eq!(Weekday::Sunday.plus(1), Weekday::Monday);
    assert_eq!(Weekday::Friday.plus(3), Weekday::Monday);
    assert_eq!(Weekday::Tuesday.plus(7), Weekday::Tuesday);
}

#[test]
fn offset_same_day() {
    let service = ServiceDays::new([true; 7]);
    let offset = next_service_offset(
        &service,
        Weekday::Wednesday,
        Time::from_seconds(27000),
        Time::from_seconds(28800),
    )
    .unwrap();
    assert_eq!(offset.wait, 1800);
    assert_eq!(offset.days_ahead, 0);
}

#[test]
fn offset_rolls_over_to_next_service_day() {
    // Monday-only service, asked on Sunday at 23:00 for a 01:00:00 departure.
    let service = ServiceDays::new([true, false, false, false, false, false, false]);
    let offset = next_service_offset(
        &service,
        Weekday::Sunday,
        Time::from_seconds(82800),
        Time::from_hms("01:00:00").unwrap(),
    )
    .unwrap();
    assert_eq!(offset.wait, 86400 + 3600 - 82800);
    assert_eq!(offset.days_ahead, 1);
}

#[test]
fn offset_skips_to_next_week() {
    // Departure already gone today and today is the only service day.
    let service = ServiceDays::new([false, false, true, false, false, false, false]);
    let offset = next_service_offset(
        &service,
        Weekday::Wednesday,
        Time::from_seconds(30000),
        Time::from_seconds(28800),
    )
    .unwrap();
    assert_eq!(offset.days_ahead, 7);
    assert_eq!(offset.wait, 7 * 86400 + 28800 - 30000);
}

#[test]
fn offset_without_service() {
    let service = ServiceDays::default();
    let offset = next_service_offset(
        &service,
        Weekday::Monday,
        Time::from_seconds(0),
        Time::from_seconds(28800),
    );
    assert!(offset.is_none());
}
