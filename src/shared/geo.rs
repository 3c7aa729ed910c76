use std::{
    cmp,
    fmt::Display,
    ops::{Add, AddAssign},
};

use serde::{Deserialize, Serialize};

/// Earth radius used by every proximity and termination check, in miles.
/// All distance comparisons in the engine go through [`Coordinate::distance`],
/// so the constant is bit-exact across the whole pipeline.
pub(crate) const EARTH_RADIUS_MILES: f64 = 3963.1;

#[derive(Debug, Clone, Copy, Default)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Add for Distance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Distance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl Distance {
    pub const fn from_miles(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn as_miles(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from(value: (f64, f64)) -> Self {
        Self {
            latitude: value.0,
            longitude: value.1,
        }
    }
}

impl Coordinate {
    /// Great-circle distance via the haversine formula.
    pub fn distance(&self, coord: &Self) -> Distance {
        let dist_lat = f64::to_radians(coord.latitude - self.latitude);
        let dist_lon = f64::to_radians(coord.longitude - self.longitude);
        let a = f64::powi(f64::sin(dist_lat / 2.0), 2)
            + f64::cos(f64::to_radians(self.latitude))
                * f64::cos(f64::to_radians(coord.latitude))
                * f64::sin(dist_lon / 2.0)
                * f64::sin(dist_lon / 2.0);
        let c = 2.0 * f64::atan2(f64::sqrt(a), f64::sqrt(1.0 - a));
        Distance::from_miles(EARTH_RADIUS_MILES * c)
    }
}

#[test]
fn distance_one_degree_latitude() {
    let coord_a = Coordinate::from((40.0, -75.0));
    let coord_b = Coordinate::from((41.0, -75.0));
    let d = coord_a.distance(&coord_b);
    // One degree of latitude on a 3963.1 mile sphere is about 69.17 miles.
    assert!((d.as_miles() - 69.17).abs() < 0.01);
}

#[test]
fn distance_is_symmetric() {
    let coord_a = Coordinate::from((39.952_583, -75.165_222));
    let coord_b = Coordinate::from((40.734_82, -74.164_306));
    assert_eq!(coord_a.distance(&coord_b), coord_b.distance(&coord_a));
}

#[test]
fn distance_to_self_is_zero() {
    let coord = Coordinate::from((39.952_583, -75.165_222));
    assert_eq!(coord.distance(&coord), Distance::from_miles(0.0));
}

#[test]
fn distance_cmp() {
    let dist_a = Distance::from_miles(1.0);
    let dist_b = Distance::from_miles(0.5);
    assert!(dist_a > dist_b)
}
