//! Trip planning over scheduled transit networks.
//!
//! The engine is built in layers: a validated [`store::Store`] holds stations
//! and timetable segments, [`graph`] derives a station adjacency graph from it,
//! [`planner`] searches that graph for a multi-leg route between two
//! coordinates, and [`resolver`] turns the route into clock times by matching
//! weekly service calendars.

pub mod graph;
pub mod planner;
pub mod resolver;
pub mod shared;
pub mod store;
