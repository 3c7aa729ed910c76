use std::sync::Arc;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    shared::geo::Distance,
    store::Store,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot build a graph over an empty station set")]
    EmptyNetwork,
}

/// How an edge can be traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Riding a scheduled trip to the next stop.
    Ride,
    /// Walking to a nearby station.
    Walk,
}

/// A directed hop from one station to a neighboring station.
///
/// Walk edges carry the line and agency context of the *target* station, so
/// the search can treat a walking hop as boarding a different line there.
#[derive(Debug, Clone)]
pub struct GraphEdge {
    pub target: u32,
    pub line: u32,
    pub agency: Arc<str>,
    pub kind: EdgeKind,
}

/// Station-indexed adjacency list over the whole network.
///
/// Immutable once built. Rebuilding (say, on a data refresh) produces a fresh
/// value the caller swaps in whole; readers never observe a partial graph.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    outgoing: Box<[Box<[GraphEdge]>]>,
}

impl AdjacencyGraph {
    /// Outgoing edges of a station. A station without edges yields an empty
    /// slice, not an error.
    pub fn neighbors(&self, station: u32) -> &[GraphEdge] {
        self.outgoing
            .get(station as usize)
            .map(|edges| &**edges)
            .unwrap_or_default()
    }

    pub fn station_count(&self) -> usize {
        self.outgoing.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(|edges| edges.len()).sum()
    }
}

/// Derives an [`AdjacencyGraph`] from the store.
///
/// Two edge sources: the immediately following stop on each scheduled trip,
/// and geographic proximity within the walking-distance threshold. Duplicate
/// parallel edges are tolerated since the search keys visited state by
/// (station, line), not by edge identity.
pub struct GraphBuilder<'a> {
    store: &'a Store,
    walk_distance: Distance,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            walk_distance: Distance::from_miles(0.75),
        }
    }

    pub fn walk_distance(mut self, distance: Distance) -> Self {
        self.walk_distance = distance;
        self
    }

    pub fn build(self) -> Result<AdjacencyGraph, Error> {
        let stations = self.store.stations();
        if stations.is_empty() {
            return Err(Error::EmptyNetwork);
        }

        let mut outgoing: Vec<Vec<GraphEdge>> = vec![Vec::new(); stations.len()];

        // Scheduled edges: each station links to the immediately following
        // station on the same trip. Only the direct successor; longer rides
        // are discovered by traversal.
        let mut scheduled = 0usize;
        for trip in self.store.trips() {
            for pair in trip.windows(2) {
                let from = self.store.segment(pair[0]);
                let to = self.store.segment(pair[1]);
                outgoing[from.station_idx as usize].push(GraphEdge {
                    target: to.station_idx,
                    line: from.line,
                    agency: from.agency.clone(),
                    kind: EdgeKind::Ride,
                });
                scheduled += 1;
            }
        }
        debug!(edges = scheduled, "linked scheduled successors");

        // Proximity edges: every ordered pair of distinct stations within
        // walking distance, one edge per line context at the target. Both
        // orientations are enumerated, so walkability is symmetric by
        // construction.
        let walk_edges: Vec<Vec<GraphEdge>> = stations
            .par_iter()
            .map(|station| {
                let mut edges = Vec::new();
                for other in stations {
                    if other.index == station.index {
                        continue;
                    }
                    if station.coordinate.distance(&other.coordinate) > self.walk_distance {
                        continue;
                    }
                    for context in self.store.contexts_at(other.index) {
                        edges.push(GraphEdge {
                            target: other.index,
                            line: context.line,
                            agency: context.agency.clone(),
                            kind: EdgeKind::Walk,
                        });
                    }
                }
                edges
            })
            .collect();

        let mut walked = 0usize;
        for (station, mut edges) in walk_edges.into_iter().enumerate() {
            walked += edges.len();
            outgoing[station].append(&mut edges);
        }
        debug!(edges = walked, "linked walkable neighbors");

        let graph = AdjacencyGraph {
            outgoing: outgoing.into_iter().map(Into::into).collect(),
        };
        info!(
            stations = graph.station_count(),
            edges = graph.edge_count(),
            "adjacency graph built"
        );
        Ok(graph)
    }
}
