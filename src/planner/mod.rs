use std::{
    collections::{BinaryHeap, HashSet},
    rc::Rc,
    sync::Arc,
};

mod leg;
mod state;
pub use leg::*;
use state::{NodeRef, SearchNode};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    graph::{AdjacencyGraph, EdgeKind},
    shared::geo::{Coordinate, Distance},
    store::Store,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("no station within walking distance of the origin")]
    NoCandidateStations,
    #[error("no route connects the origin to the destination")]
    NoRouteFound,
}

/// The two open tuning knobs of the search, fixed to one default each.
#[derive(Debug, Clone, Copy)]
pub struct PlannerConfig {
    /// Maximum great-circle distance considered walkable, in miles. Used for
    /// start-candidate selection and for the termination test.
    pub walk_distance: Distance,
    /// Cost added whenever an edge changes the active line context,
    /// expressed in the same unit as distance.
    pub transfer_penalty: Distance,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            walk_distance: Distance::from_miles(0.75),
            transfer_penalty: Distance::from_miles(5.0),
        }
    }
}

/// A station and line context the search may start from.
struct StartCandidate {
    station: u32,
    line: u32,
    agency: Arc<str>,
}

/// Cost-ordered best-first search over the adjacency graph.
///
/// Borrows the store and one immutable graph snapshot; concurrent plans over
/// the same snapshot are safe.
pub struct Planner<'a> {
    store: &'a Store,
    graph: &'a AdjacencyGraph,
    config: PlannerConfig,
}

impl<'a> Planner<'a> {
    pub fn new(store: &'a Store, graph: &'a AdjacencyGraph) -> Self {
        Self {
            store,
            graph,
            config: PlannerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Plans a route and collapses it into same-line legs.
    pub fn plan(&self, origin: Coordinate, destination: Coordinate) -> Result<Vec<Leg>, Error> {
        let path = self.best_path(origin, destination)?;
        collapse(&path).ok_or(Error::NoRouteFound)
    }

    /// The best raw stop-by-stop path from origin to destination.
    ///
    /// One search runs per start candidate; the winner is the successful path
    /// with the fewest stops among those longer than one stop. Ties keep the
    /// first candidate, so identical requests over the same snapshot plan
    /// identical paths.
    pub fn best_path(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<PathStop>, Error> {
        let candidates = self.start_candidates(&origin);
        if candidates.is_empty() {
            return Err(Error::NoCandidateStations);
        }
        debug!(candidates = candidates.len(), "searching start candidates");

        let paths: Vec<Option<Vec<PathStop>>> = candidates
            .par_iter()
            .map(|candidate| self.search(candidate, &destination))
            .collect();

        let mut best: Option<Vec<PathStop>> = None;
        for path in paths.into_iter().flatten() {
            if path.len() < 2 {
                continue;
            }
            match &best {
                Some(leader) if path.len() >= leader.len() => {}
                _ => best = Some(path),
            }
        }

        best.ok_or(Error::NoRouteFound)
    }

    /// Every (station, line context) pair within walking distance of the
    /// origin. Stations without scheduled service contribute nothing.
    fn start_candidates(&self, origin: &Coordinate) -> Vec<StartCandidate> {
        self.store
            .stations_near(origin, self.config.walk_distance)
            .into_iter()
            .flat_map(|station| {
                self.store
                    .contexts_at(station.index)
                    .iter()
                    .map(|context| StartCandidate {
                        station: station.index,
                        line: context.line,
                        agency: context.agency.clone(),
                    })
            })
            .collect()
    }

    /// Uniform-cost search from one start candidate.
    ///
    /// The frontier is ordered by accumulated cost, then accumulated walking
    /// distance. Visited state is keyed by (station, line) so a station may
    /// be revisited under a different line but never under the same one.
    fn search(&self, candidate: &StartCandidate, destination: &Coordinate) -> Option<Vec<PathStop>> {
        let mut frontier: BinaryHeap<NodeRef> = BinaryHeap::new();
        let mut visited: HashSet<(u32, u32)> = HashSet::new();

        frontier.push(Rc::new(SearchNode {
            station: candidate.station,
            line: candidate.line,
            agency: candidate.agency.clone(),
            cost: Distance::default(),
            walked: Distance::default(),
            parent: None,
        }));

        while let Some(node) = frontier.pop() {
            let station = self.store.station(node.station);
            if station.coordinate.distance(destination) <= self.config.walk_distance {
                trace!(
                    station = %station.id,
                    cost = node.cost.as_miles(),
                    "reached destination region"
                );
                return Some(node.unwind());
            }

            if !visited.insert((node.station, node.line)) {
                continue;
            }

            for edge in self.graph.neighbors(node.station) {
                if visited.contains(&(edge.target, edge.line)) {
                    continue;
                }

                let step = station
                    .coordinate
                    .distance(&self.store.station(edge.target).coordinate);
                let mut cost = node.cost + step;
                if edge.line != node.line {
                    cost += self.config.transfer_penalty;
                }
                let mut walked = node.walked;
                if edge.kind == EdgeKind::Walk {
                    walked += step;
                }

                frontier.push(Rc::new(SearchNode {
                    station: edge.target,
                    line: edge.line,
                    agency: edge.agency.clone(),
                    cost,
                    walked,
                    parent: Some(node.clone()),
                }));
            }
        }

        None
    }
}
