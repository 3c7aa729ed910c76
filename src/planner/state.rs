use std::{cmp::Ordering, rc::Rc, sync::Arc};

use crate::{planner::PathStop, shared::geo::Distance};

pub(crate) type NodeRef = Rc<SearchNode>;

/// Frontier entry for one search invocation.
///
/// Nodes form a parent chain back to the start candidate; the chain is
/// unwound into a path once a node terminates within walking distance of the
/// destination.
#[derive(Debug, Clone)]
pub(crate) struct SearchNode {
    pub station: u32,
    /// The line context the search is riding under at this station.
    pub line: u32,
    pub agency: Arc<str>,
    /// Accumulated cost: great-circle distance plus transfer penalties.
    pub cost: Distance,
    /// Accumulated walking distance, the ordering tie-break.
    pub walked: Distance,
    pub parent: Option<NodeRef>,
}

impl SearchNode {
    /// Path from the start candidate to this node, in travel order.
    pub fn unwind(&self) -> Vec<PathStop> {
        let mut path = Vec::new();
        let mut current = Some(self);
        while let Some(node) = current {
            path.push(PathStop {
                station: node.station,
                line: node.line,
                agency: node.agency.clone(),
            });
            current = node.parent.as_deref();
        }
        path.reverse();
        path
    }
}

impl Eq for SearchNode {}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the BinaryHeap pops the cheapest node first; among
        // equal costs the one that walked the least wins.
        other
            .cost
            .as_miles()
            .total_cmp(&self.cost.as_miles())
            .then_with(|| other.walked.as_miles().total_cmp(&self.walked.as_miles()))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[test]
fn cheapest_node_pops_first() {
    use std::collections::BinaryHeap;

    let agency: Arc<str> = "septa".into();
    let mut heap: BinaryHeap<NodeRef> = BinaryHeap::new();
    for (station, cost, walked) in [(0, 3.0, 0.0), (1, 1.0, 0.5), (2, 1.0, 0.0)] {
        heap.push(Rc::new(SearchNode {
            station,
            line: 0,
            agency: agency.clone(),
            cost: Distance::from_miles(cost),
            walked: Distance::from_miles(walked),
            parent: None,
        }));
    }

    // Equal costs fall back to the walking tie-break.
    assert_eq!(heap.pop().unwrap().station, 2);
    assert_eq!(heap.pop().unwrap().station, 1);
    assert_eq!(heap.pop().unwrap().station, 0);
}

#[test]
fn unwind_is_in_travel_order() {
    let agency: Arc<str> = "septa".into();
    let root = Rc::new(SearchNode {
        station: 7,
        line: 0,
        agency: agency.clone(),
        cost: Distance::default(),
        walked: Distance::default(),
        parent: None,
    });
    let next = Rc::new(SearchNode {
        station: 9,
        line: 1,
        agency,
        cost: Distance::from_miles(2.0),
        walked: Distance::default(),
        parent: Some(root),
    });

    let path = next.unwind();
    assert_eq!(
        path.iter().map(|stop| stop.station).collect::<Vec<_>>(),
        vec![7, 9]
    );
}
