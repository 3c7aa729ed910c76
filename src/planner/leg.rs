use std::sync::Arc;

/// One stop of a raw search path, labeled with the line context it was
/// reached under.
#[derive(Debug, Clone)]
pub struct PathStop {
    pub station: u32,
    pub line: u32,
    pub agency: Arc<str>,
}

/// A same-line ride between two stations.
///
/// Consecutive legs share their boundary station: the previous leg's exit is
/// the next leg's entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub entry: u32,
    pub exit: u32,
    pub line: u32,
    pub agency: Arc<str>,
}

/// Collapses a raw stop-by-stop path into same-line legs.
///
/// Consecutive stops sharing a line merge into one (entry, exit) pair; each
/// line change closes the current leg at the previous stop and opens the
/// next leg there. Returns `None` for paths too short to ride, and for paths
/// whose first two stops are not on the same line (no valid first leg).
pub(crate) fn collapse(path: &[PathStop]) -> Option<Vec<Leg>> {
    if path.len() < 2 || path[1].line != path[0].line {
        return None;
    }

    let mut legs = Vec::new();
    let mut entry = 0;
    let mut line = path[1].line;
    for (i, stop) in path.iter().enumerate().skip(2) {
        if stop.line != line {
            legs.push(Leg {
                entry: path[entry].station,
                exit: path[i - 1].station,
                line,
                agency: path[i - 1].agency.clone(),
            });
            entry = i - 1;
            line = stop.line;
        }
    }
    let last = path.last()?;
    legs.push(Leg {
        entry: path[entry].station,
        exit: last.station,
        line,
        agency: last.agency.clone(),
    });
    Some(legs)
}

#[cfg(test)]
fn stop(station: u32, line: u32) -> PathStop {
    PathStop {
        station,
        line,
        agency: "septa".into(),
    }
}

#[test]
fn single_line_path_is_one_leg() {
    let legs = collapse(&[stop(0, 0), stop(1, 0), stop(2, 0)]).unwrap();
    assert_eq!(legs.len(), 1);
    assert_eq!((legs[0].entry, legs[0].exit), (0, 2));
}

#[test]
fn line_change_shares_the_boundary_station() {
    let legs = collapse(&[stop(0, 0), stop(1, 0), stop(2, 1), stop(3, 1)]).unwrap();
    assert_eq!(legs.len(), 2);
    assert_eq!((legs[0].entry, legs[0].exit), (0, 1));
    assert_eq!((legs[1].entry, legs[1].exit), (1, 3));
    assert_eq!(legs[1].line, 1);
}

#[test]
fn trailing_single_stop_run_becomes_a_leg() {
    let legs = collapse(&[stop(0, 0), stop(1, 0), stop(2, 1)]).unwrap();
    assert_eq!(legs.len(), 2);
    assert_eq!((legs[1].entry, legs[1].exit), (1, 2));
}

#[test]
fn too_short_path_is_rejected() {
    assert!(collapse(&[]).is_none());
    assert!(collapse(&[stop(0, 0)]).is_none());
}

#[test]
fn mismatched_first_leg_is_rejected() {
    assert!(collapse(&[stop(0, 0), stop(1, 1), stop(2, 1)]).is_none());
}

#[test]
fn collapsing_is_idempotent() {
    let legs = collapse(&[stop(0, 0), stop(1, 0), stop(2, 1), stop(3, 1)]).unwrap();

    // Expand the legs back into a path of boundary stops and collapse again.
    let mut path = vec![PathStop {
        station: legs[0].entry,
        line: legs[0].line,
        agency: legs[0].agency.clone(),
    }];
    for leg in &legs {
        path.push(PathStop {
            station: leg.exit,
            line: leg.line,
            agency: leg.agency.clone(),
        });
    }

    assert_eq!(collapse(&path).unwrap(), legs);
}
