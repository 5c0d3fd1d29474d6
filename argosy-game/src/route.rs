//! Route steps and gap repair: turning waypoints into an adjacent path.
use serde::{Deserialize, Serialize};

use crate::distance::DistanceOracle;
use crate::hex::Position;
use crate::planner::PlanError;
use crate::tasks::Task;

/// One waypoint of the planned route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteStep {
    Task(Task),
    Shrine(Position),
    Return(Position),
}

impl RouteStep {
    /// Location this step visits.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Task(task) => task.position,
            Self::Shrine(position) | Self::Return(position) => *position,
        }
    }
}

/// Waypoint positions for repair: the start anchor followed by every step.
#[must_use]
pub fn assemble_waypoints(start: Position, steps: &[RouteStep]) -> Vec<Position> {
    let mut waypoints = Vec::with_capacity(steps.len() + 1);
    waypoints.push(start);
    waypoints.extend(steps.iter().map(RouteStep::position));
    waypoints
}

/// Expand a waypoint list into a sequence where every consecutive pair is
/// hex-adjacent, splicing in oracle shortest paths where waypoints were
/// chosen independently of the move-by-move path. Exact duplicates are
/// collapsed; already-adjacent input passes through unchanged.
///
/// # Errors
///
/// Returns [`PlanError::UnreachablePath`] when some consecutive pair has no
/// traversable path, which only happens on a disconnected map.
pub fn repair(oracle: &DistanceOracle, waypoints: &[Position]) -> Result<Vec<Position>, PlanError> {
    let Some((&first, rest)) = waypoints.split_first() else {
        return Ok(Vec::new());
    };
    let mut repaired = vec![first];
    let mut current = first;

    for &next in rest {
        if next == current {
            continue;
        }
        if current.is_adjacent_to(next) {
            repaired.push(next);
        } else {
            let bridge = oracle
                .path(current, next)
                .ok_or(PlanError::UnreachablePath {
                    from: current,
                    to: next,
                })?;
            repaired.extend(bridge.into_iter().skip(1));
        }
        current = next;
    }

    Ok(repaired)
}
