//! Opportunistic shrine insertion into the planned task route.
use log::debug;

use crate::distance::DistanceOracle;
use crate::hex::Position;
use crate::planner::PlanError;
use crate::route::RouteStep;
use crate::tasks::Task;
use crate::trace::TraceEvent;

/// Task route with shrine visits and the closing return leg, plus move
/// accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinePlan {
    pub steps: Vec<RouteStep>,
    pub total_moves: u32,
    pub shrines: Vec<Position>,
}

/// Replay the ordered task route, splicing in up to `target` shrine visits
/// and appending the return leg to `start`.
///
/// After each task the accumulated move count is checked against the turn
/// capacity: a nonzero remainder means the current turn has
/// `turn_capacity - remainder` leftover moves, and the nearest unvisited
/// shrine within that budget is visited for free (no extra turn). Shrines
/// still owed once the task route ends are collected with dedicated
/// nearest-first detours. Exactly `min(target, available)` distinct shrines
/// are visited.
///
/// # Errors
///
/// Returns [`PlanError::UnreachablePath`] when a task leg or the return leg
/// has no traversable path; a validated map never triggers this.
pub fn insert_shrines(
    tasks: &[Task],
    start: Position,
    shrines: &[Position],
    oracle: &DistanceOracle,
    turn_capacity: u32,
    target: usize,
    trace: &mut Vec<TraceEvent>,
) -> Result<ShrinePlan, PlanError> {
    let mut steps = Vec::with_capacity(tasks.len() + target + 1);
    let mut available: Vec<Position> = shrines.to_vec();
    let mut visited: Vec<Position> = Vec::with_capacity(target);
    let mut position = start;
    let mut total_moves = 0u32;

    for task in tasks {
        let leg = oracle
            .distance(position, task.position)
            .ok_or(PlanError::UnreachablePath {
                from: position,
                to: task.position,
            })?;
        total_moves += leg;
        position = task.position;
        steps.push(RouteStep::Task(*task));

        if visited.len() >= target || available.is_empty() {
            continue;
        }
        let remainder = total_moves % turn_capacity;
        if remainder == 0 {
            continue;
        }
        let free_budget = turn_capacity - remainder;
        if let Some((cost, idx)) = nearest_shrine(position, &available, oracle, Some(free_budget)) {
            let shrine = available.remove(idx);
            debug!("free shrine at ({}, {}) for {cost} move(s)", shrine.col, shrine.row);
            total_moves += cost;
            position = shrine;
            steps.push(RouteStep::Shrine(shrine));
            visited.push(shrine);
            trace.push(TraceEvent::ShrineInserted {
                position: shrine,
                cost,
                opportunistic: true,
            });
        }
    }

    // Dedicated detours for whatever the free budgets did not cover.
    while visited.len() < target && !available.is_empty() {
        let Some((cost, idx)) = nearest_shrine(position, &available, oracle, None) else {
            break;
        };
        let shrine = available.remove(idx);
        debug!(
            "dedicated shrine visit at ({}, {}) costing {cost} move(s)",
            shrine.col, shrine.row
        );
        total_moves += cost;
        position = shrine;
        steps.push(RouteStep::Shrine(shrine));
        visited.push(shrine);
        trace.push(TraceEvent::ShrineInserted {
            position: shrine,
            cost,
            opportunistic: false,
        });
    }

    let return_cost = oracle
        .distance(position, start)
        .ok_or(PlanError::UnreachablePath {
            from: position,
            to: start,
        })?;
    total_moves += return_cost;
    steps.push(RouteStep::Return(start));
    trace.push(TraceEvent::ReturnLeg { cost: return_cost });

    Ok(ShrinePlan {
        steps,
        total_moves,
        shrines: visited,
    })
}

/// Nearest reachable shrine, optionally capped by a move budget. The list
/// is kept in a stable order, so equal distances resolve to the earliest
/// (lowest) shrine position.
fn nearest_shrine(
    from: Position,
    available: &[Position],
    oracle: &DistanceOracle,
    budget: Option<u32>,
) -> Option<(u32, usize)> {
    let mut best: Option<(u32, usize)> = None;
    for (idx, &shrine) in available.iter().enumerate() {
        let Some(cost) = oracle.distance(from, shrine) else {
            continue;
        };
        if budget.is_some_and(|cap| cost > cap) {
            continue;
        }
        if best.is_none_or(|(best_cost, _)| cost < best_cost) {
            best = Some((cost, idx));
        }
    }
    best
}
