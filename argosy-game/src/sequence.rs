//! Constraint-bounded ordering of clusters into one task route.
use log::debug;
use smallvec::SmallVec;

use crate::cluster::{Cluster, ClusterTasks};
use crate::distance::DistanceOracle;
use crate::hex::Position;
use crate::inventory::{CargoKey, Inventory};
use crate::planner::PlanError;
use crate::tasks::{CargoEffect, Task};
use crate::trace::TraceEvent;

/// Result of sequencing: clusters in commit order, each with its tasks in
/// the chosen internal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceOutcome {
    pub clusters: Vec<Cluster>,
    pub final_inventory: Inventory,
    pub end_position: Position,
}

struct Commit {
    cluster_idx: usize,
    ordering: ClusterTasks,
    inventory: Inventory,
    travel: u64,
}

/// Order the clusters, and the tasks within each, into one route that
/// respects cargo capacity and pickup-before-delivery dependencies.
///
/// Every planning step enumerates all permutations of every remaining
/// cluster, simulates each against the inventory carried in from earlier
/// commits, and commits the valid ordering with the lowest travel cost
/// (current position to its first task plus the legs between consecutive
/// tasks). Clusters are iterated by index and permutations in a fixed
/// order, with strict improvement required, so the result is deterministic.
///
/// # Errors
///
/// Returns [`PlanError::InfeasibleSequence`] when no remaining cluster has
/// any valid ordering: the dependency/cargo configuration cannot be
/// satisfied and replanning with different clusters or colours is required.
pub fn plan_sequence(
    clusters: &[Cluster],
    start: Position,
    oracle: &DistanceOracle,
    cargo_capacity: u32,
    trace: &mut Vec<TraceEvent>,
) -> Result<SequenceOutcome, PlanError> {
    let mut removed = vec![false; clusters.len()];
    let mut committed: Vec<Cluster> = Vec::with_capacity(clusters.len());
    let mut position = start;
    let mut inventory = Inventory::new();

    for _ in 0..clusters.len() {
        let mut best: Option<Commit> = None;

        for (cluster_idx, cluster) in clusters.iter().enumerate() {
            if removed[cluster_idx] || cluster.is_empty() {
                continue;
            }
            let mut scratch = cluster.tasks.clone();
            let len = scratch.len();
            for_each_permutation(&mut scratch, len, &mut |ordering| {
                let Some(end_inventory) = simulate(ordering, &inventory, cargo_capacity) else {
                    return;
                };
                let travel = travel_cost(position, ordering, oracle);
                if best.as_ref().is_none_or(|b| travel < b.travel) {
                    best = Some(Commit {
                        cluster_idx,
                        ordering: SmallVec::from_slice(ordering),
                        inventory: end_inventory,
                        travel,
                    });
                }
            });
        }

        let Some(commit) = best else {
            let remaining: Vec<Cluster> = clusters
                .iter()
                .zip(removed.iter())
                .filter(|(_, gone)| !**gone)
                .map(|(cluster, _)| cluster.clone())
                .collect();
            return Err(PlanError::InfeasibleSequence {
                remaining,
                inventory,
            });
        };

        debug!(
            "committed cluster {} ({} tasks, travel {})",
            commit.cluster_idx,
            commit.ordering.len(),
            commit.travel
        );
        trace.push(TraceEvent::ClusterCommitted {
            index: commit.cluster_idx,
            tiles: commit.ordering.iter().map(|task| task.tile).collect(),
            travel: commit.travel,
        });

        removed[commit.cluster_idx] = true;
        if let Some(last) = commit.ordering.last() {
            position = last.position;
        }
        inventory = commit.inventory;
        committed.push(Cluster::new(commit.ordering));
    }

    Ok(SequenceOutcome {
        clusters: committed,
        final_inventory: inventory,
        end_position: position,
    })
}

/// Replay an ordering against a starting inventory. Returns the resulting
/// inventory, or `None` when the ordering overfills the hold or delivers
/// something it does not carry.
#[must_use]
pub fn simulate(tasks: &[Task], carried: &Inventory, capacity: u32) -> Option<Inventory> {
    let mut inventory = carried.clone();
    for task in tasks {
        match task.kind.cargo_effect() {
            None => {}
            Some(CargoEffect::Pickup(item)) => {
                if !inventory.try_pickup(CargoKey::new(item, task.colour), capacity) {
                    return None;
                }
            }
            Some(CargoEffect::Deliver(item)) => {
                if !inventory.try_deliver(CargoKey::new(item, task.colour)) {
                    return None;
                }
            }
        }
    }
    Some(inventory)
}

/// Travel cost of visiting `tasks` in order from `from`. Unreachable legs
/// keep the ordering comparable but effectively unselectable.
fn travel_cost(from: Position, tasks: &[Task], oracle: &DistanceOracle) -> u64 {
    let mut total = 0u64;
    let mut position = from;
    for task in tasks {
        total += u64::from(oracle.cost(position, task.position));
        position = task.position;
    }
    total
}

/// Heap's algorithm: visit every permutation of `items[..k]` exactly once,
/// in a fixed order.
fn for_each_permutation<F>(items: &mut ClusterTasks, k: usize, visit: &mut F)
where
    F: FnMut(&[Task]),
{
    if k <= 1 {
        visit(items);
        return;
    }
    for i in 0..k {
        for_each_permutation(items, k - 1, visit);
        if k % 2 == 0 {
            items.swap(i, k - 1);
        } else {
            items.swap(0, k - 1);
        }
    }
}
