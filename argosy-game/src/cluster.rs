//! Greedy proximity clustering of tasks into cycles.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::distance::DistanceOracle;
use crate::hex::Position;
use crate::tasks::Task;

/// Inline task storage sized for the configured cluster bound.
pub type ClusterTasks = SmallVec<[Task; 8]>;

/// A spatially bounded group of tasks planned and visited together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub tasks: ClusterTasks,
}

impl Cluster {
    #[must_use]
    pub fn new(tasks: ClusterTasks) -> Self {
        Self { tasks }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Maximum pairwise travel distance among the cluster's tasks. Zero for
    /// singletons.
    #[must_use]
    pub fn spread(&self, oracle: &DistanceOracle) -> u32 {
        let mut widest = 0;
        for (i, a) in self.tasks.iter().enumerate() {
            for b in self.tasks.iter().skip(i + 1) {
                widest = widest.max(oracle.cost(a.position, b.position));
            }
        }
        widest
    }
}

/// Partition tasks into clusters whose pairwise spread stays within
/// `spread_limit` and whose size stays within `max_tasks`.
///
/// Each cluster is seeded with the remaining task nearest the start anchor,
/// then grown by repeatedly pulling in the remaining task nearest to any
/// current member. Growth stops at the first candidate that would stretch
/// the cluster past the spread limit; that candidate seeds a later cluster
/// instead. Ties break toward the lowest tile id, so the partition is
/// deterministic.
#[must_use]
pub fn build_clusters(
    tasks: &[Task],
    anchor: Position,
    oracle: &DistanceOracle,
    spread_limit: u32,
    max_tasks: usize,
) -> Vec<Cluster> {
    let mut remaining: Vec<Task> = tasks.to_vec();
    let mut clusters = Vec::new();

    while !remaining.is_empty() {
        let seed_idx = nearest_to(anchor, &remaining, oracle);
        let mut members: ClusterTasks = SmallVec::new();
        members.push(remaining.remove(seed_idx));

        while !remaining.is_empty() && members.len() < max_tasks {
            let candidate_idx = nearest_to_group(&members, &remaining, oracle);
            let candidate = remaining[candidate_idx];
            if !fits_spread(&members, candidate, oracle, spread_limit) {
                break;
            }
            members.push(remaining.remove(candidate_idx));
        }

        clusters.push(Cluster::new(members));
    }

    clusters
}

/// Index of the remaining task nearest `position`; distance ties go to the
/// lowest tile id.
fn nearest_to(position: Position, remaining: &[Task], oracle: &DistanceOracle) -> usize {
    let mut best = 0;
    let mut best_key = (u32::MAX, remaining[0].tile);
    for (idx, task) in remaining.iter().enumerate() {
        let key = (oracle.cost(position, task.position), task.tile);
        if key < best_key {
            best_key = key;
            best = idx;
        }
    }
    best
}

/// Index of the remaining task nearest to any current member.
fn nearest_to_group(members: &ClusterTasks, remaining: &[Task], oracle: &DistanceOracle) -> usize {
    let mut best = 0;
    let mut best_key = (u32::MAX, remaining[0].tile);
    for (idx, task) in remaining.iter().enumerate() {
        let to_group = members
            .iter()
            .map(|member| oracle.cost(member.position, task.position))
            .min()
            .unwrap_or(u32::MAX);
        let key = (to_group, task.tile);
        if key < best_key {
            best_key = key;
            best = idx;
        }
    }
    best
}

/// Whether adding `candidate` keeps every pairwise distance within the
/// spread limit. Existing members are already mutually within bounds, so
/// only the candidate's distances need checking.
fn fits_spread(
    members: &ClusterTasks,
    candidate: Task,
    oracle: &DistanceOracle,
    spread_limit: u32,
) -> bool {
    members
        .iter()
        .all(|member| oracle.cost(member.position, candidate.position) <= spread_limit)
}
