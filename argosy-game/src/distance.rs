//! Shortest-path oracle over the traversable (water) subgraph.
//!
//! Distances are measured to the nearest traversable neighbour of the
//! destination, never to the destination tile itself: task and shrine tiles
//! are stops the boat pulls alongside, not cells it enters. Results are
//! cached for the lifetime of one planning run; the water graph never
//! changes mid-run, so the caches are populated lazily and never
//! invalidated.
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::hex::Position;

/// Sentinel cost for unreachable pairs, usable directly in comparisons.
pub const UNREACHABLE: u32 = u32::MAX;

/// BFS-backed distance and path queries, restricted to traversable tiles.
#[derive(Debug)]
pub struct DistanceOracle {
    traversable: HashSet<Position>,
    distances: RefCell<HashMap<(Position, Position), Option<u32>>>,
    paths: RefCell<HashMap<(Position, Position), Option<Vec<Position>>>>,
}

impl DistanceOracle {
    #[must_use]
    pub fn new(traversable: HashSet<Position>) -> Self {
        Self {
            traversable,
            distances: RefCell::new(HashMap::new()),
            paths: RefCell::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn is_traversable(&self, position: Position) -> bool {
        self.traversable.contains(&position)
    }

    /// Minimum number of moves from `from` to any traversable neighbour of
    /// `to`, or `None` when `to` has no traversable neighbour or no path
    /// exists. The adjacency relation is undirected, so one directional
    /// query per pair suffices.
    #[must_use]
    pub fn distance(&self, from: Position, to: Position) -> Option<u32> {
        if from == to {
            return Some(0);
        }
        let key = (from, to);
        if let Some(cached) = self.distances.borrow().get(&key) {
            return *cached;
        }
        let found = self.search(from, to).map(|path| moves_in(&path));
        self.distances.borrow_mut().insert(key, found);
        found
    }

    /// Like [`Self::distance`] but collapses `None` to [`UNREACHABLE`] so
    /// callers can compare costs without unwrapping.
    #[must_use]
    pub fn cost(&self, from: Position, to: Position) -> u32 {
        self.distance(from, to).unwrap_or(UNREACHABLE)
    }

    /// Inclusive position sequence `from .. landing, to` where `landing` is
    /// the reached traversable neighbour of `to`. Route repair splices these
    /// sequences between non-adjacent waypoints.
    #[must_use]
    pub fn path(&self, from: Position, to: Position) -> Option<Vec<Position>> {
        if from == to {
            return Some(vec![from]);
        }
        let key = (from, to);
        if let Some(cached) = self.paths.borrow().get(&key) {
            return cached.clone();
        }
        let found = self.search(from, to);
        self.paths.borrow_mut().insert(key, found.clone());
        found
    }

    fn search(&self, from: Position, to: Position) -> Option<Vec<Position>> {
        let targets: HashSet<Position> = to
            .neighbours()
            .into_iter()
            .filter(|n| self.traversable.contains(n))
            .collect();
        if targets.is_empty() {
            return None;
        }
        if targets.contains(&from) {
            return Some(vec![from, to]);
        }

        let mut parents: HashMap<Position, Position> = HashMap::new();
        let mut visited: HashSet<Position> = HashSet::from([from]);
        let mut queue: VecDeque<Position> = VecDeque::from([from]);

        while let Some(current) = queue.pop_front() {
            for next in current.neighbours() {
                if !self.traversable.contains(&next) || !visited.insert(next) {
                    continue;
                }
                parents.insert(next, current);
                if targets.contains(&next) {
                    return Some(reconstruct(&parents, from, next, to));
                }
                queue.push_back(next);
            }
        }
        None
    }
}

/// Moves along an inclusive oracle path: the final hop onto the destination
/// tile is a visit, not a move.
fn moves_in(path: &[Position]) -> u32 {
    u32::try_from(path.len().saturating_sub(2)).unwrap_or(UNREACHABLE)
}

fn reconstruct(
    parents: &HashMap<Position, Position>,
    from: Position,
    landing: Position,
    to: Position,
) -> Vec<Position> {
    let mut path = vec![to, landing];
    let mut current = landing;
    while current != from {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
