//! Planning pipeline: configuration, orchestration, statistics, and errors.
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cluster::{build_clusters, Cluster};
use crate::constants::{
    DEFAULT_CARGO_CAPACITY, DEFAULT_CLUSTER_SPREAD, DEFAULT_MAX_CLUSTER_TASKS,
    DEFAULT_SHRINE_TARGET, DEFAULT_TURN_CAPACITY, MAX_SEQUENCED_CLUSTER_TASKS,
};
use crate::distance::DistanceOracle;
use crate::hex::Position;
use crate::inventory::Inventory;
use crate::map::{Colour, MapData, TileId};
use crate::route::{assemble_waypoints, repair, RouteStep};
use crate::sequence::plan_sequence;
use crate::shrine::insert_shrines;
use crate::tasks::{select_tasks, Task, TaskKind};
use crate::trace::TraceEvent;

/// Per-run planning configuration. Everything except the colours has a
/// documented default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// The three colours whose tasks this run plans for.
    pub colours: [Colour; 3],
    /// Maximum pairwise distance allowed within one cluster.
    #[serde(default = "PlanConfig::default_cluster_spread")]
    pub cluster_spread: u32,
    /// Hard cap on tasks per cluster; bounds permutation enumeration.
    #[serde(default = "PlanConfig::default_max_cluster_tasks")]
    pub max_cluster_tasks: usize,
    /// Moves per turn; drives turn counting and shrine free budgets.
    #[serde(default = "PlanConfig::default_turn_capacity")]
    pub turn_capacity: u32,
    /// Maximum concurrently held pickup items.
    #[serde(default = "PlanConfig::default_cargo_capacity")]
    pub cargo_capacity: u32,
    /// How many shrine visits to guarantee when shrines are available.
    #[serde(default = "PlanConfig::default_shrine_target")]
    pub shrine_target: usize,
}

impl PlanConfig {
    #[must_use]
    pub fn new(colours: [Colour; 3]) -> Self {
        Self {
            colours,
            cluster_spread: Self::default_cluster_spread(),
            max_cluster_tasks: Self::default_max_cluster_tasks(),
            turn_capacity: Self::default_turn_capacity(),
            cargo_capacity: Self::default_cargo_capacity(),
            shrine_target: Self::default_shrine_target(),
        }
    }

    const fn default_cluster_spread() -> u32 {
        DEFAULT_CLUSTER_SPREAD
    }

    const fn default_max_cluster_tasks() -> usize {
        DEFAULT_MAX_CLUSTER_TASKS
    }

    const fn default_turn_capacity() -> u32 {
        DEFAULT_TURN_CAPACITY
    }

    const fn default_cargo_capacity() -> u32 {
        DEFAULT_CARGO_CAPACITY
    }

    const fn default_shrine_target() -> usize {
        DEFAULT_SHRINE_TARGET
    }

    /// Parse a configuration from JSON, applying field defaults.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error for malformed input.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Check the documented bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`PlanError`] config violation naming the offending field.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.turn_capacity < 1 {
            return Err(PlanError::ConfigMin {
                field: "turn_capacity",
                min: 1,
                value: u64::from(self.turn_capacity),
            });
        }
        if self.cargo_capacity < 1 {
            return Err(PlanError::ConfigMin {
                field: "cargo_capacity",
                min: 1,
                value: u64::from(self.cargo_capacity),
            });
        }
        if self.cluster_spread < 1 {
            return Err(PlanError::ConfigMin {
                field: "cluster_spread",
                min: 1,
                value: u64::from(self.cluster_spread),
            });
        }
        if self.max_cluster_tasks < 1 || self.max_cluster_tasks > MAX_SEQUENCED_CLUSTER_TASKS {
            return Err(PlanError::ConfigRange {
                field: "max_cluster_tasks",
                min: 1,
                max: u64::try_from(MAX_SEQUENCED_CLUSTER_TASKS).unwrap_or(u64::MAX),
                value: u64::try_from(self.max_cluster_tasks).unwrap_or(u64::MAX),
            });
        }
        Ok(())
    }
}

/// Aggregate statistics for a finished plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStats {
    pub total_moves: u32,
    pub total_turns: u32,
    pub route_length: usize,
    pub clusters_formed: usize,
    pub tasks_per_cluster: Vec<usize>,
    pub cluster_spreads: Vec<u32>,
}

/// A complete planning result: tagged waypoints, the fully adjacent path,
/// visited shrines, statistics, and the decision trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<RouteStep>,
    pub path: Vec<Position>,
    pub shrines_visited: Vec<Position>,
    pub stats: PlanStats,
    pub trace: Vec<TraceEvent>,
}

/// Failures surfaced by the planning pipeline. All are deterministic
/// functions of the input; retrying without changing the input reproduces
/// the same failure.
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("no {kind} tile tagged {colour} on the map")]
    MissingRequiredTile { kind: TaskKind, colour: Colour },
    #[error("start tile {0} is not on the map")]
    MissingStartTile(TileId),
    #[error(
        "no cargo-valid ordering remains for {} cluster(s) while holding {inventory}",
        remaining.len()
    )]
    InfeasibleSequence {
        remaining: Vec<Cluster>,
        inventory: Inventory,
    },
    #[error(
        "no traversable path from ({}, {}) to ({}, {})",
        from.col, from.row, to.col, to.row
    )]
    UnreachablePath { from: Position, to: Position },
    #[error("{field} must be at least {min} (got {value})")]
    ConfigMin {
        field: &'static str,
        min: u64,
        value: u64,
    },
    #[error("{field} must be between {min} and {max} (got {value})")]
    ConfigRange {
        field: &'static str,
        min: u64,
        max: u64,
        value: u64,
    },
}

/// Run the full planning pipeline: select task tiles, cluster them, order
/// the clusters under cargo constraints, splice in shrine visits, and
/// repair the waypoint list into an adjacent path.
///
/// Pure function of its input; repeated runs on identical input produce
/// identical output.
///
/// # Errors
///
/// See [`PlanError`] for the failure modes; none are retried.
pub fn plan(map: &MapData, config: &PlanConfig) -> Result<Plan, PlanError> {
    config.validate()?;
    let start = map
        .start_position()
        .ok_or(PlanError::MissingStartTile(map.start))?;

    let tasks = select_tasks(map, &config.colours)?;
    debug!("selected {} tasks for {} colours", tasks.len(), config.colours.len());

    let oracle = DistanceOracle::new(map.traversable_positions());
    let mut trace = Vec::new();

    let clusters = build_clusters(
        &tasks,
        start,
        &oracle,
        config.cluster_spread,
        config.max_cluster_tasks,
    );
    for (index, cluster) in clusters.iter().enumerate() {
        trace.push(TraceEvent::ClusterFormed {
            index,
            tiles: cluster.tasks.iter().map(|task| task.tile).collect(),
            spread: cluster.spread(&oracle),
        });
    }
    debug!("formed {} clusters", clusters.len());

    let outcome = plan_sequence(&clusters, start, &oracle, config.cargo_capacity, &mut trace)?;
    let ordered_tasks: Vec<Task> = outcome
        .clusters
        .iter()
        .flat_map(|cluster| cluster.tasks.iter().copied())
        .collect();

    let shrine_plan = insert_shrines(
        &ordered_tasks,
        start,
        &map.shrine_positions(),
        &oracle,
        config.turn_capacity,
        config.shrine_target,
        &mut trace,
    )?;

    let waypoints = assemble_waypoints(start, &shrine_plan.steps);
    let path = repair(&oracle, &waypoints)?;

    let stats = PlanStats {
        total_moves: shrine_plan.total_moves,
        total_turns: shrine_plan.total_moves.div_ceil(config.turn_capacity),
        route_length: path.len(),
        clusters_formed: outcome.clusters.len(),
        tasks_per_cluster: outcome.clusters.iter().map(Cluster::len).collect(),
        cluster_spreads: outcome
            .clusters
            .iter()
            .map(|cluster| cluster.spread(&oracle))
            .collect(),
    };
    debug!(
        "plan complete: {} moves, {} turns, {} shrines",
        stats.total_moves,
        stats.total_turns,
        shrine_plan.shrines.len()
    );

    Ok(Plan {
        steps: shrine_plan.steps,
        path,
        shrines_visited: shrine_plan.shrines,
        stats,
        trace,
    })
}
