//! Argosy Planning Engine
//!
//! Platform-agnostic core planning logic for the Argosy boat-tour game.
//! Given a validated hex-tile map, this crate computes an efficient closed
//! tour that completes every colour-tagged task under the cargo rules,
//! collects the required shrine visits, and returns to the start tile. Map
//! loading, visualization, and route simulation live with the platform
//! collaborators, not here.

pub mod cluster;
pub mod constants;
pub mod distance;
pub mod hex;
pub mod inventory;
pub mod map;
pub mod planner;
pub mod route;
pub mod sequence;
pub mod shrine;
pub mod tasks;
pub mod trace;

// Re-export commonly used types
pub use cluster::{build_clusters, Cluster, ClusterTasks};
pub use distance::{DistanceOracle, UNREACHABLE};
pub use hex::Position;
pub use inventory::{CargoKey, Inventory, ItemKind};
pub use map::{Colour, MapData, Tile, TileId, TileKind};
pub use planner::{plan, Plan, PlanConfig, PlanError, PlanStats};
pub use route::{assemble_waypoints, repair, RouteStep};
pub use sequence::{plan_sequence, SequenceOutcome};
pub use shrine::{insert_shrines, ShrinePlan};
pub use tasks::{select_tasks, CargoEffect, Task, TaskKind};
pub use trace::TraceEvent;

/// Trait for abstracting map loading operations
/// Platform-specific implementations should provide this
pub trait MapSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the validated map this run plans over.
    ///
    /// # Errors
    ///
    /// Returns an error if the map cannot be loaded or fails validation.
    fn load_map(&self) -> Result<MapData, Self::Error>;
}

/// Engine wrapper pairing a map source with the planning pipeline.
pub struct PlanEngine<M>
where
    M: MapSource,
{
    source: M,
}

impl<M> PlanEngine<M>
where
    M: MapSource,
{
    #[must_use]
    pub fn new(source: M) -> Self {
        Self { source }
    }

    /// Load the map and run the planner against it.
    ///
    /// # Errors
    ///
    /// Returns the loader's error or the pipeline's [`PlanError`], erased to
    /// [`anyhow::Error`].
    pub fn solve(&self, config: &PlanConfig) -> Result<Plan, anyhow::Error> {
        let map = self.source.load_map().map_err(anyhow::Error::new)?;
        planner::plan(&map, config).map_err(anyhow::Error::new)
    }
}
