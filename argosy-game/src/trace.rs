//! Structured decision trace returned alongside a plan.
//!
//! The planner is a pure function of its input; instead of printing as it
//! goes, it records every committed decision here and leaves reporting to
//! the caller.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::hex::Position;
use crate::map::TileId;

/// Tile ids involved in one decision, stored inline for the common case.
pub type TraceTiles = SmallVec<[TileId; 8]>;

/// One committed planning decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// The cluster builder closed a group.
    ClusterFormed {
        index: usize,
        tiles: TraceTiles,
        spread: u32,
    },
    /// The sequence planner committed a cluster in its chosen order.
    ClusterCommitted {
        index: usize,
        tiles: TraceTiles,
        travel: u64,
    },
    /// A shrine visit was spliced into the route.
    ShrineInserted {
        position: Position,
        cost: u32,
        opportunistic: bool,
    },
    /// The closing leg back to the start tile.
    ReturnLeg { cost: u32 },
}
