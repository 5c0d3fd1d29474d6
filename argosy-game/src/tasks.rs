//! Task definitions and deterministic task-tile selection.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hex::Position;
use crate::inventory::ItemKind;
use crate::map::{Colour, MapData, TileId, TileKind};
use crate::planner::PlanError;

/// The five required actions per colour.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Combat,
    PickupOffering,
    DeliverOffering,
    PickupStatue,
    DeliverStatue,
}

/// How completing a task changes the hold, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CargoEffect {
    Pickup(ItemKind),
    Deliver(ItemKind),
}

impl TaskKind {
    /// Fixed assignment order used by the selector.
    pub const PLANNING_ORDER: [TaskKind; 5] = [
        Self::Combat,
        Self::PickupOffering,
        Self::DeliverOffering,
        Self::PickupStatue,
        Self::DeliverStatue,
    ];

    /// Tile category that hosts this kind of task.
    #[must_use]
    pub const fn tile_kind(self) -> TileKind {
        match self {
            Self::Combat => TileKind::Combat,
            Self::PickupOffering => TileKind::Offering,
            Self::DeliverOffering => TileKind::Temple,
            Self::PickupStatue => TileKind::StatueSource,
            Self::DeliverStatue => TileKind::StatueIsland,
        }
    }

    /// Cargo effect of completing this task; combat leaves the hold alone.
    #[must_use]
    pub const fn cargo_effect(self) -> Option<CargoEffect> {
        match self {
            Self::Combat => None,
            Self::PickupOffering => Some(CargoEffect::Pickup(ItemKind::Offering)),
            Self::DeliverOffering => Some(CargoEffect::Deliver(ItemKind::Offering)),
            Self::PickupStatue => Some(CargoEffect::Pickup(ItemKind::Statue)),
            Self::DeliverStatue => Some(CargoEffect::Deliver(ItemKind::Statue)),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Combat => "combat",
            Self::PickupOffering => "offering pickup",
            Self::DeliverOffering => "offering delivery",
            Self::PickupStatue => "statue pickup",
            Self::DeliverStatue => "statue delivery",
        };
        f.write_str(name)
    }
}

/// One required action tied to a tile and colour. Immutable once selected;
/// the tile id drives every distance tie-break.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Task {
    pub tile: TileId,
    pub kind: TaskKind,
    pub colour: Colour,
    pub position: Position,
}

/// Pick exactly one task tile per (kind, colour) pair: 5 kinds for each of
/// the three colours.
///
/// Pass one walks kinds in [`TaskKind::PLANNING_ORDER`] and colours in the
/// configured order, claiming the first candidate tile no other selection
/// has used, so distinct physical tiles are preferred across colours. Pass
/// two fills any pair left unassigned with its first candidate regardless
/// of reuse.
///
/// # Errors
///
/// Returns [`PlanError::MissingRequiredTile`] when a (kind, colour) pair has
/// no candidate tile at all.
pub fn select_tasks(map: &MapData, colours: &[Colour; 3]) -> Result<Vec<Task>, PlanError> {
    let mut selected: Vec<Option<Task>> = vec![None; TaskKind::PLANNING_ORDER.len() * colours.len()];
    let mut used: Vec<TileId> = Vec::new();

    for (kind_idx, &kind) in TaskKind::PLANNING_ORDER.iter().enumerate() {
        for (colour_idx, &colour) in colours.iter().enumerate() {
            let candidates = map.candidates(kind.tile_kind(), colour);
            if candidates.is_empty() {
                return Err(PlanError::MissingRequiredTile { kind, colour });
            }
            let slot = kind_idx * colours.len() + colour_idx;
            if let Some(tile) = candidates.iter().find(|tile| !used.contains(&tile.id)) {
                used.push(tile.id);
                selected[slot] = Some(Task {
                    tile: tile.id,
                    kind,
                    colour,
                    position: tile.position,
                });
            }
        }
    }

    // Second pass: every candidate was already claimed, reuse the first one.
    for (kind_idx, &kind) in TaskKind::PLANNING_ORDER.iter().enumerate() {
        for (colour_idx, &colour) in colours.iter().enumerate() {
            let slot = kind_idx * colours.len() + colour_idx;
            if selected[slot].is_none() {
                let candidates = map.candidates(kind.tile_kind(), colour);
                let tile = candidates[0];
                selected[slot] = Some(Task {
                    tile: tile.id,
                    kind,
                    colour,
                    position: tile.position,
                });
            }
        }
    }

    Ok(selected.into_iter().flatten().collect())
}
