//! Read-only planning input: tiles, colours, and the start anchor.
//!
//! The map collaborator (loader, out of scope for this crate) supplies a
//! validated [`MapData`] once per planning run. Nothing here is mutated by
//! the planner.
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::hex::Position;

/// Stable tile identifier. Total ordering on ids backs every deterministic
/// tie-break in the planner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile_{:03}", self.0)
    }
}

/// Colour tag attached to task tiles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Colour {
    Pink,
    Blue,
    Green,
    Yellow,
    Purple,
    White,
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pink => "pink",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::White => "white",
        };
        f.write_str(name)
    }
}

/// Category of a map tile. Only water is traversable; every other kind is a
/// stop the boat pulls alongside without entering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Water,
    Combat,
    Offering,
    Temple,
    StatueSource,
    StatueIsland,
    Shrine,
    Start,
}

/// A single map tile. Colour sets are empty for water, shrine, and start
/// tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    pub position: Position,
    #[serde(default)]
    pub colours: SmallVec<[Colour; 2]>,
}

impl Tile {
    #[must_use]
    pub fn new(id: TileId, kind: TileKind, position: Position) -> Self {
        Self {
            id,
            kind,
            position,
            colours: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_colours(mut self, colours: &[Colour]) -> Self {
        self.colours = colours.iter().copied().collect();
        self
    }

    /// Water tiles are the only ones the boat may occupy.
    #[must_use]
    pub fn is_traversable(&self) -> bool {
        self.kind == TileKind::Water
    }

    #[must_use]
    pub fn has_colour(&self, colour: Colour) -> bool {
        self.colours.contains(&colour)
    }
}

/// The full tile collection plus the designated start tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapData {
    pub tiles: Vec<Tile>,
    pub start: TileId,
}

impl MapData {
    #[must_use]
    pub fn new(tiles: Vec<Tile>, start: TileId) -> Self {
        Self { tiles, start }
    }

    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    /// Position of the start tile, if the loader supplied a valid id.
    #[must_use]
    pub fn start_position(&self) -> Option<Position> {
        self.tile(self.start).map(|tile| tile.position)
    }

    /// Positions of every water tile.
    #[must_use]
    pub fn traversable_positions(&self) -> HashSet<Position> {
        self.tiles
            .iter()
            .filter(|tile| tile.is_traversable())
            .map(|tile| tile.position)
            .collect()
    }

    /// Candidate tiles for a (kind, colour) pair, ordered by tile id so
    /// selection stays deterministic.
    #[must_use]
    pub fn candidates(&self, kind: TileKind, colour: Colour) -> Vec<&Tile> {
        let mut found: Vec<&Tile> = self
            .tiles
            .iter()
            .filter(|tile| tile.kind == kind && tile.has_colour(colour))
            .collect();
        found.sort_by_key(|tile| tile.id);
        found
    }

    /// Shrine tile positions in a stable order.
    #[must_use]
    pub fn shrine_positions(&self) -> Vec<Position> {
        let mut shrines: Vec<Position> = self
            .tiles
            .iter()
            .filter(|tile| tile.kind == TileKind::Shrine)
            .map(|tile| tile.position)
            .collect();
        shrines.sort_unstable();
        shrines
    }
}
