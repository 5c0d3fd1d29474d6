//! Offset hex-grid coordinates and the six-neighbour adjacency relation.
use serde::{Deserialize, Serialize};

/// Neighbour offsets for tiles on even-numbered rows.
const HEX_OFFSETS_EVEN: [(i32, i32); 6] = [(-1, 0), (1, 0), (-1, -1), (0, -1), (-1, 1), (0, 1)];
/// Neighbour offsets for tiles on odd-numbered rows.
const HEX_OFFSETS_ODD: [(i32, i32); 6] = [(-1, 0), (1, 0), (0, -1), (1, -1), (0, 1), (1, 1)];

/// Offset coordinates of one hex cell. The neighbour pattern depends on row
/// parity, so two cells with equal column deltas may or may not be adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The six neighbouring cells, parity-corrected.
    #[must_use]
    pub fn neighbours(self) -> [Position; 6] {
        let offsets = if self.row % 2 == 0 {
            &HEX_OFFSETS_EVEN
        } else {
            &HEX_OFFSETS_ODD
        };
        offsets.map(|(dc, dr)| Self::new(self.col + dc, self.row + dr))
    }

    /// Whether `other` is one of this cell's six neighbours.
    #[must_use]
    pub fn is_adjacent_to(self, other: Position) -> bool {
        self.neighbours().contains(&other)
    }
}
