use serde::{Deserialize, Serialize};

use crate::*;

/// One cell of the hex grid.
///
/// Neighbor slots are indexed by [`Direction::index`] and fixed when the board
/// is built; only the three flags change during play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub(crate) is_mine: bool,
    pub(crate) is_discovered: bool,
    pub(crate) is_flagged: bool,
    pub(crate) neighbors: [Option<TileIndex>; 6],
    pub(crate) position: Point,
}

impl Tile {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_discovered(&self) -> bool {
        self.is_discovered
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub const fn position(&self) -> Point {
        self.position
    }

    pub const fn neighbor(&self, direction: Direction) -> Option<TileIndex> {
        self.neighbors[direction.index()]
    }

    /// Present neighbors, in direction order.
    pub fn neighbors(&self) -> impl Iterator<Item = TileIndex> + use<> {
        self.neighbors.into_iter().flatten()
    }

    pub(crate) fn clear(&mut self) {
        self.is_mine = false;
        self.is_discovered = false;
        self.is_flagged = false;
    }
}

/// What a renderer should draw for a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// Discovered mine, only seen once a round is lost. `flagged` marks mines
    /// the player had found.
    Mine { flagged: bool },
}

impl Default for TileView {
    fn default() -> Self {
        Self::Hidden
    }
}
