//! Hexagonal minesweeper rules.
//!
//! [`Board`] owns the tile grid and its fixed hex adjacency, [`GameEngine`]
//! applies player actions to it, and [`Session`] bundles an engine with the
//! click timing, round clock and RNG a frontend needs. Drawing and pointer
//! polling are left to the embedding application.

#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use geometry::*;
pub use hex::*;
pub use input::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod board;
mod clock;
mod engine;
mod error;
mod geometry;
mod hex;
mod input;
mod session;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// 42 × 32 tiles with 320 mines.
    pub const CLASSIC: GameConfig = GameConfig::new_unchecked((42, 32), 320);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps the board to at least one tile and leaves at least one tile safe.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let mines = mines.min(mult(size_x, size_y) - 1);
        Self::new_unchecked((size_x, size_y), mines)
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        if self.mines >= self.total_tiles() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::CLASSIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_config_is_valid() {
        assert_eq!(GameConfig::CLASSIC.total_tiles(), 1344);
        assert_eq!(GameConfig::CLASSIC.validate(), Ok(()));
    }

    #[test]
    fn new_clamps_into_playable_range() {
        assert_eq!(GameConfig::new((0, 3), 9), GameConfig::new_unchecked((1, 3), 2));
        assert_eq!(GameConfig::new((4, 4), 0).mines, 0);
    }

    #[test]
    fn validate_reports_unchecked_problems() {
        assert_eq!(
            GameConfig::new_unchecked((0, 3), 0).validate(),
            Err(GameError::InvalidSize)
        );
        assert_eq!(
            GameConfig::new_unchecked((3, 3), 9).validate(),
            Err(GameError::TooManyMines)
        );
    }
}
