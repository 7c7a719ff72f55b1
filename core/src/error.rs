use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Tile index or coordinates out of bounds")]
    InvalidTile,
    #[error("Board must be at least one tile wide and tall")]
    InvalidSize,
    #[error("Too many mines, at least one tile must stay safe")]
    TooManyMines,
}

pub type Result<T> = core::result::Result<T, GameError>;
