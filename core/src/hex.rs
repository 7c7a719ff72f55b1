//! Adjacency on an offset hexagonal tiling.
//!
//! Rows are laid out horizontally with every even row (`y % 2 == 0`) shifted
//! half a tile to the right. Horizontal neighbors are the same for both row
//! kinds; the four diagonal neighbors depend on the parity of `y`, so they are
//! kept as two offset lists rather than branching code.

use serde::{Deserialize, Serialize};

use crate::*;

/// One of the six edges of a hexagonal tile, clockwise starting from west.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    West,
    NorthWest,
    NorthEast,
    East,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::West,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opposite(self) -> Self {
        Self::ALL[(self.index() + 3) % 6]
    }
}

/// `(dx, dy)` per direction, indexed by `y % 2` and then by [`Direction::index`].
const ROW_OFFSETS: [[(isize, isize); 6]; 2] = [
    // even rows, shifted right
    [(-1, 0), (0, -1), (1, -1), (1, 0), (1, 1), (0, 1)],
    // odd rows
    [(-1, 0), (-1, -1), (0, -1), (1, 0), (0, 1), (-1, 1)],
];

pub const fn offset(y: Coord, direction: Direction) -> (isize, isize) {
    ROW_OFFSETS[(y % 2) as usize][direction.index()]
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Neighbor of `coords` in `direction`, `None` past the board edge.
pub fn hex_neighbor(coords: Coord2, direction: Direction, bounds: Coord2) -> Option<Coord2> {
    apply_delta(coords, offset(coords.1, direction), bounds)
}

/// All in-bounds neighbors of `coords`, paired with the direction they lie in.
pub fn iter_hex_neighbors(
    coords: Coord2,
    bounds: Coord2,
) -> impl Iterator<Item = (Direction, Coord2)> {
    Direction::ALL
        .into_iter()
        .filter_map(move |dir| hex_neighbor(coords, dir, bounds).map(|pos| (dir, pos)))
}
