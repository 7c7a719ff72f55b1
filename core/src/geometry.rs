use serde::{Deserialize, Serialize};

use crate::*;

/// Pixel-space position of a tile centre or of the pointer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Screen placement of the hex grid.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Horizontal distance between tile centres in a row.
    pub column_spacing: f32,
    /// Vertical distance between rows.
    pub row_spacing: f32,
    /// Extra horizontal shift applied to even rows.
    pub row_shift: f32,
    pub origin: Point,
    /// Pointer must land strictly closer than this to a centre to hit it.
    pub tile_radius: f32,
}

impl Layout {
    pub const CLASSIC: Layout = Layout {
        column_spacing: 34.64,
        row_spacing: 30.0,
        row_shift: 17.32,
        origin: Point::new(40.0, 40.0),
        tile_radius: 20.0,
    };

    pub fn tile_center(&self, (x, y): Coord2) -> Point {
        let shift = if y % 2 == 0 { self.row_shift } else { 0.0 };
        Point::new(
            self.column_spacing * f32::from(x) + shift + self.origin.x,
            self.row_spacing * f32::from(y) + self.origin.y,
        )
    }

    pub fn hit_radius_squared(&self) -> f32 {
        self.tile_radius * self.tile_radius
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::CLASSIC
    }
}
