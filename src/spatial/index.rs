use crate::error::MapError;
use macroquad::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Pixel edge length used when a level does not say otherwise.
pub const DEFAULT_TILE_SIZE: u32 = 16;

/// 3×3 neighbourhood scanned by area queries, centre included.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 9] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (0, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Integer coordinates of one grid cell.
///
/// This is the key of the grid. Its `"x;y"` string form only exists at the
/// file boundary (see [`Display`](fmt::Display) and [`FromStr`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GridPos {
    /// Column.
    pub x: i32,
    /// Row, growing downwards.
    pub y: i32,
}

impl GridPos {
    /// Cell at `(x, y)`.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        GridPos { x, y }
    }

    /// Cell containing the pixel `p`. Floors, so `-1.0` lands in cell `-1`.
    #[inline]
    pub fn from_pixel(p: Vec2, tile_size: u32) -> Self {
        let ts = tile_size as f32;
        GridPos {
            x: (p.x / ts).floor() as i32,
            y: (p.y / ts).floor() as i32,
        }
    }

    /// Top-left pixel corner of this cell.
    #[inline]
    pub fn to_pixel(self, tile_size: u32) -> Vec2 {
        let ts = tile_size as f32;
        vec2(self.x as f32 * ts, self.y as f32 * ts)
    }

    /// Neighbouring cell shifted by `(dx, dy)`, `None` past the edge of `i32`.
    #[inline]
    pub fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(GridPos {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.x, self.y)
    }
}

impl FromStr for GridPos {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MapError::InvalidKey(s.to_owned());
        let (x, y) = s.split_once(';').ok_or_else(invalid)?;
        let pos = GridPos {
            x: x.parse().map_err(|_| invalid())?,
            y: y.parse().map_err(|_| invalid())?,
        };
        // "+1;2" or "01;2" would alias "1;2"
        if pos.to_string() != s {
            return Err(invalid());
        }
        Ok(pos)
    }
}
