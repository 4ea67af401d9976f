use crate::spatial::GridPos;
use macroquad::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One placed tile.
///
/// `pos` is in grid units for tiles stored in the grid and in pixels for
/// offgrid tiles. The tile itself does not know which; the collection
/// holding it does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Tile category, e.g. `"grass"` or `"decor"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Index into the asset table's image list for `kind`.
    pub variant: usize,
    /// Grid or pixel position, see the type docs.
    pub pos: TilePos,
}

impl Tile {
    /// Builds a tile.
    pub fn new(kind: impl Into<String>, variant: usize, pos: impl Into<TilePos>) -> Self {
        Tile {
            kind: kind.into(),
            variant,
            pos: pos.into(),
        }
    }

    /// `true` when this tile is a `(kind, variant)` listed in `ids`.
    #[inline]
    pub fn matches(&self, ids: &[(&str, usize)]) -> bool {
        ids.iter()
            .any(|&(kind, variant)| self.kind == kind && self.variant == variant)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{'type': '{}', 'variant': {}, 'pos': [{}, {}]}}",
            self.kind, self.variant, self.pos.x, self.pos.y
        )
    }
}

/// A position component exactly as level files spell it.
///
/// Integers and floats are kept apart so a file reads back and writes out
/// with the same digits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coord {
    /// Whole number, written without a decimal point.
    Int(i64),
    /// Anything with a fraction or written as a float.
    Float(f64),
}

impl Coord {
    /// Value as a double.
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Coord::Int(v) => v as f64,
            Coord::Float(v) => v,
        }
    }

    /// Exact `i32` value, `None` for fractions or out of range numbers.
    pub fn to_i32(self) -> Option<i32> {
        match self {
            Coord::Int(v) => i32::try_from(v).ok(),
            Coord::Float(v) => {
                if v.fract() == 0.0 && (i32::MIN as f64..=i32::MAX as f64).contains(&v) {
                    Some(v as i32)
                } else {
                    None
                }
            }
        }
    }

    /// `self * k`, staying an integer when it was one.
    pub fn scaled(self, k: i64) -> Coord {
        match self {
            Coord::Int(v) => Coord::Int(v.saturating_mul(k)),
            Coord::Float(v) => Coord::Float(v * k as f64),
        }
    }

    /// `self + k`, staying an integer when it was one.
    pub fn shifted(self, k: i64) -> Coord {
        match self {
            Coord::Int(v) => Coord::Int(v.saturating_add(k)),
            Coord::Float(v) => Coord::Float(v + k as f64),
        }
    }
}

impl From<i32> for Coord {
    fn from(v: i32) -> Self {
        Coord::Int(v as i64)
    }
}

impl From<i64> for Coord {
    fn from(v: i64) -> Self {
        Coord::Int(v)
    }
}

impl From<f64> for Coord {
    fn from(v: f64) -> Self {
        Coord::Float(v)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coord::Int(v) => write!(f, "{}", v),
            // Debug keeps the trailing `.0`
            Coord::Float(v) => write!(f, "{:?}", v),
        }
    }
}

/// `[x, y]` position of a tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePos {
    /// Horizontal component.
    pub x: Coord,
    /// Vertical component, growing downwards.
    pub y: Coord,
}

impl TilePos {
    /// Position from any mix of integer and float components.
    pub fn new(x: impl Into<Coord>, y: impl Into<Coord>) -> Self {
        TilePos {
            x: x.into(),
            y: y.into(),
        }
    }

    /// Position for drawing. Precision beyond `f32` is dropped here only.
    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        vec2(self.x.as_f64() as f32, self.y.as_f64() as f32)
    }

    /// Cell named by a grid-unit position, `None` unless both parts are exact.
    pub fn to_grid(self) -> Option<GridPos> {
        Some(GridPos::new(self.x.to_i32()?, self.y.to_i32()?))
    }
}

impl From<GridPos> for TilePos {
    fn from(p: GridPos) -> Self {
        TilePos::new(p.x, p.y)
    }
}

impl Serialize for TilePos {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(s)
    }
}

impl<'de> Deserialize<'de> for TilePos {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let [x, y] = <[Coord; 2]>::deserialize(d)?;
        Ok(TilePos { x, y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_level_file_field_names() {
        let t = Tile::new("grass", 3, GridPos::new(2, -1));
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"type":"grass","variant":3,"pos":[2,-1]}"#);
    }

    #[test]
    fn pixel_positions_keep_their_digits() {
        for json in [
            r#"{"type":"decor","variant":0,"pos":[12.3,40]}"#,
            r#"{"type":"decor","variant":0,"pos":[0.1,40.0]}"#,
            r#"{"type":"decor","variant":0,"pos":[-7,1234567.891]}"#,
        ] {
            let t: Tile = serde_json::from_str(json).unwrap();
            assert_eq!(serde_json::to_string(&t).unwrap(), json);
        }
    }

    #[test]
    fn rejects_missing_or_malformed_fields() {
        for bad in [
            r#"{"variant":0,"pos":[0,0]}"#,
            r#"{"type":"grass","pos":[0,0]}"#,
            r#"{"type":"grass","variant":0}"#,
            r#"{"type":"grass","variant":-1,"pos":[0,0]}"#,
            r#"{"type":"grass","variant":0,"pos":[0]}"#,
            r#"{"type":"grass","variant":0,"pos":[0,0,0]}"#,
            r#"{"type":"grass","variant":0,"pos":["a",0]}"#,
            r#"{"type":7,"variant":0,"pos":[0,0]}"#,
        ] {
            assert!(serde_json::from_str::<Tile>(bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn display_matches_editor_repr() {
        let t = Tile::new("stone", 8, TilePos::new(1, 2.5));
        assert_eq!(t.to_string(), "{'type': 'stone', 'variant': 8, 'pos': [1, 2.5]}");
        let t = Tile::new("decor", 0, TilePos::new(4.0, -3));
        assert_eq!(t.to_string(), "{'type': 'decor', 'variant': 0, 'pos': [4.0, -3]}");
    }

    #[test]
    fn grid_conversion_is_exact_for_large_cells() {
        let p = TilePos::new(16_777_217, -5);
        assert_eq!(p.to_grid(), Some(GridPos::new(16_777_217, -5)));
        assert_eq!(TilePos::new(3.0, 1).to_grid(), Some(GridPos::new(3, 1)));
        assert_eq!(TilePos::new(3.5, 1).to_grid(), None);
        assert_eq!(TilePos::new(i64::from(i32::MAX) + 1, 0).to_grid(), None);
    }

    #[test]
    fn coord_arithmetic_keeps_the_number_kind() {
        assert_eq!(Coord::Int(3).scaled(16), Coord::Int(48));
        assert_eq!(Coord::Int(5).shifted(16), Coord::Int(21));
        assert_eq!(Coord::Float(1.5).scaled(2), Coord::Float(3.0));
    }

    #[test]
    fn matches_on_kind_and_variant_together() {
        let t = Tile::new("stone", 0, GridPos::default());
        assert!(t.matches(&[("grass", 0), ("stone", 0)]));
        assert!(!t.matches(&[("stone", 1), ("grass", 0)]));
        assert!(!t.matches(&[]));
    }
}
