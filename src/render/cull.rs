//! Visible-cell window for a camera viewport.

use crate::spatial::GridPos;
use macroquad::prelude::*;
use std::ops::RangeInclusive;

/// Inclusive window of grid cells touched by a viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRange {
    /// Columns, left to right.
    pub x: RangeInclusive<i32>,
    /// Rows, top to bottom.
    pub y: RangeInclusive<i32>,
}

impl CellRange {
    /// Cells in column-major order (x outer, y inner).
    pub fn cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.x
            .clone()
            .flat_map(move |x| self.y.clone().map(move |y| GridPos::new(x, y)))
    }

    /// Number of cells in the window.
    pub fn len(&self) -> usize {
        let span = |r: &RangeInclusive<i32>| {
            (i64::from(*r.end()) - i64::from(*r.start()) + 1).max(0) as u64
        };
        span(&self.x)
            .checked_mul(span(&self.y))
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(usize::MAX)
    }

    /// `true` for a degenerate window.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Is `p` inside the window?
    pub fn contains(&self, p: GridPos) -> bool {
        self.x.contains(&p.x) && self.y.contains(&p.y)
    }
}

/// Cells whose pixel bounds meet the viewport `offset .. offset + view_size`.
///
/// The far edge is included: a viewport ending exactly on a cell boundary
/// still yields that next cell, so partially scrolled rows never pop in late.
pub fn visible_cells(offset: Vec2, view_size: Vec2, tile_size: u32) -> CellRange {
    let min = GridPos::from_pixel(offset, tile_size);
    let max = GridPos::from_pixel(offset + view_size, tile_size);

    let (mut cx_min, mut cx_max) = (min.x, max.x);
    let (mut cy_min, mut cy_max) = (min.y, max.y);
    if cx_min > cx_max {
        std::mem::swap(&mut cx_min, &mut cx_max);
    }
    if cy_min > cy_max {
        std::mem::swap(&mut cy_min, &mut cy_max);
    }

    CellRange {
        x: cx_min..=cx_max,
        y: cy_min..=cy_max,
    }
}
