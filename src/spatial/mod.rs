//! Grid cell addressing.

mod index;

pub use index::{GridPos, DEFAULT_TILE_SIZE, NEIGHBOR_OFFSETS};
