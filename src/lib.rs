#![warn(missing_docs)]

//! Sparse tile grid for Macroquad platformers: autotiling, collision
//! queries, viewport-culled drawing and JSON level files.

mod error;
mod loader {
    pub mod json_loader;
}
pub mod render;
mod rules;
pub mod spatial;
mod tile;
mod tilemap;

pub use error::MapError;
pub use render::{AssetLookup, DrawSurface, ScreenSurface, TileAssets};
pub use rules::{AutotileRules, Neighbors};
pub use spatial::{GridPos, DEFAULT_TILE_SIZE, NEIGHBOR_OFFSETS};
pub use tile::{Coord, Tile, TilePos};
pub use tilemap::Tilemap;
