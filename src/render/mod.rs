//! Drawing collaborators, viewport culling and the macroquad adapters.

mod backend;
pub mod cull;
mod surface;

pub use backend::{ScreenSurface, TileAssets};
pub use cull::{visible_cells, CellRange};
pub use surface::{AssetLookup, DrawSurface};
