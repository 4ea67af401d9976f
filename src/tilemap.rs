use crate::error::MapError;
use crate::loader::json_loader::{
    decode_level_file, decode_level_str, encode_level_file, encode_level_string, Level,
};
use crate::render::{visible_cells, AssetLookup, DrawSurface};
use crate::rules::{AutotileRules, Neighbors};
use crate::spatial::{GridPos, DEFAULT_TILE_SIZE, NEIGHBOR_OFFSETS};
use crate::tile::{Tile, TilePos};
use indexmap::IndexMap;
use macroquad::prelude::*;
use std::path::Path;

/// Sparse level grid plus free-floating decoration.
///
/// Gridded tiles live in `grid`, keyed by cell, with `pos` in grid units.
/// Offgrid tiles keep pixel positions. Both collections keep insertion
/// order, which is also the order a saved file lists them in.
#[derive(Debug, Clone, PartialEq)]
pub struct Tilemap {
    tile_size: u32,
    grid: IndexMap<GridPos, Tile>,
    offgrid: Vec<Tile>,
    rules: AutotileRules,
}

impl Default for Tilemap {
    fn default() -> Self {
        Tilemap {
            tile_size: DEFAULT_TILE_SIZE,
            grid: IndexMap::new(),
            offgrid: Vec::new(),
            rules: AutotileRules::default(),
        }
    }
}

impl Tilemap {
    /// Empty map with `tile_size` pixel cells.
    pub fn new(tile_size: u32) -> Result<Self, MapError> {
        if tile_size == 0 {
            return Err(MapError::InvalidTileSize(tile_size));
        }
        Ok(Tilemap {
            tile_size,
            ..Default::default()
        })
    }

    /// Replaces the autotile/solidity tables.
    pub fn with_rules(mut self, rules: AutotileRules) -> Self {
        self.rules = rules;
        self
    }

    /// Reads a level file into a fresh map with the default rules.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let mut map = Tilemap::default();
        map.load(path)?;
        Ok(map)
    }

    /// Parses an in-memory level document.
    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        let mut map = Tilemap::default();
        map.apply(decode_level_str(json, Path::new(""))?);
        Ok(map)
    }

    /// Pixel edge length of one cell.
    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Rules in effect.
    #[inline]
    pub fn rules(&self) -> &AutotileRules {
        &self.rules
    }

    /// Gridded tiles in insertion order.
    pub fn grid(&self) -> impl Iterator<Item = (GridPos, &Tile)> + '_ {
        self.grid.iter().map(|(p, t)| (*p, t))
    }

    /// Offgrid tiles in insertion order.
    #[inline]
    pub fn offgrid(&self) -> &[Tile] {
        &self.offgrid
    }

    /// Total tiles across grid and offgrid.
    pub fn len(&self) -> usize {
        self.grid.len() + self.offgrid.len()
    }

    /// `true` when neither collection holds a tile.
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty() && self.offgrid.is_empty()
    }

    /// Tile occupying `pos`.
    #[inline]
    pub fn get(&self, pos: GridPos) -> Option<&Tile> {
        self.grid.get(&pos)
    }

    /// Puts a tile in cell `pos`, returning whatever was there.
    /// An occupied cell keeps its place in the save order.
    pub fn place(&mut self, pos: GridPos, kind: impl Into<String>, variant: usize) -> Option<Tile> {
        self.grid.insert(pos, Tile::new(kind, variant, pos))
    }

    /// Clears cell `pos`.
    pub fn remove(&mut self, pos: GridPos) -> Option<Tile> {
        self.grid.shift_remove(&pos)
    }

    /// Appends a decoration at pixel position `pixel_pos`.
    pub fn place_offgrid(
        &mut self,
        kind: impl Into<String>,
        variant: usize,
        pixel_pos: impl Into<TilePos>,
    ) {
        self.offgrid.push(Tile::new(kind, variant, pixel_pos));
    }

    /// Occupied cells of the 3×3 block around the cell containing `pixel_pos`.
    /// Cells past the edge of the coordinate space are skipped.
    fn cells_around(&self, pixel_pos: Vec2) -> impl Iterator<Item = (GridPos, &Tile)> + '_ {
        let center = GridPos::from_pixel(pixel_pos, self.tile_size);
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let cell = center.checked_offset(dx, dy)?;
            self.grid.get(&cell).map(|tile| (cell, tile))
        })
    }

    /// Gridded tiles in the 3×3 block around the cell containing `pixel_pos`.
    pub fn tiles_around(&self, pixel_pos: Vec2) -> Vec<&Tile> {
        self.cells_around(pixel_pos).map(|(_, tile)| tile).collect()
    }

    /// Collision boxes, in pixels, of the solid tiles around `pixel_pos`.
    pub fn physics_rects_around(&self, pixel_pos: Vec2) -> Vec<Rect> {
        let ts = self.tile_size as f32;
        self.cells_around(pixel_pos)
            .filter(|(_, tile)| self.rules.is_solid(&tile.kind))
            .map(|(cell, _)| {
                let corner = cell.to_pixel(self.tile_size);
                Rect::new(corner.x, corner.y, ts, ts)
            })
            .collect()
    }

    /// Solid tile in exactly the cell containing `pixel_pos`, if any.
    pub fn solid_check(&self, pixel_pos: Vec2) -> Option<&Tile> {
        self.grid
            .get(&GridPos::from_pixel(pixel_pos, self.tile_size))
            .filter(|tile| self.rules.is_solid(&tile.kind))
    }

    /// Same-type orthogonal neighbours of the tile at `pos`.
    fn same_kind_neighbors(&self, pos: GridPos, kind: &str) -> Neighbors {
        Neighbors::OFFSETS
            .iter()
            .filter(|(_, (dx, dy))| {
                pos.checked_offset(*dx, *dy)
                    .and_then(|cell| self.grid.get(&cell))
                    .is_some_and(|n| n.kind == kind)
            })
            .fold(Neighbors::empty(), |acc, (flag, _)| acc | *flag)
    }

    /// Picks variants for autotiled types from their neighbours.
    ///
    /// Neighbourhoods missing from the rules table leave the tile alone.
    /// Only variants change, so repeated calls converge immediately.
    pub fn autotile(&mut self) {
        let updates: Vec<(GridPos, usize)> = self
            .grid
            .iter()
            .filter(|(_, tile)| self.rules.is_autotiled(&tile.kind))
            .filter_map(|(pos, tile)| {
                let neighbors = self.same_kind_neighbors(*pos, &tile.kind);
                self.rules
                    .variant_for(neighbors)
                    .filter(|v| *v != tile.variant)
                    .map(|v| (*pos, v))
            })
            .collect();

        log::debug!("autotile rewrote {} tiles", updates.len());
        for (pos, variant) in updates {
            if let Some(tile) = self.grid.get_mut(&pos) {
                tile.variant = variant;
            }
        }
    }

    /// Pulls every tile whose `(kind, variant)` is in `id_pairs` out of the map.
    ///
    /// Offgrid matches come first, unchanged. Grid matches follow with their
    /// position moved toward pixel space as existing editor tooling expects:
    /// `x * tile_size`, but `y + tile_size`. The y offset is kept for
    /// compatibility with those tools and is not a true pixel coordinate.
    ///
    /// With `keep == false` the matches are removed from the map. The
    /// returned tiles are always copies.
    pub fn extract(&mut self, id_pairs: &[(&str, usize)], keep: bool) -> Vec<Tile> {
        log::debug!("extract {:?} (keep: {})", id_pairs, keep);

        let mut matches: Vec<Tile> = self
            .offgrid
            .iter()
            .filter(|tile| tile.matches(id_pairs))
            .cloned()
            .collect();
        let offgrid_count = matches.len();

        let ts = i64::from(self.tile_size);
        let grid_keys: Vec<GridPos> = self
            .grid
            .iter()
            .filter(|(_, tile)| tile.matches(id_pairs))
            .map(|(pos, _)| *pos)
            .collect();
        for pos in &grid_keys {
            if let Some(tile) = self.grid.get(pos) {
                let mut copy = tile.clone();
                copy.pos.x = copy.pos.x.scaled(ts);
                copy.pos.y = copy.pos.y.shifted(ts);
                matches.push(copy);
            }
        }

        if !keep {
            self.offgrid.retain(|tile| !tile.matches(id_pairs));
            self.grid.retain(|_, tile| !tile.matches(id_pairs));
        }

        log::debug!(
            "extract matched {} offgrid and {} grid tiles",
            offgrid_count,
            grid_keys.len()
        );
        matches
    }

    /// Draws offgrid tiles, then every gridded tile in view.
    ///
    /// `offset` is the camera's top-left corner in pixels. Only cells inside
    /// the viewport are looked up, so cost follows the screen, not the level.
    pub fn render<S, A>(&self, surface: &mut S, assets: &A, offset: Vec2) -> Result<(), MapError>
    where
        S: DrawSurface,
        A: AssetLookup<Image = S::Image>,
    {
        for tile in &self.offgrid {
            let image = image_for(assets, tile)?;
            let at = tile.pos.to_vec2() - offset;
            surface.blit(image, at.x, at.y);
        }

        let view = vec2(surface.width(), surface.height());
        for cell in visible_cells(offset, view, self.tile_size).cells() {
            if let Some(tile) = self.grid.get(&cell) {
                let image = image_for(assets, tile)?;
                let at = cell.to_pixel(self.tile_size) - offset;
                surface.blit(image, at.x, at.y);
            }
        }
        Ok(())
    }

    /// Writes the map to a `.json` level file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MapError> {
        let path = path.as_ref();
        encode_level_file(path, self.tile_size, &self.grid, &self.offgrid)?;
        log::info!(
            "saved {} ({} grid, {} offgrid tiles)",
            path.display(),
            self.grid.len(),
            self.offgrid.len()
        );
        Ok(())
    }

    /// Level document as pretty JSON.
    pub fn to_json_string(&self) -> Result<String, MapError> {
        encode_level_string(self.tile_size, &self.grid, &self.offgrid)
    }

    /// Replaces grid, offgrid and tile size with the contents of `path`.
    ///
    /// Nothing changes unless the whole file decodes cleanly.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), MapError> {
        let path = path.as_ref();
        let level = decode_level_file(path)?;
        log::info!(
            "loaded {} ({} grid, {} offgrid tiles, tile size {})",
            path.display(),
            level.grid.len(),
            level.offgrid.len(),
            level.tile_size
        );
        self.apply(level);
        Ok(())
    }

    fn apply(&mut self, level: Level) {
        self.tile_size = level.tile_size;
        self.grid = level.grid;
        self.offgrid = level.offgrid;
    }
}

fn image_for<'a, A: AssetLookup>(assets: &'a A, tile: &Tile) -> Result<&'a A::Image, MapError> {
    assets
        .image(&tile.kind, tile.variant)
        .ok_or_else(|| MapError::MissingAsset {
            kind: tile.kind.clone(),
            variant: tile.variant,
        })
}
