use super::{AssetLookup, DrawSurface};
use anyhow::Context;
use macroquad::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Textures for every tile type, one list per type indexed by variant.
#[derive(Default)]
pub struct TileAssets {
    images: HashMap<String, Vec<Texture2D>>,
}

impl TileAssets {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the variant list for `kind`, replacing any previous one.
    pub fn insert(&mut self, kind: impl Into<String>, variants: Vec<Texture2D>) {
        self.images.insert(kind.into(), variants);
    }

    /// Number of variants known for `kind`.
    pub fn variant_count(&self, kind: &str) -> usize {
        self.images.get(kind).map_or(0, Vec::len)
    }

    /// Loads `<root>/<kind>/*` for each kind. Files are taken in name order,
    /// so `00.png` is variant 0, `01.png` variant 1 and so on.
    pub async fn load_dir(root: &Path, kinds: &[&str]) -> anyhow::Result<Self> {
        let mut assets = TileAssets::new();
        for kind in kinds {
            let dir = root.join(kind);
            let mut files = std::fs::read_dir(&dir)
                .with_context(|| format!("Reading tile directory {}", dir.display()))?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("Listing tile directory {}", dir.display()))?;
            files.retain(|p| p.is_file());
            files.sort();

            let mut variants = Vec::with_capacity(files.len());
            for file in &files {
                let path = file
                    .to_str()
                    .with_context(|| format!("Non UTF-8 texture path {}", file.display()))?;
                let tex = load_texture(path)
                    .await
                    .with_context(|| format!("Loading texture {}", path))?;
                tex.set_filter(FilterMode::Nearest);
                variants.push(tex);
            }
            log::info!("loaded {} variants for '{}'", variants.len(), kind);
            assets.insert(*kind, variants);
        }
        Ok(assets)
    }
}

impl AssetLookup for TileAssets {
    type Image = Texture2D;

    fn image(&self, kind: &str, variant: usize) -> Option<&Texture2D> {
        self.images.get(kind)?.get(variant)
    }
}

/// Draws straight to the current macroquad camera.
///
/// The logical size is fixed at construction so a low resolution render
/// target can be used as the canvas and scaled up afterwards.
#[derive(Debug, Clone, Copy)]
pub struct ScreenSurface {
    size: Vec2,
}

impl ScreenSurface {
    /// Canvas of `width × height` pixels.
    pub fn new(width: f32, height: f32) -> Self {
        ScreenSurface {
            size: vec2(width, height),
        }
    }

    /// Canvas matching the window.
    pub fn window() -> Self {
        Self::new(screen_width(), screen_height())
    }
}

impl DrawSurface for ScreenSurface {
    type Image = Texture2D;

    fn width(&self) -> f32 {
        self.size.x
    }

    fn height(&self) -> f32 {
        self.size.y
    }

    fn blit(&mut self, image: &Texture2D, x: f32, y: f32) {
        draw_texture(image, x, y, WHITE);
    }
}
