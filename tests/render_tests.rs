// tests/render_tests.rs

use macroquad::prelude::{vec2, Vec2};
use macroquad_tilegrid::{AssetLookup, DrawSurface, GridPos, MapError, TilePos, Tilemap};
use std::cell::RefCell;
use std::collections::HashMap;

/// Hands out `"kind/variant"` labels and remembers every request.
struct RecordingAssets {
    images: HashMap<(String, usize), String>,
    requests: RefCell<Vec<(String, usize)>>,
}

impl RecordingAssets {
    fn new(kinds: &[&str], variants: usize) -> Self {
        let mut images = HashMap::new();
        for kind in kinds {
            for v in 0..variants {
                images.insert((kind.to_string(), v), format!("{kind}/{v}"));
            }
        }
        RecordingAssets {
            images,
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl AssetLookup for RecordingAssets {
    type Image = String;

    fn image(&self, kind: &str, variant: usize) -> Option<&String> {
        self.requests.borrow_mut().push((kind.to_string(), variant));
        self.images.get(&(kind.to_string(), variant))
    }
}

struct RecordingSurface {
    size: Vec2,
    blits: Vec<(String, f32, f32)>,
}

impl RecordingSurface {
    fn new(w: f32, h: f32) -> Self {
        RecordingSurface {
            size: vec2(w, h),
            blits: Vec::new(),
        }
    }
}

impl DrawSurface for RecordingSurface {
    type Image = String;

    fn width(&self) -> f32 {
        self.size.x
    }

    fn height(&self) -> f32 {
        self.size.y
    }

    fn blit(&mut self, image: &String, x: f32, y: f32) {
        self.blits.push((image.clone(), x, y));
    }
}

#[test]
fn offgrid_first_then_visible_cells() {
    let mut map = Tilemap::new(16).unwrap();
    map.place(GridPos::new(1, 1), "grass", 2);
    map.place_offgrid("decor", 0, TilePos::new(5, 7));
    map.place_offgrid("decor", 1, TilePos::new(9000, 9000.0));

    let assets = RecordingAssets::new(&["grass", "decor"], 3);
    let mut surface = RecordingSurface::new(64.0, 64.0);
    map.render(&mut surface, &assets, vec2(4.0, 2.0)).unwrap();

    assert_eq!(
        surface.blits,
        vec![
            ("decor/0".to_string(), 1.0, 5.0),
            ("decor/1".to_string(), 8996.0, 8998.0),
            ("grass/2".to_string(), 12.0, 14.0),
        ]
    );
}

#[test]
fn far_away_cells_are_never_looked_up() {
    let mut map = Tilemap::new(16).unwrap();
    for x in 2..=4 {
        map.place(GridPos::new(x, 0), "stone", 0);
    }
    map.place(GridPos::new(100, 0), "stone", 1);

    let assets = RecordingAssets::new(&["stone"], 2);
    // covers grid x in [2, 4]
    let mut surface = RecordingSurface::new(47.0, 15.0);
    map.render(&mut surface, &assets, vec2(32.0, 0.0)).unwrap();

    let requests = assets.requests.borrow();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|(_, v)| *v == 0));
    assert_eq!(surface.blits.len(), 3);
}

#[test]
fn missing_asset_is_reported() {
    let mut map = Tilemap::new(16).unwrap();
    map.place(GridPos::new(0, 0), "grass", 9);

    let assets = RecordingAssets::new(&["grass"], 2);
    let mut surface = RecordingSurface::new(32.0, 32.0);
    let err = map.render(&mut surface, &assets, Vec2::ZERO).unwrap_err();
    assert!(matches!(err, MapError::MissingAsset { ref kind, variant: 9 } if kind == "grass"));
}

#[test]
fn scrolling_left_of_origin_draws_negative_cells() {
    let mut map = Tilemap::new(16).unwrap();
    map.place(GridPos::new(-2, 0), "grass", 0);

    let assets = RecordingAssets::new(&["grass"], 1);
    let mut surface = RecordingSurface::new(32.0, 16.0);
    map.render(&mut surface, &assets, vec2(-40.0, 0.0)).unwrap();

    assert_eq!(surface.blits, vec![("grass/0".to_string(), 8.0, 0.0)]);
}
