use macroquad::prelude::*;
use macroquad_tilegrid::{ScreenSurface, TileAssets, Tilemap};
use std::path::Path;

const TILE_KINDS: [&str; 4] = ["decor", "grass", "large_decor", "stone"];
const SCROLL_SPEED: f32 = 240.0;

fn window_conf() -> Conf {
    Conf {
        window_title: "Level View".into(),
        window_width: 640,
        window_height: 480,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let level = std::env::args().nth(1).unwrap_or_else(|| "map.json".to_string());
    let mut map = Tilemap::from_file(&level).expect("Failed to load level");
    map.autotile();

    let assets = TileAssets::load_dir(Path::new("data/images/tiles"), &TILE_KINDS)
        .await
        .expect("Failed to load tile images");

    let mut scroll = Vec2::ZERO;

    loop {
        clear_background(Color::from_rgba(14, 219, 248, 255));

        let dt = get_frame_time();
        if is_key_down(KeyCode::Left) {
            scroll.x -= SCROLL_SPEED * dt;
        }
        if is_key_down(KeyCode::Right) {
            scroll.x += SCROLL_SPEED * dt;
        }
        if is_key_down(KeyCode::Up) {
            scroll.y -= SCROLL_SPEED * dt;
        }
        if is_key_down(KeyCode::Down) {
            scroll.y += SCROLL_SPEED * dt;
        }

        let offset = scroll.floor();
        let mut surface = ScreenSurface::window();
        if let Err(err) = map.render(&mut surface, &assets, offset) {
            log::error!("{err}");
            break;
        }

        // collision boxes the physics step would see around the cursor
        let cursor = Vec2::from(mouse_position()) + offset;
        for r in map.physics_rects_around(cursor) {
            draw_rectangle_lines(r.x - offset.x, r.y - offset.y, r.w, r.h, 1.0, RED);
        }
        if let Some(tile) = map.solid_check(cursor) {
            draw_text(&tile.to_string(), 10.0, 20.0, 20.0, BLACK);
        }

        if is_key_pressed(KeyCode::S) {
            if let Err(err) = map.save(&level) {
                log::error!("{err}");
            }
        }

        next_frame().await;
    }
}
