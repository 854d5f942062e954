//! Minimal visibility-polygon debug viewer.
//!
//! ```bash
//! cargo run --release --bin nighthunt -- [level_idx]
//! ```
//!
//! Draws the level's occluder edges as a white wireframe and the polygon
//! visible from a movable light as a yellow outline. Arrow keys move the
//! light; Esc quits.

use minifb::{Key, Window, WindowOptions};
use std::error::Error;

use nighthunt::light::compute_visibility;
use nighthunt::world::LEVELS;

const LIGHT_RADIUS: f32 = 215.0;
const LIGHT_STEP: f32 = 4.0;

fn main() -> Result<(), Box<dyn Error>> {
    // ─────────── parse CLI ────────────
    let mut args = std::env::args().skip(1);
    let level_idx: usize = args
        .next()
        .unwrap_or_else(|| "0".into())
        .parse()
        .expect("level_idx should be a number");
    if level_idx >= LEVELS.len() {
        eprintln!("level_idx {level_idx} out of range ({} levels)", LEVELS.len());
        std::process::exit(1);
    }
    let level = &LEVELS[level_idx];
    let width = level.size.x as usize;
    let height = level.size.y as usize;

    println!("{} ({} occluder edges)", level.name, level.segments.len());

    let mut light = level.player_spawn;

    // ─────────── show window ────────────
    let mut buffer = vec![0u32; width * height];
    let mut window = Window::new("visibility debug", width, height, WindowOptions::default())?;
    window.set_target_fps(60);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        if window.is_key_down(Key::Left) {
            light.x -= LIGHT_STEP;
        }
        if window.is_key_down(Key::Right) {
            light.x += LIGHT_STEP;
        }
        if window.is_key_down(Key::Up) {
            light.y -= LIGHT_STEP;
        }
        if window.is_key_down(Key::Down) {
            light.y += LIGHT_STEP;
        }
        light = light.clamp(glam::Vec2::ZERO, level.size);

        buffer.fill(0);

        // ─────────── rasterise occluder edges ────────────
        for seg in &level.segments {
            draw_line(
                &mut buffer,
                width,
                height,
                seg.a.x as i32,
                seg.a.y as i32,
                seg.b.x as i32,
                seg.b.y as i32,
                0x00_FFFFFF,
            );
        }

        // ─────────── visibility polygon outline ────────────
        let polygon = compute_visibility(light, &level.segments, LIGHT_RADIUS);
        if polygon.len() >= 2 {
            for i in 0..polygon.len() {
                let a = polygon[i];
                let b = polygon[(i + 1) % polygon.len()];
                draw_line(
                    &mut buffer,
                    width,
                    height,
                    a.x as i32,
                    a.y as i32,
                    b.x as i32,
                    b.y as i32,
                    0x00_FFFF00,
                );
            }
        }
        // light position marker
        draw_line(
            &mut buffer,
            width,
            height,
            light.x as i32 - 3,
            light.y as i32,
            light.x as i32 + 3,
            light.y as i32,
            0x00_FF4040,
        );

        window.update_with_buffer(&buffer, width, height)?;
    }
    Ok(())
}

/// Integer Bresenham line-drawing algorithm.
fn draw_line(
    buf: &mut [u32],
    w: usize,
    h: usize,
    mut x0: i32,
    mut y0: i32,
    x1: i32,
    y1: i32,
    colour: u32,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (0..w as i32).contains(&x0) && (0..h as i32).contains(&y0) {
            buf[y0 as usize * w + x0 as usize] = colour;
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            if x0 == x1 {
                break;
            }
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            if y0 == y1 {
                break;
            }
            err += dx;
            y0 += sy;
        }
    }
}
