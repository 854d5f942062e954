//! The hunt: reach the yellow target before the flashlight's clock runs out.
//!
//! ```bash
//! cargo run --release -- [level] [--width 900 --height 650]
//! ```
//!
//! Controls WASD/arrows = move R = restart after a win/loss Esc = quit

use anyhow::ensure;
use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::time::{Duration, Instant};

use glam::{Vec2, vec2};
use nighthunt::{
    light::{self, LightStyle},
    renderer::{Renderer, Software},
    sim::{GameSession, InputCmd, Phase},
    world::{Camera, LEVELS},
};

#[derive(Parser)]
#[command(about = "Top-down hunt in the dark")]
struct Args {
    /// Built-in level index.
    #[arg(default_value_t = 0)]
    level: usize,

    /// Window width in pixels.
    #[arg(long, default_value_t = 900)]
    width: usize,

    /// Window height in pixels.
    #[arg(long, default_value_t = 650)]
    height: usize,

    /// Override the flashlight radius in world units.
    #[arg(long)]
    radius: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    ensure!(
        args.level < LEVELS.len(),
        "level {} out of range ({} levels)",
        args.level,
        LEVELS.len()
    );

    let level = LEVELS[args.level].clone();
    log::info!(
        "level {} \"{}\": {} walls, {:.0} s limit",
        args.level,
        level.name,
        level.walls.len(),
        level.time_limit
    );

    let mut style = LightStyle::default();
    if let Some(radius) = args.radius {
        style.radius = radius;
    }

    let viewport = vec2(args.width as f32, args.height as f32);
    let mut camera = Camera::new(viewport, level.size);
    let mut session = GameSession::new(level);
    let mut renderer = Software::new(args.width, args.height)?;

    let mut win = Window::new("Nighthunt", args.width, args.height, WindowOptions::default())?;
    win.set_target_fps(120);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    let mut last_tick = Instant::now();
    let mut shown_phase = Phase::Playing;

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        // clamp dt so a dragged window doesn't teleport the player
        let dt = last_tick.elapsed().as_secs_f32().min(0.1);
        last_tick = Instant::now();

        /* --------------- build one InputCmd per frame -------------------- */
        let mut cmd = InputCmd::default();
        if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
            cmd.dir.y -= 1.0;
        }
        if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
            cmd.dir.y += 1.0;
        }
        if win.is_key_down(Key::Left) || win.is_key_down(Key::A) {
            cmd.dir.x -= 1.0;
        }
        if win.is_key_down(Key::Right) || win.is_key_down(Key::D) {
            cmd.dir.x += 1.0;
        }
        cmd.restart = win.is_key_pressed(Key::R, KeyRepeat::No); // edge-trigger

        session.tick(&cmd, dt);
        camera.follow(session.player().pos());

        if session.phase() != shown_phase {
            shown_phase = session.phase();
            match shown_phase {
                Phase::Won => win.set_title("Nighthunt — target found! (R restarts)"),
                Phase::Lost => win.set_title("Nighthunt — time's up (R restarts)"),
                Phase::Playing => win.set_title("Nighthunt"),
            }
        }

        /* draw */
        let fans = light::frame_fans(
            session.player().pos(),
            &session.level().segments,
            &camera,
            &style,
        );

        renderer.begin_frame(args.width, args.height);
        renderer.draw_level(&session, &camera);
        renderer.draw_light(fans.as_ref(), &style);
        draw_timer(&mut renderer, &session, viewport);
        renderer.end_frame(|fb, w, h| {
            // ─────────── accumulate & report every ~3 s ────────────────────
            acc_time += t0.elapsed();
            acc_frames += 1;
            win.update_with_buffer(fb, w, h).unwrap()
        });

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            let fps = 1000.0 / avg_ms;
            log::info!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, fps);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

/// Countdown bar along the top edge: shrinks left-to-right as time runs out.
fn draw_timer(renderer: &mut Software, session: &GameSession, viewport: Vec2) {
    use nighthunt::renderer::Blend;

    let frac = session.time_left() / session.level().time_limit;
    let width = (viewport.x - 16.0) * frac.clamp(0.0, 1.0);
    let color = if frac > 0.25 {
        [200, 200, 200, 220]
    } else {
        [230, 60, 60, 220]
    };
    renderer
        .frame_mut()
        .fill_rect(vec2(8.0, 4.0), vec2(width, 6.0), color, Blend::Alpha);
}
