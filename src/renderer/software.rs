//! Pure-CPU backend: draws the world into an owned frame canvas, then lays
//! the darkness composite on top.

use glam::{Vec2, vec2};
use thiserror::Error;

use super::canvas::{Blend, Canvas};
use super::{Renderer, Rgba, argb};
use crate::light::{LightFans, LightStyle};
use crate::sim::GameSession;
use crate::world::Camera;

const FLOOR: [u8; 4] = [15, 15, 20, 255];
const WALL: [u8; 4] = [80, 80, 80, 255];
const PLAYER: [u8; 4] = [0, 255, 255, 255];
const TARGET: [u8; 4] = [255, 255, 0, 255];

#[derive(Debug, Error)]
pub enum RendererError {
    #[error("frame must be non-empty, got {width}x{height}")]
    ZeroSizedFrame { width: usize, height: usize },
}

/// Software renderer. `frame` is the straight-colour scene; `darkness` is a
/// premultiplied ARGB overlay rebuilt every frame by [`Renderer::draw_light`].
pub struct Software {
    frame: Canvas,
    darkness: Canvas,
}

impl Software {
    pub fn new(width: usize, height: usize) -> Result<Self, RendererError> {
        if width == 0 || height == 0 {
            return Err(RendererError::ZeroSizedFrame { width, height });
        }
        let mut frame = Canvas::new();
        frame.resize(width, height);
        let mut darkness = Canvas::new();
        darkness.resize(width, height);
        Ok(Self { frame, darkness })
    }

    /// Direct access to the frame for overlays drawn after the light pass
    /// (HUD elements that must not be darkened).
    pub fn frame_mut(&mut self) -> &mut Canvas {
        &mut self.frame
    }
}

impl Renderer for Software {
    fn begin_frame(&mut self, width: usize, height: usize) {
        self.frame.resize(width, height);
        self.darkness.resize(width, height);
        self.frame
            .clear(argb(FLOOR[3], FLOOR[0], FLOOR[1], FLOOR[2]));
    }

    fn draw_level(&mut self, session: &GameSession, camera: &Camera) {
        let level = session.level();
        for wall in &level.walls {
            self.frame
                .fill_rect(camera.to_screen(wall.pos), wall.size, WALL, Blend::Opaque);
        }
        self.frame.fill_circle(
            camera.to_screen(level.target_pos),
            level.target_radius,
            TARGET,
            Blend::Opaque,
        );
        let player = session.player();
        self.frame.fill_circle(
            camera.to_screen(player.pos()),
            player.radius(),
            PLAYER,
            Blend::Opaque,
        );
    }

    fn draw_light(&mut self, fans: Option<&LightFans>, style: &LightStyle) {
        // Rebuild the overlay: premultiplied darkness everywhere, then carve
        // the visible fan out of it before compositing.
        self.darkness.clear(0);
        let a = style.darkness_alpha as u32;
        let dark = [
            (style.darkness_tint[0] as u32 * a / 255) as u8,
            (style.darkness_tint[1] as u32 * a / 255) as u8,
            (style.darkness_tint[2] as u32 * a / 255) as u8,
            style.darkness_alpha,
        ];
        let size = vec2(self.darkness.width() as f32, self.darkness.height() as f32);
        self.darkness.fill_rect(Vec2::ZERO, size, dark, Blend::Opaque);

        if let Some(fans) = fans {
            self.darkness.fill_fan(&fans.erase, Blend::EraseMul, 255);
        }
        self.frame.blit_premultiplied(&self.darkness);

        if let Some(fans) = fans {
            self.frame
                .fill_fan(&fans.glow, Blend::Additive, style.glow_strength);
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(self.frame.pixels(), self.frame.width(), self.frame.height());
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::frame_fans;
    use crate::world::LEVELS;

    #[test]
    fn zero_sized_frame_is_rejected() {
        assert!(Software::new(0, 480).is_err());
        assert!(Software::new(640, 0).is_err());
        assert!(Software::new(640, 480).is_ok());
    }

    #[test]
    fn missing_fans_leave_unbroken_darkness() {
        let mut r = Software::new(64, 64).unwrap();
        let style = LightStyle::default();
        r.begin_frame(64, 64);
        r.draw_light(None, &style);

        let floor = argb(FLOOR[3], FLOOR[0], FLOOR[1], FLOOR[2]);
        r.end_frame(|fb, w, _h| {
            // every pixel darkened the same way, none left at plain floor
            assert!(fb.iter().all(|&p| p == fb[0]));
            assert_ne!(fb[32 * w + 32], floor);
        });
    }

    #[test]
    fn light_carves_a_hole_in_the_darkness() {
        let level = &LEVELS[0];
        let (w, h) = (level.size.x as usize, level.size.y as usize);
        let mut r = Software::new(w, h).unwrap();
        let style = LightStyle::default();
        let camera = Camera::new(level.size, level.size);
        let origin = level.player_spawn;
        let fans = frame_fans(origin, &level.segments, &camera, &style).unwrap();

        r.begin_frame(w, h);
        r.draw_light(Some(&fans), &style);

        let floor = argb(FLOOR[3], FLOOR[0], FLOOR[1], FLOOR[2]);
        r.end_frame(|fb, fw, _| {
            // at the light origin the erase pass removed the overlay, so the
            // floor shows through (plus glow, so at least as bright)
            let at_origin = fb[origin.y as usize * fw + origin.x as usize];
            assert!((at_origin >> 16) & 0xFF >= (floor >> 16) & 0xFF);
            // the far corner (well beyond the light radius) stays dark
            let corner = fb[20 * fw + (w - 30)];
            assert!(
                (corner >> 16) & 0xFF < (floor >> 16) & 0xFF,
                "corner should be darkened"
            );
        });
    }

    #[test]
    fn draw_level_paints_walls_and_actors() {
        let level = &LEVELS[0];
        let (w, h) = (level.size.x as usize, level.size.y as usize);
        let mut r = Software::new(w, h).unwrap();
        let camera = Camera::new(level.size, level.size);
        let session = GameSession::new(level.clone());

        r.begin_frame(w, h);
        r.draw_level(&session, &camera);

        let wall_px = argb(WALL[3], WALL[0], WALL[1], WALL[2]);
        let player_px = argb(PLAYER[3], PLAYER[0], PLAYER[1], PLAYER[2]);
        r.end_frame(|fb, fw, _| {
            // a point inside the top border wall
            assert_eq!(fb[10 * fw + 100], wall_px);
            // the player's centre
            let p = session.player().pos();
            assert_eq!(fb[p.y as usize * fw + p.x as usize], player_px);
        });
    }
}
