//! Rendering abstraction layer.
//!
//! Game logic never touches a pixel buffer directly: it hands the session,
//! camera and light fans to a type implementing [`Renderer`]. The software
//! backend lives in [`software`]; the pixel-level machinery it is built
//! from (blending, fan rasterisation) lives in [`canvas`] so it can be
//! exercised without a window.

mod canvas;
mod software;

pub use canvas::{Blend, Canvas};
pub use software::{RendererError, Software};

use crate::light::{LightFans, LightStyle};
use crate::sim::GameSession;
use crate::world::Camera;

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/// Pack straight-alpha channels into an [`Rgba`] pixel.
#[inline]
pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Rgba {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// A renderer that owns internal scratch for the whole frame.
///
/// `end_frame` loans the finished buffer to a user-supplied closure exactly
/// once per frame; software callers typically forward it to their
/// window-manager (`|fb, w, h| window.update_with_buffer(fb, w, h)`).
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear
    /// it to the floor colour.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Draw walls, target and player through the camera.
    fn draw_level(&mut self, session: &GameSession, camera: &Camera);

    /// Darkness composite plus glow. `fans` is `None` when this frame's
    /// visibility polygon was degenerate; the overlay is then drawn with no
    /// hole.
    fn draw_light(&mut self, fans: Option<&LightFans>, style: &LightStyle);

    /// Finish the frame and loan the buffer to `submit`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}
