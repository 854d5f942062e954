//! The dynamic light pipeline: visibility polygon → soft screen-space fans.

mod fan;
mod visibility;

pub use fan::{FanVertex, RIM_MIN_ALPHA, build_fan, falloff_alpha};
pub use visibility::{ANGLE_EPSILON, compute_visibility, ray_segment_intersection};

use glam::Vec2;

use crate::world::{Camera, Segment};

/// Tunables for the flashlight look. One origin per frame; the same style
/// drives both the erase pass and the glow pass.
#[derive(Clone, Copy, Debug)]
pub struct LightStyle {
    /// Maximum sight radius in world units.
    pub radius: f32,
    /// RGB of the additive glow pass.
    pub glow_tint: [u8; 3],
    /// Pass-level cap on the glow alpha (0–255). Applied at draw time so
    /// the fan's own alpha curve stays identical across both passes.
    pub glow_strength: u8,
    /// RGB of the darkness overlay.
    pub darkness_tint: [u8; 3],
    /// Overlay opacity (0–255); 255 is pitch black outside the light.
    pub darkness_alpha: u8,
}

impl Default for LightStyle {
    fn default() -> Self {
        Self {
            radius: 215.0,
            glow_tint: [255, 214, 150],
            glow_strength: 80,
            darkness_tint: [8, 8, 14],
            darkness_alpha: 235,
        }
    }
}

/// Screen-space fans for one frame: full-white for the erase pass, tinted
/// for the glow pass. Produced and discarded within a single render pass.
#[derive(Clone, Debug)]
pub struct LightFans {
    pub erase: Vec<FanVertex>,
    pub glow: Vec<FanVertex>,
}

/// Run the per-frame light pipeline: compute the visibility polygon around
/// `origin`, project it through the camera, and build both fans in screen
/// space.
///
/// Returns `None` when the polygon is degenerate; the compositor then
/// draws unbroken darkness — a silent degraded frame, not an error.
///
/// Falloff alpha is computed from the projected points, which is sound
/// because [`Camera::to_screen`] is a pure translation.
pub fn frame_fans(
    origin: Vec2,
    segments: &[Segment],
    camera: &Camera,
    style: &LightStyle,
) -> Option<LightFans> {
    let polygon = compute_visibility(origin, segments, style.radius);
    if polygon.len() < 3 {
        return None;
    }

    let screen_polygon: Vec<Vec2> = polygon.iter().map(|&p| camera.to_screen(p)).collect();
    let screen_origin = camera.to_screen(origin);

    Some(LightFans {
        erase: build_fan(screen_origin, &screen_polygon, style.radius, [255, 255, 255]),
        glow: build_fan(screen_origin, &screen_polygon, style.radius, style.glow_tint),
    })
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
