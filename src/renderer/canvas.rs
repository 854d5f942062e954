//! Owned ARGB pixel surface with the blend operations the darkness
//! compositor needs. All coordinates are screen-space floats; rasterisation
//! samples pixel centres.

use glam::{Vec2, vec2};

use super::{Rgba, argb};
use crate::light::FanVertex;

/// Triangles flatter than this are skipped as slivers.
const AREA_EPSILON: f32 = 1e-6;

/// How a source pixel combines with the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    /// Overwrite the destination.
    Opaque,
    /// Straight-alpha over.
    Alpha,
    /// Saturating add of `src.rgb * src.a`; destination alpha unchanged.
    Additive,
    /// `dst * (1 - src.a)` on all four channels — the erase pass. Only
    /// meaningful on a premultiplied-alpha surface.
    EraseMul,
}

/// A plain pixel rectangle. The main frame holds straight opaque colour;
/// the darkness overlay holds premultiplied ARGB.
pub struct Canvas {
    pixels: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            pixels: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    /// (Re)allocate if the resolution changed. Contents are unspecified
    /// afterwards; callers clear before drawing.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels.resize(width * height, 0);
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.pixels[y * self.width + x]
    }

    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Blend one pixel; out-of-bounds writes are silently dropped.
    #[inline]
    fn blend_pixel(&mut self, x: i32, y: i32, color: [u8; 4], blend: Blend) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.pixels[idx] = apply(self.pixels[idx], color, blend);
    }

    /// Fill an axis-aligned rectangle given by top-left corner and size.
    pub fn fill_rect(&mut self, min: Vec2, size: Vec2, color: [u8; 4], blend: Blend) {
        let x0 = min.x.floor().max(0.0) as i32;
        let y0 = min.y.floor().max(0.0) as i32;
        let x1 = ((min.x + size.x).ceil() as i32).min(self.width as i32);
        let y1 = ((min.y + size.y).ceil() as i32).min(self.height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, color, blend);
            }
        }
    }

    /// Fill a circle (pixel-centre inclusion test).
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: [u8; 4], blend: Blend) {
        let x0 = (center.x - radius).floor() as i32;
        let y0 = (center.y - radius).floor() as i32;
        let x1 = (center.x + radius).ceil() as i32;
        let y1 = (center.y + radius).ceil() as i32;
        let r2 = radius * radius;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = vec2(x as f32 + 0.5, y as f32 + 0.5);
                if p.distance_squared(center) <= r2 {
                    self.blend_pixel(x, y, color, blend);
                }
            }
        }
    }

    /// Rasterise a triangle fan with per-vertex alpha interpolation.
    ///
    /// The fan layout matches [`crate::light::build_fan`]: centre vertex
    /// first, rim vertices after, closing duplicate last. All vertices are
    /// expected to share one RGB tint; only alpha is interpolated.
    /// `strength` scales every interpolated alpha (255 = unscaled) — this
    /// is how the glow pass gets its configurable maximum without touching
    /// the fan itself.
    pub fn fill_fan(&mut self, fan: &[FanVertex], blend: Blend, strength: u8) {
        if fan.len() < 3 {
            return;
        }
        for i in 1..fan.len() - 1 {
            self.fill_triangle(fan[0], fan[i], fan[i + 1], blend, strength);
        }
    }

    /// Bounding-box rasterisation with edge functions; accepts either
    /// winding since the sweep's angle order depends on the origin.
    fn fill_triangle(&mut self, v0: FanVertex, v1: FanVertex, v2: FanVertex, blend: Blend, strength: u8) {
        let area = edge(v0.pos, v1.pos, v2.pos);
        if area.abs() < AREA_EPSILON {
            return;
        }

        let min_x = v0.pos.x.min(v1.pos.x).min(v2.pos.x).floor().max(0.0) as i32;
        let min_y = v0.pos.y.min(v1.pos.y).min(v2.pos.y).floor().max(0.0) as i32;
        let max_x = (v0.pos.x.max(v1.pos.x).max(v2.pos.x).ceil() as i32).min(self.width as i32 - 1);
        let max_y = (v0.pos.y.max(v1.pos.y).max(v2.pos.y).ceil() as i32).min(self.height as i32 - 1);

        let a0 = v0.color[3] as f32;
        let a1 = v1.color[3] as f32;
        let a2 = v2.color[3] as f32;
        let scale = strength as f32 / 255.0;
        let rgb = [v0.color[0], v0.color[1], v0.color[2]];

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = vec2(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(v1.pos, v2.pos, p);
                let w1 = edge(v2.pos, v0.pos, p);
                let w2 = edge(v0.pos, v1.pos, p);
                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if !inside {
                    continue;
                }
                let alpha = ((w0 * a0 + w1 * a1 + w2 * a2) / area * scale).clamp(0.0, 255.0) as u8;
                self.blend_pixel(x, y, [rgb[0], rgb[1], rgb[2], alpha], blend);
            }
        }
    }

    /// Composite `src` (premultiplied ARGB) over this canvas. The result is
    /// forced opaque — this is the step that lays the darkness overlay onto
    /// the finished frame.
    pub fn blit_premultiplied(&mut self, src: &Canvas) {
        debug_assert_eq!((self.width, self.height), (src.width, src.height));
        for (dst, &s) in self.pixels.iter_mut().zip(&src.pixels) {
            let sa = s >> 24;
            if sa == 0 {
                continue;
            }
            let keep = 255 - sa;
            let r = ((s >> 16) & 0xFF) + ((*dst >> 16) & 0xFF) * keep / 255;
            let g = ((s >> 8) & 0xFF) + ((*dst >> 8) & 0xFF) * keep / 255;
            let b = (s & 0xFF) + (*dst & 0xFF) * keep / 255;
            *dst = argb(0xFF, r.min(255) as u8, g.min(255) as u8, b.min(255) as u8);
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

/// Twice the signed area of (a, b, p) — positive when p is left of a→b on a
/// y-down screen.
#[inline]
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b - a).perp_dot(p - a)
}

/// Channel-wise blend of `src` into `dst`.
fn apply(dst: Rgba, src: [u8; 4], blend: Blend) -> Rgba {
    let da = dst >> 24;
    let dr = (dst >> 16) & 0xFF;
    let dg = (dst >> 8) & 0xFF;
    let db = dst & 0xFF;
    let sa = src[3] as u32;

    match blend {
        Blend::Opaque => argb(src[3], src[0], src[1], src[2]),
        Blend::Alpha => {
            let inv = 255 - sa;
            argb(
                (sa + da * inv / 255) as u8,
                ((src[0] as u32 * sa + dr * inv) / 255) as u8,
                ((src[1] as u32 * sa + dg * inv) / 255) as u8,
                ((src[2] as u32 * sa + db * inv) / 255) as u8,
            )
        }
        Blend::Additive => argb(
            da as u8,
            (dr + src[0] as u32 * sa / 255).min(255) as u8,
            (dg + src[1] as u32 * sa / 255).min(255) as u8,
            (db + src[2] as u32 * sa / 255).min(255) as u8,
        ),
        Blend::EraseMul => {
            let keep = 255 - sa;
            argb(
                (da * keep / 255) as u8,
                (dr * keep / 255) as u8,
                (dg * keep / 255) as u8,
                (db * keep / 255) as u8,
            )
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
