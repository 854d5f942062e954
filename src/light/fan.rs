//! Soft triangle-fan builder: visibility polygon in, renderable fan out.

use glam::Vec2;

/// Minimum rim alpha. Keeps the vision boundary from snapping to fully
/// transparent at exactly the light radius, which reads as a hard edge.
pub const RIM_MIN_ALPHA: u8 = 25;

/// One triangle-fan vertex: position plus straight (non-premultiplied)
/// RGBA. Alpha is recomputed on every build, never carried between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FanVertex {
    pub pos: Vec2,
    pub color: [u8; 4],
}

/// Build a triangle fan from a visibility polygon.
///
/// Layout: the origin first at full alpha, then one vertex per polygon
/// point with distance-based alpha, then a duplicate of the first polygon
/// point so the fan closes without a gap. All vertices share the tint's
/// RGB; only alpha varies.
///
/// A degenerate polygon (fewer than three points) yields an empty fan —
/// the compositor then draws unbroken darkness for the frame. Pure
/// function: safe to call twice per frame with different tints.
pub fn build_fan(origin: Vec2, polygon: &[Vec2], max_distance: f32, tint: [u8; 3]) -> Vec<FanVertex> {
    if polygon.len() < 3 {
        return Vec::new();
    }

    let mut fan = Vec::with_capacity(polygon.len() + 2);
    fan.push(FanVertex {
        pos: origin,
        color: [tint[0], tint[1], tint[2], 255],
    });
    for &p in polygon {
        fan.push(FanVertex {
            pos: p,
            color: [
                tint[0],
                tint[1],
                tint[2],
                falloff_alpha(origin.distance(p), max_distance),
            ],
        });
    }
    let closing = fan[1];
    fan.push(closing);
    fan
}

/// Radial alpha falloff: 255 at the origin, linear down to the rim floor at
/// `max_distance` and beyond.
pub fn falloff_alpha(distance: f32, max_distance: f32) -> u8 {
    let t = if max_distance > 0.0 {
        (distance / max_distance).min(1.0)
    } else {
        1.0
    };
    let alpha = (255.0 * (1.0 - t)).clamp(0.0, 255.0) as u8;
    alpha.max(RIM_MIN_ALPHA)
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn square_polygon(center: Vec2, half: f32) -> Vec<Vec2> {
        vec![
            center + vec2(half, -half),
            center + vec2(half, half),
            center + vec2(-half, half),
            center + vec2(-half, -half),
        ]
    }

    #[test]
    fn fan_starts_at_origin_with_full_alpha() {
        let origin = vec2(50.0, 50.0);
        let fan = build_fan(origin, &square_polygon(origin, 30.0), 100.0, [255, 200, 100]);
        assert_eq!(fan[0].pos, origin);
        assert_eq!(fan[0].color, [255, 200, 100, 255]);
    }

    #[test]
    fn fan_closes_by_duplicating_first_polygon_vertex() {
        let origin = vec2(0.0, 0.0);
        let polygon = square_polygon(origin, 40.0);
        let fan = build_fan(origin, &polygon, 100.0, [255, 255, 255]);
        assert_eq!(fan.len(), polygon.len() + 2);
        assert_eq!(*fan.last().unwrap(), fan[1]);
    }

    #[test]
    fn degenerate_polygon_yields_empty_fan() {
        let origin = vec2(0.0, 0.0);
        assert!(build_fan(origin, &[], 100.0, [255, 255, 255]).is_empty());
        assert!(
            build_fan(origin, &[vec2(1.0, 0.0), vec2(0.0, 1.0)], 100.0, [255, 255, 255])
                .is_empty()
        );
    }

    #[test]
    fn falloff_is_monotone_and_floored() {
        let mut prev = falloff_alpha(0.0, 200.0);
        assert_eq!(prev, 255);
        for i in 1..=100 {
            let a = falloff_alpha(i as f32 * 2.0, 200.0);
            assert!(a <= prev, "alpha rose with distance");
            prev = a;
        }
        // floor holds exactly at and beyond the radius; never reaches 0
        assert_eq!(falloff_alpha(200.0, 200.0), RIM_MIN_ALPHA);
        assert_eq!(falloff_alpha(10_000.0, 200.0), RIM_MIN_ALPHA);
        assert!(falloff_alpha(199.9, 200.0) >= RIM_MIN_ALPHA);
    }

    #[test]
    fn only_alpha_varies_across_vertices() {
        let origin = vec2(0.0, 0.0);
        let polygon = vec![vec2(10.0, 0.0), vec2(0.0, 80.0), vec2(-150.0, 0.0)];
        let fan = build_fan(origin, &polygon, 150.0, [12, 34, 56]);
        for v in &fan {
            assert_eq!(&v.color[..3], &[12, 34, 56]);
        }
        // nearer polygon points get more alpha
        assert!(fan[1].color[3] > fan[2].color[3]);
        assert!(fan[2].color[3] > fan[3].color[3]);
        assert_eq!(fan[3].color[3], RIM_MIN_ALPHA);
    }
}
