//! Visibility polygon solver — angular sweep over occluder segments.
//!
//! For every segment endpoint the sweep emits three rays: one straight at
//! the endpoint and one a hair to each side. The side rays are what make
//! shadows work: immediately past a corner the ray slips by the wall and
//! runs to whatever lies behind it, so sorting the hit points by angle
//! yields the correct shadow boundary without any enter/exit bookkeeping.
//!
//! Brute force by design: every ray is intersected against every segment.
//! For tens of segments and a few hundred rays that is well inside an
//! interactive frame budget; a spatial index would be the first thing to
//! add for much larger maps.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use crate::world::Segment;

/// Offset applied either side of every endpoint angle so the sweep sees the
/// wall face just before and just after a corner.
pub const ANGLE_EPSILON: f32 = 0.0007;

/// Cross products below this magnitude are treated as parallel — no hit.
/// Also swallows zero-length segments from degenerate walls.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Ray count for the synthetic full circle emitted when no occluders exist.
const FALLBACK_RAYS: usize = 64;

/// Compute the polygon visible from `origin`, capped at `max_distance`.
///
/// Vertices come back sorted by angle ascending around `origin`; each one
/// lies within `max_distance`. The result can be degenerate (fewer than
/// three points) — callers must check before treating it as a drawable fan.
///
/// An empty segment set would seed no sweep angles at all, so it is
/// special-cased to a full circle of range-limited rays: an unoccluded
/// light behaves as a plain lamp instead of blacking out the screen.
pub fn compute_visibility(origin: Vec2, segments: &[Segment], max_distance: f32) -> Vec<Vec2> {
    if segments.is_empty() {
        return full_circle(origin, max_distance);
    }

    let mut rays: Vec<(f32, Vec2)> = Vec::with_capacity(segments.len() * 6);
    for seg in segments {
        for endpoint in [seg.a, seg.b] {
            let to = endpoint - origin;
            let base = to.y.atan2(to.x);
            for angle in [base - ANGLE_EPSILON, base, base + ANGLE_EPSILON] {
                let hit = cast_ray(origin, Vec2::from_angle(angle), segments, max_distance);
                rays.push((angle, hit));
            }
        }
    }

    rays.sort_by(|l, r| l.0.total_cmp(&r.0));
    rays.into_iter().map(|(_, hit)| hit).collect()
}

/// Nearest hit point along `dir` (unit length), capped at `max_distance`.
fn cast_ray(origin: Vec2, dir: Vec2, segments: &[Segment], max_distance: f32) -> Vec2 {
    let mut nearest = max_distance;
    for seg in segments {
        if let Some(t) = ray_segment_intersection(origin, dir, seg) {
            if t < nearest {
                nearest = t;
            }
        }
    }
    origin + dir * nearest
}

/// Parametric ray/segment intersection via the 2-D cross-product method.
///
/// Returns the ray parameter `t` (world units, since `dir` is unit length)
/// when the ray crosses the segment with `t >= 0` and segment parameter
/// `u` in `[0, 1]`. Near-parallel pairs report no intersection — an
/// accepted approximation that treats grazing and colinear geometry as
/// non-occluding rather than attempting exact resolution.
pub fn ray_segment_intersection(origin: Vec2, dir: Vec2, seg: &Segment) -> Option<f32> {
    let edge = seg.b - seg.a;
    let denom = dir.perp_dot(edge);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let rel = seg.a - origin;
    let t = rel.perp_dot(edge) / denom;
    let u = rel.perp_dot(dir) / denom;
    if t >= 0.0 && (0.0..=1.0).contains(&u) {
        Some(t)
    } else {
        None
    }
}

fn full_circle(origin: Vec2, max_distance: f32) -> Vec<Vec2> {
    (0..FALLBACK_RAYS)
        .map(|i| {
            let angle = i as f32 / FALLBACK_RAYS as f32 * TAU - PI;
            origin + Vec2::from_angle(angle) * max_distance
        })
        .collect()
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Rect, wall_segments};
    use glam::vec2;

    fn angle_around(origin: Vec2, p: Vec2) -> f32 {
        let to = p - origin;
        to.y.atan2(to.x)
    }

    #[test]
    fn no_occluders_gives_full_range_circle() {
        let origin = vec2(100.0, 100.0);
        let polygon = compute_visibility(origin, &[], 215.0);
        assert_eq!(polygon.len(), FALLBACK_RAYS);
        for p in &polygon {
            assert!((origin.distance(*p) - 215.0).abs() < 1e-3);
        }
    }

    #[test]
    fn vertices_sorted_by_angle_and_within_range() {
        let segs = wall_segments(&[Rect::from_xywh(150.0, 80.0, 20.0, 220.0)]);
        let origin = vec2(100.0, 100.0);
        let polygon = compute_visibility(origin, &segs, 215.0);
        assert!(polygon.len() >= 3);
        let mut prev = f32::NEG_INFINITY;
        for p in &polygon {
            let a = angle_around(origin, *p);
            assert!(a >= prev - 1e-6, "polygon not angle-sorted");
            prev = a;
            assert!(origin.distance(*p) <= 215.0 + 1e-3);
        }
    }

    /// The end-to-end scenario from the design notes: a vertical strip wall
    /// 50 units to the right of the origin. Rays into the wall's angular
    /// footprint stop at its near face (x = 150); rays outside it run the
    /// full 215 units.
    #[test]
    fn single_wall_casts_a_shadow() {
        let wall = Rect::from_xywh(150.0, 80.0, 20.0, 220.0);
        let segs = wall_segments(&[wall]);
        let origin = vec2(100.0, 100.0);
        let polygon = compute_visibility(origin, &segs, 215.0);

        let near_face_hits = polygon
            .iter()
            .filter(|p| (p.x - 150.0).abs() < 1.0)
            .count();
        assert!(near_face_hits > 0, "no vertex landed on the wall's near face");

        // the closest vertex is the near face, roughly 50 units out
        // (slightly more, since the sampled rays run toward the corners)
        let closest = polygon
            .iter()
            .map(|p| origin.distance(*p))
            .fold(f32::INFINITY, f32::min);
        assert!(
            (45.0..60.0).contains(&closest),
            "closest vertex at distance {closest}"
        );

        let full_range_hits = polygon
            .iter()
            .filter(|p| (origin.distance(**p) - 215.0).abs() < 1e-2)
            .count();
        assert!(
            full_range_hits > 0,
            "no ray outside the wall's footprint reached full range"
        );
    }

    #[test]
    fn distant_wall_caps_every_ray_at_range() {
        let segs = wall_segments(&[Rect::from_xywh(500.0, -100.0, 20.0, 200.0)]);
        let origin = vec2(0.0, 0.0);
        for p in compute_visibility(origin, &segs, 100.0) {
            assert!((origin.distance(p) - 100.0).abs() < 1e-3);
        }
    }

    #[test]
    fn intersection_symmetric_under_endpoint_swap() {
        let origin = vec2(0.0, 0.0);
        let dir = Vec2::from_angle(0.37);
        let seg = Segment {
            a: vec2(40.0, -30.0),
            b: vec2(35.0, 60.0),
        };
        let swapped = Segment { a: seg.b, b: seg.a };
        let t1 = ray_segment_intersection(origin, dir, &seg).unwrap();
        let t2 = ray_segment_intersection(origin, dir, &swapped).unwrap();
        assert!((t1 - t2).abs() < 1e-4);
    }

    #[test]
    fn zero_length_segment_never_intersects() {
        let seg = Segment {
            a: vec2(10.0, 10.0),
            b: vec2(10.0, 10.0),
        };
        assert!(ray_segment_intersection(vec2(0.0, 0.0), vec2(1.0, 1.0).normalize(), &seg).is_none());
    }

    #[test]
    fn parallel_ray_never_intersects() {
        let seg = Segment {
            a: vec2(0.0, 5.0),
            b: vec2(100.0, 5.0),
        };
        assert!(ray_segment_intersection(vec2(0.0, 0.0), vec2(1.0, 0.0), &seg).is_none());
    }

    #[test]
    fn segment_behind_origin_is_ignored() {
        let seg = Segment {
            a: vec2(-10.0, -5.0),
            b: vec2(-10.0, 5.0),
        };
        assert!(ray_segment_intersection(vec2(0.0, 0.0), vec2(1.0, 0.0), &seg).is_none());
    }

    #[test]
    fn degenerate_walls_do_not_panic_the_sweep() {
        let segs = wall_segments(&[
            Rect::from_xywh(50.0, 50.0, 0.0, 0.0),
            Rect::from_xywh(80.0, 20.0, 0.0, 60.0),
        ]);
        let polygon = compute_visibility(vec2(0.0, 0.0), &segs, 120.0);
        // every sampled ray still terminates somewhere in range
        for p in &polygon {
            assert!(vec2(0.0, 0.0).distance(*p) <= 120.0 + 1e-3);
        }
    }
}
