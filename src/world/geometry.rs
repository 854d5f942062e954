use glam::Vec2;

/// Axis-aligned wall rectangle in world units.
///
/// `size` components are non-negative; a zero-area rectangle is legal and
/// simply contributes zero-length occluder edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Top-left corner (world axes point right/down).
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Convenience constructor for the in-code level tables.
    pub const fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Bottom-right corner.
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// The four corners in fixed winding order, starting top-left and going
    /// clockwise on a y-down screen. Occluder edges connect consecutive
    /// corners (wrapping), so the order here is part of the occluder model.
    pub fn corners(&self) -> [Vec2; 4] {
        let max = self.max();
        [
            self.pos,
            Vec2::new(max.x, self.pos.y),
            max,
            Vec2::new(self.pos.x, max.y),
        ]
    }

    /// Closest point of the rectangle to `p` (the point itself if inside).
    #[inline]
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.pos, self.max())
    }
}

/// One occluder edge. Immutable once built; the full segment set is rebuilt
/// whenever the level changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

/// Explode every wall into its four boundary edges.
///
/// Degenerate rectangles produce zero-length segments; the visibility
/// solver treats those as parallel to every ray and never divides by their
/// direction.
pub fn wall_segments(walls: &[Rect]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(walls.len() * 4);
    for wall in walls {
        let c = wall.corners();
        for i in 0..4 {
            segments.push(Segment {
                a: c[i],
                b: c[(i + 1) % 4],
            });
        }
    }
    segments
}

/// Circle-vs-rectangle overlap via the closest-point test.
#[inline]
pub fn circle_overlaps_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    rect.clamp_point(center).distance_squared(center) < radius * radius
}

/// Circle-vs-circle overlap (strict, touching circles do not overlap).
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) < r * r
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
