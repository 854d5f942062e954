use glam::Vec2;

use crate::world::{Rect, circle_overlaps_rect};

/// A circle that moves through the world and collides with walls.
///
/// Movement is all-or-nothing: a step that would overlap any wall is
/// reverted whole rather than slid along the surface.
#[derive(Clone, Copy, Debug)]
pub struct MovableActor {
    pos: Vec2,
    radius: f32,
}

impl MovableActor {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    /// Apply `delta`, reverting on the first wall overlap. Returns `true`
    /// when the step was blocked.
    pub fn try_move(&mut self, delta: Vec2, walls: &[Rect]) -> bool {
        let old = self.pos;
        self.pos += delta;
        for wall in walls {
            if circle_overlaps_rect(self.pos, self.radius, wall) {
                self.pos = old;
                return true;
            }
        }
        false
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn free_move_applies_delta() {
        let mut a = MovableActor::new(vec2(10.0, 10.0), 5.0);
        assert!(!a.try_move(vec2(3.0, -2.0), &[]));
        assert_eq!(a.pos(), vec2(13.0, 8.0));
    }

    #[test]
    fn blocked_move_reverts_whole_step() {
        let wall = Rect::from_xywh(20.0, 0.0, 10.0, 100.0);
        let mut a = MovableActor::new(vec2(10.0, 50.0), 5.0);
        // would land with its rim inside the wall
        assert!(a.try_move(vec2(8.0, 0.0), &[wall]));
        assert_eq!(a.pos(), vec2(10.0, 50.0));
    }

    #[test]
    fn grazing_a_wall_face_is_allowed() {
        let wall = Rect::from_xywh(20.0, 0.0, 10.0, 100.0);
        let mut a = MovableActor::new(vec2(10.0, 50.0), 5.0);
        // ends exactly touching: strict overlap, so the step stands
        assert!(!a.try_move(vec2(5.0, 0.0), &[wall]));
        assert_eq!(a.pos(), vec2(15.0, 50.0));
    }
}
