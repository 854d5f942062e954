use glam::Vec2;

/// Scrolling top-down camera.
///
/// World and screen axes both point right/down, so projection is a pure
/// translation — which also means world distances survive the mapping, a
/// property the fan builder relies on when it computes falloff alpha from
/// screen-space points.
///
/// When the world is no larger than the viewport the camera centres on the
/// world and [`Camera::to_screen`] degenerates to the identity.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    center: Vec2,
    viewport: Vec2,
    world: Vec2,
}

impl Camera {
    pub fn new(viewport: Vec2, world: Vec2) -> Self {
        let mut cam = Self {
            center: world * 0.5,
            viewport,
            world,
        };
        cam.clamp();
        cam
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Aim at `target`, then clamp so the view never leaves the world.
    /// Call once per frame after the player has moved, before projecting
    /// any geometry.
    pub fn follow(&mut self, target: Vec2) {
        self.center = target;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.center.x = clamp_axis(self.center.x, self.viewport.x, self.world.x);
        self.center.y = clamp_axis(self.center.y, self.viewport.y, self.world.y);
    }

    /// World point → screen pixels.
    #[inline]
    pub fn to_screen(&self, world_pt: Vec2) -> Vec2 {
        world_pt - self.center + self.viewport * 0.5
    }

    /// Screen pixels → world point; exact inverse of [`Camera::to_screen`].
    #[inline]
    pub fn to_world(&self, screen_pt: Vec2) -> Vec2 {
        screen_pt + self.center - self.viewport * 0.5
    }
}

fn clamp_axis(center: f32, viewport: f32, world: f32) -> f32 {
    let half = viewport * 0.5;
    if world <= viewport {
        world * 0.5
    } else {
        center.clamp(half, world - half)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
