use glam::{Vec2, vec2};
use once_cell::sync::Lazy;

use super::geometry::{Rect, Segment, wall_segments};

/// Runtime context of one map (immutable after load).
///
/// Owns the wall rectangles and the occluder segment set derived from them.
/// The set is rebuilt wholesale in [`Level::new`]; for the rest of the
/// level's lifetime the visibility solver only ever borrows it read-only.
#[derive(Clone, Debug)]
pub struct Level {
    pub name: &'static str,
    /// World extents; the camera is clamped to this box.
    pub size: Vec2,
    pub walls: Vec<Rect>,
    pub segments: Vec<Segment>,
    pub player_spawn: Vec2,
    pub target_pos: Vec2,
    pub target_radius: f32,
    /// Seconds to reach the target before the run is lost.
    pub time_limit: f32,
}

impl Level {
    pub fn new(
        name: &'static str,
        size: Vec2,
        walls: Vec<Rect>,
        player_spawn: Vec2,
        target_pos: Vec2,
        target_radius: f32,
        time_limit: f32,
    ) -> Self {
        let segments = wall_segments(&walls);
        Self {
            name,
            size,
            walls,
            segments,
            player_spawn,
            target_pos,
            target_radius,
            time_limit,
        }
    }
}

/// Border wall thickness shared by every built-in map.
const BORDER: f32 = 20.0;

/// Ring the world with four border walls, then append the map's obstacles.
fn bordered(size: Vec2, obstacles: &[Rect]) -> Vec<Rect> {
    let mut walls = vec![
        Rect::from_xywh(0.0, 0.0, size.x, BORDER),
        Rect::from_xywh(0.0, size.y - BORDER, size.x, BORDER),
        Rect::from_xywh(0.0, 0.0, BORDER, size.y),
        Rect::from_xywh(size.x - BORDER, 0.0, BORDER, size.y),
    ];
    walls.extend_from_slice(obstacles);
    walls
}

/// Built-in level table.
///
/// Level 0 fills the viewport exactly (no camera scroll); level 1 is a
/// larger arena that exercises the scrolling camera.
pub static LEVELS: Lazy<Vec<Level>> = Lazy::new(|| {
    vec![
        Level::new(
            "the yard",
            vec2(900.0, 650.0),
            bordered(
                vec2(900.0, 650.0),
                &[
                    Rect::from_xywh(200.0, 120.0, 450.0, 25.0),
                    Rect::from_xywh(150.0, 260.0, 25.0, 250.0),
                    Rect::from_xywh(350.0, 420.0, 380.0, 25.0),
                    Rect::from_xywh(650.0, 180.0, 25.0, 190.0),
                ],
            ),
            vec2(100.0, 100.0),
            vec2(780.0, 520.0),
            18.0,
            30.0,
        ),
        Level::new(
            "warehouse",
            vec2(1800.0, 1300.0),
            bordered(
                vec2(1800.0, 1300.0),
                &[
                    Rect::from_xywh(300.0, 150.0, 25.0, 500.0),
                    Rect::from_xywh(300.0, 150.0, 500.0, 25.0),
                    Rect::from_xywh(700.0, 400.0, 25.0, 450.0),
                    Rect::from_xywh(450.0, 700.0, 600.0, 25.0),
                    Rect::from_xywh(1000.0, 150.0, 25.0, 400.0),
                    Rect::from_xywh(1200.0, 650.0, 400.0, 25.0),
                    Rect::from_xywh(1350.0, 900.0, 25.0, 300.0),
                    Rect::from_xywh(900.0, 1000.0, 300.0, 25.0),
                ],
            ),
            vec2(100.0, 100.0),
            vec2(1650.0, 1150.0),
            18.0,
            60.0,
        ),
    ]
});

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::geometry::circle_overlaps_rect;

    #[test]
    fn segments_cover_every_wall() {
        for level in LEVELS.iter() {
            assert_eq!(level.segments.len(), level.walls.len() * 4);
        }
    }

    #[test]
    fn spawn_and_target_are_clear_of_walls() {
        for level in LEVELS.iter() {
            for wall in &level.walls {
                assert!(
                    !circle_overlaps_rect(level.player_spawn, 22.0, wall),
                    "{}: spawn buried in a wall",
                    level.name
                );
                assert!(
                    !circle_overlaps_rect(level.target_pos, level.target_radius, wall),
                    "{}: target buried in a wall",
                    level.name
                );
            }
        }
    }

    #[test]
    fn worlds_fit_their_borders() {
        for level in LEVELS.iter() {
            for wall in &level.walls {
                let max = wall.max();
                assert!(max.x <= level.size.x && max.y <= level.size.y);
                assert!(wall.pos.x >= 0.0 && wall.pos.y >= 0.0);
            }
        }
    }
}
