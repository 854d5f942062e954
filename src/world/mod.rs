mod camera;
mod geometry;
mod level;

pub use camera::Camera;
pub use geometry::{Rect, Segment, circle_overlaps_rect, circles_overlap, wall_segments};
pub use level::{LEVELS, Level};
