//! Nighthunt — a top-down hunt behind a dynamic flashlight.
//!
//! The interesting part is the visibility engine: every frame an angular
//! sweep computes the exact polygon of space visible from the player given
//! the level's wall segments, and a two-pass compositor cuts a soft,
//! range-limited hole into a darkness overlay from it.
//!
//! * `world` — level geometry, occluder model, scrolling camera
//! * `light` — visibility polygon solver and soft fan builder
//! * `renderer` — software rasteriser and darkness compositor
//! * `sim` — player movement, wall collision, session state machine

pub mod light;
pub mod renderer;
pub mod sim;
pub mod world;
