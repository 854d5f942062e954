//! Game simulation: actors, collision response and the run state machine.

mod actor;
mod session;

pub use actor::MovableActor;
pub use session::{GameSession, InputCmd, PLAYER_RADIUS, PLAYER_SPEED, Phase};
