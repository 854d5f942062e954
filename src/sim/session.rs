//! One run of the hunt: countdown, player movement, win/lose transitions.

use glam::Vec2;

use super::actor::MovableActor;
use crate::world::{Level, circles_overlap};

pub const PLAYER_RADIUS: f32 = 22.0;
/// Player speed in world units per second.
pub const PLAYER_SPEED: f32 = 320.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Won,
    Lost,
}

/// Per-frame input, already mapped from whatever device produced it.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputCmd {
    /// Movement intent; any magnitude, normalized before use.
    pub dir: Vec2,
    pub restart: bool,
}

/// Live state of one run. The level itself is immutable; everything that
/// changes per frame lives here.
pub struct GameSession {
    level: Level,
    player: MovableActor,
    phase: Phase,
    time_left: f32,
}

impl GameSession {
    pub fn new(level: Level) -> Self {
        let player = MovableActor::new(level.player_spawn, PLAYER_RADIUS);
        let time_left = level.time_limit;
        Self {
            level,
            player,
            phase: Phase::Playing,
            time_left,
        }
    }

    #[inline]
    pub fn level(&self) -> &Level {
        &self.level
    }

    #[inline]
    pub fn player(&self) -> &MovableActor {
        &self.player
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    /// Advance the run by `dt` seconds.
    ///
    /// Order matters: the clock runs out before movement, so a frame that
    /// both exhausts the timer and would have reached the target is a loss.
    pub fn tick(&mut self, cmd: &InputCmd, dt: f32) {
        match self.phase {
            Phase::Playing => {
                self.time_left -= dt;
                if self.time_left <= 0.0 {
                    self.time_left = 0.0;
                    self.phase = Phase::Lost;
                    return;
                }

                let delta = cmd.dir.normalize_or_zero() * PLAYER_SPEED * dt;
                if delta != Vec2::ZERO {
                    self.player.try_move(delta, &self.level.walls);
                }

                if circles_overlap(
                    self.player.pos(),
                    self.player.radius(),
                    self.level.target_pos,
                    self.level.target_radius,
                ) {
                    self.phase = Phase::Won;
                }
            }
            Phase::Won | Phase::Lost => {
                if cmd.restart {
                    self.restart();
                }
            }
        }
    }

    fn restart(&mut self) {
        self.player.set_pos(self.level.player_spawn);
        self.time_left = self.level.time_limit;
        self.phase = Phase::Playing;
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
