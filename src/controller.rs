//! Controllers: turn input and behavior states into character movement
//!
//! The simulation never reads devices or draws anything. An [`InputSource`]
//! produces a target point and a boost flag each tick, a [`Renderer`] receives
//! a read-only [`FieldSnapshot`], and the two controllers in between call the
//! movement primitives on the field's characters.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{
    BehaviorState, Character, Field, FieldParts, FieldSnapshot, RandomSource,
    nearest_wall_direction,
};

/// Per-tick player intent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Point to steer toward, in field coordinates
    pub target: Vec2,
    /// Speed boost held
    pub boost: bool,
}

/// Produces the player's intent once per tick
pub trait InputSource {
    fn poll(&mut self, player: &Character, characters: &[Character]) -> PlayerInput;
}

/// A fixed intent, e.g. a pointer resting at one spot
impl InputSource for PlayerInput {
    fn poll(&mut self, _player: &Character, _characters: &[Character]) -> PlayerInput {
        *self
    }
}

/// Draws a frame from a read-only snapshot
pub trait Renderer {
    fn render(&mut self, snapshot: &FieldSnapshot);
}

/// Renderer that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _snapshot: &FieldSnapshot) {}
}

/// Applies player intent to the field's player
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerController {
    /// Slow down when nearing the target instead of arriving at full speed
    pub velocity_scaling: bool,
}

impl PlayerController {
    pub fn apply<R: RandomSource>(&self, field: &mut Field<R>, input: PlayerInput, dt: f32) {
        if field.game_end().is_over() {
            return;
        }
        let player = field.player_mut();
        player.set_boost(input.boost);
        player.move_toward_point(input.target, self.velocity_scaling, dt);
    }
}

/// Moves every AI according to its current behavior state
#[derive(Debug, Clone, Copy, Default)]
pub struct AiController;

impl AiController {
    pub fn drive<R: RandomSource>(&self, field: &mut Field<R>, dt: f32) {
        if field.game_end().is_over() {
            return;
        }
        let FieldParts {
            player,
            characters,
            rng,
            bounds,
        } = field.parts_mut();
        let target = player.position();

        for aip in characters.iter_mut() {
            match aip.behavior() {
                Some(BehaviorState::Wander) => aip.wander(&mut *rng, dt),
                Some(BehaviorState::Attack) => aip.move_toward_point(target, false, dt),
                Some(BehaviorState::Flee) => aip.move_away_from_point(target, dt),
                Some(BehaviorState::AvoidWalls) => {
                    let wall = nearest_wall_direction(aip.position(), bounds);
                    aip.bounce(wall, dt);
                }
                None => {}
            }
        }
    }
}

/// Demo input: flee threats, chase prey, otherwise drift to the centre
#[derive(Debug, Clone)]
pub struct Autopilot {
    bounds: Vec2,
    /// Larger AIs closer than this are run from
    pub danger_radius: f32,
    /// Boost toward prey closer than this
    pub boost_radius: f32,
    /// Growth progress kept in reserve before boosting after prey
    pub boost_reserve: f32,
}

impl Autopilot {
    pub fn new(bounds: Vec2) -> Self {
        Self {
            bounds,
            danger_radius: 200.0,
            boost_radius: 120.0,
            boost_reserve: 30.0,
        }
    }

    fn nearest<'a>(
        player: &Character,
        characters: &'a [Character],
        pred: impl Fn(&Character) -> bool,
    ) -> Option<(&'a Character, f32)> {
        let pos = player.position();
        characters
            .iter()
            .filter(|c| pred(*c))
            .map(|c| (c, c.position().distance(pos)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, player: &Character, characters: &[Character]) -> PlayerInput {
        let pos = player.position();
        let size = player.size();
        let progress = player.growth_progress();

        let threat = Self::nearest(player, characters, |c| c.size() > size)
            .filter(|&(_, dist)| dist < self.danger_radius);
        let input = if let Some((threat, dist)) = threat {
            let away = (pos - threat.position()).normalize_or_zero();
            let away = if away == Vec2::ZERO { Vec2::X } else { away };
            PlayerInput {
                target: pos + away * 100.0,
                boost: progress > 0.0 && dist < self.danger_radius * 0.5,
            }
        } else if let Some((prey, dist)) = Self::nearest(player, characters, |c| c.size() < size) {
            PlayerInput {
                target: prey.position(),
                boost: dist < self.boost_radius && progress > self.boost_reserve,
            }
        } else {
            PlayerInput {
                target: self.bounds * 0.5,
                boost: false,
            }
        };

        PlayerInput {
            target: input.target.clamp(Vec2::ZERO, self.bounds),
            ..input
        }
    }
}
