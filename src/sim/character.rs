//! Characters and their steering primitives
//!
//! Player and AI characters share one struct: a common body (size, position,
//! velocity) plus a [`Role`] payload. The player's boosted speed and
//! boost-draining integration are branches on the role, not overrides.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::behavior::BehaviorState;
use super::rng::RandomSource;
use crate::consts::*;
use crate::error::valid_dt;
use crate::{reflect, rotate};

/// Base speed per size (index = size - 1), before [`MAX_SPEED_SCALE`]
static SPEED_FROM_SIZE: [f32; 10] = [50.0, 75.0, 70.0, 68.0, 65.0, 65.0, 60.0, 58.0, 55.0, 50.0];

/// Base reaction radius per size (index = size - 1), before [`FOV_SCALE`]
static FOV_FROM_SIZE: [f32; 10] = [50.0, 75.0, 70.0, 68.0, 65.0, 65.0, 60.0, 58.0, 55.0, 50.0];

#[inline]
fn table_index(size: u32) -> usize {
    (size.clamp(MIN_SIZE, MAX_SIZE) - MIN_SIZE) as usize
}

/// Unboosted max speed for a size
pub fn base_speed(size: u32) -> f32 {
    SPEED_FROM_SIZE[table_index(size)] * MAX_SPEED_SCALE
}

/// Reaction radius for an AI of this size
pub fn fov_for_size(size: u32) -> f32 {
    FOV_FROM_SIZE[table_index(size)] * FOV_SCALE
}

/// Variant-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Role {
    Player {
        /// Points toward the next size; drained by boosting, never below zero
        growth_progress: f32,
        boost: bool,
    },
    Ai {
        /// Fixed at construction from the size table
        fov: f32,
        behavior: BehaviorState,
        /// Simulated seconds since the last wander reroll
        wander_clock: f32,
    },
}

impl Role {
    /// Short label for logs and debug overlays
    pub fn label(&self) -> &'static str {
        match self {
            Role::Player { .. } => "player",
            Role::Ai { behavior, .. } => behavior.as_str(),
        }
    }
}

/// A player or AI character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    id: u32,
    size: u32,
    position: Vec2,
    velocity: Vec2,
    role: Role,
}

impl Character {
    pub fn player(id: u32, size: u32, position: Vec2) -> Self {
        Self {
            id,
            size,
            position,
            velocity: Vec2::ZERO,
            role: Role::Player {
                growth_progress: 0.0,
                boost: false,
            },
        }
    }

    pub fn ai(id: u32, size: u32, position: Vec2, velocity: Vec2, behavior: BehaviorState) -> Self {
        Self {
            id,
            size,
            position,
            velocity,
            role: Role::Ai {
                fov: fov_for_size(size),
                behavior,
                wander_clock: 0.0,
            },
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn is_player(&self) -> bool {
        matches!(self.role, Role::Player { .. })
    }

    /// Growth progress (always zero for AI characters)
    pub fn growth_progress(&self) -> f32 {
        match self.role {
            Role::Player { growth_progress, .. } => growth_progress,
            Role::Ai { .. } => 0.0,
        }
    }

    pub fn boost(&self) -> bool {
        matches!(self.role, Role::Player { boost: true, .. })
    }

    /// Set the boost intent; ignored for AI characters
    pub fn set_boost(&mut self, on: bool) {
        if let Role::Player { boost, .. } = &mut self.role {
            *boost = on;
        }
    }

    /// Reaction radius (zero for the player, who does not react)
    pub fn fov(&self) -> f32 {
        match self.role {
            Role::Ai { fov, .. } => fov,
            Role::Player { .. } => 0.0,
        }
    }

    pub fn behavior(&self) -> Option<BehaviorState> {
        match self.role {
            Role::Ai { behavior, .. } => Some(behavior),
            Role::Player { .. } => None,
        }
    }

    /// Set the behavior state; ignored for the player
    pub fn set_behavior(&mut self, state: BehaviorState) {
        if let Role::Ai { behavior, .. } = &mut self.role {
            *behavior = state;
        }
    }

    /// Top speed for the current size; the player moves 1.5x while boosting
    /// with growth progress left to spend
    pub fn max_speed(&self) -> f32 {
        let base = base_speed(self.size);
        match self.role {
            Role::Player {
                growth_progress,
                boost: true,
            } if growth_progress > 0.0 => base * BOOST_MULTIPLIER,
            _ => base,
        }
    }

    /// Add growth progress, evolving to the next size past the threshold
    pub(crate) fn grow(&mut self, amount: f32) {
        if let Role::Player { growth_progress, .. } = &mut self.role {
            *growth_progress += amount;
            if *growth_progress > GROWTH_THRESHOLD {
                *growth_progress = GROWTH_RESIDUAL;
                self.size += 1;
            }
        }
    }

    /// One Euler step of `velocity * dt`; a boosting player pays for it in growth
    pub fn update_pos(&mut self, dt: f32) {
        if !valid_dt(dt) {
            log::warn!("character {}: ignoring non-positive timestep {dt}", self.id);
            return;
        }
        if let Role::Player {
            growth_progress,
            boost: true,
        } = &mut self.role
        {
            *growth_progress = (*growth_progress - BOOST_DRAIN_RATE * dt).max(0.0);
        }
        self.position += self.velocity * dt;
    }

    /// Head for `target` at max speed
    ///
    /// Within [`ARRIVAL_RADIUS`] the heading drops to zero. With
    /// `velocity_scaling` the speed ramps from 0 to full over
    /// [`APPROACH_SCALING_DISTANCE`] so the character slows on approach.
    pub fn move_toward_point(&mut self, target: Vec2, velocity_scaling: bool, dt: f32) {
        if !valid_dt(dt) {
            log::warn!("character {}: ignoring non-positive timestep {dt}", self.id);
            return;
        }
        let displacement = target - self.position;
        let distance = displacement.length();
        let heading = if distance < ARRIVAL_RADIUS {
            Vec2::ZERO
        } else {
            displacement.normalize_or_zero()
        };

        let scale = if velocity_scaling {
            (distance / APPROACH_SCALING_DISTANCE).min(1.0)
        } else {
            1.0
        };
        self.velocity = heading * self.max_speed() * scale;
        self.update_pos(dt);
    }

    /// Run directly away from `target` at max speed
    pub fn move_away_from_point(&mut self, target: Vec2, dt: f32) {
        if !valid_dt(dt) {
            log::warn!("character {}: ignoring non-positive timestep {dt}", self.id);
            return;
        }
        let heading = -(target - self.position).normalize_or_zero();
        self.velocity = heading * self.max_speed();
        self.update_pos(dt);
    }

    /// Travel along `direction` at max speed, reversed if the current velocity
    /// points against it
    pub fn move_parallel(&mut self, direction: Vec2, dt: f32) {
        if !valid_dt(dt) {
            log::warn!("character {}: ignoring non-positive timestep {dt}", self.id);
            return;
        }
        let sign = if direction.dot(self.velocity) < 0.0 { -1.0 } else { 1.0 };
        self.velocity = direction.normalize_or_zero() * self.max_speed() * sign;
        self.update_pos(dt);
    }

    /// Reflect velocity off a wall running along `wall_direction`
    ///
    /// The reflection axis is `wall_direction` with its components swapped,
    /// i.e. the wall's normal for the two canonical wall directions.
    pub fn bounce(&mut self, wall_direction: Vec2, dt: f32) {
        if !valid_dt(dt) {
            log::warn!("character {}: ignoring non-positive timestep {dt}", self.id);
            return;
        }
        let normal = Vec2::new(wall_direction.y, wall_direction.x);
        self.velocity = reflect(self.velocity, normal);
        self.update_pos(dt);
    }

    /// 2D cross product of velocity and `wall_direction`; the sign tells which
    /// side of the wall line the character is heading for
    pub fn will_collide_with_wall(&self, wall_direction: Vec2) -> f32 {
        self.velocity.perp_dot(wall_direction)
    }

    /// Drift along the current heading, perturbing it within ±[`WANDER_CONE`]
    /// every [`WANDER_REROLL_SECS`] of simulated time
    ///
    /// A reroll tick only turns the heading; position integrates on the others.
    pub fn wander<R: RandomSource>(&mut self, rng: &mut R, dt: f32) {
        if !valid_dt(dt) {
            log::warn!("character {}: ignoring non-positive timestep {dt}", self.id);
            return;
        }
        if let Role::Ai { wander_clock, .. } = &mut self.role {
            *wander_clock += dt;
            if *wander_clock > WANDER_REROLL_SECS {
                *wander_clock = 0.0;
                let angle = rng.uniform(-WANDER_CONE, WANDER_CONE);
                self.velocity = rotate(self.velocity, angle);
                return;
            }
        }
        self.update_pos(dt);
    }

    /// Move out of the player's reach if spawned inside this AI's fov
    ///
    /// The AI is placed [`RELOCATE_FACTOR`] fovs from the player, on the side
    /// facing the field centre, clamped into the field. If clamping pulls it
    /// back inside the fov it goes to the field corner farthest from the
    /// player, which on very small fields may still be within reach.
    /// Returns whether the AI moved.
    pub fn relocate(&mut self, player_pos: Vec2, bounds: Vec2) -> bool {
        let fov = self.fov();
        let offset = self.position - player_pos;
        if offset.length() >= fov {
            return false;
        }

        let mut away = (bounds * 0.5 - player_pos).normalize_or_zero();
        if away == Vec2::ZERO {
            away = offset.normalize_or_zero();
        }
        if away == Vec2::ZERO {
            away = Vec2::X;
        }
        let target = (player_pos + away * fov * RELOCATE_FACTOR).clamp(Vec2::ZERO, bounds);
        self.position = if target.distance(player_pos) > fov {
            target
        } else {
            let corners = [Vec2::ZERO, Vec2::new(bounds.x, 0.0), Vec2::new(0.0, bounds.y), bounds];
            corners
                .into_iter()
                .max_by(|a, b| {
                    a.distance_squared(player_pos)
                        .total_cmp(&b.distance_squared(player_pos))
                })
                .unwrap_or(target)
        };
        log::debug!(
            "relocated ai {} to ({:.1}, {:.1})",
            self.id,
            self.position.x,
            self.position.y
        );
        true
    }
}
