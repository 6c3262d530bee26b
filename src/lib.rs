//! Hungry Sharks - an eat-or-be-eaten arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (steering, AI behavior, eating, win/lose)
//! - `controller`: Input and AI dispatch feeding movement into the simulation
//! - `game`: Fixed timestep loop wiring input, controllers, field and renderer
//! - `settings`: Data-driven session configuration

pub mod controller;
pub mod error;
pub mod game;
pub mod settings;
pub mod sim;

pub use controller::{AiController, Autopilot, InputSource, PlayerController, PlayerInput, Renderer};
pub use error::GameError;
pub use game::Game;
pub use settings::GameConfig;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (30 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 30.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default field dimensions
    pub const DEFAULT_FIELD_WIDTH: f32 = 800.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 600.0;
    pub const DEFAULT_NUM_CHARACTERS: usize = 5;

    /// Sizes covered by the speed/fov tables
    pub const MIN_SIZE: u32 = 1;
    pub const MAX_SIZE: u32 = 10;
    /// Player size at the start of a session
    pub const PLAYER_START_SIZE: u32 = 2;
    /// Player wins once its size exceeds this
    pub const WIN_SIZE: u32 = 10;

    /// Base speed table multiplier
    pub const MAX_SPEED_SCALE: f32 = 2.0;
    /// Fov table multiplier
    pub const FOV_SCALE: f32 = 3.0;
    /// Player speed multiplier while boosting
    pub const BOOST_MULTIPLIER: f32 = 1.5;
    /// Growth progress drained per second of boosting
    pub const BOOST_DRAIN_RATE: f32 = 15.0;

    /// Progress needed to evolve to the next size
    pub const GROWTH_THRESHOLD: f32 = 100.0;
    /// Progress carried into the next size after evolving
    pub const GROWTH_RESIDUAL: f32 = 15.0;
    /// Growth for a meal of equal size (scaled by aip.size / player.size)
    pub const MEAL_GROWTH: f32 = 0.5 * 100.0;

    /// Below this distance the target counts as reached
    pub const ARRIVAL_RADIUS: f32 = 5.0;
    /// Distance at which approach scaling reaches full speed
    pub const APPROACH_SCALING_DISTANCE: f32 = 200.0;

    /// Distance from an edge at which an AI starts avoiding it
    pub const WALL_MARGIN: f32 = 25.0;
    /// Centre distance below which an AI touches the player
    pub const COLLISION_DISTANCE: f32 = 30.0;
    /// Maximum AIs larger than the player allowed by the spawner
    pub const NEMESIS_CAP: usize = 2;
    /// How far below the player the spawn band reaches
    pub const SPAWN_BAND_BELOW: u32 = 2;
    /// Relocated AIs land this many fovs from the player
    pub const RELOCATE_FACTOR: f32 = 1.25;

    /// Simulated seconds between wander heading rerolls
    pub const WANDER_REROLL_SECS: f32 = 0.2;
    /// Half-width of the wander cone (radians, ±30°)
    pub const WANDER_CONE: f32 = std::f32::consts::FRAC_PI_6;
}

/// Reflect `v` about a unit `normal`
#[inline]
pub fn reflect(v: Vec2, normal: Vec2) -> Vec2 {
    v - 2.0 * v.dot(normal) * normal
}

/// Rotate `v` counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}
