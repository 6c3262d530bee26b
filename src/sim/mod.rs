//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Injected, seedable randomness only
//! - Stable iteration order (collision indices ascending, IDs monotonic)
//! - No rendering or input dependencies

pub mod behavior;
pub mod character;
pub mod field;
pub mod rng;

pub use behavior::{BehaviorState, Wall, dist_to_walls, nearest_wall, nearest_wall_direction};
pub use character::{Character, Role, base_speed, fov_for_size};
pub use field::{CharacterView, Field, FieldParts, FieldSnapshot, GameEnd, meal_growth};
pub use rng::{RandomSource, ScriptedRandom, SimRng};
