//! Setup and loop contract violations

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameError {
    /// Field width or height is non-positive or not finite
    InvalidDimensions { width: f32, height: f32 },
    /// Timestep fed to the loop is non-positive or not finite
    InvalidTimestep { dt: f32 },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => write!(
                f,
                "invalid field dimensions: {width}x{height} (both must be positive and finite)"
            ),
            Self::InvalidTimestep { dt } => {
                write!(f, "invalid timestep: {dt} (must be positive and finite)")
            }
        }
    }
}

impl std::error::Error for GameError {}

/// Positive, finite timestep check shared by the loop and the movement primitives
#[inline]
pub fn valid_dt(dt: f32) -> bool {
    dt.is_finite() && dt > 0.0
}
