/*
 * Error Module
 *
 * Errors raised by the simulations. These are precondition violations:
 * they abort the current operation or tick and are reported to the caller,
 * they never take the application down.
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("canvas bounds are required for noise movement mode")]
    MissingBounds,

    #[error("source range cannot have zero width (from_min == from_max == {0})")]
    ZeroWidthRange(f32),

    #[error("minimum value {min} cannot be greater than maximum value {max}")]
    InvalidRange { min: f32, max: f32 },

    #[error("quadtree node capacity must be at least 1")]
    InvalidCapacity,

    #[error("quadtree boundary must have positive half extents, got {half_width}x{half_height}")]
    InvalidBoundary { half_width: f32, half_height: f32 },

    #[error("unable to read configuration")]
    ConfigIo(#[from] std::io::Error),

    #[error("unable to parse configuration")]
    ConfigParse(#[from] serde_yaml::Error),
}

pub type SimResult<T> = Result<T, SimError>;
