/*
 * Math Helpers
 *
 * Range mapping and random sampling shared by the simulations.
 */

use rand::Rng;

use crate::error::{SimError, SimResult};

/// Map `value` from `[from_min, from_max]` onto `[to_min, to_max]`.
///
/// The value is not clamped, so inputs outside the source range map outside
/// the target range. A zero-width source range is rejected.
pub fn scale(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> SimResult<f32> {
    if from_min == from_max {
        return Err(SimError::ZeroWidthRange(from_min));
    }

    Ok((value - from_min) / (from_max - from_min) * (to_max - to_min) + to_min)
}

/// Same as [`scale`] but the result is held inside the target range.
pub fn scale_clamp(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> SimResult<f32> {
    if from_min == from_max {
        return Err(SimError::ZeroWidthRange(from_min));
    }

    if value <= from_min {
        return Ok(to_min);
    }
    if value >= from_max {
        return Ok(to_max);
    }

    scale(value, from_min, from_max, to_min, to_max)
}

/// Uniform sample in `[min, max)`, or `min` when the range is empty.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> SimResult<f32> {
    if min > max {
        return Err(SimError::InvalidRange { min, max });
    }
    if min == max {
        return Ok(min);
    }

    Ok(rng.gen_range(min..max))
}
