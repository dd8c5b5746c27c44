/*
 * Vector Module
 *
 * 2D vector helpers on top of nannou's `Vec2`. Component-wise arithmetic
 * (add, subtract, scale, divide) is the `Vec2` operators; this module adds
 * the magnitude-shaping operations the simulations rely on.
 *
 * Angles are always radians. Callers working in degrees convert with
 * `f32::to_radians` before calling `from_angle`.
 */

use nannou::prelude::{vec2, Vec2};

pub type Vector2D = Vec2;

pub trait VectorExt: Sized {
    /// Euclidean length, never negative.
    fn magnitude(self) -> f32;

    /// Unit vector in the same direction. The zero vector maps to itself.
    fn normalized(self) -> Self;

    /// Same direction, new length. The zero vector stays zero.
    fn with_magnitude(self, magnitude: f32) -> Self;

    /// Cap the length at `max`, leaving shorter vectors untouched.
    fn limit(self, max: f32) -> Self;

    /// Hold the length inside `[min, max]`.
    fn constrain(self, min: f32, max: f32) -> Self;

    /// Heading in radians, `atan2(y, x)`.
    fn to_angle(self) -> f32;
}

impl VectorExt for Vec2 {
    #[inline]
    fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    fn normalized(self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Vec2::ZERO;
        }
        self / mag
    }

    #[inline]
    fn with_magnitude(self, magnitude: f32) -> Self {
        self.normalized() * magnitude
    }

    #[inline]
    fn limit(self, max: f32) -> Self {
        if self.magnitude() <= max {
            self
        } else {
            self.with_magnitude(max)
        }
    }

    fn constrain(self, min: f32, max: f32) -> Self {
        let mag = self.magnitude().clamp(min, max);
        self.normalized() * mag
    }

    #[inline]
    fn to_angle(self) -> f32 {
        self.y.atan2(self.x)
    }
}

/// Vector of the given length pointing along `angle` (radians, 0 points right).
#[inline]
pub fn from_angle(angle: f32, magnitude: f32) -> Vec2 {
    vec2(angle.cos() * magnitude, angle.sin() * magnitude)
}

/// Distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).magnitude()
}
