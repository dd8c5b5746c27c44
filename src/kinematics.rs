/*
 * Kinematics Module
 *
 * Position/velocity/acceleration integration and the two edge policies
 * (bounce and wrap) shared by circles, boids, raindrops and walkers.
 * Simulations receive delta-time in milliseconds from the frame driver;
 * the integration here works in seconds.
 */

use nannou::prelude::Vec2;
use serde::{Deserialize, Serialize};

/// Drawable area in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    /// A minimized window reports a zero-sized canvas.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    Bounce,
    Wrap,
}

#[inline]
pub fn ms_to_secs(dt_ms: f64) -> f32 {
    (dt_ms / 1000.0) as f32
}

/// `velocity += acceleration * dt`, `position += velocity * dt`, then the
/// acceleration is consumed.
#[inline]
pub fn integrate(position: &mut Vec2, velocity: &mut Vec2, acceleration: &mut Vec2, dt_secs: f32) {
    *velocity += *acceleration * dt_secs;
    *position += *velocity * dt_secs;
    *acceleration = Vec2::ZERO;
}

/// Keep a body of `radius` inside the canvas. A body touching an edge is
/// pushed back to it and its velocity is pointed away from that edge.
/// Returns true when any edge was hit.
pub fn bounce(position: &mut Vec2, velocity: &mut Vec2, radius: f32, size: CanvasSize) -> bool {
    let mut hit = false;

    if position.x - radius <= 0.0 {
        position.x = radius;
        velocity.x = velocity.x.abs();
        hit = true;
    } else if position.x + radius >= size.width {
        position.x = size.width - radius;
        velocity.x = -velocity.x.abs();
        hit = true;
    }

    if position.y - radius <= 0.0 {
        position.y = radius;
        velocity.y = velocity.y.abs();
        hit = true;
    } else if position.y + radius >= size.height {
        position.y = size.height - radius;
        velocity.y = -velocity.y.abs();
        hit = true;
    }

    hit
}

/// Teleport a point that left the canvas to the opposite edge.
pub fn wrap(position: &mut Vec2, size: CanvasSize) -> bool {
    let mut hit = false;

    if position.x > size.width {
        position.x = 0.0;
        hit = true;
    } else if position.x < 0.0 {
        position.x = size.width;
        hit = true;
    }

    if position.y > size.height {
        position.y = 0.0;
        hit = true;
    } else if position.y < 0.0 {
        position.y = size.height;
        hit = true;
    }

    hit
}

impl EdgePolicy {
    pub fn apply(self, position: &mut Vec2, velocity: &mut Vec2, radius: f32, size: CanvasSize) -> bool {
        match self {
            EdgePolicy::Bounce => bounce(position, velocity, radius, size),
            EdgePolicy::Wrap => wrap(position, size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::vec2;

    const SIZE: CanvasSize = CanvasSize { width: 800.0, height: 600.0 };

    #[test]
    fn test_integrate_one_second() {
        let mut pos = Vec2::ZERO;
        let mut vel = vec2(10.0, 0.0);
        let mut acc = Vec2::ZERO;

        integrate(&mut pos, &mut vel, &mut acc, ms_to_secs(1000.0));

        assert_eq!(pos, vec2(10.0, 0.0));
        assert_eq!(vel, vec2(10.0, 0.0));
    }

    #[test]
    fn test_integrate_consumes_acceleration() {
        let mut pos = Vec2::ZERO;
        let mut vel = Vec2::ZERO;
        let mut acc = vec2(0.0, 20.0);

        integrate(&mut pos, &mut vel, &mut acc, 0.5);

        assert_eq!(vel, vec2(0.0, 10.0));
        assert_eq!(pos, vec2(0.0, 5.0));
        assert_eq!(acc, Vec2::ZERO);
    }

    #[test]
    fn test_bounce_left_edge() {
        let radius = 25.0;
        let mut pos = vec2(radius - 1.0, 300.0);
        let mut vel = vec2(-40.0, 3.0);

        assert!(bounce(&mut pos, &mut vel, radius, SIZE));
        assert_eq!(pos.x, radius);
        assert_eq!(vel.x, 40.0);
        assert_eq!(vel.y, 3.0);
    }

    #[test]
    fn test_bounce_bottom_right_corner() {
        let mut pos = vec2(799.0, 599.0);
        let mut vel = vec2(5.0, 7.0);

        bounce(&mut pos, &mut vel, 10.0, SIZE);
        assert_eq!(pos, vec2(790.0, 590.0));
        assert_eq!(vel, vec2(-5.0, -7.0));
    }

    #[test]
    fn test_bounce_inside_is_untouched() {
        let mut pos = vec2(400.0, 300.0);
        let mut vel = vec2(-5.0, 7.0);
        assert!(!bounce(&mut pos, &mut vel, 10.0, SIZE));
        assert_eq!(vel, vec2(-5.0, 7.0));
    }

    #[test]
    fn test_wrap() {
        let mut pos = vec2(801.0, 300.0);
        assert!(wrap(&mut pos, SIZE));
        assert_eq!(pos.x, 0.0);

        let mut pos = vec2(10.0, -0.5);
        wrap(&mut pos, SIZE);
        assert_eq!(pos, vec2(10.0, 600.0));

        let mut pos = vec2(800.0, 600.0);
        assert!(!wrap(&mut pos, SIZE));
    }
}
