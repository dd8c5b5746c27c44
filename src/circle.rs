/*
 * Circle Module
 *
 * Bouncing circles for the attraction simulation. Each circle is pulled toward
 * every other circle with an inverse-square force whose distance is held in a
 * band, so circles that overlap do not fling each other away.
 */

use nannou::color::LinSrgba;
use nannou::prelude::Vec2;

use crate::kinematics::{self, CanvasSize};
use crate::surface::Surface;
use crate::vector::VectorExt;

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub radius: f32,
    pub fill: LinSrgba,
    pub stroke: Option<LinSrgba>,
}

pub fn create_circle(position: Vec2, velocity: Vec2, radius: f32, fill: LinSrgba) -> Circle {
    Circle {
        position,
        velocity,
        acceleration: Vec2::ZERO,
        radius,
        fill,
        stroke: None,
    }
}

/// Inverse-square pull on `circle` toward `other`, px/s².
pub fn attraction(circle: &Circle, other: &Circle, strength: f32, min_distance: f32, max_distance: f32) -> Vec2 {
    let offset = other.position - circle.position;
    let d = offset.magnitude().clamp(min_distance, max_distance);
    offset.with_magnitude(strength / (d * d))
}

impl Circle {
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    pub fn update(&mut self, dt_secs: f32, size: CanvasSize) {
        kinematics::integrate(&mut self.position, &mut self.velocity, &mut self.acceleration, dt_secs);
        kinematics::bounce(&mut self.position, &mut self.velocity, self.radius, size);
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.set_fill(self.fill);
        surface.fill_circle(self.position, self.radius);

        if let Some(stroke) = self.stroke {
            surface.set_stroke(stroke);
            surface.set_line_width(1.0);
            surface.stroke_circle(self.position, self.radius);
        }
    }
}
