/*
 * Boid Module
 *
 * This module defines the Boid struct and its steering rules.
 * Each boid follows three main rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * The rules look at the whole flock. A boid is identified by its index in the
 * flock slice, never by its position, so two boids sitting on the same spot
 * still see each other as neighbors.
 */

use nannou::color::LinSrgba;
use nannou::prelude::{pt2, Vec2};
use rand::Rng;

use crate::kinematics::{self, CanvasSize};
use crate::surface::Surface;
use crate::vector::{self, VectorExt};

#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Heading in radians. Always `atan2(velocity.y, velocity.x)` after `update`.
    pub angle: f32,
    pub perception: f32,
    pub width: f32,
    pub length: f32,
    pub fill: LinSrgba,
    pub stroke: Option<LinSrgba>,
}

pub fn create_boid(position: Vec2, velocity: Vec2, perception: f32) -> Boid {
    Boid {
        position,
        velocity,
        acceleration: Vec2::ZERO,
        angle: velocity.to_angle(),
        perception,
        width: 10.0,
        length: 15.0,
        fill: LinSrgba::new(1.0, 1.0, 1.0, 1.0),
        stroke: None,
    }
}

/// Boid at a random spot on the canvas heading in a random direction.
pub fn random_boid<R: Rng + ?Sized>(rng: &mut R, size: CanvasSize, speed: f32, perception: f32) -> Boid {
    let position = pt2(rng.gen_range(0.0..=size.width), rng.gen_range(0.0..=size.height));
    let velocity = vector::from_angle(rng.gen_range(0.0..std::f32::consts::TAU), speed);
    create_boid(position, velocity, perception)
}

impl Boid {
    // Apply a force to the boid
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Fold the accumulated force into the velocity and cap the speed. The
    /// position is left alone so edges can be handled first.
    pub fn steer(&mut self, dt_secs: f32, max_speed: f32) {
        self.velocity = (self.velocity + self.acceleration * dt_secs).limit(max_speed);
        self.acceleration = Vec2::ZERO;
    }

    pub fn wrap_edges(&mut self, size: CanvasSize) {
        kinematics::wrap(&mut self.position, size);
    }

    // Move along the current velocity and refresh the heading
    pub fn update(&mut self, dt_secs: f32) {
        self.position += self.velocity * dt_secs;
        self.angle = self.velocity.to_angle();
    }

    // Steer away from boids closer than `radius`
    pub fn separation(&self, index: usize, boids: &[Boid], radius: f32, max_force: f32) -> Vec2 {
        let mut steering = Vec2::ZERO;
        let mut count = 0;

        for (i, other) in boids.iter().enumerate() {
            if i == index {
                continue;
            }
            let d = vector::distance(self.position, other.position);

            // Coincident boids have no direction to push along
            if d > 0.0 && d < radius {
                steering += (self.position - other.position) / d;
                count += 1;
            }
        }

        if count > 0 {
            steering /= count as f32;
        }

        steering.limit(max_force)
    }

    // Match the average velocity of boids within perception
    pub fn alignment(&self, index: usize, boids: &[Boid], max_force: f32) -> Vec2 {
        let mut average = Vec2::ZERO;
        let mut count = 0;

        for (i, other) in boids.iter().enumerate() {
            if i != index && vector::distance(self.position, other.position) < self.perception {
                average += other.velocity;
                count += 1;
            }
        }

        if count == 0 {
            return Vec2::ZERO;
        }

        average /= count as f32;
        (average - self.velocity).limit(max_force)
    }

    // Head for the center of mass of boids within perception
    pub fn cohesion(&self, index: usize, boids: &[Boid], max_force: f32) -> Vec2 {
        let mut center = Vec2::ZERO;
        let mut count = 0;

        for (i, other) in boids.iter().enumerate() {
            if i != index && vector::distance(self.position, other.position) < self.perception {
                center += other.position;
                count += 1;
            }
        }

        if count == 0 {
            return Vec2::ZERO;
        }

        center /= count as f32;
        (center - self.position).with_magnitude(max_force)
    }

    /// Triangle pointing along `angle`, tip first.
    pub fn outline(&self) -> [Vec2; 3] {
        let half_length = self.length / 2.0;
        let half_width = self.width / 2.0;
        let (sin, cos) = self.angle.sin_cos();
        let rotate = |x: f32, y: f32| self.position + Vec2::new(x * cos - y * sin, x * sin + y * cos);

        [
            rotate(half_length, 0.0),
            rotate(-half_length, -half_width),
            rotate(-half_length, half_width),
        ]
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let points = self.outline();
        surface.set_fill(self.fill);
        surface.fill_polygon(&points);

        if let Some(stroke) = self.stroke {
            surface.set_stroke(stroke);
            surface.set_line_width(1.0);
            surface.line(points[0], points[1]);
            surface.line(points[1], points[2]);
            surface.line(points[2], points[0]);
        }
    }

    pub fn draw_perception(&self, surface: &mut dyn Surface, color: LinSrgba) {
        surface.set_stroke(color);
        surface.set_line_width(1.0);
        surface.stroke_circle(self.position, self.perception);
    }
}
