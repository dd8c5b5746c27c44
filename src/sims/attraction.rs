/*
 * Attraction Simulation
 *
 * Click to launch a circle in a random direction. Every circle pulls on every
 * other one and they bounce off the canvas edges.
 */

use nannou::color::rgb;
use nannou::prelude::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::circle::{attraction, create_circle, Circle};
use crate::config::AppConfig;
use crate::error::SimResult;
use crate::kinematics::{self, CanvasSize};
use crate::params::AttractionParams;
use crate::simulation::Simulation;
use crate::surface::{color, Surface};
use crate::vector;

pub struct AttractionSim {
    pub circles: Vec<Circle>,
    params: AttractionParams,
    rng: StdRng,
}

impl AttractionSim {
    pub fn new(params: AttractionParams, seed: u64) -> Self {
        Self {
            circles: Vec::new(),
            params,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn add_circle(&mut self, position: Vec2) {
        let direction = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let velocity = vector::from_angle(direction, self.params.speed);
        let [r, g, b] = self.params.color;
        let fill = color(rgb(r, g, b));
        self.circles.push(create_circle(position, velocity, self.params.radius, fill));
    }
}

impl Simulation for AttractionSim {
    fn name(&self) -> &'static str {
        "Attraction"
    }

    fn update(&mut self, dt_ms: f64, size: CanvasSize) -> SimResult<()> {
        let dt = kinematics::ms_to_secs(dt_ms);
        let snapshot = self.circles.clone();
        let p = &self.params;

        for (i, circle) in self.circles.iter_mut().enumerate() {
            for (j, other) in snapshot.iter().enumerate() {
                if i != j {
                    let force = attraction(circle, other, p.strength, p.min_distance, p.max_distance);
                    circle.apply_force(force);
                }
            }
            circle.update(dt, size);
        }

        Ok(())
    }

    fn draw(&self, surface: &mut dyn Surface, size: CanvasSize) {
        surface.clear_rect(0.0, 0.0, size.width, size.height);
        for circle in &self.circles {
            circle.draw(surface);
        }
    }

    fn pointer_pressed(&mut self, position: Vec2, _size: CanvasSize) {
        self.add_circle(position);
    }

    fn clear(&mut self) {
        self.circles.clear();
    }

    fn reset(&mut self, _size: CanvasSize) {
        self.circles.clear();
    }

    fn configure(&mut self, config: &AppConfig, _size: CanvasSize) {
        self.params = config.attraction.clone();
        for circle in &mut self.circles {
            circle.radius = self.params.radius;
        }
    }

    fn entity_count(&self) -> usize {
        self.circles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::VectorExt;
    use nannou::prelude::vec2;

    #[test]
    fn test_click_adds_circle_at_speed() {
        let mut sim = AttractionSim::new(AttractionParams::default(), 1);
        sim.pointer_pressed(vec2(200.0, 200.0), CanvasSize::new(800.0, 600.0));

        assert_eq!(sim.entity_count(), 1);
        assert!((sim.circles[0].velocity.magnitude() - 50.0).abs() < 1e-3);
        assert_eq!(sim.circles[0].radius, 25.0);
    }

    #[test]
    fn test_two_circles_close_in() {
        let size = CanvasSize::new(800.0, 600.0);
        let mut sim = AttractionSim::new(AttractionParams { speed: 0.0, ..AttractionParams::default() }, 1);
        sim.add_circle(vec2(200.0, 300.0));
        sim.add_circle(vec2(600.0, 300.0));

        let before = sim.circles[1].position.x - sim.circles[0].position.x;
        for _ in 0..10 {
            sim.update(16.0, size).unwrap();
        }
        let after = sim.circles[1].position.x - sim.circles[0].position.x;

        assert!(after < before);
        assert!(sim.circles[0].velocity.x > 0.0);
        assert!(sim.circles[1].velocity.x < 0.0);
    }
}
