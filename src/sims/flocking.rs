/*
 * Flocking Simulation
 *
 * A flock of boids wrapping around the canvas. Clicking adds a boid at the
 * pointer.
 */

use log::debug;
use nannou::color::{rgba, LinSrgba};
use nannou::prelude::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::boid::create_boid;
use crate::config::AppConfig;
use crate::error::SimResult;
use crate::flock::Flock;
use crate::kinematics::CanvasSize;
use crate::params::FlockParams;
use crate::simulation::Simulation;
use crate::surface::{color, Surface};
use crate::vector;

pub struct FlockingSim {
    pub flock: Flock,
    params: FlockParams,
    rng: StdRng,
}

impl FlockingSim {
    pub fn new(params: FlockParams, size: CanvasSize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let flock = Flock::populate(&mut rng, &params, size);
        Self { flock, params, rng }
    }

    fn perception_color() -> LinSrgba {
        color(rgba(1.0, 0.0, 0.0, 0.5))
    }
}

impl Simulation for FlockingSim {
    fn name(&self) -> &'static str {
        "Flocking"
    }

    fn update(&mut self, dt_ms: f64, size: CanvasSize) -> SimResult<()> {
        self.flock.step(dt_ms, size, &self.params);
        Ok(())
    }

    fn draw(&self, surface: &mut dyn Surface, size: CanvasSize) {
        surface.clear_rect(0.0, 0.0, size.width, size.height);
        for boid in &self.flock.boids {
            if self.params.show_perception {
                boid.draw_perception(surface, Self::perception_color());
            }
            boid.draw(surface);
        }
    }

    fn pointer_pressed(&mut self, position: Vec2, _size: CanvasSize) {
        let heading = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let mut boid = create_boid(
            position,
            vector::from_angle(heading, self.params.max_speed),
            self.params.perception,
        );
        boid.width = self.params.boid_width;
        boid.length = self.params.boid_length;
        self.flock.push(boid);
    }

    fn clear(&mut self) {
        self.flock.clear();
    }

    fn reset(&mut self, size: CanvasSize) {
        self.flock.clear();
        self.flock.resize(&mut self.rng, &self.params, size);
        debug!("flock reset with {} boids", self.flock.len());
    }

    fn configure(&mut self, config: &AppConfig, size: CanvasSize) {
        let count_changed = config.flock.num_boids != self.params.num_boids;
        self.params = config.flock.clone();
        self.flock.apply_params(&self.params);
        if count_changed {
            self.flock.resize(&mut self.rng, &self.params, size);
        }
    }

    fn entity_count(&self) -> usize {
        self.flock.len()
    }
}
