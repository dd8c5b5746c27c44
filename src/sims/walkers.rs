/*
 * Walkers Simulation
 *
 * Self-propelled walkers that leave fading tails. All walkers share one
 * movement mode and one edge policy taken from the parameters; clicking
 * spawns another walker at the pointer.
 */

use log::{debug, warn};
use nannou::prelude::Vec2;
use noise::OpenSimplex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::AppConfig;
use crate::error::SimResult;
use crate::kinematics::CanvasSize;
use crate::params::WalkerParams;
use crate::simulation::Simulation;
use crate::surface::Surface;
use crate::walker::{create_walker, MovementMode, Walker};

pub struct WalkersSim {
    pub walkers: Vec<Walker>,
    params: WalkerParams,
    noise: OpenSimplex,
    rng: StdRng,
}

impl WalkersSim {
    pub fn new(params: WalkerParams, size: CanvasSize, seed: u64) -> Self {
        let mut sim = Self {
            walkers: Vec::with_capacity(params.num_walkers),
            params,
            // OpenSimplex takes a 32-bit seed.
            noise: OpenSimplex::new(seed as u32),
            rng: StdRng::seed_from_u64(seed),
        };
        sim.spawn_initial(size);
        sim
    }

    pub fn add_walker(&mut self, position: Vec2) {
        let walker = create_walker(
            &mut self.rng,
            position,
            MovementMode::from_params(&self.params),
            self.params.speed,
            self.params.radius,
        )
        .with_tail(self.params.tail_length);
        self.walkers.push(walker);
    }

    fn spawn_initial(&mut self, size: CanvasSize) {
        for _ in 0..self.params.num_walkers {
            let position = Vec2::new(
                self.rng.gen_range(0.0..=size.width.max(0.0)),
                self.rng.gen_range(0.0..=size.height.max(0.0)),
            );
            self.add_walker(position);
        }
    }
}

impl Simulation for WalkersSim {
    fn name(&self) -> &'static str {
        "Walkers"
    }

    fn update(&mut self, dt_ms: f64, size: CanvasSize) -> SimResult<()> {
        for walker in &mut self.walkers {
            walker.handle_edges(self.params.edges, size);
            walker.update_movement(dt_ms, Some(size), &self.noise)?;
            walker.advance(dt_ms);
        }
        Ok(())
    }

    fn draw(&self, surface: &mut dyn Surface, size: CanvasSize) {
        surface.clear_rect(0.0, 0.0, size.width, size.height);
        for walker in &self.walkers {
            walker.draw(surface, self.params.show_tail);
        }
    }

    fn pointer_pressed(&mut self, position: Vec2, _size: CanvasSize) {
        self.add_walker(position);
    }

    fn clear(&mut self) {
        self.walkers.clear();
    }

    fn reset(&mut self, size: CanvasSize) {
        self.walkers.clear();
        self.spawn_initial(size);
        debug!("spawned {} walkers", self.walkers.len());
    }

    fn configure(&mut self, config: &AppConfig, size: CanvasSize) {
        let previous = std::mem::replace(&mut self.params, config.walkers.clone());

        if previous.num_walkers != self.params.num_walkers {
            self.reset(size);
            return;
        }

        let mode_changed = previous.mode != self.params.mode
            || previous.sine_amplitude != self.params.sine_amplitude
            || previous.sine_frequency != self.params.sine_frequency
            || previous.noise_scale != self.params.noise_scale
            || previous.noise_max_turn_rate != self.params.noise_max_turn_rate;

        for walker in &mut self.walkers {
            walker.speed = self.params.speed;
            walker.radius = self.params.radius;
            if mode_changed {
                walker.mode = MovementMode::from_params(&self.params);
            }
            if walker.tail_length != self.params.tail_length {
                walker.tail_length = self.params.tail_length;
                while walker.tail.len() > walker.tail_length {
                    walker.tail.pop_front();
                }
            }
        }

        if previous.edges != self.params.edges {
            warn!("walker edge policy switched to {:?}", self.params.edges);
            for walker in &mut self.walkers {
                walker.clear_tail();
            }
        }
    }

    fn entity_count(&self) -> usize {
        self.walkers.len()
    }
}
