/*
 * Flock Module
 *
 * One flocking step over the whole flock. Every boid reads the same snapshot
 * of the flock taken at the start of the step, so the order boids are updated
 * in does not change what they see.
 */

use log::trace;
use rand::Rng;

use crate::boid::{random_boid, Boid};
use crate::kinematics::{self, CanvasSize};
use crate::params::FlockParams;

#[derive(Debug, Clone, Default)]
pub struct Flock {
    pub boids: Vec<Boid>,
}

impl Flock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn populate<R: Rng + ?Sized>(rng: &mut R, params: &FlockParams, size: CanvasSize) -> Self {
        let mut flock = Self::new();
        flock.resize(rng, params, size);
        flock
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn push(&mut self, boid: Boid) {
        self.boids.push(boid);
    }

    pub fn clear(&mut self) {
        self.boids.clear();
    }

    /// Grow or shrink to `params.num_boids`, keeping existing boids.
    pub fn resize<R: Rng + ?Sized>(&mut self, rng: &mut R, params: &FlockParams, size: CanvasSize) {
        self.boids.truncate(params.num_boids);
        while self.boids.len() < params.num_boids {
            let mut boid = random_boid(rng, size, params.max_speed, params.perception);
            boid.width = params.boid_width;
            boid.length = params.boid_length;
            self.boids.push(boid);
        }
    }

    /// Push shape and perception changes into every boid.
    pub fn apply_params(&mut self, params: &FlockParams) {
        for boid in &mut self.boids {
            boid.perception = params.perception;
            boid.width = params.boid_width;
            boid.length = params.boid_length;
        }
    }

    pub fn step(&mut self, dt_ms: f64, size: CanvasSize, params: &FlockParams) {
        let dt = kinematics::ms_to_secs(dt_ms);
        let separation_radius = params.effective_separation_radius();
        let snapshot = self.boids.clone();

        for (i, boid) in self.boids.iter_mut().enumerate() {
            let separation = boid.separation(i, &snapshot, separation_radius, params.max_force);
            let alignment = boid.alignment(i, &snapshot, params.max_force);
            let cohesion = boid.cohesion(i, &snapshot, params.max_force);

            boid.apply_force(separation * params.separation_weight);
            boid.apply_force(alignment * params.alignment_weight);
            boid.apply_force(cohesion * params.cohesion_weight);

            boid.steer(dt, params.max_speed);
            boid.wrap_edges(size);
            boid.update(dt);
        }

        trace!("flock step: {} boids, dt {:.2} ms", self.boids.len(), dt_ms);
    }
}
