/*
 * Rain Simulation
 *
 * Parallax rain: drops spawn above the canvas at random depths and fall
 * forever, restarting from the top edge.
 */

use log::{error, warn};
use nannou::color::rgb;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::AppConfig;
use crate::error::SimResult;
use crate::kinematics::{self, CanvasSize};
use crate::params::RainParams;
use crate::raindrop::{create_raindrop, Raindrop};
use crate::simulation::Simulation;
use crate::surface::{color, Surface};

pub struct RainSim {
    pub drops: Vec<Raindrop>,
    params: RainParams,
    rng: StdRng,
}

impl RainSim {
    pub fn new(params: RainParams, size: CanvasSize, seed: u64) -> Self {
        let mut sim = Self {
            drops: Vec::with_capacity(params.num_drops),
            params,
            rng: StdRng::seed_from_u64(seed),
        };
        if let Err(e) = sim.fill(size) {
            error!("unable to create raindrops: {}", e);
        }
        sim
    }

    /// Top the population up to `params.num_drops`, dropping extras.
    fn fill(&mut self, size: CanvasSize) -> SimResult<()> {
        self.drops.truncate(self.params.num_drops);
        let [r, g, b] = self.params.color;
        let drop_color = color(rgb(r, g, b));

        while self.drops.len() < self.params.num_drops {
            let drop = create_raindrop(&mut self.rng, &self.params, size, drop_color)?;
            self.drops.push(drop);
        }
        Ok(())
    }
}

impl Simulation for RainSim {
    fn name(&self) -> &'static str {
        "Rain"
    }

    fn update(&mut self, dt_ms: f64, size: CanvasSize) -> SimResult<()> {
        let dt = kinematics::ms_to_secs(dt_ms);
        let gravity = nannou::prelude::vec2(0.0, self.params.gravity);

        for drop in &mut self.drops {
            drop.apply_force(gravity);
            drop.update(dt, size);
        }
        Ok(())
    }

    fn draw(&self, surface: &mut dyn Surface, size: CanvasSize) {
        surface.clear_rect(0.0, 0.0, size.width, size.height);
        for drop in &self.drops {
            drop.draw(surface);
        }
    }

    fn clear(&mut self) {
        self.drops.clear();
    }

    fn reset(&mut self, size: CanvasSize) {
        self.drops.clear();
        if let Err(e) = self.fill(size) {
            warn!("rain reset incomplete: {}", e);
        }
    }

    fn configure(&mut self, config: &AppConfig, size: CanvasSize) {
        let restyle = config.rain != self.params && config.rain.num_drops == self.params.num_drops;
        self.params = config.rain.clone();
        if restyle {
            // Depth scaling changed: rebuild every drop with the new ranges.
            self.drops.clear();
        }
        if let Err(e) = self.fill(size) {
            warn!("rain reconfigure incomplete: {}", e);
        }
    }

    fn entity_count(&self) -> usize {
        self.drops.len()
    }
}
