/*
 * Simulation Module
 *
 * The contract between the application shell and each simulation, plus the
 * registry of available simulations.
 *
 * A simulation owns all of its entities. The shell calls `update` when the
 * frame driver fires, `draw` once per rendered frame, and forwards pointer
 * events in canvas coordinates between ticks.
 */

use std::fmt;

use nannou::prelude::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::SimResult;
use crate::kinematics::CanvasSize;
use crate::sims::{
    AttractionSim, FallingSandSim, FlockingSim, GameOfLifeSim, QuadtreeDemo, RainSim, WalkersSim,
};
use crate::surface::Surface;

pub trait Simulation {
    fn name(&self) -> &'static str;

    /// Advance by `dt_ms` milliseconds. An error aborts this tick only.
    fn update(&mut self, dt_ms: f64, size: CanvasSize) -> SimResult<()>;

    fn draw(&self, surface: &mut dyn Surface, size: CanvasSize);

    fn pointer_pressed(&mut self, _position: Vec2, _size: CanvasSize) {}

    fn pointer_moved(&mut self, _position: Vec2, _size: CanvasSize) {}

    fn pointer_released(&mut self) {}

    /// Remove every entity.
    fn clear(&mut self);

    /// Rebuild the initial population for the given canvas.
    fn reset(&mut self, size: CanvasSize);

    /// Pick up parameter changes made in the control panel.
    fn configure(&mut self, config: &AppConfig, size: CanvasSize);

    fn entity_count(&self) -> usize;

    /// Fixed update rate this simulation wants from the frame driver.
    fn frame_rate(&self) -> Option<f32> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SimKind {
    Attraction,
    Flock,
    Sand,
    Rain,
    Walkers,
    Life,
    Quadtree,
}

impl SimKind {
    pub const ALL: [SimKind; 7] = [
        SimKind::Attraction,
        SimKind::Flock,
        SimKind::Sand,
        SimKind::Rain,
        SimKind::Walkers,
        SimKind::Life,
        SimKind::Quadtree,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SimKind::Attraction => "Attraction",
            SimKind::Flock => "Flocking",
            SimKind::Sand => "Falling Sand",
            SimKind::Rain => "Rain",
            SimKind::Walkers => "Walkers",
            SimKind::Life => "Game of Life",
            SimKind::Quadtree => "Quadtree",
        }
    }

    pub fn build(self, config: &AppConfig, size: CanvasSize, seed: u64) -> SimResult<Box<dyn Simulation>> {
        let sim: Box<dyn Simulation> = match self {
            SimKind::Attraction => Box::new(AttractionSim::new(config.attraction.clone(), seed)),
            SimKind::Flock => Box::new(FlockingSim::new(config.flock.clone(), size, seed)),
            SimKind::Sand => Box::new(FallingSandSim::new(config.sand.clone(), size, seed)),
            SimKind::Rain => Box::new(RainSim::new(config.rain.clone(), size, seed)),
            SimKind::Walkers => Box::new(WalkersSim::new(config.walkers.clone(), size, seed)),
            SimKind::Life => Box::new(GameOfLifeSim::new(config.life.clone(), size, seed)),
            SimKind::Quadtree => Box::new(QuadtreeDemo::new(config.quadtree.clone(), size)?),
        };
        Ok(sim)
    }
}

impl Default for SimKind {
    fn default() -> Self {
        SimKind::Flock
    }
}

impl fmt::Display for SimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
