/*
 * Simulation Parameters Module
 *
 * Tunable parameters for every simulation. Each struct can be loaded from the
 * YAML config file, edited live from the control panel, and carries the slider
 * ranges the UI uses. `ParamTracker` provides the snapshot-based change
 * detection the UI relies on to know when to push values into the running
 * simulation.
 */

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::driver::MAX_DELTA_MS;
use crate::kinematics::EdgePolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttractionParams {
    /// Launch speed of a new circle, px/s.
    pub speed: f32,
    pub radius: f32,
    /// Pull between two circles is `strength / d²`, px/s².
    pub strength: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub color: [u8; 3],
}

impl Default for AttractionParams {
    fn default() -> Self {
        Self {
            speed: 50.0,
            radius: 25.0,
            strength: 1_200_000.0,
            min_distance: 100.0,
            max_distance: 1000.0,
            color: [0x00, 0xa6, 0x3e],
        }
    }
}

impl AttractionParams {
    pub fn speed_range() -> RangeInclusive<f32> {
        0.0..=300.0
    }

    pub fn radius_range() -> RangeInclusive<f32> {
        2.0..=60.0
    }

    pub fn strength_range() -> RangeInclusive<f32> {
        0.0..=5_000_000.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockParams {
    pub num_boids: usize,
    /// px/s
    pub max_speed: f32,
    /// Largest steering change per rule, px/s².
    pub max_force: f32,
    pub perception: f32,
    /// Defaults to half the perception radius when unset.
    pub separation_radius: Option<f32>,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub boid_width: f32,
    pub boid_length: f32,
    pub show_perception: bool,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            num_boids: 25,
            max_speed: 100.0,
            max_force: 60.0,
            perception: 120.0,
            separation_radius: None,
            separation_weight: 2.0,
            alignment_weight: 1.0,
            cohesion_weight: 0.5,
            boid_width: 10.0,
            boid_length: 15.0,
            show_perception: false,
        }
    }
}

impl FlockParams {
    pub fn effective_separation_radius(&self) -> f32 {
        self.separation_radius.unwrap_or(self.perception / 2.0)
    }

    pub fn num_boids_range() -> RangeInclusive<usize> {
        1..=400
    }

    pub fn max_speed_range() -> RangeInclusive<f32> {
        10.0..=400.0
    }

    pub fn max_force_range() -> RangeInclusive<f32> {
        0.0..=300.0
    }

    pub fn weight_range() -> RangeInclusive<f32> {
        0.0..=3.0
    }

    pub fn radius_range() -> RangeInclusive<f32> {
        10.0..=300.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandParams {
    pub cell_size: f32,
    /// Physics steps per second.
    pub physics_fps: f32,
    /// Hue rotation while pouring, degrees per second.
    pub hue_rate: f32,
    /// Chance of an extra grain landing next to the pointer cell.
    pub scatter_chance: f64,
}

impl Default for SandParams {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            physics_fps: 10.0,
            hue_rate: 30.0,
            scatter_chance: 0.5,
        }
    }
}

impl SandParams {
    pub fn cell_size_range() -> RangeInclusive<f32> {
        2.0..=40.0
    }

    /// Below this rate a fixed-rate tick would accumulate more than the
    /// driver's delta bound and the sand clock would fall behind.
    pub const MIN_PHYSICS_FPS: f32 = (1000.0 / MAX_DELTA_MS) as f32;

    pub fn physics_fps_range() -> RangeInclusive<f32> {
        Self::MIN_PHYSICS_FPS..=60.0
    }

    pub fn hue_rate_range() -> RangeInclusive<f32> {
        0.0..=360.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainParams {
    pub num_drops: usize,
    /// Depth range; nearer drops (higher z) are faster, longer and wider.
    pub max_depth: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_length: f32,
    pub max_length: f32,
    pub min_width: f32,
    pub max_width: f32,
    /// px/s²
    pub gravity: f32,
    pub color: [u8; 3],
}

impl Default for RainParams {
    fn default() -> Self {
        Self {
            num_drops: 300,
            max_depth: 20.0,
            min_speed: 50.0,
            max_speed: 200.0,
            min_length: 10.0,
            max_length: 20.0,
            min_width: 1.0,
            max_width: 3.0,
            gravity: 9.8,
            color: [0x4e, 0x68, 0x81],
        }
    }
}

impl RainParams {
    pub fn num_drops_range() -> RangeInclusive<usize> {
        1..=3000
    }

    pub fn gravity_range() -> RangeInclusive<f32> {
        0.0..=200.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalkerModeKind {
    Linear,
    Sine,
    Noise,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerParams {
    /// Walkers spawned on reset; more are added by clicking.
    pub num_walkers: usize,
    pub mode: WalkerModeKind,
    pub edges: EdgePolicy,
    /// px/s
    pub speed: f32,
    pub radius: f32,
    pub sine_amplitude: f32,
    /// Radians per millisecond of accumulated walker time.
    pub sine_frequency: f32,
    pub noise_scale: f32,
    /// Degrees per second.
    pub noise_max_turn_rate: f32,
    pub show_tail: bool,
    pub tail_length: usize,
}

impl Default for WalkerParams {
    fn default() -> Self {
        Self {
            num_walkers: 10,
            mode: WalkerModeKind::Noise,
            edges: EdgePolicy::Wrap,
            speed: 150.0,
            radius: 5.0,
            sine_amplitude: 50.0,
            sine_frequency: 0.02,
            noise_scale: 0.01,
            noise_max_turn_rate: 15.0,
            show_tail: true,
            tail_length: 40,
        }
    }
}

impl WalkerParams {
    pub fn num_walkers_range() -> RangeInclusive<usize> {
        0..=200
    }

    pub fn speed_range() -> RangeInclusive<f32> {
        10.0..=500.0
    }

    pub fn turn_rate_range() -> RangeInclusive<f32> {
        0.0..=360.0
    }

    pub fn tail_length_range() -> RangeInclusive<usize> {
        2..=200
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeParams {
    pub cell_size: f32,
    /// Fraction of cells alive after seeding.
    pub density: f64,
    /// Milliseconds between generations.
    pub interval_ms: f64,
    pub playing: bool,
}

impl Default for LifeParams {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            density: 0.3,
            interval_ms: 200.0,
            playing: true,
        }
    }
}

impl LifeParams {
    pub fn cell_size_range() -> RangeInclusive<f32> {
        4.0..=40.0
    }

    pub fn interval_range() -> RangeInclusive<f64> {
        20.0..=1000.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadtreeParams {
    pub capacity: usize,
    pub query_width: f32,
    pub query_height: f32,
    pub show_boundaries: bool,
}

impl Default for QuadtreeParams {
    fn default() -> Self {
        Self {
            capacity: 4,
            query_width: 200.0,
            query_height: 150.0,
            show_boundaries: true,
        }
    }
}

impl QuadtreeParams {
    pub fn capacity_range() -> RangeInclusive<usize> {
        1..=16
    }

    pub fn query_size_range() -> RangeInclusive<f32> {
        10.0..=600.0
    }
}

/// Controls that belong to the shell rather than to one simulation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShellParams {
    pub show_debug: bool,
    pub pause_simulation: bool,
}

/// Remembers the last value of `T` seen by the UI.
#[derive(Debug, Default)]
pub struct ParamTracker<T> {
    previous: Option<T>,
}

impl<T: Clone + PartialEq> ParamTracker<T> {
    pub fn new() -> Self {
        Self { previous: None }
    }

    pub fn take_snapshot(&mut self, current: &T) {
        self.previous = Some(current.clone());
    }

    /// True when `current` differs from the last snapshot. Without a
    /// snapshot nothing has changed.
    pub fn detect_changes(&self, current: &T) -> bool {
        match &self.previous {
            Some(prev) => prev != current,
            None => false,
        }
    }
}
