/*
 * Frame Driver Module
 *
 * Turns the host's per-frame timestamps into bounded delta-times and decides
 * when the simulation callback fires.
 *
 * States: Idle -> Running -> Idle. The first tick after starting only records
 * a baseline timestamp and never fires. Every later tick computes
 * `now - previous`, clamped to [0, MAX_DELTA_MS]. In fixed-rate mode the
 * clamped deltas accumulate until they reach `1000 / fps`, then the callback
 * fires once with the accumulated time and the accumulator resets to zero.
 */

use log::{debug, info};

use crate::error::SimResult;
use crate::kinematics::CanvasSize;
use crate::simulation::Simulation;
use crate::surface::Surface;

/// Upper bound on the delta handed to a simulation, in milliseconds.
pub const MAX_DELTA_MS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverOptions {
    /// Fire at most this many times per second. `None` fires every tick.
    pub fps: Option<f32>,
    /// Start in the Running state.
    pub enabled: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self { fps: None, enabled: true }
    }
}

#[derive(Debug, Clone)]
pub struct FrameDriver {
    options: DriverOptions,
    state: DriverState,
    previous_timestamp: Option<f64>,
    accumulator: f64,
    fired: u64,
}

impl FrameDriver {
    pub fn new(options: DriverOptions) -> Self {
        let state = if options.enabled { DriverState::Running } else { DriverState::Idle };
        Self {
            options,
            state,
            previous_timestamp: None,
            accumulator: 0.0,
            fired: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Number of times the callback has fired since creation.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn fps(&self) -> Option<f32> {
        self.options.fps
    }

    pub fn start(&mut self) {
        if self.state == DriverState::Running {
            return;
        }
        self.state = DriverState::Running;
        self.previous_timestamp = None;
        self.accumulator = 0.0;
        info!("frame driver started (fps: {:?})", self.options.fps);
    }

    /// After this returns no tick fires until `start` is called again.
    pub fn stop(&mut self) {
        if self.state == DriverState::Idle {
            return;
        }
        self.state = DriverState::Idle;
        self.previous_timestamp = None;
        self.accumulator = 0.0;
        info!("frame driver stopped after {} ticks", self.fired);
    }

    pub fn set_fps(&mut self, fps: Option<f32>) {
        if self.options.fps != fps {
            debug!("frame driver rate changed from {:?} to {:?}", self.options.fps, fps);
            self.options.fps = fps;
            self.accumulator = 0.0;
        }
    }

    /// Feed one host frame timestamp (milliseconds). Returns the delta to
    /// simulate when the callback should fire this tick.
    pub fn advance(&mut self, timestamp_ms: f64) -> Option<f64> {
        if self.state != DriverState::Running {
            return None;
        }

        let previous = self.previous_timestamp.replace(timestamp_ms)?;
        let delta = (timestamp_ms - previous).clamp(0.0, MAX_DELTA_MS);

        let elapsed = match self.options.fps {
            Some(fps) if fps > 0.0 => {
                self.accumulator += delta;
                let interval = 1000.0 / fps as f64;
                if self.accumulator < interval {
                    return None;
                }
                // Low rates can accumulate more than the bound.
                let elapsed = self.accumulator.min(MAX_DELTA_MS);
                self.accumulator = 0.0;
                elapsed
            }
            _ => delta,
        };

        self.fired += 1;
        Some(elapsed)
    }

    /// Callback form of [`advance`](Self::advance).
    pub fn frame<R, F: FnOnce(f64) -> R>(&mut self, timestamp_ms: f64, callback: F) -> Option<R> {
        self.advance(timestamp_ms).map(callback)
    }

    /// Update `sim` when this tick fires. Returns whether it fired.
    ///
    /// Ticks on an empty canvas are skipped without touching the clock, so
    /// the first tick after the window comes back sees a clamped delta.
    pub fn step<S: Simulation + ?Sized>(&mut self, timestamp_ms: f64, sim: &mut S, size: CanvasSize) -> SimResult<bool> {
        if size.is_empty() {
            return Ok(false);
        }
        let Some(dt) = self.advance(timestamp_ms) else {
            return Ok(false);
        };

        sim.update(dt, size)?;
        Ok(true)
    }

    /// Update then draw `sim` when this tick fires. Returns whether it fired.
    pub fn run_frame<S: Simulation + ?Sized>(
        &mut self,
        timestamp_ms: f64,
        sim: &mut S,
        surface: &mut dyn Surface,
        size: CanvasSize,
    ) -> SimResult<bool> {
        let fired = self.step(timestamp_ms, sim, size)?;
        if fired {
            sim.draw(surface, size);
        }
        Ok(fired)
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(DriverOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(driver: &mut FrameDriver, timestamps: &[f64]) -> Vec<f64> {
        timestamps.iter().filter_map(|&t| driver.advance(t)).collect()
    }

    #[test]
    fn test_first_tick_sets_baseline() {
        let mut driver = FrameDriver::default();
        assert_eq!(driver.advance(1000.0), None);
        assert_eq!(driver.advance(1016.0), Some(16.0));
        assert_eq!(driver.fired(), 1);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut driver = FrameDriver::default();
        let deltas = collect(&mut driver, &[0.0, 5000.0, 4000.0, 4010.0, 4010.0]);
        assert_eq!(deltas, vec![100.0, 0.0, 10.0, 0.0]);
    }

    #[test]
    fn test_disabled_driver_never_fires() {
        let mut driver = FrameDriver::new(DriverOptions { fps: None, enabled: false });
        assert_eq!(driver.state(), DriverState::Idle);
        assert!(collect(&mut driver, &[0.0, 16.0, 32.0]).is_empty());

        driver.start();
        assert!(driver.is_running());
        assert_eq!(collect(&mut driver, &[48.0, 64.0]), vec![16.0]);
    }

    #[test]
    fn test_stop_is_immediate() {
        let mut driver = FrameDriver::default();
        assert_eq!(collect(&mut driver, &[0.0, 16.0]), vec![16.0]);
        driver.stop();
        assert!(collect(&mut driver, &[32.0, 48.0, 64.0]).is_empty());

        // Restart takes a fresh baseline.
        driver.start();
        assert_eq!(collect(&mut driver, &[10_000.0, 10_020.0]), vec![20.0]);
    }

    #[test]
    fn test_fixed_rate_accumulates() {
        let mut driver = FrameDriver::new(DriverOptions { fps: Some(10.0), enabled: true });
        let timestamps: Vec<f64> = (0..=20).map(|i| i as f64 * 16.0).collect();
        let deltas = collect(&mut driver, &timestamps);

        // 100 ms threshold reached on the 7th delta (112 ms) and again on the 14th.
        assert_eq!(deltas, vec![100.0, 100.0]);
        assert_eq!(driver.fired(), 2);
    }

    #[test]
    fn test_fixed_rate_passes_accumulated_delta() {
        let mut driver = FrameDriver::new(DriverOptions { fps: Some(30.0), enabled: true });
        let deltas = collect(&mut driver, &[0.0, 20.0, 40.0, 60.0]);
        assert_eq!(deltas, vec![40.0]);
    }

    #[test]
    fn test_frame_callback() {
        let mut driver = FrameDriver::default();
        let mut seen = Vec::new();
        for t in [0.0, 8.0, 24.0] {
            driver.frame(t, |dt| seen.push(dt));
        }
        assert_eq!(seen, vec![8.0, 16.0]);
    }
}
