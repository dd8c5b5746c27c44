/*
 * Debug Information Module
 *
 * Per-frame metrics shown in the debug overlay:
 * - FPS and frame time as measured by the host
 * - Entity count of the active simulation
 * - Ticks fired by the frame driver
 * - The last error a simulation update returned, if any
 */

use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub sim_name: &'static str,
    pub entity_count: usize,
    pub ticks_fired: u64,
    pub last_error: Option<String>,
}

impl DebugInfo {
    pub fn record_frame(&mut self, fps: f32, frame_time: Duration) {
        self.fps = fps;
        self.frame_time = frame_time;
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.frame_time.as_secs_f64() * 1000.0
    }

    /// Overlay text, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Simulation: {}", self.sim_name),
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time_ms()),
            format!("Entities: {}", self.entity_count),
            format!("Ticks: {}", self.ticks_fired),
        ];
        if let Some(err) = &self.last_error {
            lines.push(format!("Last error: {}", err));
        }
        lines
    }
}
