/*
 * Falling Sand Simulation
 *
 * Hold the pointer down to pour sand. Physics runs at a fixed low rate
 * requested from the frame driver. The grid is sized from the canvas and the
 * cell size; when either changes the grid is reallocated and the sand is lost.
 */

use log::info;
use nannou::prelude::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::AppConfig;
use crate::error::SimResult;
use crate::kinematics::CanvasSize;
use crate::params::SandParams;
use crate::sand::SandGrid;
use crate::simulation::Simulation;
use crate::surface::{hsl_color, Surface};

pub struct FallingSandSim {
    pub grid: SandGrid,
    params: SandParams,
    pointer: Option<Vec2>,
    elapsed_ms: f64,
    rng: StdRng,
}

/// Grid dimensions (rows, cols) that fit the canvas.
pub fn grid_dimensions(size: CanvasSize, cell_size: f32) -> (usize, usize) {
    if cell_size <= 0.0 {
        return (0, 0);
    }
    let rows = (size.height / cell_size).floor().max(0.0) as usize;
    let cols = (size.width / cell_size).floor().max(0.0) as usize;
    (rows, cols)
}

impl FallingSandSim {
    pub fn new(params: SandParams, size: CanvasSize, seed: u64) -> Self {
        let (rows, cols) = grid_dimensions(size, params.cell_size);
        Self {
            grid: SandGrid::new(rows, cols),
            params,
            pointer: None,
            elapsed_ms: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Current pouring hue in degrees.
    pub fn hue(&self) -> f32 {
        ((self.elapsed_ms / 1000.0) as f32 * self.params.hue_rate).rem_euclid(360.0)
    }

    /// Grid cell under a canvas position, if it is on the grid.
    pub fn cell_at(&self, position: Vec2) -> Option<(usize, usize)> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let row = (position.y / self.params.cell_size) as usize;
        let col = (position.x / self.params.cell_size) as usize;
        (row < self.grid.rows() && col < self.grid.cols()).then_some((row, col))
    }

    /// Pour at the pointer cell and sometimes at one horizontal neighbor.
    pub fn pour_at(&mut self, position: Vec2) {
        let Some((row, col)) = self.cell_at(position) else {
            return;
        };
        let hue = self.hue();
        self.grid.pour(row, col, hue);

        if self.rng.gen_bool(self.params.scatter_chance.clamp(0.0, 1.0)) {
            let neighbor = if self.rng.gen_bool(0.5) { col.checked_sub(1) } else { Some(col + 1) };
            if let Some(c) = neighbor {
                self.grid.pour(row, c, hue);
            }
        }
    }

    fn fit_to(&mut self, size: CanvasSize) {
        let (rows, cols) = grid_dimensions(size, self.params.cell_size);
        if self.grid.resize_to(rows, cols) {
            info!("sand grid reallocated to {}x{} cells", rows, cols);
        }
    }
}

impl Simulation for FallingSandSim {
    fn name(&self) -> &'static str {
        "Falling Sand"
    }

    fn update(&mut self, dt_ms: f64, size: CanvasSize) -> SimResult<()> {
        self.fit_to(size);
        self.elapsed_ms += dt_ms;

        if let Some(position) = self.pointer {
            self.pour_at(position);
        }

        self.grid.step();
        Ok(())
    }

    fn draw(&self, surface: &mut dyn Surface, size: CanvasSize) {
        surface.clear_rect(0.0, 0.0, size.width, size.height);
        let cell = self.params.cell_size;

        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                if let Some(hue) = self.grid.hue(row, col) {
                    surface.set_fill(hsl_color(hue, 1.0, 0.5, 1.0));
                    surface.fill_rect(col as f32 * cell, row as f32 * cell, cell, cell);
                }
            }
        }
    }

    fn pointer_pressed(&mut self, position: Vec2, size: CanvasSize) {
        self.fit_to(size);
        self.pointer = Some(position);
        self.pour_at(position);
    }

    fn pointer_moved(&mut self, position: Vec2, _size: CanvasSize) {
        if self.pointer.is_some() {
            self.pointer = Some(position);
        }
    }

    fn pointer_released(&mut self) {
        self.pointer = None;
    }

    fn clear(&mut self) {
        self.grid.clear();
    }

    fn reset(&mut self, size: CanvasSize) {
        self.grid.clear();
        self.fit_to(size);
        self.elapsed_ms = 0.0;
    }

    fn configure(&mut self, config: &AppConfig, size: CanvasSize) {
        self.params = config.sand.clone();
        self.fit_to(size);
    }

    fn entity_count(&self) -> usize {
        self.grid.count()
    }

    fn frame_rate(&self) -> Option<f32> {
        // Config files bypass the slider range.
        Some(self.params.physics_fps.max(SandParams::MIN_PHYSICS_FPS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::vec2;

    const SIZE: CanvasSize = CanvasSize { width: 100.0, height: 50.0 };

    #[test]
    fn test_grid_fits_canvas() {
        let sim = FallingSandSim::new(SandParams::default(), SIZE, 1);
        assert_eq!((sim.grid.rows(), sim.grid.cols()), (5, 10));
        assert_eq!(grid_dimensions(SIZE, 0.0), (0, 0));
    }

    #[test]
    fn test_pointer_pours_and_sand_falls() {
        let mut sim = FallingSandSim::new(SandParams { scatter_chance: 0.0, ..SandParams::default() }, SIZE, 1);
        sim.pointer_pressed(vec2(55.0, 5.0), SIZE);
        assert!(sim.grid.is_occupied(0, 5));

        sim.pointer_released();
        sim.update(100.0, SIZE).unwrap();
        assert!(sim.grid.is_occupied(1, 5));
        assert_eq!(sim.entity_count(), 1);
    }

    #[test]
    fn test_held_pointer_keeps_pouring() {
        let mut sim = FallingSandSim::new(SandParams { scatter_chance: 0.0, ..SandParams::default() }, SIZE, 1);
        sim.pointer_pressed(vec2(55.0, 5.0), SIZE);
        for _ in 0..3 {
            sim.update(100.0, SIZE).unwrap();
        }
        // The first update finds the pointer cell still full.
        assert_eq!(sim.entity_count(), 3);
    }

    #[test]
    fn test_pour_off_grid_is_ignored() {
        let mut sim = FallingSandSim::new(SandParams::default(), SIZE, 1);
        sim.pointer_pressed(vec2(-5.0, 5.0), SIZE);
        sim.pointer_pressed(vec2(500.0, 5.0), SIZE);
        assert_eq!(sim.entity_count(), 0);
    }

    #[test]
    fn test_resize_clears_sand() {
        let mut sim = FallingSandSim::new(SandParams::default(), SIZE, 1);
        sim.pointer_pressed(vec2(55.0, 5.0), SIZE);
        sim.pointer_released();
        assert!(sim.entity_count() > 0);

        sim.update(100.0, CanvasSize::new(200.0, 50.0)).unwrap();
        assert_eq!(sim.entity_count(), 0);
        assert_eq!(sim.grid.cols(), 20);
    }

    #[test]
    fn test_hue_cycles_with_time() {
        let mut sim = FallingSandSim::new(SandParams::default(), SIZE, 1);
        assert_eq!(sim.hue(), 0.0);
        sim.update(100.0, SIZE).unwrap();
        assert!((sim.hue() - 3.0).abs() < 1e-4);
        assert_eq!(sim.frame_rate(), Some(10.0));
    }

    #[test]
    fn test_slow_physics_rate_is_raised_to_floor() {
        let params = SandParams { physics_fps: 2.0, ..SandParams::default() };
        let sim = FallingSandSim::new(params, SIZE, 1);
        assert_eq!(sim.frame_rate(), Some(SandParams::MIN_PHYSICS_FPS));
    }
}
