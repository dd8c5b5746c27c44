/*
 * Game of Life Simulation
 *
 * Generations advance on their own clock (`interval_ms` of accumulated frame
 * time) so the board stays readable at any frame rate. While paused, clicking
 * toggles the cell under the pointer.
 */

use log::info;
use nannou::color::rgb;
use nannou::prelude::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::AppConfig;
use crate::error::SimResult;
use crate::kinematics::CanvasSize;
use crate::life::LifeGrid;
use crate::params::LifeParams;
use crate::sims::falling_sand::grid_dimensions;
use crate::simulation::Simulation;
use crate::surface::{color, Surface};

pub struct GameOfLifeSim {
    pub grid: LifeGrid,
    params: LifeParams,
    accumulated_ms: f64,
    rng: StdRng,
}

impl GameOfLifeSim {
    pub fn new(params: LifeParams, size: CanvasSize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let (rows, cols) = grid_dimensions(size, params.cell_size);
        let grid = LifeGrid::random(&mut rng, rows, cols, params.density);
        Self {
            grid,
            params,
            accumulated_ms: 0.0,
            rng,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.params.playing
    }

    pub fn cell_at(&self, position: Vec2) -> Option<(usize, usize)> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let row = (position.y / self.params.cell_size) as usize;
        let col = (position.x / self.params.cell_size) as usize;
        (row < self.grid.rows() && col < self.grid.cols()).then_some((row, col))
    }

    fn reseed(&mut self, size: CanvasSize) {
        let (rows, cols) = grid_dimensions(size, self.params.cell_size);
        self.grid = LifeGrid::random(&mut self.rng, rows, cols, self.params.density);
        self.accumulated_ms = 0.0;
    }

    fn fit_to(&mut self, size: CanvasSize) {
        let dims = grid_dimensions(size, self.params.cell_size);
        if dims != (self.grid.rows(), self.grid.cols()) {
            self.reseed(size);
            info!("life grid reseeded at {}x{} cells", dims.0, dims.1);
        }
    }
}

impl Simulation for GameOfLifeSim {
    fn name(&self) -> &'static str {
        "Game of Life"
    }

    fn update(&mut self, dt_ms: f64, size: CanvasSize) -> SimResult<()> {
        self.fit_to(size);
        if !self.params.playing {
            return Ok(());
        }

        self.accumulated_ms += dt_ms;
        // At most one generation per tick.
        if self.accumulated_ms >= self.params.interval_ms {
            self.accumulated_ms = 0.0;
            self.grid.step();
        }
        Ok(())
    }

    fn draw(&self, surface: &mut dyn Surface, size: CanvasSize) {
        surface.clear_rect(0.0, 0.0, size.width, size.height);
        let cell = self.params.cell_size;
        surface.set_fill(color(rgb(0.9, 0.9, 0.9)));

        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                if self.grid.is_alive(row, col) {
                    surface.fill_rect(col as f32 * cell, row as f32 * cell, cell - 1.0, cell - 1.0);
                }
            }
        }
    }

    fn pointer_pressed(&mut self, position: Vec2, size: CanvasSize) {
        self.fit_to(size);
        if self.params.playing {
            return;
        }
        if let Some((row, col)) = self.cell_at(position) {
            self.grid.toggle(row, col);
        }
    }

    fn clear(&mut self) {
        self.grid.clear();
    }

    fn reset(&mut self, size: CanvasSize) {
        self.reseed(size);
    }

    fn configure(&mut self, config: &AppConfig, size: CanvasSize) {
        let reseed = config.life.density != self.params.density;
        self.params = config.life.clone();
        if reseed {
            self.reseed(size);
        } else {
            self.fit_to(size);
        }
    }

    fn entity_count(&self) -> usize {
        self.grid.population()
    }
}
