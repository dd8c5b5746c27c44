/*
 * Life Grid Module
 *
 * Conway's Game of Life on a flat boolean grid. Cells beyond the border count
 * as dead (no wrap-around). Births need exactly three live neighbors;
 * survivors need two or three.
 */

use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct LifeGrid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
    generation: u64,
}

impl LifeGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
            generation: 0,
        }
    }

    /// Grid where each cell is alive with probability `density`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, rows: usize, cols: usize, density: f64) -> Self {
        let density = density.clamp(0.0, 1.0);
        let mut grid = Self::new(rows, cols);
        for cell in &mut grid.cells {
            *cell = rng.gen_bool(density);
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = alive;
        }
    }

    pub fn toggle(&mut self, row: usize, col: usize) {
        if row < self.rows && col < self.cols {
            let idx = row * self.cols + col;
            self.cells[idx] = !self.cells[idx];
        }
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.generation = 0;
    }

    pub fn live_neighbors(&self, row: usize, col: usize) -> usize {
        let mut count = 0;
        for dr in [-1isize, 0, 1] {
            for dc in [-1isize, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = row as isize + dr;
                let c = col as isize + dc;
                if r >= 0 && c >= 0 && self.is_alive(r as usize, c as usize) {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn step(&mut self) {
        let mut next = vec![false; self.cells.len()];
        for row in 0..self.rows {
            for col in 0..self.cols {
                let neighbors = self.live_neighbors(row, col);
                let idx = row * self.cols + col;
                next[idx] = matches!((self.cells[idx], neighbors), (true, 2) | (_, 3));
            }
        }
        self.cells = next;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_blinker_oscillates() {
        let mut grid = LifeGrid::new(5, 5);
        for col in 1..4 {
            grid.set(2, col, true);
        }

        grid.step();
        assert!(grid.is_alive(1, 2) && grid.is_alive(2, 2) && grid.is_alive(3, 2));
        assert!(!grid.is_alive(2, 1) && !grid.is_alive(2, 3));

        grid.step();
        assert!(grid.is_alive(2, 1) && grid.is_alive(2, 2) && grid.is_alive(2, 3));
        assert_eq!(grid.generation(), 2);
    }

    #[test]
    fn test_block_is_still() {
        let mut grid = LifeGrid::new(4, 4);
        for (r, c) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            grid.set(r, c, true);
        }
        let before = grid.clone();
        grid.step();
        assert_eq!(grid.population(), 4);
        assert_eq!(grid.cells, before.cells);
    }

    #[test]
    fn test_corner_has_no_wraparound_neighbors() {
        let mut grid = LifeGrid::new(3, 3);
        grid.set(2, 2, true);
        grid.set(2, 1, true);
        assert_eq!(grid.live_neighbors(0, 0), 0);
        assert_eq!(grid.live_neighbors(1, 1), 2);
    }

    #[test]
    fn test_random_density() {
        let mut rng = StdRng::seed_from_u64(4);
        let grid = LifeGrid::random(&mut rng, 100, 100, 0.3);
        let ratio = grid.population() as f64 / 10_000.0;
        assert!((0.25..0.35).contains(&ratio));
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut grid = LifeGrid::new(2, 2);
        grid.toggle(0, 1);
        assert!(grid.is_alive(0, 1));
        grid.toggle(0, 1);
        assert!(!grid.is_alive(0, 1));
        grid.toggle(5, 5);
        grid.set(1, 1, true);
        grid.clear();
        assert_eq!(grid.population(), 0);
    }
}
