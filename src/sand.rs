/*
 * Sand Grid Module
 *
 * Falling-sand cellular automaton on a flat `rows * cols` grid, indexed
 * `row * cols + col` with row 0 at the top.
 *
 * A step builds the next grid from the current one. Rows are visited bottom
 * to top (the last row cannot fall) and left to right. Each grain tries
 * below, then below-left, then below-right, and takes the first cell that is
 * still empty in the next grid. Checking the next grid rather than the
 * current one keeps two grains from landing on the same cell and keeps a
 * grain from falling more than one row per step.
 */

use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct SandGrid {
    rows: usize,
    cols: usize,
    occupied: Vec<bool>,
    /// Hue in degrees per cell, meaningful only where `occupied` is set.
    hues: Vec<f32>,
}

impl SandGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        let cells = rows * cols;
        Self {
            rows,
            cols,
            occupied: vec![false; cells],
            hues: vec![0.0; cells],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.in_bounds(row, col) && self.occupied[self.index(row, col)]
    }

    pub fn hue(&self, row: usize, col: usize) -> Option<f32> {
        self.is_occupied(row, col).then(|| self.hues[self.index(row, col)])
    }

    /// Number of grains on the grid.
    pub fn count(&self) -> usize {
        self.occupied.iter().filter(|&&cell| cell).count()
    }

    /// Drop a grain into a cell. A cell holds at most one grain, so pouring
    /// into an occupied cell does nothing, as does pouring off the grid.
    /// Returns whether a grain was added.
    pub fn pour(&mut self, row: usize, col: usize, hue: f32) -> bool {
        if !self.in_bounds(row, col) {
            return false;
        }
        let idx = self.index(row, col);
        if self.occupied[idx] {
            return false;
        }
        self.occupied[idx] = true;
        self.hues[idx] = hue;
        true
    }

    pub fn clear(&mut self) {
        self.occupied.fill(false);
        self.hues.fill(0.0);
    }

    /// Reallocate for new dimensions. Any change drops all sand.
    /// Returns whether the grid was reallocated.
    pub fn resize_to(&mut self, rows: usize, cols: usize) -> bool {
        if rows == self.rows && cols == self.cols {
            return false;
        }
        debug!("sand grid resized from {}x{} to {}x{}, sand cleared", self.rows, self.cols, rows, cols);
        *self = Self::new(rows, cols);
        true
    }

    /// Advance the automaton by one step.
    pub fn step(&mut self) {
        if self.rows == 0 || self.cols == 0 {
            return;
        }

        let mut next = vec![false; self.occupied.len()];
        let mut next_hues = vec![0.0; self.hues.len()];

        // The bottom row is resting sand.
        let last = self.rows - 1;
        for col in 0..self.cols {
            let idx = self.index(last, col);
            next[idx] = self.occupied[idx];
            next_hues[idx] = self.hues[idx];
        }

        for row in (0..last).rev() {
            let below = row + 1;
            for col in 0..self.cols {
                let idx = self.index(row, col);
                if !self.occupied[idx] {
                    continue;
                }
                let hue = self.hues[idx];

                let candidates = [
                    Some(col),
                    col.checked_sub(1),
                    (col + 1 < self.cols).then_some(col + 1),
                ];

                let target = candidates
                    .into_iter()
                    .flatten()
                    .map(|c| self.index(below, c))
                    .find(|&target| !next[target])
                    .unwrap_or(idx);

                next[target] = true;
                next_hues[target] = hue;
            }
        }

        self.occupied = next;
        self.hues = next_hues;
    }
}
