//! Cell grid for the simulation.
//!
//! Cells are stored row-major with a stride of `cols`. Every accessor takes
//! signed coordinates so neighbor offsets can step off the edge; anything
//! outside the grid reads as dead and ignores writes.

/// Nested 0/1 values, outer index = column, inner index = row.
pub type Layout = Vec<Vec<u8>>;

/// The 8 Moore-neighborhood offsets.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: u32,
    rows: u32,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a grid with all cells dead
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            cells: vec![false; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.cols as i64 && y < self.rows as i64
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.cols as usize + x as usize)
    }

    pub fn is_alive(&self, x: i64, y: i64) -> bool {
        self.index(x, y).map_or(false, |idx| self.cells[idx])
    }

    /// Live cells among the 8 surrounding positions. Off-grid neighbors are dead.
    pub fn count_live_neighbors(&self, x: i64, y: i64) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|(dx, dy)| self.is_alive(x.wrapping_add(*dx), y.wrapping_add(*dy)))
            .count() as u8
    }

    pub fn set(&mut self, x: i64, y: i64, alive: bool) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = alive;
        }
    }

    /// Flip a cell. Returns false when the position is off the grid.
    pub fn toggle(&mut self, x: i64, y: i64) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = !self.cells[idx];
                true
            }
            None => false,
        }
    }

    /// Reallocate at new dimensions. All cells start dead.
    pub fn resize(&mut self, cols: u32, rows: u32) {
        *self = Self::new(cols, rows);
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Row-major view of the cells, used by the renderer upload.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Same dimensions, new contents. Used by the stepper to commit a generation.
    pub(crate) fn swap_cells(&mut self, other: &mut Grid) {
        debug_assert_eq!((self.cols, self.rows), (other.cols, other.rows));
        std::mem::swap(&mut self.cells, &mut other.cells);
    }

    /// Overwrite every cell from a layout. Positions the layout does not
    /// cover become dead; values past the grid edge are ignored.
    pub fn copy_from_layout(&mut self, layout: &[Vec<u8>]) {
        for x in 0..self.cols as i64 {
            let column = layout.get(x as usize);
            for y in 0..self.rows as i64 {
                let alive = column
                    .and_then(|c| c.get(y as usize))
                    .map_or(false, |&v| v != 0);
                self.set(x, y, alive);
            }
        }
    }

    pub fn to_layout(&self) -> Layout {
        (0..self.cols as i64)
            .map(|x| {
                (0..self.rows as i64)
                    .map(|y| u8::from(self.is_alive(x, y)))
                    .collect()
            })
            .collect()
    }
}
