//! Rules module for Conway's Game of Life simulation
//!
//! This module contains the transition rule, the generation step and the
//! preset patterns used to seed the grid.

pub mod patterns;

pub use patterns::Pattern;

use crate::grid::Grid;

/// Game of Life standard rules:
/// 1. Any live cell with fewer than two live neighbors dies (underpopulation)
/// 2. Any live cell with two or three live neighbors lives (survival)
/// 3. Any live cell with more than three live neighbors dies (overpopulation)
/// 4. Any dead cell with exactly three live neighbors becomes alive (reproduction)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    /// Minimum neighbors for a live cell to survive
    pub survival_min: u8,
    /// Maximum neighbors for a live cell to survive
    pub survival_max: u8,
    /// Number of neighbors for a dead cell to become alive
    pub birth_count: u8,
}

impl Default for GameRules {
    fn default() -> Self {
        // Classic Conway's Game of Life rules
        Self {
            survival_min: 2,
            survival_max: 3,
            birth_count: 3,
        }
    }
}

impl GameRules {
    /// Conway's classic Game of Life (B3/S23)
    pub fn conway() -> Self {
        Self::default()
    }

    /// Next state of one cell given its current state and live neighbor count
    pub fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        if alive {
            (self.survival_min..=self.survival_max).contains(&neighbors)
        } else {
            neighbors == self.birth_count
        }
    }
}

/// Apply the rules to `input` for one generation, writing into `output`.
///
/// Every next state is computed from `input` alone, so the visiting order
/// has no effect on the result. `output` is resized if its dimensions differ.
pub fn apply_rules(input: &Grid, output: &mut Grid, rules: &GameRules) {
    if (output.cols(), output.rows()) != (input.cols(), input.rows()) {
        output.resize(input.cols(), input.rows());
    }

    for y in 0..input.rows() as i64 {
        for x in 0..input.cols() as i64 {
            let neighbors = input.count_live_neighbors(x, y);
            output.set(x, y, rules.next_state(input.is_alive(x, y), neighbors));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conway_transition_table() {
        let rules = GameRules::conway();
        for n in 0..=8u8 {
            let expected_alive = n == 3 || n == 2;
            assert_eq!(rules.next_state(true, n), expected_alive, "live cell with {} neighbors", n);
            assert_eq!(rules.next_state(false, n), n == 3, "dead cell with {} neighbors", n);
        }
    }

    #[test]
    fn next_state_matches_closed_form() {
        let rules = GameRules::default();
        for alive in [false, true] {
            for n in 0..=8u8 {
                assert_eq!(rules.next_state(alive, n), n == 3 || (alive && n == 2));
            }
        }
    }

    #[test]
    fn isolated_cell_dies() {
        let mut input = Grid::new(3, 3);
        input.set(1, 1, true);
        let mut output = Grid::new(3, 3);
        apply_rules(&input, &mut output, &GameRules::conway());
        assert_eq!(output.live_count(), 0);
    }

    #[test]
    fn blinker_reads_from_snapshot() {
        // Horizontal blinker becomes vertical; an in-place update would
        // see already-written cells and produce something else.
        let mut input = Grid::new(5, 5);
        for x in 1..4 {
            input.set(x, 2, true);
        }
        let mut output = Grid::new(5, 5);
        apply_rules(&input, &mut output, &GameRules::conway());

        let alive: Vec<(i64, i64)> = (0..5)
            .flat_map(|y| (0..5).map(move |x| (x, y)))
            .filter(|&(x, y)| output.is_alive(x, y))
            .collect();
        assert_eq!(alive, vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn output_is_resized_to_match_input() {
        let mut input = Grid::new(4, 4);
        input.set(1, 1, true);
        input.set(2, 1, true);
        input.set(1, 2, true);
        input.set(2, 2, true);
        let mut output = Grid::new(1, 1);
        apply_rules(&input, &mut output, &GameRules::conway());
        assert_eq!((output.cols(), output.rows()), (4, 4));
        assert_eq!(output, input);
    }
}
