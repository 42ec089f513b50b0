use crate::grid::Grid;
use crate::rules::{apply_rules, GameRules, Pattern};
use crate::timer::{RunTimer, DEFAULT_RUN_INTERVAL};
use crate::view::ViewScale;
use rand::Rng;
use std::time::{Duration, Instant};

/// Probability that a cell starts alive after randomizing
pub const DEFAULT_ALIVE_RATIO: f64 = 0.1;

/// Simulation engine: owns the grid, the view scale, the step counter and
/// the repeating-run timer. Every mutating operation marks the state dirty so
/// the shell knows to redraw.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    // Scratch buffer the next generation is written into before swapping
    next: Grid,
    rules: GameRules,
    view: ViewScale,
    steps: u64,
    run: Option<RunTimer>,
    run_interval: Duration,
    alive_ratio: f64,
    dirty: bool,
}

impl Simulation {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            grid: Grid::new(cols, rows),
            next: Grid::new(cols, rows),
            rules: GameRules::conway(),
            view: ViewScale::default(),
            steps: 0,
            run: None,
            run_interval: DEFAULT_RUN_INTERVAL,
            alive_ratio: DEFAULT_ALIVE_RATIO,
            dirty: true,
        }
    }

    pub fn with_view(mut self, view: ViewScale) -> Self {
        self.view = view;
        self
    }

    pub fn with_run_interval(mut self, interval: Duration) -> Self {
        self.run_interval = interval;
        self
    }

    pub fn with_alive_ratio(mut self, ratio: f64) -> Self {
        self.alive_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn view(&self) -> &ViewScale {
        &self.view
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn run_interval(&self) -> Duration {
        self.run_interval
    }

    /// Deadline of the next generation while running
    pub fn next_tick_due(&self) -> Option<Instant> {
        self.run.as_ref().map(RunTimer::next_due)
    }

    /// Canvas size in pixels at the current block size
    pub fn canvas_size(&self) -> (u32, u32) {
        self.view.canvas_size(self.grid.cols(), self.grid.rows())
    }

    /// Returns true once after any change that needs a redraw.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn reset_steps(&mut self) {
        self.steps = 0;
    }

    /// Fill every cell from `rng`, each alive with the configured ratio.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        self.stop();
        self.reset_steps();
        for y in 0..self.grid.rows() as i64 {
            for x in 0..self.grid.cols() as i64 {
                let alive = rng.gen_bool(self.alive_ratio);
                self.grid.set(x, y, alive);
            }
        }
        self.dirty = true;
        log::info!("Randomized grid: {} live cells", self.grid.live_count());
    }

    /// Advance one generation from a snapshot of the current grid.
    pub fn step(&mut self) {
        apply_rules(&self.grid, &mut self.next, &self.rules);
        self.grid.swap_cells(&mut self.next);
        self.steps += 1;
        self.dirty = true;
        log::debug!("Step {}: {} live cells", self.steps, self.grid.live_count());
    }

    /// Start stepping every `run_interval`. Any previous run is dropped first.
    pub fn run(&mut self, now: Instant) {
        let replaced = self.run.take().is_some();
        self.run = Some(RunTimer::start(self.run_interval, now));
        log::info!(
            "Continuous run started ({:?} interval{})",
            self.run_interval,
            if replaced { ", replaced previous run" } else { "" }
        );
    }

    pub fn stop(&mut self) {
        if self.run.take().is_some() {
            log::info!("Continuous run stopped at step {}", self.steps);
        }
    }

    /// Step if the run timer is due. Returns true if a generation was computed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = self.run.as_mut().map_or(false, |timer| timer.poll(now));
        if due {
            self.step();
        }
        due
    }

    /// Flip the cell under a pointer position relative to the canvas origin.
    /// Returns the cell if it was inside the grid.
    pub fn toggle_at(&mut self, pointer_x: f64, pointer_y: f64) -> Option<(i64, i64)> {
        let (x, y) = self.view.cell_at(pointer_x, pointer_y);
        self.reset_steps();
        self.stop();
        self.dirty = true;
        if self.grid.toggle(x, y) {
            log::debug!("Toggled cell ({}, {})", x, y);
            Some((x, y))
        } else {
            log::debug!("Pointer ({:.1}, {:.1}) is outside the grid", pointer_x, pointer_y);
            None
        }
    }

    /// Replace the grid contents without touching the run state.
    pub fn import_layout(&mut self, layout: &[Vec<u8>]) {
        self.stop();
        self.grid.copy_from_layout(layout);
        self.reset_steps();
        self.dirty = true;
    }

    /// Replace the grid contents and start a continuous run.
    pub fn load_layout(&mut self, layout: &[Vec<u8>], now: Instant) {
        self.grid.copy_from_layout(layout);
        self.reset_steps();
        self.dirty = true;
        self.run(now);
    }

    pub fn load_pattern(&mut self, pattern: Pattern, now: Instant) {
        let layout = pattern.preset_layout(self.grid.cols(), self.grid.rows());
        log::info!("Loading preset {}", pattern.name());
        self.load_layout(&layout, now);
    }

    /// Apply a wheel delta to the view scale. Cells are untouched. Returns
    /// the new canvas size when the scale changed.
    pub fn rescale(&mut self, delta: f32) -> Option<(u32, u32)> {
        if !self.view.zoom(delta) {
            return None;
        }
        self.dirty = true;
        let size = self.canvas_size();
        log::info!(
            "Scale {:.3}, block size {} px, canvas {}x{}",
            self.view.scale(),
            self.view.block_size(),
            size.0,
            size.1
        );
        Some(size)
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.stop();
        self.grid.clear();
        self.reset_steps();
        self.dirty = true;
        log::info!("Grid cleared");
    }

    /// Reallocate the grid at new dimensions, all cells dead.
    pub fn resize(&mut self, cols: u32, rows: u32) {
        self.stop();
        self.grid.resize(cols, rows);
        self.next.resize(cols, rows);
        self.reset_steps();
        self.dirty = true;
        log::info!("Grid resized to {}x{}", cols, rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn live_cells(sim: &Simulation) -> Vec<(i64, i64)> {
        let grid = sim.grid();
        (0..grid.rows() as i64)
            .flat_map(|y| (0..grid.cols() as i64).map(move |x| (x, y)))
            .filter(|&(x, y)| grid.is_alive(x, y))
            .collect()
    }

    #[test]
    fn randomize_resets_steps_and_stops_run() {
        let mut sim = Simulation::new(20, 20);
        let now = Instant::now();
        sim.step();
        sim.run(now);
        sim.randomize(&mut StdRng::seed_from_u64(7));
        assert_eq!(sim.steps(), 0);
        assert!(!sim.is_running());
        assert!(sim.grid().live_count() > 0);
    }

    #[test]
    fn randomize_respects_ratio_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sim = Simulation::new(8, 8).with_alive_ratio(1.0);
        sim.randomize(&mut rng);
        assert_eq!(sim.grid().live_count(), 64);

        let mut sim = Simulation::new(8, 8).with_alive_ratio(0.0);
        sim.randomize(&mut rng);
        assert_eq!(sim.grid().live_count(), 0);
    }

    #[test]
    fn step_increments_counter() {
        let mut sim = Simulation::new(3, 3);
        sim.step();
        sim.step();
        assert_eq!(sim.steps(), 2);
    }

    #[test]
    fn run_replaces_previous_timer() {
        let mut sim = Simulation::new(3, 3).with_run_interval(Duration::from_millis(50));
        let t0 = Instant::now();
        sim.run(t0);
        let t1 = t0 + Duration::from_millis(30);
        sim.run(t1);
        assert_eq!(sim.next_tick_due(), Some(t1 + Duration::from_millis(50)));
        // The first run's deadline has passed but it no longer exists
        assert!(!sim.tick(t0 + Duration::from_millis(60)));
        assert!(sim.tick(t1 + Duration::from_millis(50)));
        assert_eq!(sim.steps(), 1);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut sim = Simulation::new(3, 3);
        sim.stop();
        sim.run(Instant::now());
        sim.stop();
        sim.stop();
        assert!(!sim.is_running());
        assert_eq!(sim.next_tick_due(), None);
    }

    #[test]
    fn tick_without_run_does_nothing() {
        let mut sim = Simulation::new(3, 3);
        assert!(!sim.tick(Instant::now() + Duration::from_secs(10)));
        assert_eq!(sim.steps(), 0);
    }

    #[test]
    fn toggle_flips_exactly_one_cell() {
        let mut sim = Simulation::new(6, 6);
        sim.step();
        sim.run(Instant::now());
        // Default block size is 20 px, so (50, 70) is cell (2, 3)
        assert_eq!(sim.toggle_at(50.0, 70.0), Some((2, 3)));
        assert_eq!(live_cells(&sim), vec![(2, 3)]);
        assert_eq!(sim.steps(), 0);
        assert!(!sim.is_running());

        assert_eq!(sim.toggle_at(59.0, 79.0), Some((2, 3)));
        assert!(live_cells(&sim).is_empty());
    }

    #[test]
    fn toggle_outside_grid_changes_nothing() {
        let mut sim = Simulation::new(2, 2);
        assert_eq!(sim.toggle_at(-1.0, 5.0), None);
        assert_eq!(sim.toggle_at(40.0, 0.0), None);
        assert_eq!(sim.grid().live_count(), 0);
    }

    #[test]
    fn load_pattern_starts_run() {
        let mut sim = Simulation::new(10, 10);
        sim.step();
        sim.load_pattern(Pattern::Glider, Instant::now());
        assert!(sim.is_running());
        assert_eq!(sim.steps(), 0);
        assert_eq!(sim.grid().live_count(), 5);
    }

    #[test]
    fn import_layout_keeps_idle() {
        let mut sim = Simulation::new(3, 3);
        sim.import_layout(&[vec![1, 0, 0], vec![0, 1, 0]]);
        assert!(!sim.is_running());
        assert_eq!(live_cells(&sim), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn rescale_keeps_cells() {
        let mut sim = Simulation::new(10, 5);
        sim.toggle_at(0.0, 0.0);
        assert_eq!(sim.rescale(-1.0), Some((250, 125)));
        assert_eq!(sim.view().block_size(), 25);
        assert_eq!(live_cells(&sim), vec![(0, 0)]);
        assert_eq!(sim.rescale(0.0), None);
    }

    #[test]
    fn clear_and_resize_reset_everything() {
        let mut sim = Simulation::new(4, 4);
        sim.randomize(&mut StdRng::seed_from_u64(3));
        sim.step();
        sim.run(Instant::now());
        sim.clear();
        assert_eq!(sim.grid().live_count(), 0);
        assert_eq!(sim.steps(), 0);
        assert!(!sim.is_running());

        sim.toggle_at(0.0, 0.0);
        sim.step();
        sim.resize(7, 2);
        assert_eq!((sim.grid().cols(), sim.grid().rows()), (7, 2));
        assert_eq!(sim.grid().live_count(), 0);
        assert_eq!(sim.steps(), 0);
        sim.step();
        assert_eq!(sim.steps(), 1);
    }

    #[test]
    fn dirty_flag_is_consumed() {
        let mut sim = Simulation::new(3, 3);
        assert!(sim.take_dirty());
        assert!(!sim.take_dirty());
        sim.step();
        assert!(sim.take_dirty());
    }
}
