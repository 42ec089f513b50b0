//! Zoom scale and the mapping between pointer pixels and grid cells.

pub const MIN_SCALE: f32 = 0.2;
pub const MAX_SCALE: f32 = 8.0;
/// Multiplier applied per wheel notch; a positive delta zooms out.
pub const SCALE_RATIO: f32 = 0.8;
/// Pixels per cell at scale 1.0
pub const DEFAULT_BLOCK_SIZE: u32 = 20;
/// Fraction of the block drawn as border on each side
pub const BLOCK_BORDER_RATIO: f32 = 0.05;
/// Pixels of trackpad scroll that make up one wheel notch
pub const PIXELS_PER_NOTCH: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewScale {
    scale: f32,
    block_size: u32,
}

impl Default for ViewScale {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ViewScale {
    pub fn new(scale: f32) -> Self {
        let scale = if scale.is_finite() { scale } else { 1.0 };
        let scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        Self {
            scale,
            block_size: Self::block_size_for(scale),
        }
    }

    fn block_size_for(scale: f32) -> u32 {
        ((DEFAULT_BLOCK_SIZE as f32 * scale).floor() as u32).max(1)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Border thickness in pixels for the current block size
    pub fn border_width(&self) -> u32 {
        (self.block_size as f32 * BLOCK_BORDER_RATIO).floor() as u32
    }

    /// Apply one wheel delta. Only the sign matters. Returns true if the
    /// scale changed.
    pub fn zoom(&mut self, delta: f32) -> bool {
        if delta == 0.0 || delta.is_nan() {
            return false;
        }
        let factor = if delta > 0.0 { SCALE_RATIO } else { 1.0 / SCALE_RATIO };
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        if (new_scale - self.scale).abs() < f32::EPSILON {
            return false;
        }
        *self = Self {
            scale: new_scale,
            block_size: Self::block_size_for(new_scale),
        };
        true
    }

    /// Grid cell under a pointer position relative to the canvas origin
    pub fn cell_at(&self, pointer_x: f64, pointer_y: f64) -> (i64, i64) {
        let block = self.block_size as f64;
        (
            (pointer_x / block).floor() as i64,
            (pointer_y / block).floor() as i64,
        )
    }

    /// Canvas size in pixels for a grid of `cols` x `rows`
    pub fn canvas_size(&self, cols: u32, rows: u32) -> (u32, u32) {
        (cols * self.block_size, rows * self.block_size)
    }

    /// Grid dimensions that fit a window, reserving the same margins as the
    /// initial layout (95% of the width, 80% of the height).
    pub fn fit_grid(&self, window_width: u32, window_height: u32) -> (u32, u32) {
        let block = self.block_size as f32;
        let cols = (window_width as f32 * 0.95 / block).floor() as u32;
        let rows = (window_height as f32 * 0.80 / block).floor() as u32;
        (cols.max(1), rows.max(1))
    }
}

/// Collects pixel scroll deltas into whole wheel notches.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelAccumulator {
    pending: f64,
}

impl WheelAccumulator {
    /// Add a pixel delta (positive zooms out) and return one signed unit
    /// delta per notch completed. The remainder carries over.
    pub fn push_pixels(&mut self, pixels: f64) -> Vec<f32> {
        if !pixels.is_finite() {
            return Vec::new();
        }
        // A reversed gesture drops the leftover from the old direction
        if self.pending * pixels < 0.0 {
            self.pending = 0.0;
        }
        self.pending += pixels;
        let notches = (self.pending / PIXELS_PER_NOTCH).trunc();
        self.pending -= notches * PIXELS_PER_NOTCH;
        let unit = notches.signum() as f32;
        vec![unit; notches.abs() as usize]
    }

    pub fn pending(&self) -> f64 {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_block_size() {
        let view = ViewScale::default();
        assert_eq!(view.scale(), 1.0);
        assert_eq!(view.block_size(), 20);
        assert_eq!(view.border_width(), 1);
    }

    #[test]
    fn opposite_deltas_restore_scale() {
        let mut view = ViewScale::default();
        for _ in 0..3 {
            assert!(view.zoom(120.0));
        }
        for _ in 0..3 {
            assert!(view.zoom(-120.0));
        }
        assert!((view.scale() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn extreme_deltas_stay_clamped() {
        let mut view = ViewScale::default();
        for _ in 0..100 {
            view.zoom(f32::MAX);
        }
        assert!((view.scale() - MIN_SCALE).abs() < 1e-6);
        assert_eq!(view.block_size(), 4);
        assert!(!view.zoom(1.0));

        for _ in 0..100 {
            view.zoom(-f32::MAX);
        }
        assert!((view.scale() - MAX_SCALE).abs() < 1e-6);
        assert_eq!(view.block_size(), 160);
    }

    #[test]
    fn zero_delta_is_noop() {
        let mut view = ViewScale::new(2.0);
        assert!(!view.zoom(0.0));
        assert_eq!(view.scale(), 2.0);
    }

    #[test]
    fn new_clamps_scale() {
        assert_eq!(ViewScale::new(100.0).scale(), MAX_SCALE);
        assert_eq!(ViewScale::new(0.0).scale(), MIN_SCALE);
        assert_eq!(ViewScale::new(f32::NAN).scale(), 1.0);
    }

    #[test]
    fn pointer_maps_by_floor_division() {
        let view = ViewScale::default();
        assert_eq!(view.cell_at(45.0, 79.9), (2, 3));
        assert_eq!(view.cell_at(40.0, 60.0), (2, 3));
        assert_eq!(view.cell_at(-0.5, 5.0), (-1, 0));
    }

    #[test]
    fn canvas_and_fit() {
        let view = ViewScale::default();
        assert_eq!(view.canvas_size(10, 5), (200, 100));
        assert_eq!(view.fit_grid(1000, 500), (47, 20));
        assert_eq!(view.fit_grid(0, 0), (1, 1));
    }

    #[test]
    fn small_pixel_deltas_accumulate_into_one_notch() {
        let mut wheel = WheelAccumulator::default();
        for _ in 0..3 {
            assert!(wheel.push_pixels(6.0).is_empty());
        }
        assert_eq!(wheel.push_pixels(6.0), vec![1.0]);
        assert!((wheel.pending() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn large_pixel_delta_yields_several_notches() {
        let mut wheel = WheelAccumulator::default();
        assert_eq!(wheel.push_pixels(-45.0), vec![-1.0, -1.0]);
        assert!((wheel.pending() + 5.0).abs() < 1e-9);
    }

    #[test]
    fn reversing_direction_drops_leftover() {
        let mut wheel = WheelAccumulator::default();
        wheel.push_pixels(15.0);
        assert!(wheel.push_pixels(-10.0).is_empty());
        assert_eq!(wheel.pending(), -10.0);
        assert!(wheel.push_pixels(f64::NAN).is_empty());
        assert_eq!(wheel.push_pixels(-10.0), vec![-1.0]);
    }

    #[test]
    fn notches_drive_zoom_one_step_each() {
        let mut wheel = WheelAccumulator::default();
        let mut view = ViewScale::default();
        for _ in 0..4 {
            for notch in wheel.push_pixels(5.0) {
                view.zoom(notch);
            }
        }
        assert!((view.scale() - SCALE_RATIO).abs() < 1e-6);
    }
}
