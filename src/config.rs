//! Command-line configuration.

use crate::engine::{Simulation, DEFAULT_ALIVE_RATIO};
use crate::view::ViewScale;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Grid used when the window reports no usable size
pub const FALLBACK_GRID: (u32, u32) = (48, 30);

#[derive(Debug, Clone, Parser, Serialize)]
#[command(name = "canvas_life")]
#[command(version)]
#[command(about = "Interactive Game of Life on a zoomable pixel grid")]
pub struct Config {
    /// Grid columns (default: fit to the window)
    #[arg(long)]
    pub cols: Option<u32>,

    /// Grid rows (default: fit to the window)
    #[arg(long)]
    pub rows: Option<u32>,

    /// Initial view scale, clamped to [0.2, 8]
    #[arg(long, default_value_t = 1.0)]
    pub scale: f32,

    /// Milliseconds between generations while running
    #[arg(long, default_value_t = 100)]
    pub interval_ms: u64,

    /// Probability of a cell being alive after randomizing
    #[arg(long, default_value_t = DEFAULT_ALIVE_RATIO)]
    pub alive_ratio: f64,

    /// Seed for reproducible randomizing
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory exported grids are written to
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,

    /// Grid file (as written by save) to load at startup
    #[arg(long)]
    pub load: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero, got {cols}x{rows}")]
    ZeroDimension { cols: u32, rows: u32 },
    #[error("alive ratio {0} must be between 0.0 and 1.0")]
    InvalidAliveRatio(f64),
    #[error("run interval must be at least 1 ms")]
    ZeroInterval,
    #[error("scale {0} is not a finite positive number")]
    InvalidScale(f32),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cols: None,
            rows: None,
            scale: 1.0,
            interval_ms: 100,
            alive_ratio: DEFAULT_ALIVE_RATIO,
            seed: None,
            export_dir: PathBuf::from("."),
            load: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == Some(0) || self.rows == Some(0) {
            return Err(ConfigError::ZeroDimension {
                cols: self.cols.unwrap_or_default(),
                rows: self.rows.unwrap_or_default(),
            });
        }
        if !(0.0..=1.0).contains(&self.alive_ratio) {
            return Err(ConfigError::InvalidAliveRatio(self.alive_ratio));
        }
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        Ok(())
    }

    pub fn view(&self) -> ViewScale {
        ViewScale::new(self.scale)
    }

    pub fn run_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Grid dimensions for a window of the given pixel size. Explicit
    /// `--cols`/`--rows` win over the fitted values.
    pub fn grid_size(&self, window_width: u32, window_height: u32) -> (u32, u32) {
        let (fit_cols, fit_rows) = if window_width == 0 || window_height == 0 {
            FALLBACK_GRID
        } else {
            self.view().fit_grid(window_width, window_height)
        };
        (self.cols.unwrap_or(fit_cols), self.rows.unwrap_or(fit_rows))
    }

    /// Effective settings as one JSON line, for the startup log
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn build_simulation(&self, cols: u32, rows: u32) -> Simulation {
        Simulation::new(cols, rows)
            .with_view(self.view())
            .with_run_interval(self.run_interval())
            .with_alive_ratio(self.alive_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse_and_validate() {
        let config = Config::try_parse_from(["canvas_life"]).unwrap();
        assert_eq!(config.cols, None);
        assert_eq!(config.interval_ms, 100);
        assert_eq!(config.alive_ratio, 0.1);
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_all_flags() {
        let config = Config::try_parse_from([
            "canvas_life",
            "--cols", "30",
            "--rows", "20",
            "--scale", "2.5",
            "--interval-ms", "250",
            "--alive-ratio", "0.3",
            "--seed", "9",
            "--export-dir", "out",
            "--load", "cell-1.txt",
        ])
        .unwrap();
        assert_eq!(config.grid_size(800, 600), (30, 20));
        assert_eq!(config.view().block_size(), 50);
        assert_eq!(config.run_interval(), Duration::from_millis(250));
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.load, Some(PathBuf::from("cell-1.txt")));
    }

    #[test]
    fn validation_errors() {
        let config = Config { cols: Some(0), ..Config::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDimension { cols: 0, rows: 0 }));

        let config = Config { alive_ratio: 1.5, ..Config::default() };
        assert_eq!(config.validate(), Err(ConfigError::InvalidAliveRatio(1.5)));

        let config = Config { interval_ms: 0, ..Config::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));

        let config = Config { scale: -1.0, ..Config::default() };
        assert_eq!(config.validate(), Err(ConfigError::InvalidScale(-1.0)));
    }

    #[test]
    fn grid_size_fits_window_or_falls_back() {
        let config = Config::default();
        assert_eq!(config.grid_size(1000, 500), (47, 20));
        assert_eq!(config.grid_size(0, 500), FALLBACK_GRID);

        let config = Config { rows: Some(7), ..Config::default() };
        assert_eq!(config.grid_size(1000, 500), (47, 7));
    }

    #[test]
    fn settings_serialize_to_json() {
        let config = Config::try_parse_from(["canvas_life", "--cols", "12", "--seed", "7"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(value["cols"], 12);
        assert_eq!(value["rows"], serde_json::Value::Null);
        assert_eq!(value["interval_ms"], 100);
        assert_eq!(value["seed"], 7);
        assert_eq!(value["export_dir"], ".");
    }

    #[test]
    fn simulation_carries_settings() {
        let config = Config { scale: 0.5, interval_ms: 40, ..Config::default() };
        let sim = config.build_simulation(5, 4);
        assert_eq!(sim.view().block_size(), 10);
        assert_eq!(sim.run_interval(), Duration::from_millis(40));
        assert_eq!((sim.grid().cols(), sim.grid().rows()), (5, 4));
    }
}
