//! Game of Life simulation core: grid, rules, view scale, run timer,
//! engine, export and configuration. The windowed shell lives in the binary.

pub mod commands;
pub mod config;
pub mod engine;
pub mod export;
pub mod grid;
pub mod rules;
pub mod timer;
pub mod view;

pub use commands::Command;
pub use config::Config;
pub use engine::Simulation;
pub use grid::{Grid, Layout};
pub use rules::{GameRules, Pattern};
pub use view::ViewScale;
