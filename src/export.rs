//! Text export of the grid and re-import of exported files.
//!
//! The format is a nested array with one inner array per column:
//!
//! ```text
//! [
//! [0, 1, 0],
//! [0, 0, 1]
//! ]
//! ```

use crate::grid::{Grid, Layout};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub const EXPORT_PREFIX: &str = "cell";
pub const EXPORT_EXTENSION: &str = "txt";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("i/o error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed grid file: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("cell ({column}, {row}) has value {value}, expected 0 or 1")]
    InvalidCell { column: usize, row: usize, value: u8 },
}

/// Serialize the grid as a nested 0/1 array, one line per column
pub fn grid_to_text(grid: &Grid) -> String {
    let columns: Vec<String> = grid
        .to_layout()
        .iter()
        .map(|column| {
            let values: Vec<&str> = column
                .iter()
                .map(|&v| if v != 0 { "1" } else { "0" })
                .collect();
            format!("[{}]", values.join(", "))
        })
        .collect();

    if columns.is_empty() {
        return "[\n]\n".to_string();
    }
    format!("[\n{}\n]\n", columns.join(",\n"))
}

/// Parse text produced by [`grid_to_text`]. A leading byte order mark is ignored.
pub fn parse_layout(text: &str) -> Result<Layout, ExportError> {
    let layout: Layout = serde_json::from_str(text.trim_start_matches('\u{feff}'))?;
    for (column, values) in layout.iter().enumerate() {
        if let Some((row, &value)) = values.iter().enumerate().find(|&(_, &v)| v > 1) {
            return Err(ExportError::InvalidCell { column, row, value });
        }
    }
    Ok(layout)
}

/// `cell-<unix millis>.txt`
pub fn export_file_name(at: SystemTime) -> String {
    let millis = at
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{}-{}.{}", EXPORT_PREFIX, millis, EXPORT_EXTENSION)
}

/// Write the grid into `dir` under a timestamped name. Creates `dir` if needed.
pub fn save_grid(grid: &Grid, dir: &Path, at: SystemTime) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(export_file_name(at));
    fs::write(&path, grid_to_text(grid)).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    log::info!("Exported {}x{} grid to {}", grid.cols(), grid.rows(), path.display());
    Ok(path)
}

/// One-line status text for the outcome of a save
pub fn save_status(result: &Result<PathBuf, ExportError>) -> String {
    match result {
        Ok(path) => format!("Saved {}", path.display()),
        Err(err) => format!("Save failed: {}", err),
    }
}

pub fn load_layout_file(path: &Path) -> Result<Layout, ExportError> {
    let text = fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let layout = parse_layout(&text)?;
    log::info!("Loaded {} columns from {}", layout.len(), path.display());
    Ok(layout)
}
