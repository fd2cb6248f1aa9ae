//! Error types for grid construction.

use egress_core::LevelId;
use std::fmt;

/// Errors arising from grid construction.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Grid resolution is NaN, infinite, zero, or negative.
    InvalidResolution {
        /// The offending value in metres per cell.
        value: f64,
    },
    /// No space polygon on the level survived validation.
    NoValidSpaces {
        /// The affected level.
        level: LevelId,
    },
    /// The grid's total cell count would not fit a flat `u32` index.
    DimensionTooLarge {
        /// Computed column count.
        cols: u64,
        /// Computed row count.
        rows: u64,
        /// The maximum supported total cell count.
        max_cells: u64,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidResolution { value } => {
                write!(f, "grid resolution must be a positive finite number, got {value}")
            }
            Self::NoValidSpaces { level } => {
                write!(f, "level {level} has no valid space polygons")
            }
            Self::DimensionTooLarge { cols, rows, max_cells } => {
                write!(f, "grid of {cols} x {rows} cells exceeds the maximum of {max_cells}")
            }
        }
    }
}

impl std::error::Error for GridError {}
