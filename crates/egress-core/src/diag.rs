//! Non-fatal diagnostics emitted alongside the result set.
//!
//! Per-space and per-level degradations are reported here rather than
//! aborting the request, so partial results survive bad geometry. Every
//! variant carries the identifiers needed to act on it.

use crate::id::{DoorId, LevelId, SpaceId};
use std::fmt;

/// A degraded-but-recoverable condition encountered during analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A space polygon failed validation and was excluded from the grid.
    SpaceExcluded {
        /// The level the space belongs to.
        level: LevelId,
        /// The excluded space.
        space: SpaceId,
        /// What was wrong with the polygon.
        detail: String,
    },
    /// A qualifying exit door could not be snapped onto a walkable cell.
    UnreachableExit {
        /// The level the door belongs to.
        level: LevelId,
        /// The door that could not be placed.
        door: DoorId,
    },
    /// A level has no qualifying exits; all its spaces report blocked.
    NoExitsFound {
        /// The affected level.
        level: LevelId,
    },
    /// Walkable cells with no path to any exit (isolated pockets).
    IsolatedCells {
        /// The level containing the pocket.
        level: LevelId,
        /// Number of unreached walkable cells.
        count: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpaceExcluded {
                level,
                space,
                detail,
            } => {
                write!(f, "space {space} on level {level} excluded: {detail}")
            }
            Self::UnreachableExit { level, door } => {
                write!(
                    f,
                    "exit door {door} on level {level} has no walkable cell within the snap radius"
                )
            }
            Self::NoExitsFound { level } => {
                write!(f, "level {level} has no qualifying exits")
            }
            Self::IsolatedCells { level, count } => {
                write!(
                    f,
                    "{count} walkable cells on level {level} are unreachable from every exit"
                )
            }
        }
    }
}
