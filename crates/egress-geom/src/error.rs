//! Error types for polygon validation.

use std::fmt;

/// Errors arising from polygon construction.
///
/// A `GeomError` excludes the affected space from the grid; it is never
/// fatal to a whole analysis request.
#[derive(Debug, Clone, PartialEq)]
pub enum GeomError {
    /// Fewer than three vertices.
    TooFewVertices {
        /// Number of vertices supplied.
        count: usize,
    },
    /// A vertex coordinate is NaN or infinite.
    NonFiniteVertex {
        /// Index of the offending vertex.
        index: usize,
    },
    /// Enclosed area is below the minimum meaningful area.
    DegenerateArea {
        /// The computed absolute area in square metres.
        area: f64,
    },
    /// Two non-adjacent edges cross.
    SelfIntersecting {
        /// Index of the first edge (by its start vertex).
        edge_a: usize,
        /// Index of the second edge (by its start vertex).
        edge_b: usize,
    },
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewVertices { count } => {
                write!(f, "polygon needs at least 3 vertices, got {count}")
            }
            Self::NonFiniteVertex { index } => {
                write!(f, "vertex {index} has a non-finite coordinate")
            }
            Self::DegenerateArea { area } => {
                write!(f, "polygon area {area} m^2 is below the minimum")
            }
            Self::SelfIntersecting { edge_a, edge_b } => {
                write!(f, "polygon edges {edge_a} and {edge_b} intersect")
            }
        }
    }
}

impl std::error::Error for GeomError {}
