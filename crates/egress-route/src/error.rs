//! Error types for the shortest-path engine.

use std::fmt;

/// Errors from the shortest-path search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// The caller's cancellation token fired mid-search.
    Cancelled,
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "shortest-path search cancelled"),
        }
    }
}

impl std::error::Error for RouteError {}
