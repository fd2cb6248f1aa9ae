//! Result model: per-space verdicts, applied limits, and the building summary.

use crate::diag::Diagnostic;
use crate::id::{LevelId, SpaceId};
use std::fmt;

/// Why a space could not be evaluated.
///
/// `Blocked` is distinct from a regulatory failure: the space produced no
/// usable route distance, so no pass/fail comparison is possible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockedReason {
    /// The space's polygon was degenerate and excluded during rasterization.
    InvalidGeometry,
    /// The space rasterized to zero walkable cells.
    NoWalkableCells,
    /// No cell of the space has a path to any exit.
    Unreachable,
    /// The enclosing level has no qualifying exits at all.
    NoExitsOnLevel,
}

impl fmt::Display for BlockedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry => write!(f, "space polygon is degenerate"),
            Self::NoWalkableCells => write!(f, "space contains no walkable cells"),
            Self::Unreachable => write!(f, "no path from the space to any exit"),
            Self::NoExitsOnLevel => write!(f, "level has no qualifying exits"),
        }
    }
}

/// Compliance verdict for one space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Verdict {
    /// Maximum route distance is within the applicable limit (inclusive).
    Pass,
    /// Maximum route distance exceeds the applicable limit.
    Fail {
        /// Metres by which the worst route exceeds the limit.
        excess_m: f64,
    },
    /// The space could not be evaluated.
    Blocked(BlockedReason),
}

impl Verdict {
    /// `true` for [`Verdict::Pass`].
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// `true` for [`Verdict::Blocked`].
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Fail { .. } => write!(f, "fail"),
            Self::Blocked(_) => write!(f, "blocked"),
        }
    }
}

/// Whether the single-exit or multi-exit distance limit applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitBasis {
    /// The space reaches at most one independent exit.
    SingleExit,
    /// The space reaches two or more independent exits.
    MultipleExits,
}

impl fmt::Display for ExitBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleExit => write!(f, "single exit"),
            Self::MultipleExits => write!(f, "multiple exits"),
        }
    }
}

/// The regulatory limit a space was compared against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppliedLimit {
    /// Limit in metres after any suppression extension.
    pub value_m: f64,
    /// Which threshold family supplied the base value.
    pub basis: ExitBasis,
    /// Whether the automatic-suppression extension factor was applied.
    pub extended: bool,
}

impl fmt::Display for AppliedLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} m ({}", self.value_m, self.basis)?;
        if self.extended {
            write!(f, ", extended")?;
        }
        write!(f, ")")
    }
}

/// Per-space outcome of the evacuation-route analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteResult {
    /// The evaluated space.
    pub space: SpaceId,
    /// Human-readable space name from the building model.
    pub name: String,
    /// Classification tag (residential unit, corridor, storage, ...).
    pub classification: String,
    /// The level the space belongs to.
    pub level: LevelId,
    /// Compliance verdict.
    pub verdict: Verdict,
    /// Worst finite walking distance to an exit, in metres.
    ///
    /// `None` when the verdict is [`Verdict::Blocked`].
    pub max_route_distance_m: Option<f64>,
    /// Number of distinct independent exits the space's cells route through.
    pub reachable_exit_count: usize,
    /// The limit this space was compared against, if one applied.
    pub limit: Option<AppliedLimit>,
    /// Human-readable explanation, present on `fail` and `blocked`.
    pub explanation: Option<String>,
}

/// Building-level rollup across all levels of one request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildingSummary {
    /// Largest `max_route_distance_m` among non-blocked spaces, with the
    /// space that produced it. `None` if every space was blocked.
    pub worst_route: Option<(f64, SpaceId)>,
    /// Spaces that passed.
    pub passed: usize,
    /// Spaces that failed.
    pub failed: usize,
    /// Spaces that could not be evaluated.
    pub blocked: usize,
}

impl BuildingSummary {
    /// Total number of evaluated spaces.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.blocked
    }
}

/// Complete result set for one analysis request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisReport {
    /// One record per space, in level order then space order.
    pub spaces: Vec<RouteResult>,
    /// Building-level rollup.
    pub summary: BuildingSummary,
    /// Non-fatal degradations encountered during the analysis.
    pub diagnostics: Vec<Diagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_display() {
        assert_eq!(Verdict::Pass.to_string(), "pass");
        assert_eq!(Verdict::Fail { excess_m: 1.0 }.to_string(), "fail");
        assert_eq!(
            Verdict::Blocked(BlockedReason::Unreachable).to_string(),
            "blocked"
        );
    }

    #[test]
    fn applied_limit_display() {
        let lim = AppliedLimit {
            value_m: 31.25,
            basis: ExitBasis::SingleExit,
            extended: true,
        };
        assert_eq!(lim.to_string(), "31.2 m (single exit, extended)");
        let lim = AppliedLimit {
            value_m: 50.0,
            basis: ExitBasis::MultipleExits,
            extended: false,
        };
        assert_eq!(lim.to_string(), "50.0 m (multiple exits)");
    }

    #[test]
    fn summary_total() {
        let s = BuildingSummary {
            worst_route: None,
            passed: 2,
            failed: 1,
            blocked: 3,
        };
        assert_eq!(s.total(), 6);
    }
}
