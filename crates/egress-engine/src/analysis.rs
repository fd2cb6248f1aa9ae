//! Building-wide analysis entry point.
//!
//! Validates the configuration once, fans the levels out over worker
//! threads, and merges the per-level outcomes back into a single
//! [`AnalysisReport`] in input order, so a report is bit-identical across
//! runs regardless of thread scheduling.

use std::fmt;
use std::thread;

use crossbeam_channel::unbounded;
use log::{debug, info};

use crate::compliance::summarize;
use crate::config::{AnalysisConfig, ConfigError, ResolvedLimits};
use crate::level::{analyze_level, LevelOutcome};
use egress_core::{AnalysisReport, CancelToken};
use egress_grid::{GridError, Level};

/// Why an analysis request was rejected outright.
///
/// Per-space and per-level problems never surface here; they degrade to
/// `blocked` verdicts and diagnostics inside the report.
#[derive(Clone, Debug, PartialEq)]
pub enum AnalysisError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// A level could not be rasterized at all.
    Grid(GridError),
    /// The caller cancelled the request.
    Cancelled,
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Grid(e) => write!(f, "grid construction failed: {e}"),
            Self::Cancelled => write!(f, "analysis cancelled"),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Cancelled => None,
        }
    }
}

impl From<ConfigError> for AnalysisError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Analyze a whole building.
///
/// Levels are independent; with more than one the work runs on one scoped
/// worker thread per level. Results and diagnostics are merged in the
/// levels' input order. Cancellation is observed between levels and inside
/// the shortest-path sweep, and surfaces as [`AnalysisError::Cancelled`].
pub fn analyze(
    levels: &[Level],
    config: &AnalysisConfig,
    cancel: &CancelToken,
) -> Result<AnalysisReport, AnalysisError> {
    let resolved = config.validate()?;
    info!(
        "analyzing {} level(s) at {} m resolution",
        levels.len(),
        config.resolution_m
    );

    let outcomes = if levels.len() > 1 {
        run_parallel(levels, config, &resolved, cancel)
    } else {
        levels
            .iter()
            .map(|level| analyze_level(level, config, &resolved, cancel))
            .collect()
    };

    let mut spaces = Vec::new();
    let mut diagnostics = Vec::new();
    for outcome in outcomes {
        let outcome = outcome?;
        spaces.extend(outcome.results);
        diagnostics.extend(outcome.diagnostics);
    }
    let summary = summarize(&spaces);
    info!(
        "analysis complete: {} passed, {} failed, {} blocked",
        summary.passed, summary.failed, summary.blocked
    );
    Ok(AnalysisReport {
        spaces,
        summary,
        diagnostics,
    })
}

fn run_parallel(
    levels: &[Level],
    config: &AnalysisConfig,
    resolved: &ResolvedLimits,
    cancel: &CancelToken,
) -> Vec<Result<LevelOutcome, AnalysisError>> {
    let (tx, rx) = unbounded();
    thread::scope(|scope| {
        for (ix, level) in levels.iter().enumerate() {
            let tx = tx.clone();
            scope.spawn(move || {
                debug!("worker starting level {}", level.id);
                let outcome = analyze_level(level, config, resolved, cancel);
                // A send failure means the receiver is gone and the
                // result is moot.
                let _ = tx.send((ix, outcome));
            });
        }
        drop(tx);
        let mut received: Vec<(usize, Result<LevelOutcome, AnalysisError>)> = rx.iter().collect();
        received.sort_by_key(|(ix, _)| *ix);
        received.into_iter().map(|(_, outcome)| outcome).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use egress_core::{BlockedReason, Verdict};
    use egress_test_utils::{exit_door, level, rect_ring, space};

    fn two_level_building() -> Vec<Level> {
        vec![
            level(
                "L1",
                vec![space("A", rect_ring(0.0, 0.0, 10.0, 4.0))],
                vec![exit_door("D1", 0.1, 2.0)],
            ),
            level(
                "L2",
                vec![
                    space("B", rect_ring(0.0, 0.0, 6.0, 6.0)),
                    space("C", rect_ring(20.0, 0.0, 26.0, 6.0)),
                ],
                vec![exit_door("D2", 0.1, 3.0)],
            ),
        ]
    }

    #[test]
    fn multi_level_report_is_in_input_order() {
        let levels = two_level_building();
        let report = analyze(&levels, &AnalysisConfig::default(), &CancelToken::new()).unwrap();
        let ids: Vec<&str> = report.spaces.iter().map(|r| r.space.as_str()).collect();
        assert_eq!(ids, ["A", "B", "C"]);
        assert_eq!(report.summary.passed, 2);
        assert_eq!(report.summary.blocked, 1);
        assert_eq!(
            report.spaces[2].verdict,
            Verdict::Blocked(BlockedReason::Unreachable)
        );
    }

    #[test]
    fn repeated_runs_are_identical() {
        let levels = two_level_building();
        let config = AnalysisConfig::default();
        let a = analyze(&levels, &config, &CancelToken::new()).unwrap();
        let b = analyze(&levels, &config, &CancelToken::new()).unwrap();
        for (x, y) in a.spaces.iter().zip(&b.spaces) {
            assert_eq!(x.space, y.space);
            assert_eq!(x.verdict, y.verdict);
            assert_eq!(x.max_route_distance_m, y.max_route_distance_m);
        }
        assert_eq!(a.summary.worst_route, b.summary.worst_route);
    }

    #[test]
    fn worst_route_names_the_space() {
        let levels = two_level_building();
        let report = analyze(&levels, &AnalysisConfig::default(), &CancelToken::new()).unwrap();
        let (worst, id) = report.summary.worst_route.unwrap();
        // Room A's far corner is the longest route in the building.
        assert_eq!(id.as_str(), "A");
        assert!(worst > 9.0 && worst < 12.0, "worst {worst}");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let levels = two_level_building();
        let config = AnalysisConfig {
            resolution_m: 0.0,
            ..AnalysisConfig::default()
        };
        let err = analyze(&levels, &config, &CancelToken::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));
    }

    #[test]
    fn cancellation_surfaces_as_an_error() {
        let levels = two_level_building();
        let cancel = CancelToken::new();
        cancel.cancel();
        let err = analyze(&levels, &AnalysisConfig::default(), &cancel).unwrap_err();
        assert_eq!(err, AnalysisError::Cancelled);
    }

    #[test]
    fn empty_building_yields_an_empty_report() {
        let report = analyze(&[], &AnalysisConfig::default(), &CancelToken::new()).unwrap();
        assert!(report.spaces.is_empty());
        assert_eq!(report.summary.total(), 0);
        assert!(report.summary.worst_route.is_none());
    }
}
