//! Single-level analysis pipeline.
//!
//! Runs grid build, exit placement, the shortest-path sweep, aggregation,
//! and compliance evaluation for one storey. Degradations that affect a
//! single space or the whole level become `blocked` verdicts plus
//! diagnostics rather than errors, so one bad storey never discards the
//! rest of the building's results.

use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};

use crate::aggregate::{aggregate_spaces, SpaceUsage};
use crate::analysis::AnalysisError;
use crate::compliance::{blocked_result, evaluate_space, SpaceMeta};
use crate::config::{AnalysisConfig, ResolvedLimits};
use egress_core::{
    AppliedLimit, BlockedReason, CancelToken, Diagnostic, ExitBasis, RouteResult, SpaceId,
};
use egress_grid::{build_grid, locate_exits, CellIx, GridError, Level};
use egress_route::{shortest_paths, RouteError};

/// Everything one storey contributes to the report.
#[derive(Clone, Debug, Default)]
pub struct LevelOutcome {
    /// Per-space verdicts, in the level's input space order.
    pub results: Vec<RouteResult>,
    /// Non-fatal findings collected along the way.
    pub diagnostics: Vec<Diagnostic>,
}

/// Analyze one level end to end.
///
/// `resolved` must come from [`AnalysisConfig::validate`] on the same
/// `config`. Fails only on cancellation or a grid dimension overflow;
/// every other degradation is reported through the outcome.
pub fn analyze_level(
    level: &Level,
    config: &AnalysisConfig,
    resolved: &ResolvedLimits,
    cancel: &CancelToken,
) -> Result<LevelOutcome, AnalysisError> {
    if cancel.is_cancelled() {
        return Err(AnalysisError::Cancelled);
    }
    let mut outcome = LevelOutcome::default();

    let built = match build_grid(level, config.resolution_m, config.margin_m) {
        Ok(built) => built,
        Err(GridError::NoValidSpaces { .. }) => {
            warn!("level {}: no valid spaces, reporting all blocked", level.id);
            for space in &level.spaces {
                outcome.diagnostics.push(Diagnostic::SpaceExcluded {
                    level: level.id.clone(),
                    space: space.id.clone(),
                    detail: "outline failed validation".to_owned(),
                });
                outcome.results.push(geometry_blocked(
                    level,
                    space.id.clone(),
                    config,
                    resolved,
                ));
            }
            return Ok(outcome);
        }
        Err(e) => return Err(AnalysisError::Grid(e)),
    };
    let grid = &built.grid;
    debug!(
        "level {}: {}x{} cells at {} m, {} walkable",
        level.id,
        grid.cols(),
        grid.rows(),
        grid.resolution(),
        grid.walkable_count()
    );

    let mut excluded: IndexSet<&SpaceId> = IndexSet::new();
    for (space, err) in &built.excluded {
        warn!("level {}: excluding space {space}: {err}", level.id);
        outcome.diagnostics.push(Diagnostic::SpaceExcluded {
            level: level.id.clone(),
            space: space.clone(),
            detail: err.to_string(),
        });
        excluded.insert(space);
    }

    let located = locate_exits(grid, &level.doors, config.snap_radius_cells);
    for door in &located.unplaced {
        warn!("level {}: exit door {door} is unreachable", level.id);
        outcome.diagnostics.push(Diagnostic::UnreachableExit {
            level: level.id.clone(),
            door: door.clone(),
        });
    }
    if located.exits.is_empty() {
        warn!("level {}: no usable exits", level.id);
        outcome.diagnostics.push(Diagnostic::NoExitsFound {
            level: level.id.clone(),
        });
        for space in &level.spaces {
            let result = if excluded.contains(&space.id) {
                geometry_blocked(level, space.id.clone(), config, resolved)
            } else {
                let usage = empty_usage(space.id.clone());
                blocked_result(
                    &level.id,
                    &usage,
                    &meta_of(level, &space.id),
                    default_limit(config, resolved),
                    BlockedReason::NoExitsOnLevel,
                )
            };
            outcome.results.push(result);
        }
        return Ok(outcome);
    }

    let field = match shortest_paths(grid, &located.exits, config.connectivity, cancel) {
        Ok(field) => field,
        Err(RouteError::Cancelled) => return Err(AnalysisError::Cancelled),
    };
    let isolated = (0..grid.len() as u32)
        .map(CellIx)
        .filter(|&ix| grid.is_walkable(ix) && !field.reached(ix))
        .count();
    if isolated > 0 {
        outcome.diagnostics.push(Diagnostic::IsolatedCells {
            level: level.id.clone(),
            count: isolated,
        });
    }

    let usages = aggregate_spaces(grid, &field, &located.exits, &config.independence);
    let by_id: IndexMap<&SpaceId, &SpaceUsage> = usages.iter().map(|u| (&u.id, u)).collect();

    for space in &level.spaces {
        let result = if let Some(usage) = by_id.get(&space.id) {
            evaluate_space(
                &level.id,
                usage,
                &meta_of(level, &space.id),
                resolved,
                config.has_auto_suppression,
            )
        } else {
            geometry_blocked(level, space.id.clone(), config, resolved)
        };
        outcome.results.push(result);
    }
    Ok(outcome)
}

// ── Helpers ─────────────────────────────────────────────────────

fn meta_of(level: &Level, id: &SpaceId) -> SpaceMeta {
    level
        .spaces
        .iter()
        .find(|s| s.id == *id)
        .map(|s| SpaceMeta {
            name: s.name.clone(),
            classification: s.classification.clone(),
        })
        .unwrap_or_else(|| SpaceMeta {
            name: String::new(),
            classification: String::new(),
        })
}

fn empty_usage(id: SpaceId) -> SpaceUsage {
    SpaceUsage {
        id,
        walkable_cells: 0,
        reached_cells: 0,
        max_distance_m: None,
        exits_used: IndexSet::new(),
        independent_exit_count: 0,
    }
}

/// The limit a space with no usable exits would have been held to.
fn default_limit(config: &AnalysisConfig, resolved: &ResolvedLimits) -> AppliedLimit {
    let base = resolved.limits.single_exit_m;
    AppliedLimit {
        value_m: if config.has_auto_suppression {
            base * resolved.extension_factor
        } else {
            base
        },
        basis: ExitBasis::SingleExit,
        extended: config.has_auto_suppression,
    }
}

fn geometry_blocked(
    level: &Level,
    id: SpaceId,
    config: &AnalysisConfig,
    resolved: &ResolvedLimits,
) -> RouteResult {
    let usage = empty_usage(id.clone());
    blocked_result(
        &level.id,
        &usage,
        &meta_of(level, &id),
        default_limit(config, resolved),
        BlockedReason::InvalidGeometry,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use egress_core::Verdict;
    use egress_grid::SpaceGeometry;
    use egress_test_utils::{exit_door, rect_ring, single_space_level, space};

    fn cfg() -> (AnalysisConfig, ResolvedLimits) {
        let config = AnalysisConfig::default();
        let resolved = config.validate().unwrap();
        (config, resolved)
    }

    fn run(level: &Level) -> LevelOutcome {
        let (config, resolved) = cfg();
        analyze_level(level, &config, &resolved, &CancelToken::new()).unwrap()
    }

    // ── Happy path ──────────────────────────────────────────────

    #[test]
    fn small_room_passes() {
        let level = single_space_level(
            "A",
            rect_ring(0.0, 0.0, 10.0, 4.0),
            vec![exit_door("D1", 0.0, 2.0)],
        );
        let outcome = run(&level);
        assert_eq!(outcome.results.len(), 1);
        let r = &outcome.results[0];
        assert_eq!(r.verdict, Verdict::Pass);
        let max = r.max_route_distance_m.unwrap();
        assert!(max > 9.0 && max < 12.0, "max {max}");
        assert_eq!(r.reachable_exit_count, 1);
        assert!(outcome.diagnostics.is_empty());
    }

    // ── Degradations ────────────────────────────────────────────

    #[test]
    fn level_without_exits_blocks_every_space() {
        let mut level = single_space_level(
            "A",
            rect_ring(0.0, 0.0, 10.0, 4.0),
            vec![exit_door("D1", 0.0, 2.0)],
        );
        level.doors[0].is_exit = false;
        let outcome = run(&level);
        assert_eq!(
            outcome.results[0].verdict,
            Verdict::Blocked(BlockedReason::NoExitsOnLevel)
        );
        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::NoExitsFound { .. })));
    }

    #[test]
    fn degenerate_space_is_excluded_and_blocked() {
        let mut level = single_space_level(
            "A",
            rect_ring(0.0, 0.0, 10.0, 4.0),
            vec![exit_door("D1", 0.0, 2.0)],
        );
        // Zero-area sliver alongside the valid room.
        level.spaces.push(SpaceGeometry {
            id: "B".into(),
            name: "Sliver".into(),
            classification: "room".into(),
            outline: rect_ring(20.0, 0.0, 20.0, 4.0),
        });
        let outcome = run(&level);
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].verdict, Verdict::Pass);
        assert_eq!(
            outcome.results[1].verdict,
            Verdict::Blocked(BlockedReason::InvalidGeometry)
        );
        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::SpaceExcluded { space, .. } if space.as_str() == "B")));
    }

    #[test]
    fn detached_space_is_unreachable() {
        let mut level = single_space_level(
            "A",
            rect_ring(0.0, 0.0, 4.0, 4.0),
            vec![exit_door("D1", 0.1, 2.0)],
        );
        level.spaces.push(space("B", rect_ring(8.0, 0.0, 12.0, 4.0)));
        let outcome = run(&level);
        assert_eq!(outcome.results[0].verdict, Verdict::Pass);
        assert_eq!(
            outcome.results[1].verdict,
            Verdict::Blocked(BlockedReason::Unreachable)
        );
        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::IsolatedCells { count, .. } if *count > 0)));
    }

    #[test]
    fn unplaceable_exit_door_is_reported() {
        let mut level = single_space_level(
            "A",
            rect_ring(0.0, 0.0, 4.0, 4.0),
            vec![exit_door("D1", 0.1, 2.0)],
        );
        // Blocking the right half strands D2 far from any walkable cell.
        level.obstructions.push(rect_ring(2.0, -0.5, 4.5, 4.5));
        let mut stranded = exit_door("D2", 4.0, 2.0);
        stranded.connects = vec!["A".into()];
        level.doors.push(stranded);
        let outcome = run(&level);
        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::UnreachableExit { door, .. } if door.as_str() == "D2")));
        assert_eq!(outcome.results[0].verdict, Verdict::Pass);
        assert_eq!(outcome.results[0].reachable_exit_count, 1);
    }

    #[test]
    fn cancellation_aborts_before_work() {
        let level = single_space_level(
            "A",
            rect_ring(0.0, 0.0, 4.0, 4.0),
            vec![exit_door("D1", 0.1, 2.0)],
        );
        let (config, resolved) = cfg();
        let cancel = CancelToken::new();
        cancel.cancel();
        let err = analyze_level(&level, &config, &resolved, &cancel).unwrap_err();
        assert!(matches!(err, AnalysisError::Cancelled));
    }
}
