//! Compliance evaluation against the regulatory distance limits.

use crate::aggregate::SpaceUsage;
use crate::config::ResolvedLimits;
use egress_core::{
    AppliedLimit, BlockedReason, BuildingSummary, ExitBasis, LevelId, RouteResult, Verdict,
};

/// Space metadata carried through to the result record.
#[derive(Clone, Debug)]
pub(crate) struct SpaceMeta {
    pub name: String,
    pub classification: String,
}

/// Evaluate one space's aggregated routes against the rule set.
///
/// The single-exit limit applies when at most one independent exit is
/// reachable, the multiple-exits limit otherwise. With automatic
/// suppression the chosen limit is multiplied by the extension factor
/// before comparison. The boundary is inclusive: a worst route exactly at
/// the limit passes.
pub(crate) fn evaluate_space(
    level: &LevelId,
    usage: &SpaceUsage,
    meta: &SpaceMeta,
    limits: &ResolvedLimits,
    suppression: bool,
) -> RouteResult {
    let basis = if usage.independent_exit_count >= 2 {
        ExitBasis::MultipleExits
    } else {
        ExitBasis::SingleExit
    };
    let base = match basis {
        ExitBasis::SingleExit => limits.limits.single_exit_m,
        ExitBasis::MultipleExits => limits.limits.multiple_exits_m,
    };
    let value_m = if suppression {
        base * limits.extension_factor
    } else {
        base
    };
    let limit = AppliedLimit {
        value_m,
        basis,
        extended: suppression,
    };

    if usage.walkable_cells == 0 {
        return blocked_result(level, usage, meta, limit, BlockedReason::NoWalkableCells);
    }
    let Some(max) = usage.max_distance_m else {
        return blocked_result(level, usage, meta, limit, BlockedReason::Unreachable);
    };

    let verdict = if max <= value_m {
        Verdict::Pass
    } else {
        Verdict::Fail {
            excess_m: max - value_m,
        }
    };
    let explanation = match verdict {
        Verdict::Fail { excess_m } => Some(format!(
            "evacuation route exceeds limit by {excess_m:.2} m ({max:.2} m vs {limit})"
        )),
        _ => None,
    };
    RouteResult {
        space: usage.id.clone(),
        name: meta.name.clone(),
        classification: meta.classification.clone(),
        level: level.clone(),
        verdict,
        max_route_distance_m: Some(max),
        reachable_exit_count: usage.independent_exit_count,
        limit: Some(limit),
        explanation,
    }
}

/// A `blocked` record for a space that produced no usable distance.
pub(crate) fn blocked_result(
    level: &LevelId,
    usage: &SpaceUsage,
    meta: &SpaceMeta,
    limit: AppliedLimit,
    reason: BlockedReason,
) -> RouteResult {
    RouteResult {
        space: usage.id.clone(),
        name: meta.name.clone(),
        classification: meta.classification.clone(),
        level: level.clone(),
        verdict: Verdict::Blocked(reason),
        max_route_distance_m: None,
        reachable_exit_count: usage.independent_exit_count,
        limit: Some(limit),
        explanation: Some(format!("could not compute evacuation distance: {reason}")),
    }
}

/// Roll per-space results up into the building summary.
///
/// The overall worst route considers only non-blocked spaces: a blocked
/// space has no meaningful distance to contribute.
pub fn summarize(results: &[RouteResult]) -> BuildingSummary {
    let mut summary = BuildingSummary::default();
    for r in results {
        match r.verdict {
            Verdict::Pass => summary.passed += 1,
            Verdict::Fail { .. } => summary.failed += 1,
            Verdict::Blocked(_) => summary.blocked += 1,
        }
        if let (false, Some(d)) = (r.verdict.is_blocked(), r.max_route_distance_m) {
            let worse = summary
                .worst_route
                .as_ref()
                .map_or(true, |(best, _)| d > *best);
            if worse {
                summary.worst_route = Some((d, r.space.clone()));
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ResolvedLimits, RouteLimits};
    use egress_core::SpaceId;
    use indexmap::IndexSet;
    use proptest::prelude::*;

    fn limits(single: f64, multi: f64, factor: f64) -> ResolvedLimits {
        ResolvedLimits {
            limits: RouteLimits {
                single_exit_m: single,
                multiple_exits_m: multi,
            },
            extension_factor: factor,
        }
    }

    fn usage(max: Option<f64>, walkable: usize, independent: usize) -> SpaceUsage {
        SpaceUsage {
            id: SpaceId::from("A"),
            walkable_cells: walkable,
            reached_cells: if max.is_some() { walkable } else { 0 },
            max_distance_m: max,
            exits_used: IndexSet::new(),
            independent_exit_count: independent,
        }
    }

    fn meta() -> SpaceMeta {
        SpaceMeta {
            name: "Room A".into(),
            classification: "room".into(),
        }
    }

    fn eval(u: &SpaceUsage, l: &ResolvedLimits, suppression: bool) -> RouteResult {
        evaluate_space(&LevelId::from("L1"), u, &meta(), l, suppression)
    }

    // ── Limit selection ─────────────────────────────────────────

    #[test]
    fn single_exit_space_uses_the_short_limit() {
        let r = eval(&usage(Some(30.0), 10, 1), &limits(25.0, 50.0, 1.25), false);
        assert!(matches!(r.verdict, Verdict::Fail { .. }));
        assert_eq!(r.limit.unwrap().basis, ExitBasis::SingleExit);
    }

    #[test]
    fn multi_exit_space_uses_the_long_limit() {
        // 30 m fails the 25 m single-exit limit but passes multi-exit 50 m.
        let r = eval(&usage(Some(30.0), 10, 2), &limits(25.0, 50.0, 1.25), false);
        assert_eq!(r.verdict, Verdict::Pass);
        assert_eq!(r.limit.unwrap().basis, ExitBasis::MultipleExits);
    }

    #[test]
    fn zero_exit_space_uses_the_single_exit_limit() {
        let r = eval(&usage(Some(10.0), 10, 0), &limits(25.0, 50.0, 1.25), false);
        assert_eq!(r.limit.unwrap().basis, ExitBasis::SingleExit);
    }

    // ── Boundary and extension ──────────────────────────────────

    #[test]
    fn distance_exactly_at_the_limit_passes() {
        let r = eval(&usage(Some(25.0), 10, 1), &limits(25.0, 50.0, 1.25), false);
        assert_eq!(r.verdict, Verdict::Pass);
        assert!(r.explanation.is_none());
    }

    #[test]
    fn suppression_extends_the_limit() {
        let l = limits(25.0, 50.0, 1.25);
        let u = usage(Some(28.0), 10, 1);
        assert!(matches!(eval(&u, &l, false).verdict, Verdict::Fail { .. }));
        let extended = eval(&u, &l, true);
        assert_eq!(extended.verdict, Verdict::Pass);
        let applied = extended.limit.unwrap();
        assert!(applied.extended);
        assert!((applied.value_m - 31.25).abs() < 1e-12);
    }

    #[test]
    fn fail_reports_the_excess() {
        let r = eval(&usage(Some(27.5), 10, 1), &limits(25.0, 50.0, 1.25), false);
        let Verdict::Fail { excess_m } = r.verdict else {
            panic!("expected fail");
        };
        assert!((excess_m - 2.5).abs() < 1e-12);
        assert!(r.explanation.unwrap().contains("2.50 m"));
    }

    // ── Blocked ─────────────────────────────────────────────────

    #[test]
    fn unreached_space_is_blocked_not_fail() {
        let r = eval(&usage(None, 10, 0), &limits(25.0, 50.0, 1.25), false);
        assert_eq!(r.verdict, Verdict::Blocked(BlockedReason::Unreachable));
        assert_eq!(r.max_route_distance_m, None);
        assert!(r.explanation.is_some());
    }

    #[test]
    fn space_without_walkable_cells_is_blocked() {
        let r = eval(&usage(None, 0, 0), &limits(25.0, 50.0, 1.25), false);
        assert_eq!(r.verdict, Verdict::Blocked(BlockedReason::NoWalkableCells));
    }

    // ── Summary ─────────────────────────────────────────────────

    #[test]
    fn summary_counts_and_worst_route() {
        let l = limits(25.0, 50.0, 1.25);
        let results = vec![
            eval(&usage(Some(10.0), 5, 1), &l, false),
            eval(&usage(Some(30.0), 5, 2), &l, false),
            eval(&usage(None, 5, 0), &l, false),
            eval(&usage(Some(27.0), 5, 1), &l, false),
        ];
        let s = summarize(&results);
        assert_eq!((s.passed, s.failed, s.blocked), (2, 1, 1));
        let (worst, _) = s.worst_route.unwrap();
        assert_eq!(worst, 30.0);
    }

    // ── Property: suppression never tightens a verdict ──────────

    proptest! {
        #[test]
        fn suppression_preserves_or_relaxes(
            max in 0.1f64..100.0,
            single in 1.0f64..60.0,
            multi in 1.0f64..120.0,
            factor in 1.0f64..2.0,
            independent in 0usize..4,
        ) {
            let l = limits(single, multi, factor);
            let u = usage(Some(max), 10, independent);
            let without = eval(&u, &l, false);
            let with = eval(&u, &l, true);
            if without.verdict.is_pass() {
                prop_assert!(with.verdict.is_pass());
            }
        }
    }
}
