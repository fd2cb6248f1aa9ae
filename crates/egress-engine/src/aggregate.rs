//! Per-space aggregation of the distance field.

use crate::config::ExitIndependence;
use egress_core::{ExitId, SpaceId};
use egress_grid::{CellIx, ExitNode, Grid};
use egress_route::DistanceField;
use indexmap::IndexSet;

/// Aggregated route statistics for one space.
#[derive(Clone, Debug, PartialEq)]
pub struct SpaceUsage {
    /// The space.
    pub id: SpaceId,
    /// Walkable cells assigned to the space.
    pub walkable_cells: usize,
    /// Walkable cells the search reached.
    pub reached_cells: usize,
    /// Maximum finite distance among the space's cells, metres.
    ///
    /// `None` when no cell was reached.
    pub max_distance_m: Option<f64>,
    /// Distinct exits used as the nearest exit by the space's cells.
    pub exits_used: IndexSet<ExitId>,
    /// Distinct independence groups among [`SpaceUsage::exits_used`].
    pub independent_exit_count: usize,
}

/// Aggregate per-cell distances by enclosing space.
///
/// Returns one [`SpaceUsage`] per validated space, in grid slot order
/// (the input order of the surviving spaces). Cells the search never
/// reached contribute to `walkable_cells` but not to the maximum, so an
/// isolated pocket can never masquerade as a short route.
pub fn aggregate_spaces(
    grid: &Grid,
    field: &DistanceField,
    exits: &[ExitNode],
    independence: &ExitIndependence,
) -> Vec<SpaceUsage> {
    let mut usages: Vec<SpaceUsage> = grid
        .spaces()
        .iter()
        .map(|s| SpaceUsage {
            id: s.id.clone(),
            walkable_cells: 0,
            reached_cells: 0,
            max_distance_m: None,
            exits_used: IndexSet::new(),
            independent_exit_count: 0,
        })
        .collect();

    for i in 0..grid.len() {
        let ix = CellIx(i as u32);
        if !grid.is_walkable(ix) {
            continue;
        }
        let Some(slot) = grid.space_slot(ix) else {
            continue;
        };
        let usage = &mut usages[slot as usize];
        usage.walkable_cells += 1;
        if !field.reached(ix) {
            continue;
        }
        usage.reached_cells += 1;
        let d = field.distance(ix);
        usage.max_distance_m = Some(usage.max_distance_m.map_or(d, |m: f64| m.max(d)));
        if let Some(exit) = field.via(ix) {
            usage.exits_used.insert(exit);
        }
    }

    for usage in &mut usages {
        let mut groups: IndexSet<&str> = IndexSet::new();
        for exit in &usage.exits_used {
            let door = &exits[exit.0 as usize].door;
            groups.insert(independence.group_of(door));
        }
        usage.independent_exit_count = groups.len();
    }

    usages
}

#[cfg(test)]
mod tests {
    use super::*;
    use egress_core::{CancelToken, DoorId};
    use egress_grid::{build_grid, locate_exits, Connectivity};
    use egress_route::shortest_paths;
    use egress_test_utils::{exit_door, level, rect_ring, space};
    use indexmap::IndexMap;

    fn run(
        lv: &egress_grid::Level,
        independence: &ExitIndependence,
    ) -> (Grid, Vec<SpaceUsage>) {
        let grid = build_grid(lv, 0.2, 0.2).unwrap().grid;
        let located = locate_exits(&grid, &lv.doors, 2);
        let field =
            shortest_paths(&grid, &located.exits, Connectivity::Eight, &CancelToken::new())
                .unwrap();
        let usages = aggregate_spaces(&grid, &field, &located.exits, independence);
        (grid, usages)
    }

    #[test]
    fn single_room_aggregates_all_walkable_cells() {
        let lv = level(
            "L1",
            vec![space("A", rect_ring(0.0, 0.0, 4.0, 4.0))],
            vec![exit_door("D1", 0.1, 2.0)],
        );
        let (grid, usages) = run(&lv, &ExitIndependence::identity());
        assert_eq!(usages.len(), 1);
        let u = &usages[0];
        assert_eq!(u.walkable_cells, grid.walkable_count());
        assert_eq!(u.reached_cells, u.walkable_cells);
        assert!(u.max_distance_m.unwrap() > 0.0);
        assert_eq!(u.independent_exit_count, 1);
    }

    #[test]
    fn two_rooms_aggregate_separately() {
        let lv = level(
            "L1",
            vec![
                space("A", rect_ring(0.0, 0.0, 4.0, 2.0)),
                space("B", rect_ring(4.0, 0.0, 8.0, 2.0)),
            ],
            vec![exit_door("D1", 0.1, 1.0)],
        );
        let (_, usages) = run(&lv, &ExitIndependence::identity());
        assert_eq!(usages.len(), 2);
        // Room B is farther from the single exit than room A.
        assert!(usages[1].max_distance_m.unwrap() > usages[0].max_distance_m.unwrap());
    }

    #[test]
    fn opposite_exits_count_as_two_independent() {
        let lv = level(
            "L1",
            vec![space("A", rect_ring(0.0, 0.0, 10.0, 4.0))],
            vec![exit_door("D1", 0.1, 2.0), exit_door("D2", 9.9, 2.0)],
        );
        let (_, usages) = run(&lv, &ExitIndependence::identity());
        assert_eq!(usages[0].exits_used.len(), 2);
        assert_eq!(usages[0].independent_exit_count, 2);
    }

    #[test]
    fn merged_exits_collapse_to_one_group() {
        let lv = level(
            "L1",
            vec![space("A", rect_ring(0.0, 0.0, 10.0, 4.0))],
            vec![exit_door("D1", 0.1, 2.0), exit_door("D2", 9.9, 2.0)],
        );
        let mut groups = IndexMap::new();
        groups.insert(DoorId::from("D1"), "lobby".to_owned());
        groups.insert(DoorId::from("D2"), "lobby".to_owned());
        let (_, usages) = run(&lv, &ExitIndependence::from_groups(groups));
        assert_eq!(usages[0].exits_used.len(), 2);
        assert_eq!(usages[0].independent_exit_count, 1);
    }

    #[test]
    fn isolated_space_has_no_distance() {
        // Room B sits behind a solid wall band with no opening.
        let mut lv = level(
            "L1",
            vec![
                space("A", rect_ring(0.0, 0.0, 4.0, 4.0)),
                space("B", rect_ring(6.0, 0.0, 10.0, 4.0)),
            ],
            vec![exit_door("D1", 0.1, 2.0)],
        );
        lv.obstructions = vec![rect_ring(3.9, -0.5, 6.1, 4.5)];
        let (_, usages) = run(&lv, &ExitIndependence::identity());
        let b = &usages[1];
        assert!(b.walkable_cells > 0);
        assert_eq!(b.reached_cells, 0);
        assert_eq!(b.max_distance_m, None);
        assert_eq!(b.independent_exit_count, 0);
    }
}
