//! Placement of qualifying exit doors onto walkable grid cells.

use crate::grid::{CellIx, Grid};
use crate::level::Door;
use egress_core::{DoorId, ExitId};
use egress_geom::Point;
use log::warn;
use std::collections::VecDeque;

/// A walkable cell acting as a shortest-path source for one exit door.
#[derive(Clone, Debug, PartialEq)]
pub struct ExitNode {
    /// Dense per-level exit index, assigned in ascending [`DoorId`] order.
    pub exit: ExitId,
    /// The originating door.
    pub door: DoorId,
    /// The walkable cell the door was snapped to.
    pub cell: CellIx,
    /// Clear width of the door, metres.
    pub width_m: f64,
}

/// Output of [`locate_exits`].
#[derive(Clone, Debug, Default)]
pub struct LocatedExits {
    /// Successfully placed exits, ordered by [`ExitId`].
    pub exits: Vec<ExitNode>,
    /// Qualifying doors with no walkable cell within the snap radius.
    pub unplaced: Vec<DoorId>,
}

/// Map qualifying exit doors onto the grid.
///
/// Doors are processed in ascending identifier order and numbered with
/// sequential [`ExitId`]s, which is what makes distance-tie attribution
/// deterministic downstream. For each door: the position is pulled onto
/// the nearest connected-space boundary if it lies outside every space
/// (door placements often sit inside wall volumes), then snapped to the
/// nearest walkable cell by breadth-first ring search up to `snap_radius`
/// cells. Doors that cannot be placed land in [`LocatedExits::unplaced`];
/// the caller reports them and degrades dependent spaces to blocked.
pub fn locate_exits(grid: &Grid, doors: &[Door], snap_radius: u32) -> LocatedExits {
    let mut qualifying: Vec<&Door> = doors.iter().filter(|d| d.is_exit).collect();
    qualifying.sort_by(|a, b| a.id.cmp(&b.id));

    let mut out = LocatedExits::default();
    for door in qualifying {
        let pos = pull_to_space(grid, door);
        let (col, row) = grid.world_to_cell(pos);
        let start = clamp_cell(grid, col, row);
        match snap_to_walkable(grid, start, snap_radius) {
            Some(cell) => {
                let exit = ExitId(out.exits.len() as u32);
                out.exits.push(ExitNode {
                    exit,
                    door: door.id.clone(),
                    cell,
                    width_m: door.width_m,
                });
            }
            None => {
                warn!(
                    "exit door {} has no walkable cell within {snap_radius} cells",
                    door.id
                );
                out.unplaced.push(door.id.clone());
            }
        }
    }
    out
}

/// Project a door position onto the boundary of the nearest candidate
/// space when it lies outside every space polygon.
///
/// Candidates are the door's connected spaces when any of them survived
/// validation, otherwise all validated spaces.
fn pull_to_space(grid: &Grid, door: &Door) -> Point {
    let spaces = grid.spaces();
    if spaces.iter().any(|s| s.polygon.contains(door.position)) {
        return door.position;
    }
    let connected: Vec<usize> = spaces
        .iter()
        .enumerate()
        .filter(|(_, s)| door.connects.contains(&s.id))
        .map(|(i, _)| i)
        .collect();
    let candidates: Vec<usize> = if connected.is_empty() {
        (0..spaces.len()).collect()
    } else {
        connected
    };

    let mut best = door.position;
    let mut best_d = f64::INFINITY;
    for i in candidates {
        let q = spaces[i].polygon.project_to_boundary(door.position);
        let d = door.position.distance(q);
        if d < best_d {
            best_d = d;
            best = q;
        }
    }
    best
}

fn clamp_cell(grid: &Grid, col: i64, row: i64) -> CellIx {
    let col = col.clamp(0, grid.cols() as i64 - 1) as u32;
    let row = row.clamp(0, grid.rows() as i64 - 1) as u32;
    grid.cell(col, row)
}

/// Breadth-first ring search for the nearest walkable cell.
///
/// Explores 4-connected rings outward from `start` up to `max_radius`
/// steps, returning the first walkable cell in BFS order (deterministic
/// for a given grid).
fn snap_to_walkable(grid: &Grid, start: CellIx, max_radius: u32) -> Option<CellIx> {
    if grid.is_walkable(start) {
        return Some(start);
    }
    let mut seen = vec![false; grid.len()];
    let mut queue = VecDeque::new();
    seen[start.index()] = true;
    queue.push_back((start, 0u32));

    while let Some((ix, depth)) = queue.pop_front() {
        if depth >= max_radius {
            continue;
        }
        let (col, row) = grid.col_row(ix);
        for (dx, dy) in [(0i64, -1i64), (0, 1), (-1, 0), (1, 0)] {
            let nc = col as i64 + dx;
            let nr = row as i64 + dy;
            if !grid.in_bounds(nc, nr) {
                continue;
            }
            let nix = grid.cell(nc as u32, nr as u32);
            if seen[nix.index()] {
                continue;
            }
            seen[nix.index()] = true;
            if grid.is_walkable(nix) {
                return Some(nix);
            }
            queue.push_back((nix, depth + 1));
        }
    }
    None
}
