//! Multi-source Dijkstra over the walkable grid graph.

use crate::error::RouteError;
use crate::field::DistanceField;
use egress_core::{CancelToken, ExitId};
use egress_grid::{CellIx, Connectivity, ExitNode, Grid};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Number of heap pops between cancellation checks.
pub const CANCEL_STRIDE: usize = 4096;

/// Frontier entry, ordered so the binary max-heap pops the smallest
/// `(distance, exit, cell)` first. The exit component makes equal-distance
/// fronts resolve to the lowest exit identifier.
#[derive(Clone, Copy, PartialEq)]
struct Frontier {
    distance: f64,
    exit: ExitId,
    cell: CellIx,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.exit.cmp(&self.exit))
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute the distance-to-nearest-exit field for one level.
///
/// All exit cells seed the frontier at distance zero; edges connect
/// adjacent walkable cells under `conn` with center-to-center Euclidean
/// weights. The search minimizes the lexicographic key
/// `(distance, exit id)`, so a cell equidistant from two exits is
/// attributed to the lower [`ExitId`] — deterministic, and affecting only
/// attribution, never distances. Once a cell is popped with its best key
/// it is final; later entries for it are stale and skipped.
///
/// Cells with no path to any exit keep `f64::INFINITY`; the caller reports
/// them and flags their spaces as blocked. The cancellation token is
/// polled every [`CANCEL_STRIDE`] pops.
pub fn shortest_paths(
    grid: &Grid,
    exits: &[ExitNode],
    conn: Connectivity,
    cancel: &CancelToken,
) -> Result<DistanceField, RouteError> {
    let mut field = DistanceField::unreached(grid.len());
    let mut heap: BinaryHeap<Frontier> = BinaryHeap::new();

    // Seed in ExitId order; a cell shared by several exit doors keeps the
    // lowest exit id.
    for node in exits {
        let (d, via) = field.get(node.cell);
        if better(0.0, node.exit, d, via) {
            field.set(node.cell, 0.0, node.exit);
            heap.push(Frontier {
                distance: 0.0,
                exit: node.exit,
                cell: node.cell,
            });
        }
    }

    let mut nbuf: SmallVec<[(CellIx, f64); 8]> = SmallVec::new();
    let mut pops = 0usize;

    while let Some(cur) = heap.pop() {
        pops += 1;
        if pops % CANCEL_STRIDE == 0 && cancel.is_cancelled() {
            return Err(RouteError::Cancelled);
        }

        // Stale entry: the cell has since been finalized with a better key.
        let (d, via) = field.get(cur.cell);
        if cur.distance != d || via != Some(cur.exit) {
            continue;
        }

        grid.neighbors(cur.cell, conn, &mut nbuf);
        for &(next, weight) in nbuf.iter() {
            let nd = cur.distance + weight;
            let (cd, cvia) = field.get(next);
            if better(nd, cur.exit, cd, cvia) {
                field.set(next, nd, cur.exit);
                heap.push(Frontier {
                    distance: nd,
                    exit: cur.exit,
                    cell: next,
                });
            }
        }
    }

    Ok(field)
}

/// Lexicographic improvement test on `(distance, exit)`.
fn better(nd: f64, nexit: ExitId, cur: f64, cur_via: Option<ExitId>) -> bool {
    match cur_via {
        None => true,
        Some(via) => nd < cur || (nd == cur && nexit < via),
    }
}
