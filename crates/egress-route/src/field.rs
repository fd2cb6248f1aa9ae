//! Post-search distance field.

use egress_core::ExitId;
use egress_grid::CellIx;

/// Per-cell search results for one level.
///
/// Owned separately from the [`Grid`](egress_grid::Grid) so the grid stays
/// immutable after rasterization. Cells never touched by the search keep
/// an infinite distance and no attribution.
#[derive(Clone, Debug)]
pub struct DistanceField {
    distance: Vec<f64>,
    via: Vec<Option<ExitId>>,
}

impl DistanceField {
    /// A field of `len` unreached cells.
    pub(crate) fn unreached(len: usize) -> Self {
        Self {
            distance: vec![f64::INFINITY; len],
            via: vec![None; len],
        }
    }

    pub(crate) fn set(&mut self, ix: CellIx, distance: f64, via: ExitId) {
        self.distance[ix.index()] = distance;
        self.via[ix.index()] = Some(via);
    }

    pub(crate) fn get(&self, ix: CellIx) -> (f64, Option<ExitId>) {
        (self.distance[ix.index()], self.via[ix.index()])
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.distance.len()
    }

    /// Whether the field covers zero cells.
    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }

    /// Walking distance from this cell to its nearest exit, metres.
    ///
    /// `f64::INFINITY` for unreached cells.
    pub fn distance(&self, ix: CellIx) -> f64 {
        self.distance[ix.index()]
    }

    /// The exit this cell routes through, if reached.
    pub fn via(&self, ix: CellIx) -> Option<ExitId> {
        self.via[ix.index()]
    }

    /// Whether the search reached this cell.
    pub fn reached(&self, ix: CellIx) -> bool {
        self.distance[ix.index()].is_finite()
    }
}
