//! Rasterization of level geometry into a walkability grid.

use crate::error::GridError;
use crate::grid::Grid;
use crate::level::{Level, ValidatedSpace};
use egress_core::SpaceId;
use egress_geom::{BoundingBox, GeomError, Point, Polygon, BOUNDARY_EPS};
use log::warn;

/// Output of [`build_grid`]: the grid plus the spaces that had to be
/// excluded because their outlines failed validation.
#[derive(Clone, Debug)]
pub struct BuiltGrid {
    /// The rasterized grid.
    pub grid: Grid,
    /// Spaces excluded from the grid, with the validation failure.
    pub excluded: Vec<(SpaceId, GeomError)>,
}

/// Rasterize a level into a uniform grid.
///
/// The grid covers the union bounding box of all valid space polygons,
/// padded by `margin` on every side. A cell is walkable iff its center lies
/// inside some space polygon (boundary-inclusive) and outside every
/// obstruction polygon. Cells inside a space but covered by an obstruction
/// keep their space assignment and are marked blocked.
///
/// Invalid space outlines are excluded and reported in
/// [`BuiltGrid::excluded`], not fatal; the call fails with
/// [`GridError::NoValidSpaces`] only when no space survives validation,
/// and with [`GridError::DimensionTooLarge`] when the total cell count
/// would not fit a flat `u32` index.
/// Invalid obstruction rings are skipped with a warning — a missing
/// obstruction can only make routes optimistic, never block a space.
pub fn build_grid(level: &Level, resolution: f64, margin: f64) -> Result<BuiltGrid, GridError> {
    if !resolution.is_finite() || resolution <= 0.0 {
        return Err(GridError::InvalidResolution { value: resolution });
    }

    let mut spaces = Vec::with_capacity(level.spaces.len());
    let mut excluded = Vec::new();
    for sp in &level.spaces {
        match Polygon::new(sp.outline.clone()) {
            Ok(polygon) => spaces.push(ValidatedSpace {
                id: sp.id.clone(),
                polygon,
            }),
            Err(err) => {
                warn!(
                    "level {}: excluding space {} from grid: {err}",
                    level.id, sp.id
                );
                excluded.push((sp.id.clone(), err));
            }
        }
    }
    if spaces.is_empty() {
        return Err(GridError::NoValidSpaces {
            level: level.id.clone(),
        });
    }

    let mut obstructions = Vec::with_capacity(level.obstructions.len());
    for (i, ring) in level.obstructions.iter().enumerate() {
        match Polygon::new(ring.clone()) {
            Ok(polygon) => obstructions.push(polygon),
            Err(err) => warn!("level {}: skipping obstruction {i}: {err}", level.id),
        }
    }

    let mut bounds = spaces[0].polygon.bbox();
    for sp in &spaces[1..] {
        bounds = bounds.union(&sp.polygon.bbox());
    }
    let bounds = bounds.expanded(margin);

    let cols = axis_cells(bounds.width(), resolution);
    let rows = axis_cells(bounds.height(), resolution);
    // Flat cell indices are u32, so the total cell count must fit one. The
    // product check also bounds each axis, since the other is at least 1.
    match cols.checked_mul(rows) {
        Some(total) if total <= Grid::MAX_CELLS => {}
        _ => {
            return Err(GridError::DimensionTooLarge {
                cols,
                rows,
                max_cells: Grid::MAX_CELLS,
            });
        }
    }
    let cols = cols as u32;
    let rows = rows as u32;

    // Per-polygon bounding boxes, padded by the boundary tolerance so the
    // precheck can never reject a point the exact test would accept.
    let space_boxes: Vec<BoundingBox> = spaces
        .iter()
        .map(|s| s.polygon.bbox().expanded(BOUNDARY_EPS))
        .collect();
    let obstruction_boxes: Vec<BoundingBox> = obstructions
        .iter()
        .map(|o| o.bbox().expanded(BOUNDARY_EPS))
        .collect();

    let mut grid = Grid::blank(bounds.min, resolution, cols, rows, spaces)?;
    for row in 0..rows {
        for col in 0..cols {
            let ix = grid.cell(col, row);
            let center = grid.center(ix);
            let slot = find_space(grid.spaces(), &space_boxes, center);
            let walkable = slot.is_some()
                && !obstructions
                    .iter()
                    .zip(&obstruction_boxes)
                    .any(|(o, bb)| in_box(bb, center) && o.contains(center));
            grid.set_cell(ix, walkable, slot);
        }
    }

    Ok(BuiltGrid { grid, excluded })
}

fn axis_cells(extent: f64, resolution: f64) -> u64 {
    (extent / resolution).ceil().max(1.0) as u64
}

fn in_box(bb: &BoundingBox, p: Point) -> bool {
    p.x >= bb.min.x && p.x <= bb.max.x && p.y >= bb.min.y && p.y <= bb.max.y
}

/// Slot of the first space containing `p`, in input order.
fn find_space(spaces: &[ValidatedSpace], boxes: &[BoundingBox], p: Point) -> Option<u32> {
    spaces
        .iter()
        .zip(boxes)
        .position(|(sp, bb)| in_box(bb, p) && sp.polygon.contains(p))
        .map(|slot| slot as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::SpaceGeometry;
    use egress_core::LevelId;

    fn rect_ring(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }

    fn level_with(spaces: Vec<SpaceGeometry>, obstructions: Vec<Vec<Point>>) -> Level {
        Level {
            id: LevelId::from("L1"),
            name: "Level 1".into(),
            elevation: 0.0,
            spaces,
            obstructions,
            doors: Vec::new(),
        }
    }

    fn space(id: &str, ring: Vec<Point>) -> SpaceGeometry {
        SpaceGeometry {
            id: id.into(),
            name: id.to_owned(),
            classification: "room".into(),
            outline: ring,
        }
    }

    // ── Rasterization ───────────────────────────────────────────

    #[test]
    fn rect_room_walkable_count_matches_area() {
        let level = level_with(vec![space("A", rect_ring(0.0, 0.0, 10.0, 4.0))], vec![]);
        let built = build_grid(&level, 0.5, 0.5).unwrap();
        // 10 m x 4 m at 0.5 m per cell: 20 x 8 = 160 interior cells.
        assert_eq!(built.grid.walkable_count(), 160);
        assert!(built.excluded.is_empty());
    }

    #[test]
    fn obstruction_blocks_cells_but_keeps_space_assignment() {
        let level = level_with(
            vec![space("A", rect_ring(0.0, 0.0, 4.0, 4.0))],
            vec![rect_ring(1.0, 1.0, 3.0, 3.0)],
        );
        let built = build_grid(&level, 0.5, 0.5).unwrap();
        let g = &built.grid;
        let (col, row) = g.world_to_cell(Point::new(2.0, 2.0));
        let ix = g.cell(col as u32, row as u32);
        assert!(!g.is_walkable(ix));
        assert_eq!(g.space_slot(ix), Some(0));
        // 16 interior cells of the obstruction removed from 64.
        assert_eq!(g.walkable_count(), 48);
    }

    #[test]
    fn degenerate_space_is_excluded_not_fatal() {
        let level = level_with(
            vec![
                space("bad", vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]),
                space("good", rect_ring(0.0, 0.0, 2.0, 2.0)),
            ],
            vec![],
        );
        let built = build_grid(&level, 0.5, 0.5).unwrap();
        assert_eq!(built.excluded.len(), 1);
        assert_eq!(built.excluded[0].0, SpaceId::from("bad"));
        assert_eq!(built.grid.spaces().len(), 1);
        assert!(built.grid.walkable_count() > 0);
    }

    #[test]
    fn all_spaces_invalid_is_an_error() {
        let level = level_with(
            vec![space("bad", vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)])],
            vec![],
        );
        let err = build_grid(&level, 0.5, 0.5).unwrap_err();
        assert!(matches!(err, GridError::NoValidSpaces { .. }));
    }

    #[test]
    fn invalid_resolution_is_rejected_up_front() {
        let level = level_with(vec![space("A", rect_ring(0.0, 0.0, 2.0, 2.0))], vec![]);
        assert!(matches!(
            build_grid(&level, 0.0, 0.5),
            Err(GridError::InvalidResolution { .. })
        ));
    }

    #[test]
    fn oversized_grid_is_rejected_before_allocation() {
        // 700 km x 700 km at 0.1 m per cell is ~4.9e13 cells, far past the
        // u32 flat-index limit. Must fail, not attempt the allocation.
        let level = level_with(
            vec![space("A", rect_ring(0.0, 0.0, 700_000.0, 700_000.0))],
            vec![],
        );
        match build_grid(&level, 0.1, 0.2) {
            Err(GridError::DimensionTooLarge {
                cols,
                rows,
                max_cells,
            }) => {
                assert!(cols * rows > max_cells);
                assert_eq!(max_cells, Grid::MAX_CELLS);
            }
            other => panic!("expected DimensionTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn adjacent_spaces_assign_disjoint_slots() {
        let level = level_with(
            vec![
                space("A", rect_ring(0.0, 0.0, 2.0, 2.0)),
                space("B", rect_ring(2.0, 0.0, 4.0, 2.0)),
            ],
            vec![],
        );
        let built = build_grid(&level, 0.5, 0.5).unwrap();
        let g = &built.grid;
        let (ca, ra) = g.world_to_cell(Point::new(1.0, 1.0));
        let (cb, rb) = g.world_to_cell(Point::new(3.0, 1.0));
        assert_eq!(g.space_slot(g.cell(ca as u32, ra as u32)), Some(0));
        assert_eq!(g.space_slot(g.cell(cb as u32, rb as u32)), Some(1));
    }

    #[test]
    fn margin_pads_the_grid_with_blocked_cells() {
        let level = level_with(vec![space("A", rect_ring(0.0, 0.0, 2.0, 2.0))], vec![]);
        let built = build_grid(&level, 0.5, 1.0).unwrap();
        let g = &built.grid;
        assert_eq!(g.cols(), 8);
        assert_eq!(g.rows(), 8);
        assert!(!g.is_walkable(g.cell(0, 0)));
    }
}
