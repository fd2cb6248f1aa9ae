//! Floor-plan fixtures shared by tests across the egress workspace.
//!
//! Builders for the small synthetic levels the test suites use: rectangular
//! rooms, corridors, and door placements, without repeating vertex-ring
//! boilerplate in every crate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use egress_core::LevelId;
use egress_geom::Point;
use egress_grid::{Door, Level, SpaceGeometry};

/// Axis-aligned rectangle ring from `(x0, y0)` to `(x1, y1)`.
pub fn rect_ring(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]
}

/// A space with the given id, classified as a generic room.
pub fn space(id: &str, outline: Vec<Point>) -> SpaceGeometry {
    SpaceGeometry {
        id: id.into(),
        name: id.to_owned(),
        classification: "room".into(),
        outline,
    }
}

/// A 0.9 m qualifying exit door at `(x, y)`, connected to no space in
/// particular (the locator falls back to all spaces).
pub fn exit_door(id: &str, x: f64, y: f64) -> Door {
    Door {
        id: id.into(),
        position: Point::new(x, y),
        width_m: 0.9,
        is_exit: true,
        connects: Vec::new(),
    }
}

/// An interior (non-qualifying) door at `(x, y)`.
pub fn interior_door(id: &str, x: f64, y: f64) -> Door {
    Door {
        id: id.into(),
        position: Point::new(x, y),
        width_m: 0.8,
        is_exit: false,
        connects: Vec::new(),
    }
}

/// A level named `L1` holding a single space and the given doors.
pub fn single_space_level(space_id: &str, outline: Vec<Point>, doors: Vec<Door>) -> Level {
    Level {
        id: LevelId::from("L1"),
        name: "Level 1".into(),
        elevation: 0.0,
        spaces: vec![space(space_id, outline)],
        obstructions: Vec::new(),
        doors,
    }
}

/// A level with several spaces and doors.
pub fn level(id: &str, spaces: Vec<SpaceGeometry>, doors: Vec<Door>) -> Level {
    Level {
        id: LevelId::from(id),
        name: id.to_owned(),
        elevation: 0.0,
        spaces,
        obstructions: Vec::new(),
        doors,
    }
}
