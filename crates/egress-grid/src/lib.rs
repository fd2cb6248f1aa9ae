//! Walkability grids for the egress analysis engine.
//!
//! Converts a level's floor geometry (space polygons, obstruction polygons,
//! door positions) into a uniform cell grid the shortest-path engine can
//! search:
//!
//! - [`level`] — the geometry-adapter input model ([`Level`], [`SpaceGeometry`],
//!   [`Door`]);
//! - [`grid`] — the rasterized [`Grid`] with per-cell walkability and space
//!   assignment, plus 4/8 [`Connectivity`];
//! - [`builder`] — rasterization ([`build_grid`]);
//! - [`locator`] — snapping qualifying exit doors onto walkable cells
//!   ([`locate_exits`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod error;
pub mod grid;
pub mod level;
pub mod locator;

pub use builder::{build_grid, BuiltGrid};
pub use error::GridError;
pub use grid::{CellIx, Connectivity, Grid, SQRT_2};
pub use level::{Door, Level, SpaceGeometry};
pub use locator::{locate_exits, ExitNode, LocatedExits};
