//! 2D polygon primitives for the egress analysis engine.
//!
//! Floor geometry arrives as simple polygons in metres. This crate owns the
//! containment and projection math the rasterizer builds on, with a single
//! named tolerance ([`BOUNDARY_EPS`]) governing boundary classification so
//! that cells whose centers fall exactly on a space boundary classify
//! deterministically (as inside, per the walkability tie rule).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod point;
pub mod polygon;

pub use error::GeomError;
pub use point::{BoundingBox, Point};
pub use polygon::{Polygon, BOUNDARY_EPS, MIN_POLYGON_AREA};
