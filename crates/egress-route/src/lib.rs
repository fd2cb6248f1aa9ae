//! Multi-source shortest-path search for the egress analysis engine.
//!
//! Runs Dijkstra from all of a level's exit cells simultaneously over the
//! walkable grid graph, producing a [`DistanceField`] with, per cell, the
//! minimum walking distance to the nearest exit and which exit it routes
//! through. Distance ties resolve to the lowest exit identifier, so results
//! are bit-identical across runs on identical input.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dijkstra;
pub mod error;
pub mod field;

pub use dijkstra::{shortest_paths, CANCEL_STRIDE};
pub use error::RouteError;
pub use field::DistanceField;
