//! Egress: an evacuation-route analysis engine.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Egress sub-crates. For most users, adding `egress` as a single
//! dependency is sufficient.
//!
//! The engine takes a building's per-storey floor geometry (space
//! polygons, obstructions, doors), rasterizes each storey into a
//! walkability grid, runs a multi-source shortest-path sweep from the
//! exit doors, and evaluates every space's worst evacuation route against
//! the regulatory distance limits.
//!
//! # Quick start
//!
//! ```rust
//! use egress::prelude::*;
//! use egress::geom::Point;
//!
//! // A 10 m × 4 m office with one exit on the left wall.
//! let level = Level {
//!     id: "L1".into(),
//!     name: "Ground floor".into(),
//!     elevation: 0.0,
//!     spaces: vec![SpaceGeometry {
//!         id: "office".into(),
//!         name: "Office".into(),
//!         classification: "office".into(),
//!         outline: vec![
//!             Point::new(0.0, 0.0),
//!             Point::new(10.0, 0.0),
//!             Point::new(10.0, 4.0),
//!             Point::new(0.0, 4.0),
//!         ],
//!     }],
//!     obstructions: vec![],
//!     doors: vec![Door {
//!         id: "exit-1".into(),
//!         position: Point::new(0.0, 2.0),
//!         width_m: 0.9,
//!         is_exit: true,
//!         connects: vec!["office".into()],
//!     }],
//! };
//!
//! let report = analyze(
//!     &[level],
//!     &AnalysisConfig::default(),
//!     &CancelToken::new(),
//! )
//! .unwrap();
//!
//! // The far corner is ~10.8 m from the exit, inside the 25 m limit.
//! assert!(report.spaces[0].verdict.is_pass());
//! assert_eq!(report.summary.passed, 1);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `egress-core` | IDs, verdicts, report model, diagnostics, cancellation |
//! | [`geom`] | `egress-geom` | Points, bounding boxes, validated polygons |
//! | [`grid`] | `egress-grid` | Level input model, walkability grid, exit placement |
//! | [`route`] | `egress-route` | Multi-source Dijkstra and the distance field |
//! | [`engine`] | `egress-engine` | Configuration, aggregation, compliance, orchestration |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Identifiers, the verdict and report model, diagnostics, and
/// cancellation (`egress-core`).
pub use egress_core as types;

/// Planar geometry primitives (`egress-geom`).
///
/// [`geom::Point`], [`geom::BoundingBox`], and the validated
/// [`geom::Polygon`] with its boundary-inclusive containment test.
pub use egress_geom as geom;

/// Walkability grids (`egress-grid`).
///
/// The [`grid::Level`] input model, rasterization via
/// [`grid::build_grid`], and exit placement via [`grid::locate_exits`].
pub use egress_grid as grid;

/// Shortest-path search (`egress-route`).
///
/// [`route::shortest_paths`] runs Dijkstra from all exits at once and
/// yields a [`route::DistanceField`].
pub use egress_route as route;

/// Analysis orchestration and compliance evaluation (`egress-engine`).
///
/// [`engine::analyze`] is the main entry point; [`engine::AnalysisConfig`]
/// and [`engine::RuleSet`] control resolution and the limit table.
pub use egress_engine as engine;

/// Common imports for typical Egress usage.
///
/// ```rust
/// use egress::prelude::*;
/// ```
pub mod prelude {
    // Report model
    pub use egress_core::{
        AnalysisReport, AppliedLimit, BlockedReason, BuildingSummary, CancelToken, Diagnostic,
        DoorId, ExitBasis, LevelId, RouteResult, SpaceId, Verdict,
    };

    // Input model
    pub use egress_grid::{Connectivity, Door, Level, SpaceGeometry};

    // Engine
    pub use egress_engine::{
        analyze, AnalysisConfig, AnalysisError, ExitIndependence, RouteLimits, RuleSet,
    };
}
