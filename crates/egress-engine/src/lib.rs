//! Orchestration layer of the egress analysis engine.
//!
//! Takes a building's levels (already-extracted geometry), an immutable
//! [`AnalysisConfig`], and produces an
//! [`AnalysisReport`](egress_core::AnalysisReport): per-space compliance
//! verdicts against the regulatory evacuation-distance limits plus a
//! building-level summary.
//!
//! The pipeline per level is grid build → exit placement → multi-source
//! shortest paths → per-space aggregation → compliance evaluation. Levels
//! are independent and run on separate worker threads when there is more
//! than one. Per-space and per-level degradations become `blocked`
//! verdicts and diagnostics; only configuration errors abort the request.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod analysis;
pub mod compliance;
pub mod config;
pub mod level;

pub use aggregate::{aggregate_spaces, SpaceUsage};
pub use analysis::{analyze, AnalysisError};
pub use config::{
    AnalysisConfig, ConfigError, ExitIndependence, ResolvedLimits, RouteLimits, RuleSet,
    TypologyOverride,
};
pub use level::{analyze_level, LevelOutcome};
