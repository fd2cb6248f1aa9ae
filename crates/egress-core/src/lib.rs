//! Core types for the egress analysis engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! strongly-typed identifiers shared across the workspace, the verdict and
//! report model produced by an analysis, the diagnostics channel for
//! degraded-but-not-fatal conditions, and the cancellation token polled by
//! long-running searches.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod diag;
pub mod id;
pub mod verdict;

pub use cancel::CancelToken;
pub use diag::Diagnostic;
pub use id::{DoorId, ExitId, LevelId, SpaceId};
pub use verdict::{
    AnalysisReport, AppliedLimit, BlockedReason, BuildingSummary, ExitBasis, RouteResult, Verdict,
};
