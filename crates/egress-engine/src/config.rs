//! Analysis configuration, rule tables, and up-front validation.
//!
//! [`AnalysisConfig`] is the immutable input to [`analyze`](crate::analyze).
//! [`AnalysisConfig::validate`] resolves the rule table for the requested
//! typology before any computation starts, so a request that cannot produce
//! meaningful verdicts fails immediately instead of after minutes of grid
//! work. Rule tables are plain values passed per request; concurrent
//! analyses with different typologies share nothing.

use egress_core::DoorId;
use egress_grid::Connectivity;
use indexmap::IndexMap;
use std::error::Error;
use std::fmt;

// ── RouteLimits / RuleSet ──────────────────────────────────────────

/// Maximum walking distances for one typology, metres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteLimits {
    /// Limit when a space reaches at most one independent exit.
    pub single_exit_m: f64,
    /// Limit when a space reaches two or more independent exits.
    pub multiple_exits_m: f64,
}

/// Partial per-typology override layered over the general limits.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TypologyOverride {
    /// Override for the single-exit limit, if any.
    pub single_exit_m: Option<f64>,
    /// Override for the multiple-exits limit, if any.
    pub multiple_exits_m: Option<f64>,
}

/// Regulatory distance-limit table keyed by building typology.
///
/// A typology entry overrides only the limits it names; the rest fall
/// through to the general values. The default table carries the common
/// 25 m / 50 m limits and the 25 % automatic-suppression allowance.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleSet {
    /// Limits applying when no typology override matches.
    pub general: RouteLimits,
    /// Per-typology overrides.
    pub by_typology: IndexMap<String, TypologyOverride>,
    /// Multiplier applied to the chosen limit when the building has an
    /// automatic suppression system. Must be at least 1: suppression may
    /// relax limits, never tighten them.
    pub extension_factor: f64,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            general: RouteLimits {
                single_exit_m: 25.0,
                multiple_exits_m: 50.0,
            },
            by_typology: IndexMap::new(),
            extension_factor: 1.25,
        }
    }
}

impl RuleSet {
    /// Resolve the limits for `typology`.
    ///
    /// An empty typology selects the general limits. A named typology must
    /// exist in the table — a missing entry is a [`ConfigError`], since no
    /// meaningful verdict could be produced against unknown limits.
    pub fn resolve(&self, typology: &str) -> Result<RouteLimits, ConfigError> {
        if typology.is_empty() {
            return Ok(self.general);
        }
        let ov = self
            .by_typology
            .get(typology)
            .ok_or_else(|| ConfigError::UnknownTypology {
                typology: typology.to_owned(),
            })?;
        Ok(RouteLimits {
            single_exit_m: ov.single_exit_m.unwrap_or(self.general.single_exit_m),
            multiple_exits_m: ov
                .multiple_exits_m
                .unwrap_or(self.general.multiple_exits_m),
        })
    }
}

// ── ExitIndependence ───────────────────────────────────────────────

/// Precomputed independence relation between exit doors.
///
/// Two exits that merge into the same escape route before leaving the fire
/// sector do not count as alternatives; which exits merge is a judgement
/// the geometry adapter (or the engineer) supplies, not something derived
/// from grid topology here. Doors mapped to the same group key count once.
/// Unmapped doors each form their own group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExitIndependence {
    groups: IndexMap<DoorId, String>,
}

impl ExitIndependence {
    /// The identity relation: every exit door is independent.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Build from explicit door → group assignments.
    pub fn from_groups(groups: IndexMap<DoorId, String>) -> Self {
        Self { groups }
    }

    /// Group key for a door. Defaults to the door's own identifier.
    pub fn group_of<'a>(&'a self, door: &'a DoorId) -> &'a str {
        self.groups
            .get(door)
            .map(String::as_str)
            .unwrap_or(door.as_str())
    }
}

// ── AnalysisConfig ─────────────────────────────────────────────────

/// Immutable configuration for one analysis request.
#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    /// Cell size in metres. Smaller is more accurate; cost grows
    /// quadratically.
    pub resolution_m: f64,
    /// Padding added around the union bounding box, metres.
    pub margin_m: f64,
    /// Grid graph neighborhood.
    pub connectivity: Connectivity,
    /// Maximum ring-search distance when snapping a door to a walkable
    /// cell, in cells.
    pub snap_radius_cells: u32,
    /// Building typology selecting the limit table entry. Empty selects
    /// the general limits.
    pub typology: String,
    /// Whether the building has an automatic suppression system installed.
    pub has_auto_suppression: bool,
    /// The regulatory limit table.
    pub rules: RuleSet,
    /// Independence relation between exit doors.
    pub independence: ExitIndependence,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            resolution_m: 0.2,
            margin_m: 0.2,
            connectivity: Connectivity::Eight,
            snap_radius_cells: 2,
            typology: String::new(),
            has_auto_suppression: false,
            rules: RuleSet::default(),
            independence: ExitIndependence::identity(),
        }
    }
}

/// Limits resolved and checked by [`AnalysisConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedLimits {
    /// Base limits for the requested typology.
    pub limits: RouteLimits,
    /// Extension multiplier for automatic suppression.
    pub extension_factor: f64,
}

impl AnalysisConfig {
    /// Validate structural invariants and resolve the typology's limits.
    ///
    /// Called once at the top of [`analyze`](crate::analyze); any error
    /// here fails the whole request before computation starts.
    pub fn validate(&self) -> Result<ResolvedLimits, ConfigError> {
        if !self.resolution_m.is_finite() || self.resolution_m <= 0.0 {
            return Err(ConfigError::InvalidResolution {
                value: self.resolution_m,
            });
        }
        if !self.margin_m.is_finite() || self.margin_m < 0.0 {
            return Err(ConfigError::InvalidMargin {
                value: self.margin_m,
            });
        }
        if !self.rules.extension_factor.is_finite() || self.rules.extension_factor < 1.0 {
            return Err(ConfigError::InvalidExtensionFactor {
                value: self.rules.extension_factor,
            });
        }
        let limits = self.rules.resolve(&self.typology)?;
        for (which, value) in [
            ("single-exit", limits.single_exit_m),
            ("multiple-exits", limits.multiple_exits_m),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidLimit { which, value });
            }
        }
        Ok(ResolvedLimits {
            limits,
            extension_factor: self.rules.extension_factor,
        })
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`AnalysisConfig::validate`]. Fatal for the
/// whole request.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Resolution is NaN, infinite, zero, or negative.
    InvalidResolution {
        /// The invalid value.
        value: f64,
    },
    /// Margin is NaN, infinite, or negative.
    InvalidMargin {
        /// The invalid value.
        value: f64,
    },
    /// Extension factor is NaN, infinite, or below 1.
    InvalidExtensionFactor {
        /// The invalid value.
        value: f64,
    },
    /// The requested typology has no entry in the rule table.
    UnknownTypology {
        /// The requested typology.
        typology: String,
    },
    /// A resolved distance limit is NaN, infinite, zero, or negative.
    InvalidLimit {
        /// Which limit (`"single-exit"` or `"multiple-exits"`).
        which: &'static str,
        /// The invalid value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidResolution { value } => {
                write!(f, "resolution must be positive and finite, got {value}")
            }
            Self::InvalidMargin { value } => {
                write!(f, "margin must be non-negative and finite, got {value}")
            }
            Self::InvalidExtensionFactor { value } => {
                write!(f, "extension factor must be >= 1 and finite, got {value}")
            }
            Self::UnknownTypology { typology } => {
                write!(f, "no distance limits configured for typology '{typology}'")
            }
            Self::InvalidLimit { which, value } => {
                write!(f, "{which} limit must be positive and finite, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}
