//! Geometry-adapter input model.
//!
//! Instances arrive already extracted from the building model: no file
//! parsing happens here. Space outlines are raw vertex rings; polygon
//! validation happens during rasterization so that one bad ring excludes
//! only its own space.

use egress_core::{DoorId, LevelId, SpaceId};
use egress_geom::{Point, Polygon};

/// One building storey with its floor geometry.
///
/// Immutable once built; each level is analyzed independently. Vertical
/// connections (stairs) are out of scope — if the adapter wants them
/// considered it pre-stitches them as additional exit doors.
#[derive(Clone, Debug)]
pub struct Level {
    /// Storey identifier.
    pub id: LevelId,
    /// Storey name ("Level 1", "Planta baja", ...).
    pub name: String,
    /// Elevation above datum, metres. Informational only.
    pub elevation: f64,
    /// The level's spaces.
    pub spaces: Vec<SpaceGeometry>,
    /// Non-walkable structure (walls, columns) as polygon rings.
    ///
    /// Consumed during rasterization and discarded afterwards.
    pub obstructions: Vec<Vec<Point>>,
    /// All door openings on the level.
    pub doors: Vec<Door>,
}

/// A space (room, corridor, storage area) as supplied by the adapter.
#[derive(Clone, Debug)]
pub struct SpaceGeometry {
    /// Unique space identifier.
    pub id: SpaceId,
    /// Human-readable name.
    pub name: String,
    /// Classification tag (residential unit, corridor, storage, ...).
    pub classification: String,
    /// Raw outline ring; validated into a [`Polygon`] at rasterization.
    pub outline: Vec<Point>,
}

/// A door opening.
#[derive(Clone, Debug)]
pub struct Door {
    /// Unique door identifier.
    pub id: DoorId,
    /// World position of the opening (typically the leaf placement point).
    pub position: Point,
    /// Clear width, metres.
    pub width_m: f64,
    /// Whether the door qualifies as an exit: its far side lies outside
    /// the evaluated fire sector or the building envelope. Supplied by the
    /// adapter, never computed here.
    pub is_exit: bool,
    /// The spaces this door connects.
    pub connects: Vec<SpaceId>,
}

/// Validated polygon with the space metadata the grid retains.
#[derive(Clone, Debug)]
pub struct ValidatedSpace {
    /// The space identifier.
    pub id: SpaceId,
    /// Validated outline.
    pub polygon: Polygon,
}
