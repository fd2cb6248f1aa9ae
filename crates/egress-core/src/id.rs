//! Strongly-typed identifiers for levels, spaces, doors, and exits.
//!
//! Building-model identifiers (IFC global ids or equivalent) are opaque
//! strings supplied by the geometry adapter, so [`LevelId`], [`SpaceId`],
//! and [`DoorId`] wrap `String`. [`ExitId`] is a dense index assigned by
//! the exit locator in ascending [`DoorId`] order; comparing two `ExitId`s
//! therefore compares the originating door identifiers, which is what makes
//! exit-attribution tie-breaking deterministic.

use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(v: &str) -> Self {
                Self(v.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(v: String) -> Self {
                Self(v)
            }
        }

        impl $name {
            /// The identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Identifies a building storey within an analysis request.
    LevelId
}

string_id! {
    /// Identifies a space (room, corridor, storage area) on a level.
    SpaceId
}

string_id! {
    /// Identifies a door opening on a level.
    DoorId
}

/// Dense index of a qualifying exit within one level's analysis.
///
/// Assigned sequentially in ascending [`DoorId`] order when exits are
/// located, so `ExitId(0)` always belongs to the lexicographically smallest
/// exit door identifier. Distance ties in the shortest-path search are
/// broken by the smaller `ExitId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExitId(pub u32);

impl fmt::Display for ExitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ExitId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
