// Core types shared across the campus simulation.
//
// Defines the ground-plane coordinate (`Point2`), the building identifier,
// and the small enums that classify buildings (category, wing, shape). All
// types derive `Serialize` and `Deserialize` so catalogs and session state
// can be loaded from or dumped to JSON.
//
// The campus uses the same right-handed world convention as the renderer:
// - X: east  (positive) / west  (negative)
// - Y: up    (only the scene crate uses height)
// - Z: south (positive) / north (negative)
//
// The main gate sits at the south end of the trunk road, so the default
// starting position `(0, 42)` is the largest Z on the road.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A position on the campus ground plane, in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub z: f32,
}

impl Point2 {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Self) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Linear interpolation toward `other`. `t` is not clamped.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Stable identifier of a campus building. Matches the building number shown
/// on site signage and map labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuildingId(pub u32);

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Building {}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Building classification
// ---------------------------------------------------------------------------

/// What a building is used for. Drives the directory filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Hospital,
    Emergency,
    Research,
    Wellness,
    Hotel,
    Commercial,
    Admin,
}

impl Category {
    /// True for buildings that deliver patient care or medical research.
    pub fn is_medical(self) -> bool {
        !matches!(self, Self::Hotel | Self::Commercial | Self::Admin)
    }
}

/// Which side of the trunk road a building sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wing {
    West,
    East,
    Center,
}

impl Wing {
    /// Panel label, as printed in the building info card.
    pub fn label(self) -> &'static str {
        match self {
            Self::West => "West Wing",
            Self::East => "East Wing",
            Self::Center => "Central Campus",
        }
    }
}

/// Massing archetype. Each shape has a fixed sub-volume decomposition in the
/// scene crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    #[serde(rename = "rect")]
    Rectangular,
    #[serde(rename = "L")]
    LShaped,
    #[serde(rename = "U")]
    UShaped,
}
