//! Integer block positions and compass bearings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// World position in integer block coordinates.
///
/// Used as a graph node key and as the link-map key, so it is `Eq + Hash`.
/// The vertical axis is `y`; the horizontal plane is (x, z) with z
/// increasing southwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate (east positive)
    pub x: i32,
    /// Y coordinate (up positive)
    pub y: i32,
    /// Z coordinate (south positive)
    pub z: i32,
}

impl Position {
    /// Create a new position
    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another position
    #[inline]
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        let dz = (self.z - other.z) as f64;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Euclidean distance truncated to whole blocks.
    ///
    /// This is the unit used for walking-edge weights and reported path
    /// distances.
    #[inline]
    pub fn block_distance(&self, other: &Position) -> u64 {
        self.distance(other) as u64
    }

    /// Compass bearing from an observer towards this position.
    ///
    /// Returns [`Bearing::Unknown`] when observer and target coincide.
    pub fn bearing_from(&self, observer: &Position) -> Bearing {
        if self == observer {
            return Bearing::Unknown;
        }

        let dz = (self.z - observer.z) as f64;
        let dx = (self.x - observer.x) as f64;

        // atan2 on the (x, z) plane: 0° is east, 90° is south,
        // 180° is west, 270° is north.
        let degrees = dz.atan2(dx).to_degrees();
        let angle = (degrees + 360.0) % 360.0;

        if !(22.5..337.5).contains(&angle) {
            Bearing::East
        } else if angle < 67.5 {
            Bearing::SouthEast
        } else if angle < 112.5 {
            Bearing::South
        } else if angle < 157.5 {
            Bearing::SouthWest
        } else if angle < 202.5 {
            Bearing::West
        } else if angle < 247.5 {
            Bearing::NorthWest
        } else if angle < 292.5 {
            Bearing::North
        } else {
            Bearing::NorthEast
        }
    }

    /// Display form relative to a reference origin: `x-ox, y, z-oz`.
    ///
    /// Only the horizontal axes are offset; the vertical coordinate is
    /// absolute, matching how in-game maps report block positions.
    pub fn relative_label(&self, origin: &Position) -> String {
        format!("{}, {}, {}", self.x - origin.x, self.y, self.z - origin.z)
    }

    /// Relative display form annotated with distance and bearing arrow
    /// from an observer, e.g. `120, 64, -35 (87m ↗)`.
    pub fn relative_label_from(&self, origin: &Position, observer: &Position) -> String {
        format!(
            "{} ({}m {})",
            self.relative_label(origin),
            self.block_distance(observer),
            self.bearing_from(observer)
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

/// Eight-way compass bearing on the (x, z) plane.
///
/// Each variant spans a 45° sector centered on its direction. `Unknown`
/// only occurs when observer and target coincide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bearing {
    /// +X
    East,
    /// +X +Z
    SouthEast,
    /// +Z
    South,
    /// -X +Z
    SouthWest,
    /// -X
    West,
    /// -X -Z
    NorthWest,
    /// -Z
    North,
    /// +X -Z
    NorthEast,
    /// Degenerate (zero offset)
    Unknown,
}

impl Bearing {
    /// Arrow glyph for chat/UI display
    pub fn arrow(&self) -> &'static str {
        match self {
            Bearing::East => "→",
            Bearing::SouthEast => "↘",
            Bearing::South => "↓",
            Bearing::SouthWest => "↙",
            Bearing::West => "←",
            Bearing::NorthWest => "↖",
            Bearing::North => "↑",
            Bearing::NorthEast => "↗",
            Bearing::Unknown => "•",
        }
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.arrow())
    }
}
