//! Axial hex-grid coordinates
//!
//! Tiles are addressed by an axial (q, r) pair carrying the redundant third
//! component s = -q - r. Keeping all three makes neighbor math symmetric.

use std::fmt::{Display, Formatter};

use crate::core::error::{Result, VillageError};

/// Position of a tile on the hex grid
///
/// Immutable after creation; equal iff all three components match.
/// Construction is validated, so serialization goes through the tile wire
/// record rather than a direct derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxialCoord {
    q: i32,
    r: i32,
    s: i32,
}

/// The six neighbor offsets, in fixed order for reproducible iteration
const NEIGHBOR_OFFSETS: [(i32, i32, i32); 6] = [
    (1, -1, 0),
    (1, 0, -1),
    (0, 1, -1),
    (-1, 1, 0),
    (-1, 0, 1),
    (0, -1, 1),
];

impl AxialCoord {
    /// The tile at position (0, 0, 0)
    pub const ZERO: Self = Self { q: 0, r: 0, s: 0 };

    /// Create a coordinate from all three components, validating q + r + s == 0
    pub fn new(q: i32, r: i32, s: i32) -> Result<Self> {
        if q + r + s != 0 {
            return Err(VillageError::InvalidCoordinate(q, r, s));
        }
        Ok(Self { q, r, s })
    }

    /// Create a coordinate from the two independent components, deriving s
    pub fn axial(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    pub fn q(self) -> i32 {
        self.q
    }

    pub fn r(self) -> i32 {
        self.r
    }

    pub fn s(self) -> i32 {
        self.s
    }

    /// The six adjacent coordinates, in a fixed deterministic order
    pub fn neighbors(self) -> [Self; 6] {
        NEIGHBOR_OFFSETS.map(|(dq, dr, ds)| Self {
            q: self.q + dq,
            r: self.r + dr,
            s: self.s + ds,
        })
    }

    /// Hex distance to another coordinate
    pub fn distance(self, other: Self) -> i32 {
        ((self.q - other.q).abs() + (self.r - other.r).abs() + (self.s - other.s).abs()) / 2
    }

    /// Largest absolute component; ring index from the origin
    pub fn max_component(self) -> i32 {
        self.q.abs().max(self.r.abs()).max(self.s.abs())
    }
}

impl Display for AxialCoord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s)
    }
}
