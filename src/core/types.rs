//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for tiles, assigned at creation and immutable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(pub Uuid);

impl TileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TileId {
    fn default() -> Self {
        Self::new()
    }
}

/// Wall-clock style timestamp in milliseconds, supplied by the caller
pub type Millis = u64;

/// Derived 3D placement of a tile in the scene
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorldPos {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<WorldPos> for [f64; 3] {
    fn from(p: WorldPos) -> Self {
        [p.x, p.y, p.z]
    }
}

impl From<[f64; 3]> for WorldPos {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_id_unique() {
        let a = TileId::new();
        let b = TileId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_tile_id_hash() {
        use std::collections::HashMap;
        let id = TileId::new();
        let mut map: HashMap<TileId, &str> = HashMap::new();
        map.insert(id, "tile");
        assert_eq!(map.get(&id), Some(&"tile"));
    }

    #[test]
    fn test_world_pos_array_round_trip() {
        let pos = WorldPos::new(1.5, -0.1, 2.25);
        let arr: [f64; 3] = pos.into();
        assert_eq!(WorldPos::from(arr), pos);
    }
}
