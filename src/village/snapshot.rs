//! Tile snapshot wire format
//!
//! Persistence and network collaborators exchange tiles as flat records with
//! a fixed field set. Field names and shapes are a compatibility contract with
//! the existing clients and must not drift.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{Millis, TileId, WorldPos};
use crate::grid::coord::AxialCoord;
use crate::grid::layout::world_position;
use crate::village::store::TileStore;
use crate::village::tile::{Tile, TileKind};

/// One tile as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRecord {
    pub id: TileId,
    pub pos: [f64; 3],
    pub color: String,
    pub height: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub q: i32,
    pub r: i32,
    pub s: i32,
    pub is_building: bool,
    pub build_progress: f64,
    pub resources: u32,
    pub last_harvested: Option<Millis>,
    pub building_rotation: Option<f64>,
}

impl From<&Tile> for TileRecord {
    fn from(tile: &Tile) -> Self {
        Self {
            id: tile.id,
            pos: tile.world_pos.into(),
            color: tile.color.clone(),
            height: tile.height,
            kind: tile.kind.as_str().to_string(),
            q: tile.coord.q(),
            r: tile.coord.r(),
            s: tile.coord.s(),
            is_building: tile.is_building,
            build_progress: tile.build_progress,
            resources: tile.resource_amount,
            last_harvested: tile.last_harvested_at,
            building_rotation: tile.building_rotation,
        }
    }
}

impl TileRecord {
    /// Rebuild a tile from its wire record
    ///
    /// The coordinate is validated and the horizontal world position is
    /// re-derived from it; the record's y is kept as-is since the vertical
    /// offset is presentation state owned by the tile kind.
    pub fn into_tile(self) -> Result<Tile> {
        let coord = AxialCoord::new(self.q, self.r, self.s)?;
        let kind = TileKind::parse(&self.kind)?;
        let (x, z) = world_position(coord);
        Ok(Tile {
            id: self.id,
            coord,
            world_pos: WorldPos::new(x, self.pos[1], z),
            kind,
            color: self.color,
            height: self.height,
            resource_amount: self.resources,
            last_harvested_at: self.last_harvested,
            is_building: self.is_building,
            build_progress: self.build_progress,
            building_rotation: self.building_rotation,
        })
    }
}

/// Snapshot every tile in insertion order
pub fn snapshot(store: &TileStore) -> Vec<TileRecord> {
    store.all().map(TileRecord::from).collect()
}

/// Rebuild a store from wire records
///
/// Fails on malformed coordinates, unknown kinds, or duplicate coordinates.
pub fn restore(records: impl IntoIterator<Item = TileRecord>) -> Result<TileStore> {
    let mut store = TileStore::new();
    for record in records {
        store.upsert(record.into_tile()?)?;
    }
    Ok(store)
}

/// Write the store as JSON
pub fn save_to<W: Write>(store: &TileStore, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &snapshot(store))?;
    Ok(())
}

/// Read a store back from JSON
pub fn load_from<R: Read>(reader: R) -> Result<TileStore> {
    let records: Vec<TileRecord> = serde_json::from_reader(reader)?;
    restore(records)
}
