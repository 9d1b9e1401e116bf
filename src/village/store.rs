//! TileStore - single source of truth for all tiles
//!
//! Tiles are keyed primarily by id with a secondary index by coordinate for
//! neighbor lookups. Insertion order is preserved so snapshots and test output
//! are deterministic.

use ahash::AHashMap;

use crate::core::error::{Result, VillageError};
use crate::core::types::TileId;
use crate::grid::coord::AxialCoord;
use crate::village::tile::Tile;

/// Mapping from id (and coordinate) to tile, enforcing one tile per coordinate
#[derive(Debug, Clone, Default)]
pub struct TileStore {
    tiles: AHashMap<TileId, Tile>,
    by_coord: AHashMap<AxialCoord, TileId>,
    order: Vec<TileId>,
}

impl TileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    pub fn get_by_coord(&self, coord: AxialCoord) -> Option<&Tile> {
        self.by_coord.get(&coord).and_then(|id| self.tiles.get(id))
    }

    pub fn contains_coord(&self, coord: AxialCoord) -> bool {
        self.by_coord.contains_key(&coord)
    }

    /// Insert a new tile or replace an existing one by id
    ///
    /// Fails with `DuplicateCoordinate` when the tile's coordinate is already
    /// held by a different id; the store is left unchanged on failure.
    pub fn upsert(&mut self, tile: Tile) -> Result<()> {
        if let Some(&occupant) = self.by_coord.get(&tile.coord) {
            if occupant != tile.id {
                return Err(VillageError::DuplicateCoordinate(tile.coord));
            }
        }

        match self.tiles.insert(tile.id, tile.clone()) {
            Some(previous) => {
                // Same id moved: keep the coordinate index consistent
                if previous.coord != tile.coord {
                    self.by_coord.remove(&previous.coord);
                    self.by_coord.insert(tile.coord, tile.id);
                }
            }
            None => {
                self.by_coord.insert(tile.coord, tile.id);
                self.order.push(tile.id);
            }
        }
        Ok(())
    }

    /// Replace whatever tile occupies the coordinate, keyed on coordinate
    /// identity alone (last-write-wins remote application)
    ///
    /// Returns the displaced tile, if any.
    pub fn replace_by_coord(&mut self, tile: Tile) -> Option<Tile> {
        let displaced = self
            .by_coord
            .get(&tile.coord)
            .copied()
            .filter(|id| *id != tile.id)
            .and_then(|id| {
                self.order.retain(|o| *o != id);
                self.tiles.remove(&id)
            });

        if self.tiles.insert(tile.id, tile.clone()).is_none() {
            self.order.push(tile.id);
        }
        self.by_coord.insert(tile.coord, tile.id);
        displaced
    }

    /// All tiles in insertion order
    pub fn all(&self) -> impl Iterator<Item = &Tile> {
        self.order.iter().filter_map(|id| self.tiles.get(id))
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Remove all tiles (the external "reset map" operation)
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.by_coord.clear();
        self.order.clear();
    }
}
