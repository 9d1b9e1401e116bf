//! Frontier expansion - growing the border ring around newly claimed land
//!
//! Every interior tile must be fully surrounded by some tile so the map never
//! has an undefined gap adjacent to player-reachable land.

use crate::core::config::VillageConfig;
use crate::core::error::{Result, VillageError};
use crate::grid::coord::AxialCoord;
use crate::village::store::TileStore;
use crate::village::tile::Tile;

/// Synthesize border tiles for every missing neighbor of a just-converted tile
///
/// Precondition: the tile at `coord` has transitioned from border to an
/// interior kind; calling this for a missing or still-border tile is a caller
/// error. Neighbors that already hold a tile (border or interior) are left
/// untouched, which makes the operation idempotent and safe to retry.
///
/// Returns the newly created tiles so the caller can broadcast them.
pub fn expand(store: &mut TileStore, coord: AxialCoord, config: &VillageConfig) -> Result<Vec<Tile>> {
    let converted = store
        .get_by_coord(coord)
        .ok_or(VillageError::InvalidExpansion(coord))?;
    if !converted.kind.is_interior() {
        return Err(VillageError::InvalidExpansion(coord));
    }

    let new_tiles: Vec<Tile> = coord
        .neighbors()
        .into_iter()
        .filter(|n| !store.contains_coord(*n))
        .map(|n| Tile::border(n, config))
        .collect();

    // Inserts cannot collide: every target coordinate was just checked empty
    // and the six neighbors are distinct.
    for tile in &new_tiles {
        store.upsert(tile.clone())?;
    }

    if !new_tiles.is_empty() {
        tracing::debug!(
            at = %coord,
            created = new_tiles.len(),
            "frontier expanded"
        );
    }

    Ok(new_tiles)
}
