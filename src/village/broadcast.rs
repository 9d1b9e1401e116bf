//! Change broadcasting - bridging tile mutations to and from collaborators
//!
//! The engine never talks to a transport directly: local mutations are fanned
//! out to registered observers (renderer, network sync), and inbound remote
//! changes are applied last-write-wins by coordinate identity. The weak
//! consistency model is deliberate and must not be strengthened; compatibility
//! tests depend on it.

use crate::core::error::Result;
use crate::village::store::TileStore;
use crate::village::tile::Tile;

/// Receives the full updated tile after every local mutation
pub trait TileObserver {
    fn tile_changed(&mut self, tile: &Tile);
}

/// Fan-out point between the tile store and external observers
#[derive(Default)]
pub struct ChangeBroadcaster {
    observers: Vec<Box<dyn TileObserver>>,
}

impl std::fmt::Debug for ChangeBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeBroadcaster")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ChangeBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, observer: Box<dyn TileObserver>) {
        self.observers.push(observer);
    }

    /// Forward a locally mutated tile to every registered observer
    pub fn local_change(&mut self, tile: &Tile) {
        for observer in &mut self.observers {
            observer.tile_changed(tile);
        }
    }

    /// Apply a tile change reported by a remote peer
    ///
    /// Resolution is by coordinate: an existing local tile at the same
    /// (q, r, s) is fully replaced by the incoming tile, otherwise the tile is
    /// inserted as new. No merge, no conflict detection, arrival order wins.
    /// Remote changes are not re-forwarded to local observers here; the
    /// hosting transport already fans out to its other peers.
    pub fn apply_remote(&mut self, store: &mut TileStore, incoming: Tile) -> Result<Tile> {
        let replaced = store.replace_by_coord(incoming.clone());
        match replaced {
            Some(old) => tracing::debug!(at = %incoming.coord, old = ?old.id, "remote change replaced local tile"),
            None => tracing::debug!(at = %incoming.coord, "remote change inserted new tile"),
        }
        Ok(incoming)
    }
}
