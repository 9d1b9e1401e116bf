//! Construction progress for placed buildings
//!
//! Build progress advances on explicit `tick(now)` calls instead of a
//! background interval. Start timestamps are transient engine state, not part
//! of the tile record; a restored map resumes from the persisted progress.

use ahash::AHashMap;

use crate::core::config::VillageConfig;
use crate::core::types::{Millis, TileId};
use crate::village::store::TileStore;
use crate::village::tile::{Tile, TileKind};

/// Tracks when each in-progress building was started
#[derive(Debug, Clone, Default)]
pub struct ConstructionTracker {
    started: AHashMap<TileId, Millis>,
}

impl ConstructionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a building that was just placed
    pub fn begin(&mut self, id: TileId, now: Millis) {
        self.started.insert(id, now);
    }

    /// Number of buildings currently under construction
    pub fn in_progress(&self) -> usize {
        self.started.len()
    }

    /// Pick up unfinished buildings from a restored store
    ///
    /// Back-dates the start so the persisted progress carries over.
    pub fn resume(&mut self, store: &TileStore, now: Millis, config: &VillageConfig) {
        for tile in store.all() {
            if tile.is_building && !self.started.contains_key(&tile.id) {
                let elapsed = (tile.build_progress.clamp(0.0, 1.0)
                    * config.build_duration_ms as f64) as Millis;
                self.started.insert(tile.id, now.saturating_sub(elapsed));
            }
        }
    }

    /// Advance every tracked building to its progress at `now`
    ///
    /// Buildings reaching full progress flip `is_building` off and stop being
    /// tracked. Returns the tiles whose progress changed.
    pub fn tick(&mut self, store: &mut TileStore, now: Millis, config: &VillageConfig) -> Vec<Tile> {
        let mut changed = Vec::new();
        let mut finished = Vec::new();

        for (&id, &started) in &self.started {
            let Some(tile) = store.get(id) else {
                // Tile replaced or map reset while building
                finished.push(id);
                continue;
            };
            if !matches!(tile.kind, TileKind::Building(_)) {
                finished.push(id);
                continue;
            }

            let elapsed = now.saturating_sub(started) as f64;
            let progress = (elapsed / config.build_duration_ms as f64).min(1.0);
            if progress == tile.build_progress {
                continue;
            }

            let mut updated = tile.clone();
            updated.build_progress = progress;
            if progress >= 1.0 {
                updated.is_building = false;
                finished.push(id);
                tracing::info!(tile = %updated.coord, kind = updated.kind.as_str(), "construction finished");
            }
            if store.upsert(updated.clone()).is_ok() {
                changed.push(updated);
            }
        }

        for id in finished {
            self.started.remove(&id);
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::coord::AxialCoord;
    use crate::village::tile::BuildingType;

    fn placed_building(store: &mut TileStore, config: &VillageConfig) -> TileId {
        let mut rng = rand::thread_rng();
        let mut tile = Tile::new(AxialCoord::ZERO, TileKind::Empty, "#6EE7B7".into(), 0.2, config);
        tile.start_building(BuildingType::Mill, &mut rng);
        let id = tile.id;
        store.upsert(tile).unwrap();
        id
    }

    #[test]
    fn test_progress_advances_with_time() {
        let config = VillageConfig::default();
        let mut store = TileStore::new();
        let mut tracker = ConstructionTracker::new();
        let id = placed_building(&mut store, &config);
        tracker.begin(id, 0);

        let changed = tracker.tick(&mut store, 500, &config);
        assert_eq!(changed.len(), 1);
        let tile = store.get(id).unwrap();
        assert!((tile.build_progress - 0.5).abs() < 1e-9);
        assert!(tile.is_building);
    }

    #[test]
    fn test_completion_flips_is_building() {
        let config = VillageConfig::default();
        let mut store = TileStore::new();
        let mut tracker = ConstructionTracker::new();
        let id = placed_building(&mut store, &config);
        tracker.begin(id, 0);

        tracker.tick(&mut store, config.build_duration_ms, &config);

        let tile = store.get(id).unwrap();
        assert_eq!(tile.build_progress, 1.0);
        assert!(!tile.is_building);
        assert_eq!(tracker.in_progress(), 0);

        // Further ticks are no-ops
        let changed = tracker.tick(&mut store, config.build_duration_ms * 2, &config);
        assert!(changed.is_empty());
    }

    #[test]
    fn test_resume_carries_over_persisted_progress() {
        let config = VillageConfig::default();
        let mut store = TileStore::new();
        let id = placed_building(&mut store, &config);
        let mut half_built = store.get(id).unwrap().clone();
        half_built.build_progress = 0.5;
        store.upsert(half_built).unwrap();

        let mut tracker = ConstructionTracker::new();
        tracker.resume(&store, 10_000, &config);
        assert_eq!(tracker.in_progress(), 1);

        // Half the duration remains
        tracker.tick(&mut store, 10_000 + config.build_duration_ms / 2, &config);
        let tile = store.get(id).unwrap();
        assert_eq!(tile.build_progress, 1.0);
        assert!(!tile.is_building);
    }
}
