//! Village simulation facade - click dispatch and the tick loop
//!
//! A user action resolves to a tile id; depending on the tile kind the click
//! converts frontier land, places a building, or harvests resources. Every
//! mutation goes through the store and is forwarded to the broadcaster. The
//! whole engine is single-writer: each operation runs to completion before the
//! next, and remote changes arrive on the same serialized path.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::VillageConfig;
use crate::core::error::{Result, VillageError};
use crate::core::types::{Millis, TileId};
use crate::village::broadcast::{ChangeBroadcaster, TileObserver};
use crate::village::construction::ConstructionTracker;
use crate::village::frontier;
use crate::village::harvest;
use crate::village::ledger::{ResourceDelta, ResourceKind, ResourceLedger};
use crate::village::mapgen;
use crate::village::snapshot::{self, TileRecord};
use crate::village::store::TileStore;
use crate::village::tile::{BuildingType, Tile, TileKind};

/// What a click did
#[derive(Debug, Clone)]
pub enum ClickOutcome {
    /// A border tile was claimed; new frontier tiles were synthesized
    Expanded { converted: Tile, created: Vec<Tile> },
    /// A building was placed on empty land and started constructing
    ConstructionStarted { tile: Tile },
    /// A harvestable tile paid out
    Harvested { tile: Tile, delta: ResourceDelta },
    /// The click had no effect (depleted tile, finished building)
    Ignored,
}

/// The running village: store, observers, counters, and the tick loop
#[derive(Debug)]
pub struct VillageSim {
    store: TileStore,
    config: VillageConfig,
    broadcaster: ChangeBroadcaster,
    ledger: ResourceLedger,
    builds: ConstructionTracker,
    rng: ChaCha8Rng,
}

impl VillageSim {
    /// Start a fresh village with a generated map
    pub fn new(config: VillageConfig, seed: u64) -> Result<Self> {
        config.validate().map_err(VillageError::InvalidConfig)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let store = mapgen::generate(&config, &mut rng);
        Ok(Self {
            store,
            config,
            broadcaster: ChangeBroadcaster::new(),
            ledger: ResourceLedger::new(),
            builds: ConstructionTracker::new(),
            rng,
        })
    }

    /// Resume a village from persisted tile records
    pub fn from_snapshot(
        records: Vec<TileRecord>,
        config: VillageConfig,
        seed: u64,
        now: Millis,
    ) -> Result<Self> {
        let store = snapshot::restore(records)?;
        let mut builds = ConstructionTracker::new();
        builds.resume(&store, now, &config);
        Ok(Self {
            store,
            config,
            broadcaster: ChangeBroadcaster::new(),
            ledger: ResourceLedger::new(),
            builds,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn store(&self) -> &TileStore {
        &self.store
    }

    pub fn config(&self) -> &VillageConfig {
        &self.config
    }

    pub fn resources(&self, kind: ResourceKind) -> u64 {
        self.ledger.get(kind)
    }

    pub fn register_observer(&mut self, observer: Box<dyn TileObserver>) {
        self.broadcaster.register(observer);
    }

    /// Snapshot every tile for persistence or a full client sync
    pub fn snapshot(&self) -> Vec<TileRecord> {
        snapshot::snapshot(&self.store)
    }

    /// Handle a click on a tile
    ///
    /// Ready cooldowns are flipped lazily before dispatch, so a click on a
    /// regrown tile harvests it without waiting for the next periodic tick.
    pub fn click(&mut self, id: TileId, now: Millis) -> Result<ClickOutcome> {
        self.run_harvest_tick(now);

        let tile = self.store.get(id).ok_or(VillageError::TileNotFound(id))?;
        match tile.kind {
            TileKind::Border => self.claim_frontier(id, now),
            TileKind::Empty => self.place_building(id, now),
            TileKind::Forest | TileKind::Grain => match harvest::harvest(&mut self.store, id, now, &self.config) {
                Ok(outcome) => {
                    self.ledger.apply(outcome.delta);
                    self.broadcaster.local_change(&outcome.tile);
                    Ok(ClickOutcome::Harvested {
                        tile: outcome.tile,
                        delta: outcome.delta,
                    })
                }
                // Clicking a depleted tile is a no-op, not a fault
                Err(VillageError::AlreadyDepleted) => Ok(ClickOutcome::Ignored),
                Err(e) => Err(e),
            },
            TileKind::Building(_) => Ok(ClickOutcome::Ignored),
        }
    }

    /// Expand request: convert the border tile and grow the frontier,
    /// returning the full updated snapshot sequence
    pub fn expand_request(&mut self, id: TileId, now: Millis) -> Result<Vec<TileRecord>> {
        match self.store.get(id) {
            None => return Err(VillageError::TileNotFound(id)),
            Some(tile) if tile.kind != TileKind::Border => {
                return Err(VillageError::InvalidExpansion(tile.coord));
            }
            Some(_) => {}
        }
        self.claim_frontier(id, now)?;
        Ok(self.snapshot())
    }

    /// Advance time: expire harvest cooldowns and building construction
    ///
    /// Returns every tile that changed; each is also broadcast.
    pub fn tick(&mut self, now: Millis) -> Vec<Tile> {
        let mut changed = self.run_harvest_tick(now);
        let built = self.builds.tick(&mut self.store, now, &self.config);
        for tile in &built {
            self.broadcaster.local_change(tile);
        }
        changed.extend(built);
        changed
    }

    /// Apply a tile change reported by a remote peer (last-write-wins)
    pub fn apply_remote(&mut self, record: TileRecord) -> Result<Tile> {
        let incoming = record.into_tile()?;
        self.broadcaster.apply_remote(&mut self.store, incoming)
    }

    /// Bulk reset: drop every tile and regenerate the starting map
    pub fn reset(&mut self) {
        self.store.clear();
        self.builds = ConstructionTracker::new();
        self.store = mapgen::generate(&self.config, &mut self.rng);
        tracing::info!("map reset");
    }

    fn run_harvest_tick(&mut self, now: Millis) -> Vec<Tile> {
        let regrown = harvest::tick(&mut self.store, now, &self.config);
        for tile in &regrown {
            self.broadcaster.local_change(tile);
        }
        regrown
    }

    fn claim_frontier(&mut self, id: TileId, _now: Millis) -> Result<ClickOutcome> {
        let tile = self.store.get(id).ok_or(VillageError::TileNotFound(id))?;
        if tile.kind != TileKind::Border {
            return Err(VillageError::InvalidExpansion(tile.coord));
        }

        let kind = *TileKind::CONVERTIBLE
            .choose(&mut self.rng)
            .expect("non-empty");
        let mut converted = tile.clone();
        converted.convert(kind, &self.config);
        let coord = converted.coord;
        self.store.upsert(converted.clone())?;

        let created = frontier::expand(&mut self.store, coord, &self.config)?;

        self.broadcaster.local_change(&converted);
        for border in &created {
            self.broadcaster.local_change(border);
        }
        tracing::info!(at = %coord, kind = converted.kind.as_str(), "frontier claimed");

        Ok(ClickOutcome::Expanded { converted, created })
    }

    fn place_building(&mut self, id: TileId, now: Millis) -> Result<ClickOutcome> {
        let tile = self.store.get(id).ok_or(VillageError::TileNotFound(id))?;
        debug_assert_eq!(tile.kind, TileKind::Empty);

        let building = *BuildingType::ALL.choose(&mut self.rng).expect("non-empty");
        let mut updated = tile.clone();
        updated.start_building(building, &mut self.rng);
        self.store.upsert(updated.clone())?;
        self.builds.begin(id, now);

        self.broadcaster.local_change(&updated);
        tracing::info!(at = %updated.coord, kind = building.as_str(), "construction started");

        Ok(ClickOutcome::ConstructionStarted { tile: updated })
    }
}
