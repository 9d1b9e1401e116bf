//! Resource harvest engine - depletion, cooldown, and regeneration
//!
//! Each harvestable tile is a two-state machine: Available (full yield, a
//! click pays out) and OnCooldown (zero yield, clicks fail). Cooldown expiry
//! is checked by an explicit `tick(now)` pull rather than a background timer,
//! so tests drive the clock with synthetic timestamps.

use crate::core::config::VillageConfig;
use crate::core::error::{Result, VillageError};
use crate::core::types::{Millis, TileId};
use crate::village::ledger::{ResourceDelta, ResourceKind};
use crate::village::store::TileStore;
use crate::village::tile::{Tile, TileKind};

/// Result of a successful harvest
#[derive(Debug, Clone)]
pub struct HarvestOutcome {
    /// The tile after depletion
    pub tile: Tile,
    /// Counter delta the caller applies to the village ledger
    pub delta: ResourceDelta,
}

/// Cooldown window for a harvestable kind, in milliseconds
pub fn cooldown_for(kind: TileKind, config: &VillageConfig) -> Option<Millis> {
    match kind {
        TileKind::Grain => Some(config.grain_cooldown_ms),
        TileKind::Forest => Some(config.forest_cooldown_ms),
        _ => None,
    }
}

/// Full yield restored once a cooldown expires
pub fn yield_for(kind: TileKind, config: &VillageConfig) -> Option<u32> {
    match kind {
        TileKind::Grain => Some(config.grain_yield),
        TileKind::Forest => Some(config.forest_yield),
        _ => None,
    }
}

fn payout_kind(kind: TileKind) -> Option<ResourceKind> {
    match kind {
        TileKind::Grain => Some(ResourceKind::Grain),
        TileKind::Forest => Some(ResourceKind::Wood),
        _ => None,
    }
}

/// Whether a depleted tile's cooldown has elapsed at `now`
///
/// A tile that was never harvested is immediately ready.
pub fn is_ready(tile: &Tile, now: Millis, config: &VillageConfig) -> bool {
    let Some(cooldown) = cooldown_for(tile.kind, config) else {
        return false;
    };
    match tile.last_harvested_at {
        None => true,
        Some(at) => now.saturating_sub(at) >= cooldown,
    }
}

/// Harvest an available tile: Available -> OnCooldown
///
/// Fails with `NotHarvestable` for non-resource kinds and `AlreadyDepleted`
/// when the tile is on cooldown; the store is untouched on failure.
pub fn harvest(
    store: &mut TileStore,
    id: TileId,
    now: Millis,
    config: &VillageConfig,
) -> Result<HarvestOutcome> {
    let tile = store.get(id).ok_or(VillageError::TileNotFound(id))?;

    let kind = payout_kind(tile.kind)
        .ok_or_else(|| VillageError::NotHarvestable(tile.kind.as_str().to_string()))?;
    if tile.resource_amount == 0 {
        return Err(VillageError::AlreadyDepleted);
    }

    let mut updated = tile.clone();
    let amount = updated.resource_amount;
    updated.resource_amount = 0;
    updated.last_harvested_at = Some(now);
    store.upsert(updated.clone())?;

    tracing::debug!(tile = %updated.coord, kind = ?kind, amount, "harvested");

    Ok(HarvestOutcome {
        tile: updated,
        delta: ResourceDelta { kind, amount },
    })
}

/// Flip every ready depleted tile back to Available: OnCooldown -> Available
///
/// Returns the regrown tiles so the caller can broadcast them.
pub fn tick(store: &mut TileStore, now: Millis, config: &VillageConfig) -> Vec<Tile> {
    let ready: Vec<TileId> = store
        .all()
        .filter(|t| t.kind.is_harvestable() && t.resource_amount == 0 && is_ready(t, now, config))
        .map(|t| t.id)
        .collect();

    let mut regrown = Vec::with_capacity(ready.len());
    for id in ready {
        let Some(tile) = store.get(id) else { continue };
        let Some(full_yield) = yield_for(tile.kind, config) else {
            continue;
        };
        let mut updated = tile.clone();
        updated.resource_amount = full_yield;
        // Inserting an existing id at its own coordinate cannot fail
        if store.upsert(updated.clone()).is_ok() {
            regrown.push(updated);
        }
    }

    if !regrown.is_empty() {
        tracing::debug!(count = regrown.len(), "cooldowns expired, tiles regrown");
    }

    regrown
}
