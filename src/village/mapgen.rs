//! Initial map generation
//!
//! Produces the starting settlement: a hex disc of claimed land ringed by
//! border tiles, with a completed house at the center and random terrain
//! elsewhere.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::config::VillageConfig;
use crate::grid::coord::AxialCoord;
use crate::village::store::TileStore;
use crate::village::tile::{BuildingType, Tile, TileKind};

const INTERIOR_COLOR: &str = "#67e8b1";
const DEFAULT_HEIGHT: f64 = 0.5;

/// Terrain height ramp: tiles behind the center rise every two rows
fn terrain_height(r: i32) -> f64 {
    if r < 0 {
        DEFAULT_HEIGHT + r.div_euclid(2).abs() as f64 * 0.25
    } else {
        DEFAULT_HEIGHT
    }
}

/// Generate the starting map
///
/// Interior tiles fill a hex disc of diameter `config.map_size`; the ring of
/// thickness `config.border_size` around it becomes border tiles. Inserts
/// cannot collide on a fresh store.
pub fn generate<R: Rng>(config: &VillageConfig, rng: &mut R) -> TileStore {
    let total = config.map_size + config.border_size * 2;
    let outer = total / 2;
    let inner = config.map_size / 2;

    let mut store = TileStore::new();

    for q in -outer..outer.max(1) {
        for r in -outer..outer.max(1) {
            let coord = AxialCoord::axial(q, r);
            if coord.max_component() >= outer {
                continue;
            }

            let tile = if coord.max_component() >= inner {
                Tile::border(coord, config)
            } else if coord == AxialCoord::ZERO {
                // The settlement starts with its house already standing
                let mut center = Tile::new(
                    coord,
                    TileKind::Empty,
                    INTERIOR_COLOR.into(),
                    DEFAULT_HEIGHT,
                    config,
                );
                center.start_building(BuildingType::House, rng);
                center.is_building = false;
                center.build_progress = 1.0;
                center
            } else {
                let kind = *TileKind::CONVERTIBLE.choose(rng).expect("non-empty");
                Tile::new(coord, kind, INTERIOR_COLOR.into(), terrain_height(r), config)
            };

            store
                .upsert(tile)
                .expect("fresh store has no duplicate coordinates");
        }
    }

    tracing::info!(tiles = store.len(), size = config.map_size, "map generated");
    store
}
