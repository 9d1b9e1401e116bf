//! Integration tests for the village tile-state engine
//!
//! These tests drive the engine the way the hosting game does:
//! - claiming frontier land and watching the border ring grow
//! - the harvest/cooldown/regrow cycle against a synthetic clock
//! - remote tile changes resolved by coordinate identity
//! - snapshot round trips through the wire format

use std::cell::RefCell;
use std::rc::Rc;

use hexhamlet::core::config::VillageConfig;
use hexhamlet::core::error::VillageError;
use hexhamlet::grid::coord::AxialCoord;
use hexhamlet::village::broadcast::TileObserver;
use hexhamlet::village::ledger::ResourceKind;
use hexhamlet::village::sim::{ClickOutcome, VillageSim};
use hexhamlet::village::snapshot::{self, TileRecord};
use hexhamlet::village::store::TileStore;
use hexhamlet::village::tile::{Tile, TileKind};
use hexhamlet::village::{frontier, harvest};

fn tile_id_of_kind(sim: &VillageSim, kind: TileKind) -> hexhamlet::core::types::TileId {
    sim.store()
        .all()
        .find(|t| t.kind == kind)
        .map(|t| t.id)
        .expect("generated map contains the kind")
}

// ============================================================================
// Frontier expansion
// ============================================================================

/// Scenario: a border tile at (0,0,0) is converted; all six neighbors
/// (1,-1,0), (1,0,-1), (0,1,-1), (-1,1,0), (-1,0,1), (0,-1,1) become border
/// tiles if absent.
#[test]
fn test_conversion_surrounds_origin_with_border() {
    let config = VillageConfig::default();
    let mut store = TileStore::new();
    let mut converted = Tile::border(AxialCoord::ZERO, &config);
    converted.convert(TileKind::Grain, &config);
    let coord = converted.coord;
    store.upsert(converted).unwrap();

    frontier::expand(&mut store, coord, &config).unwrap();

    for (q, r, s) in [
        (1, -1, 0),
        (1, 0, -1),
        (0, 1, -1),
        (-1, 1, 0),
        (-1, 0, 1),
        (0, -1, 1),
    ] {
        let neighbor = AxialCoord::new(q, r, s).unwrap();
        let tile = store.get_by_coord(neighbor).expect("border synthesized");
        assert_eq!(tile.kind, TileKind::Border);
    }
    assert_eq!(store.len(), 7);
}

#[test]
fn test_repeated_clicks_never_leave_gaps() {
    let mut sim = VillageSim::new(VillageConfig::default(), 9).unwrap();

    // Claim a handful of frontier tiles
    for _ in 0..5 {
        let id = tile_id_of_kind(&sim, TileKind::Border);
        let outcome = sim.click(id, 0).unwrap();
        assert!(matches!(outcome, ClickOutcome::Expanded { .. }));
    }

    // Every interior tile is fully surrounded
    let interiors: Vec<AxialCoord> = sim
        .store()
        .all()
        .filter(|t| t.kind.is_interior())
        .map(|t| t.coord)
        .collect();
    for coord in interiors {
        for neighbor in coord.neighbors() {
            assert!(
                sim.store().contains_coord(neighbor),
                "gap next to interior tile {coord} at {neighbor}"
            );
        }
    }
}

// ============================================================================
// Harvest state machine
// ============================================================================

/// A grain tile harvested at now=0 yields +10 to the grain counter and goes
/// to zero; tick(9999) leaves it depleted; tick(10000) restores the full
/// yield.
#[test]
fn test_grain_harvest_cooldown_scenario() {
    let config = VillageConfig::default();
    let mut store = TileStore::new();
    let grain = Tile::new(
        AxialCoord::ZERO,
        TileKind::Grain,
        "#67e8b1".into(),
        0.5,
        &config,
    );
    let id = grain.id;
    store.upsert(grain).unwrap();

    let outcome = harvest::harvest(&mut store, id, 0, &config).unwrap();
    assert_eq!(outcome.delta.kind, ResourceKind::Grain);
    assert_eq!(outcome.delta.amount, 10);
    assert_eq!(store.get(id).unwrap().resource_amount, 0);

    assert!(harvest::tick(&mut store, 9_999, &config).is_empty());
    assert_eq!(store.get(id).unwrap().resource_amount, 0);

    let regrown = harvest::tick(&mut store, 10_000, &config);
    assert_eq!(regrown.len(), 1);
    assert_eq!(store.get(id).unwrap().resource_amount, 10);
}

#[test]
fn test_double_harvest_guard() {
    let config = VillageConfig::default();
    let mut store = TileStore::new();
    let forest = Tile::new(
        AxialCoord::ZERO,
        TileKind::Forest,
        "#67e8b1".into(),
        0.5,
        &config,
    );
    let id = forest.id;
    store.upsert(forest).unwrap();

    harvest::harvest(&mut store, id, 1_000, &config).unwrap();
    let err = harvest::harvest(&mut store, id, 1_000, &config).unwrap_err();
    assert!(matches!(err, VillageError::AlreadyDepleted));
}

#[test]
fn test_forest_cooldown_longer_than_grain() {
    let mut sim = VillageSim::new(VillageConfig::default(), 4).unwrap();
    let grain = tile_id_of_kind(&sim, TileKind::Grain);
    let forest = tile_id_of_kind(&sim, TileKind::Forest);

    sim.click(grain, 0).unwrap();
    sim.click(forest, 0).unwrap();
    assert_eq!(sim.resources(ResourceKind::Grain), 10);
    assert_eq!(sim.resources(ResourceKind::Wood), 5);

    // Grain regrows at 10 s, forest still cooling down until 60 s
    sim.tick(10_000);
    assert_eq!(sim.store().get(grain).unwrap().resource_amount, 10);
    assert_eq!(sim.store().get(forest).unwrap().resource_amount, 0);

    sim.tick(60_000);
    assert_eq!(sim.store().get(forest).unwrap().resource_amount, 5);
}

// ============================================================================
// Change broadcasting and remote sync
// ============================================================================

struct CountingObserver {
    count: Rc<RefCell<usize>>,
}

impl TileObserver for CountingObserver {
    fn tile_changed(&mut self, _tile: &Tile) {
        *self.count.borrow_mut() += 1;
    }
}

#[test]
fn test_local_mutations_reach_observers() {
    let mut sim = VillageSim::new(VillageConfig::default(), 11).unwrap();
    let count = Rc::new(RefCell::new(0));
    sim.register_observer(Box::new(CountingObserver { count: count.clone() }));

    let border = tile_id_of_kind(&sim, TileKind::Border);
    let ClickOutcome::Expanded { created, .. } = sim.click(border, 0).unwrap() else {
        panic!("expected expansion");
    };

    // Converted tile plus every synthesized border tile is forwarded
    assert_eq!(*count.borrow(), 1 + created.len());

    let grain = tile_id_of_kind(&sim, TileKind::Grain);
    sim.click(grain, 0).unwrap();
    assert_eq!(*count.borrow(), 2 + created.len());
}

/// A remote change for an already-present coordinate fully overwrites the
/// local tile's mutable fields.
#[test]
fn test_remote_change_overwrites_local_tile() {
    let mut sim = VillageSim::new(VillageConfig::default(), 2).unwrap();
    let local = sim
        .store()
        .all()
        .find(|t| t.kind == TileKind::Grain)
        .unwrap()
        .clone();

    let mut incoming = TileRecord::from(&local);
    incoming.id = hexhamlet::core::types::TileId::new();
    incoming.kind = "empty".into();
    incoming.color = "#8B4513".into();
    incoming.resources = 0;

    sim.apply_remote(incoming.clone()).unwrap();

    let stored = sim.store().get_by_coord(local.coord).unwrap();
    assert_eq!(stored.id, incoming.id);
    assert_eq!(stored.kind, TileKind::Empty);
    assert_eq!(stored.color, "#8B4513");
    assert_eq!(stored.resource_amount, 0);
    assert!(sim.store().get(local.id).is_none());
}

#[test]
fn test_remote_change_for_new_coordinate_inserts() {
    let mut sim = VillageSim::new(VillageConfig::default(), 2).unwrap();
    let before = sim.store().len();

    // A peer claimed land we have never seen
    let config = VillageConfig::default();
    let far = Tile::border(AxialCoord::axial(40, -12), &config);
    sim.apply_remote(TileRecord::from(&far)).unwrap();

    assert_eq!(sim.store().len(), before + 1);
    assert!(sim.store().contains_coord(AxialCoord::axial(40, -12)));
}

// ============================================================================
// Snapshot round trips
// ============================================================================

#[test]
fn test_full_map_snapshot_round_trip() {
    let mut sim = VillageSim::new(VillageConfig::default(), 5).unwrap();
    let grain = tile_id_of_kind(&sim, TileKind::Grain);
    sim.click(grain, 1_234).unwrap();

    let records = sim.snapshot();
    let restored = snapshot::restore(records).unwrap();

    assert_eq!(restored.len(), sim.store().len());
    let tile = restored.get(grain).unwrap();
    assert_eq!(tile.resource_amount, 0);
    assert_eq!(tile.last_harvested_at, Some(1_234));
}

#[test]
fn test_resumed_sim_continues_cooldowns() {
    let config = VillageConfig::default();
    let mut sim = VillageSim::new(config.clone(), 6).unwrap();
    let grain = tile_id_of_kind(&sim, TileKind::Grain);
    sim.click(grain, 0).unwrap();

    let records = sim.snapshot();
    let mut resumed = VillageSim::from_snapshot(records, config.clone(), 6, 5_000).unwrap();

    // Still cooling down at 9999, ready at 10000
    resumed.tick(9_999);
    assert_eq!(resumed.store().get(grain).unwrap().resource_amount, 0);
    resumed.tick(10_000);
    assert_eq!(
        resumed.store().get(grain).unwrap().resource_amount,
        config.grain_yield
    );
}

#[test]
fn test_construction_resumes_from_snapshot() {
    let config = VillageConfig::default();
    let mut sim = VillageSim::new(config.clone(), 8).unwrap();
    let empty = tile_id_of_kind(&sim, TileKind::Empty);
    sim.click(empty, 0).unwrap();
    sim.tick(500);
    assert!(sim.store().get(empty).unwrap().is_building);

    let records = sim.snapshot();
    let mut resumed = VillageSim::from_snapshot(records, config.clone(), 8, 500).unwrap();

    resumed.tick(500 + config.build_duration_ms / 2);
    let tile = resumed.store().get(empty).unwrap();
    assert!(!tile.is_building);
    assert_eq!(tile.build_progress, 1.0);
}
