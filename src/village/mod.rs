//! Village layer - tile state, frontier growth, harvesting, and sync

pub mod broadcast;
pub mod construction;
pub mod frontier;
pub mod harvest;
pub mod ledger;
pub mod mapgen;
pub mod sim;
pub mod snapshot;
pub mod store;
pub mod tile;

pub use broadcast::{ChangeBroadcaster, TileObserver};
pub use construction::ConstructionTracker;
pub use frontier::expand;
pub use harvest::{harvest, is_ready, HarvestOutcome};
pub use ledger::{ResourceDelta, ResourceKind, ResourceLedger};
pub use sim::{ClickOutcome, VillageSim};
pub use snapshot::TileRecord;
pub use store::TileStore;
pub use tile::{BuildingType, Tile, TileKind};
