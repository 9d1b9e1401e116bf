pub mod config;
pub mod error;
pub mod types;

pub use config::VillageConfig;
pub use error::{Result, VillageError};
pub use types::{Millis, TileId, WorldPos};
