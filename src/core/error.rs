use thiserror::Error;

use crate::core::types::TileId;
use crate::grid::coord::AxialCoord;

#[derive(Error, Debug)]
pub enum VillageError {
    #[error("Invalid coordinate ({0}, {1}, {2}): q + r + s must equal 0")]
    InvalidCoordinate(i32, i32, i32),

    #[error("Coordinate already occupied by another tile: {0}")]
    DuplicateCoordinate(AxialCoord),

    #[error("Expansion requires a converted interior tile at {0}")]
    InvalidExpansion(AxialCoord),

    #[error("Tile is not harvestable: {0}")]
    NotHarvestable(String),

    #[error("Tile already depleted, waiting on cooldown")]
    AlreadyDepleted,

    #[error("Tile not found: {0:?}")]
    TileNotFound(TileId),

    #[error("Unknown tile kind: {0}")]
    UnknownKind(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VillageError>;
