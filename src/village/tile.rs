//! Tile entity - one hex cell of the village map

use rand::Rng;

use crate::core::config::VillageConfig;
use crate::core::error::{Result, VillageError};
use crate::core::types::{Millis, TileId, WorldPos};
use crate::grid::coord::AxialCoord;
use crate::grid::layout::world_position;

/// Buildings that can be placed on an empty tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildingType {
    House,
    Mill,
    Well,
    Lumberjack,
}

impl BuildingType {
    pub const ALL: [BuildingType; 4] = [
        BuildingType::House,
        BuildingType::Mill,
        BuildingType::Well,
        BuildingType::Lumberjack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingType::House => "house",
            BuildingType::Mill => "mill",
            BuildingType::Well => "well",
            BuildingType::Lumberjack => "lumberjack",
        }
    }
}

/// Classification of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Reachable-but-unclaimed frontier placeholder
    Border,
    /// Claimed land with nothing on it
    Empty,
    /// Harvestable wood source
    Forest,
    /// Harvestable grain field
    Grain,
    /// A placed (or under-construction) building
    Building(BuildingType),
}

impl TileKind {
    /// Wire name used by the snapshot format and network peers
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Border => "border",
            TileKind::Empty => "empty",
            TileKind::Forest => "forest",
            TileKind::Grain => "grain",
            TileKind::Building(b) => b.as_str(),
        }
    }

    /// Parse a wire name back into a kind
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "border" => Ok(TileKind::Border),
            "empty" => Ok(TileKind::Empty),
            "forest" => Ok(TileKind::Forest),
            "grain" => Ok(TileKind::Grain),
            other => BuildingType::ALL
                .iter()
                .find(|b| b.as_str() == other)
                .map(|b| TileKind::Building(*b))
                .ok_or_else(|| VillageError::UnknownKind(other.to_string())),
        }
    }

    pub fn is_harvestable(&self) -> bool {
        matches!(self, TileKind::Forest | TileKind::Grain)
    }

    /// Interior means claimed land: anything that is not frontier
    pub fn is_interior(&self) -> bool {
        !matches!(self, TileKind::Border)
    }

    /// The interior kinds a clicked border tile may convert into
    pub const CONVERTIBLE: [TileKind; 3] = [TileKind::Empty, TileKind::Forest, TileKind::Grain];
}

/// One hex cell
///
/// `world_pos` is derived from `coord` via the fixed layout projection and is
/// never independently authoritative. `color` and `height` are presentation
/// attributes the engine passes through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub coord: AxialCoord,
    pub world_pos: WorldPos,
    pub kind: TileKind,
    pub color: String,
    pub height: f64,
    /// Harvestable yield currently available; 0 exactly while on cooldown
    pub resource_amount: u32,
    /// None means never harvested, immediately harvestable
    pub last_harvested_at: Option<Millis>,
    /// True while a building is under construction
    pub is_building: bool,
    /// Construction progress in [0, 1], meaningful only for buildings
    pub build_progress: f64,
    /// Placement angle in radians, meaningful only for placed buildings
    pub building_rotation: Option<f64>,
}

impl Tile {
    /// Create a tile of the given kind at a coordinate
    ///
    /// Harvestable kinds start at full yield; border tiles sit below the
    /// interior plane and never carry resources.
    pub fn new(coord: AxialCoord, kind: TileKind, color: String, height: f64, config: &VillageConfig) -> Self {
        let (x, z) = world_position(coord);
        let y = match kind {
            TileKind::Border => config.border_y,
            _ => 0.0,
        };
        let resource_amount = match kind {
            TileKind::Forest => config.forest_yield,
            TileKind::Grain => config.grain_yield,
            _ => 0,
        };
        Self {
            id: TileId::new(),
            coord,
            world_pos: WorldPos::new(x, y, z),
            kind,
            color,
            height,
            resource_amount,
            last_harvested_at: None,
            is_building: false,
            build_progress: 0.0,
            building_rotation: None,
        }
    }

    /// Synthesize a frontier placeholder with the configured defaults
    pub fn border(coord: AxialCoord, config: &VillageConfig) -> Self {
        Self::new(
            coord,
            TileKind::Border,
            config.border_color.clone(),
            config.border_height,
            config,
        )
    }

    /// Convert this border tile in place to an interior kind
    ///
    /// Raises the tile onto the interior plane and initializes the yield for
    /// harvestable kinds. The id and coordinate are untouched.
    pub fn convert(&mut self, kind: TileKind, config: &VillageConfig) {
        debug_assert!(kind.is_interior());
        self.kind = kind;
        self.color = config.interior_color.clone();
        self.height = config.interior_height;
        self.world_pos.y = 0.0;
        self.resource_amount = match kind {
            TileKind::Forest => config.forest_yield,
            TileKind::Grain => config.grain_yield,
            _ => 0,
        };
    }

    /// Start constructing a building on this (empty) tile
    pub fn start_building<R: Rng>(&mut self, building: BuildingType, rng: &mut R) {
        self.kind = TileKind::Building(building);
        self.is_building = true;
        self.build_progress = 0.0;
        self.building_rotation = Some(rng.gen_range(0.0..std::f64::consts::TAU));
    }
}
