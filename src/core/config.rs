//! Village configuration with documented constants
//!
//! All tuning values are collected here with explanations of their purpose.
//! The layout projection constants live in `grid::layout` because they are
//! load-bearing for position equality and must never be tuned.

/// Configuration for the village tile-state engine
///
/// Defaults reproduce the observable behavior of the original game exactly;
/// cooldowns and yields are compatibility constants, not balance knobs.
#[derive(Debug, Clone)]
pub struct VillageConfig {
    // === MAP GENERATION ===
    /// Diameter of the initial playable area, in tiles
    pub map_size: i32,

    /// Thickness of the border ring generated around the playable area
    pub border_size: i32,

    // === TILE PRESENTATION DEFAULTS ===
    /// Color assigned to synthesized border tiles
    pub border_color: String,

    /// Mesh height of border tiles
    pub border_height: f64,

    /// Border tiles sit slightly below the interior plane
    pub border_y: f64,

    /// Color assigned to a border tile once converted to interior
    pub interior_color: String,

    /// Mesh height of converted interior tiles
    pub interior_height: f64,

    // === HARVESTING ===
    /// Cooldown after harvesting a grain tile, in milliseconds
    pub grain_cooldown_ms: u64,

    /// Cooldown after harvesting a forest tile, in milliseconds
    pub forest_cooldown_ms: u64,

    /// Grain payout per harvest at full growth
    pub grain_yield: u32,

    /// Wood payout per forest harvest
    pub forest_yield: u32,

    // === CONSTRUCTION ===
    /// Wall-clock time for a building to finish construction, in milliseconds
    ///
    /// The original advanced progress by 0.1 every 100 ms; one second total.
    pub build_duration_ms: u64,
}

impl Default for VillageConfig {
    fn default() -> Self {
        Self {
            map_size: 10,
            border_size: 1,

            border_color: "#ededed".into(),
            border_height: 0.1,
            border_y: -0.1,
            interior_color: "#6EE7B7".into(),
            interior_height: 0.2,

            grain_cooldown_ms: 10_000,
            forest_cooldown_ms: 60_000,
            grain_yield: 10,
            forest_yield: 5,

            build_duration_ms: 1_000,
        }
    }
}

impl VillageConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.map_size <= 0 {
            return Err(format!("map_size ({}) must be positive", self.map_size));
        }
        if self.border_size < 1 {
            return Err(format!(
                "border_size ({}) must be at least 1 to keep a frontier",
                self.border_size
            ));
        }
        if self.grain_yield == 0 || self.forest_yield == 0 {
            return Err("Harvest yields must be positive".into());
        }
        if self.build_duration_ms == 0 {
            return Err("build_duration_ms must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(VillageConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_compatibility_constants() {
        let config = VillageConfig::default();
        assert_eq!(config.grain_cooldown_ms, 10_000);
        assert_eq!(config.forest_cooldown_ms, 60_000);
        assert_eq!(config.grain_yield, 10);
        assert_eq!(config.forest_yield, 5);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = VillageConfig::default();
        config.border_size = 0;
        assert!(config.validate().is_err());

        let mut config = VillageConfig::default();
        config.grain_yield = 0;
        assert!(config.validate().is_err());
    }
}
