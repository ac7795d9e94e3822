//! Territory configuration

use std::path::Path;

use hexterra_protocol::TileTypeId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::{GridError, HexLayout};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("tile size must be positive whole pixels, got {width} x {height}")]
    InvalidTileSize { width: f32, height: f32 },
    #[error("invalid tile map: {0}")]
    Map(#[from] GridError),
}

/// Territory configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerritoryConfig {
    /// Tile width in pixels
    pub tile_width: f32,
    /// Tile height in pixels
    pub tile_height: f32,
    /// Tile-type ids that can never hold a city
    pub impassable_tiles: Vec<TileTypeId>,
}

impl Default for TerritoryConfig {
    fn default() -> Self {
        Self {
            tile_width: 34.0,
            tile_height: 32.0,
            impassable_tiles: Vec::new(),
        }
    }
}

impl TerritoryConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Tile sizes must be whole pixels so neighboring tiles produce bit-identical
    /// shared walls.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f32| v.is_finite() && v > 0.0 && v.fract() == 0.0;
        if !ok(self.tile_width) || !ok(self.tile_height) {
            return Err(ConfigError::InvalidTileSize {
                width: self.tile_width,
                height: self.tile_height,
            });
        }
        Ok(())
    }

    pub fn layout(&self) -> HexLayout {
        HexLayout::new(self.tile_width, self.tile_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = TerritoryConfig::from_yaml_str("impassable_tiles: [3, 4]\n").unwrap();
        assert_eq!(config.tile_width, 34.0);
        assert_eq!(config.tile_height, 32.0);
        assert_eq!(config.impassable_tiles, vec![3, 4]);
    }

    #[test]
    fn rejects_degenerate_tile_size() {
        let err = TerritoryConfig::from_yaml_str("tile_width: 0\ntile_height: 32\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTileSize { .. }));
    }

    #[test]
    fn rejects_fractional_tile_size() {
        let err = TerritoryConfig::from_yaml_str("tile_width: 33.3\ntile_height: 30.1\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTileSize { .. }));
        assert!(TerritoryConfig::from_yaml_str("tile_width: 33\ntile_height: 30\n").is_ok());
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = TerritoryConfig::from_yaml_str("tile_width: [").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = TerritoryConfig::from_path("/nonexistent/territory.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
