use std::fs;
use std::path::Path;

use indigo_render::{ConfigError, RendererConfig};
use serde::Deserialize;

/// Whole config file: `[renderer]` plus the demo `[world]`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub renderer: RendererConfig,
    pub world: WorldConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: i32,
    pub chunks_x: i32,
    pub chunks_z: i32,
    /// Edge length of a cubic chunk in blocks.
    pub chunk_size: i32,
    pub height: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 1337,
            chunks_x: 4,
            chunks_z: 4,
            chunk_size: 16,
            height: 64,
        }
    }
}

impl WorldConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size <= 0 || self.chunks_x <= 0 || self.chunks_z <= 0 {
            return Err(ConfigError::Invalid(
                "chunk_size, chunks_x and chunks_z must be positive".into(),
            ));
        }
        // Light cache keys hold 12 bits of y.
        if !(1..2048).contains(&self.height) {
            return Err(ConfigError::Invalid(format!(
                "height {} outside 1..2048",
                self.height
            )));
        }
        Ok(())
    }

    pub fn size_x(&self) -> i32 {
        self.chunks_x * self.chunk_size
    }

    pub fn size_z(&self) -> i32 {
        self.chunks_z * self.chunk_size
    }
}

impl AppConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.renderer.validate()?;
        self.world.validate()
    }
}
