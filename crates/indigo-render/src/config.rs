use std::fs;
use std::path::Path;

use indigo_lighting::LightingConfig;
use serde::Deserialize;
use thiserror::Error;

const MAX_WORKER_THREADS: usize = 256;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Renderer settings, read from the `[renderer]` table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Global smooth-lighting switch.
    pub ambient_occlusion: bool,
    #[serde(flatten)]
    pub lighting: LightingConfig,
    pub cull_faces: bool,
    /// Rebuild workers; 0 picks one per core.
    pub worker_threads: usize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            ambient_occlusion: true,
            lighting: LightingConfig::default(),
            cull_faces: true,
            worker_threads: 0,
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    renderer: RendererConfig,
}

impl RendererConfig {
    /// Parses the `[renderer]` table of a TOML document; a missing table yields defaults.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(toml_str)?;
        file.renderer.validate()?;
        Ok(file.renderer)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_threads > MAX_WORKER_THREADS {
            return Err(ConfigError::Invalid(format!(
                "worker_threads = {} exceeds {MAX_WORKER_THREADS}",
                self.worker_threads
            )));
        }
        Ok(())
    }
}
