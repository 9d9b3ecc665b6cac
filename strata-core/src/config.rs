//! Simulation settings, read from a JSON5 file.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG: &str = include_str!("../../package-content/strata_config.json5");

/// Errors while loading a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("config io error: {0}")]
    Io(#[from] io::Error),
    /// The file is not valid JSON5 for this struct.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json5::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Tunables of the simulation core. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Most ticks drained from each queue of each chunk per pass.
    pub max_ticks_per_pass: usize,
    /// Delay in passes of [`crate::World::schedule_destroy`].
    pub destroy_delay: u32,
    /// Cells sampled per section by [`crate::World::random_tick`].
    pub random_ticks_per_section: u32,
    /// Ring limit of the flow-target search used by flowing fluids.
    pub flow_search_radius: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_ticks_per_pass: 1024,
            destroy_delay: 2,
            random_ticks_per_section: 3,
            flow_search_radius: 4,
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a JSON5 document.
    pub fn from_json5_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json5::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates the config at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json5_str(&fs::read_to_string(path)?)
    }

    /// Reads the config at `path`, first writing the bundled default there
    /// if the file does not exist.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, DEFAULT_CONFIG)?;
            log::info!("Wrote default simulation config to {}", path.display());
        }
        Self::load(path)
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_ticks_per_pass == 0 {
            return Err(ConfigError::Invalid("max_ticks_per_pass must be at least 1"));
        }
        if self.destroy_delay == 0 {
            return Err(ConfigError::Invalid("destroy_delay must be at least 1"));
        }
        if self.flow_search_radius == 0 {
            return Err(ConfigError::Invalid("flow_search_radius must be at least 1"));
        }
        if self.flow_search_radius > 64 {
            return Err(ConfigError::Invalid("flow_search_radius must be at most 64"));
        }
        Ok(())
    }
}
