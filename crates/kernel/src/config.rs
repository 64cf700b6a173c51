use lincity_common::SimulationSpeed;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from reading an engine config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error in config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Engine settings. Every field has a default, so a config file only needs
/// to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory that default save paths are resolved against.
    pub save_dir: PathBuf,
    pub default_save_name: String,
    /// Initial simulation speed.
    pub speed: SimulationSpeed,
    /// Fixed random seed. When absent the seed comes from the wall clock.
    pub seed: Option<u64>,
    pub map_width: u16,
    pub map_height: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saves"),
            default_save_name: "city.sav".to_string(),
            speed: SimulationSpeed::default(),
            seed: None,
            map_width: 100,
            map_height: 100,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_yaml::from_reader(file)?)
    }

    /// Where a save goes when the user does not name a path.
    pub fn default_save_path(&self) -> PathBuf {
        self.save_dir.join(&self.default_save_name)
    }
}
