//! Balance configuration loading and management.
//!
//! Every tuning constant of the progression rules lives here. The stated
//! defaults are a starting point, not a contract; any of them can be
//! overridden from a TOML file.

mod settings;

pub use settings::{
    DungeonSettings, MissionSettings, ProfileSettings, RewardSettings, SkillSettings,
    TowerSettings,
};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main balance configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceConfig {
    #[serde(default)]
    pub profile: ProfileSettings,

    #[serde(default)]
    pub skills: SkillSettings,

    #[serde(default)]
    pub missions: MissionSettings,

    #[serde(default)]
    pub rewards: RewardSettings,

    #[serde(default)]
    pub tower: TowerSettings,

    #[serde(default)]
    pub dungeon: DungeonSettings,
}

impl BalanceConfig {
    /// Get the global data directory path (~/.ascend/)
    pub fn global_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ascend")
    }

    /// Get the global config file path (~/.ascend/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_dir().join("config.toml")
    }

    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: BalanceConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from the given path if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file with an atomic write
    /// (temp file + rename prevents corruption on crash).
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, content)
            .with_context(|| format!("Failed to write config file: {}", tmp.display()))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("Failed to move config into place: {}", path.display()))?;

        Ok(())
    }
}
