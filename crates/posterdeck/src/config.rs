use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::deck::Preset;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "posterdeck";
const VALID_KEYS: &str = "defaults.preset, defaults.windowed, defaults.query_flag";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,

    /// Overrides the deck's query flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_flag: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `posterdeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = format!("# posterdeck configuration\n{}", self.to_yaml()?);
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn preset(&self) -> Result<Preset> {
        match self.defaults.as_ref().and_then(|d| d.preset.as_deref()) {
            Some(name) => Ok(Preset::from_name(name)?),
            None => Ok(Preset::FinalPoster),
        }
    }

    pub fn windowed(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.windowed)
            .unwrap_or(false)
    }

    pub fn query_flag(&self) -> Option<&str> {
        self.defaults.as_ref().and_then(|d| d.query_flag.as_deref())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.preset" => {
                if Preset::from_name(value).is_err() {
                    anyhow::bail!("Invalid preset: {value}. Must be 'final-poster' or 'poster'.");
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .preset = Some(value.to_string());
            }
            "defaults.windowed" => {
                let windowed = match value {
                    "true" => true,
                    "false" => false,
                    _ => anyhow::bail!("Invalid windowed: {value}. Must be 'true' or 'false'."),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .windowed = Some(windowed);
            }
            "defaults.query_flag" => {
                if value.is_empty() || value.contains(['&', '#', '?']) {
                    anyhow::bail!(
                        "Invalid query_flag: {value:?}. Must be non-empty without '?', '&' or '#'."
                    );
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .query_flag = Some(value.to_string());
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {VALID_KEYS}"),
        }
        Ok(())
    }
}
