use std::{fs, path::{Path, PathBuf}};
use serde::Deserialize;
use anyhow::{self, Context};

pub const DEFAULT_CONFIG: &str = "piggybank.toml";
pub const DEFAULT_STORE: &str = "accounts.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path of the accounts file
    pub store: PathBuf,
    /// Refuse to run on top of a store that fails to parse
    pub strict_load: bool
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig { store: PathBuf::from(DEFAULT_STORE), strict_load: true }
    }
}

impl AppConfig {
    pub fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let filepath = filepath.as_ref();
        let file_content = fs::read_to_string(filepath)
            .with_context(|| format!("failed to read config file {}", filepath.display()))?;
        let config = toml::from_str(&file_content)
            .with_context(|| format!("failed to parse config file {}", filepath.display()))?;
        return Ok(config);
    }

    /// Reads `explicit` if given, otherwise `piggybank.toml` when it exists,
    /// otherwise falls back to defaults.
    pub fn discover(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None if Path::new(DEFAULT_CONFIG).exists() => Self::read(DEFAULT_CONFIG),
            None => Ok(Self::default())
        }
    }
}
