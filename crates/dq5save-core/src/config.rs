//! Editor configuration.
//!
//! Loaded from a TOML file; every key is optional.
//!
//! ```toml
//! keys = "Keys.txt"
//! items = "ItemCodes.txt"
//! monsters = "Monsters.txt"
//! backup = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::tables::{LabelTable, MaskTable, Tables};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Mask table (`<hex address>\t<hex key>`)
    pub keys: PathBuf,
    /// Item names (`<code>\t<name>`)
    pub items: PathBuf,
    /// Monster names (`<code>\t<name>`)
    pub monsters: PathBuf,
    /// Copy the save to a timestamped backup before overwriting it
    pub backup: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            keys: PathBuf::from("Keys.txt"),
            items: PathBuf::from("ItemCodes.txt"),
            monsters: PathBuf::from("Monsters.txt"),
            backup: true,
        }
    }
}

impl EditorConfig {
    pub fn builder() -> EditorConfigBuilder {
        EditorConfigBuilder::default()
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load from `path`, falling back to defaults when it is missing or invalid
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) if e.is_not_found() => Self::default(),
            Err(e) => {
                warn!("Failed to load config {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load every lookup table. Missing tables are treated as empty.
    pub fn load_tables(&self) -> Result<Tables> {
        Ok(Tables::new(
            load_optional(&self.keys, |p| MaskTable::load(p))?,
            load_optional(&self.items, |p| LabelTable::load(p))?,
            load_optional(&self.monsters, |p| LabelTable::load(p))?,
        ))
    }
}

fn load_optional<T, F>(path: &Path, load: F) -> Result<T>
where
    T: Default,
    F: FnOnce(&Path) -> Result<T>,
{
    match load(path) {
        Ok(table) => Ok(table),
        Err(e) if e.is_not_found() => {
            warn!("Table {} not found, continuing without it", path.display());
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditorConfigBuilder {
    keys: Option<PathBuf>,
    items: Option<PathBuf>,
    monsters: Option<PathBuf>,
    backup: Option<bool>,
}

impl EditorConfigBuilder {
    pub fn keys<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.keys = Some(path.into());
        self
    }

    pub fn items<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.items = Some(path.into());
        self
    }

    pub fn monsters<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.monsters = Some(path.into());
        self
    }

    pub fn backup(mut self, enabled: bool) -> Self {
        self.backup = Some(enabled);
        self
    }

    pub fn build(self) -> EditorConfig {
        let default = EditorConfig::default();
        EditorConfig {
            keys: self.keys.unwrap_or(default.keys),
            items: self.items.unwrap_or(default.items),
            monsters: self.monsters.unwrap_or(default.monsters),
            backup: self.backup.unwrap_or(default.backup),
        }
    }
}
