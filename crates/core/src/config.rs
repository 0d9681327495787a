use crate::keymap::{KeyMap, KeyMapError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_BACKUP_INTERVAL_SECS: u64 = 300;
pub const APP_NAME: &str = "labeler";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backup: BackupConfig,
    pub images: ImageConfig,
    pub settings: SettingsConfig,
    /// Key token → binding overrides on top of the default key map.
    pub keymap: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    pub interval_secs: u64,
    /// Defaults to the directory holding the record list.
    pub dir: Option<String>,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_BACKUP_INTERVAL_SECS,
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub dir: Option<String>,
    pub extensions: Vec<String>,
    /// Program used by the view key; the desktop default opener when unset.
    pub viewer: Option<String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extensions: vec!["gif".to_string()],
            viewer: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    pub default_path_file: Option<String>,
}

impl AppConfig {
    pub fn keymap(&self) -> Result<KeyMap, KeyMapError> {
        KeyMap::default().with_overrides(&self.keymap)
    }

    /// Never zero; a zero interval would spin.
    pub fn backup_interval(&self) -> Duration {
        Duration::from_secs(self.backup.interval_secs.max(1))
    }
}

pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/labeler").required(false));
    }
    settings = settings.add_source(
        config::Environment::with_prefix("LABELER")
            .separator("__")
            .try_parsing(true),
    );
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}
