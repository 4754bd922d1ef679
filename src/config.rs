use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::{
    app_dirs::AppDirs,
    guidance::KeyboardLayout,
    level::LevelId,
    session::{SessionConfig, DEFAULT_FALLBACK_WORD},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Level to start on; the app saves the last level played here.
    pub level: LevelId,
    pub auto_advance_ms: u64,
    pub fallback_word: String,
    pub finger_guidance: bool,
    pub key_zones: KeyboardLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: LevelId::Letters,
            auto_advance_ms: 1500,
            fallback_word: DEFAULT_FALLBACK_WORD.to_string(),
            finger_guidance: true,
            key_zones: KeyboardLayout::qwerty(),
        }
    }
}

impl Config {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            auto_advance: Duration::from_millis(self.auto_advance_ms),
            fallback_word: self.fallback_word.clone(),
            finger_guidance: self.finger_guidance,
            layout: self.key_zones.clone(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("kidkeys_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring malformed config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::other)?;
        fs::write(&self.path, data)
    }
}
