//! Persisted commuter settings.
//!
//! Stored as pretty-printed JSON at `~/.seattle-commute/config.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Directory under the home directory holding the config file.
const CONFIG_DIR: &str = ".seattle-commute";

/// Config file name.
const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Error loading or saving the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode config: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Saved addresses and credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommuteConfig {
    #[serde(default)]
    pub home_address: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub work_address: String,

    #[serde(default)]
    pub google_api_key: String,
}

impl CommuteConfig {
    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`. A missing file is an empty config.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to `path`, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(write_err)?;
        }

        let data = serde_json::to_string_pretty(self).map_err(ConfigError::Encode)?;
        std::fs::write(path, data).map_err(write_err)?;
        restrict_permissions(path).map_err(write_err)?;

        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Home address and API key are both set.
    pub fn is_valid(&self) -> bool {
        !self.home_address.is_empty() && !self.google_api_key.is_empty()
    }

    /// Whether the config is usable once `env_key` is applied, without
    /// storing that key.
    pub fn is_valid_with(&self, env_key: Option<String>) -> bool {
        self.clone().with_api_key_override(env_key).is_valid()
    }

    pub fn has_work(&self) -> bool {
        !self.work_address.is_empty()
    }

    /// Replace the API key with `value` when it is present and non-blank.
    pub fn with_api_key_override(mut self, value: Option<String>) -> Self {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.google_api_key = key;
        }
        self
    }
}

/// The file holds an API key, so keep it owner-only.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
