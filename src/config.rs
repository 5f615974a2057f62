// src/config.rs

//! Settings file for obs-mirror
//!
//! Optional TOML file, by default `$XDG_CONFIG_HOME/obs-mirror/config.toml`:
//!
//! ```toml
//! [api]
//! url = "https://api.opensuse.org"
//! timeout_secs = 300
//!
//! [auth]
//! user = "alice"
//! password = "secret"
//!
//! [mirror]
//! root = "/srv/mirror"
//! ```
//!
//! Every key is optional. Command-line flags take precedence.

use crate::error::{Error, Result};
use crate::obs::{ClientConfig, DEFAULT_API_URL};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default mirror root when neither flag nor file sets one
pub const DEFAULT_MIRROR_ROOT: &str = ".";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub auth: AuthSection,
    #[serde(default)]
    pub mirror: MirrorSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    #[serde(default = "default_api_url")]
    pub url: String,
    /// No timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_secs: None,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MirrorSection {
    #[serde(default)]
    pub root: Option<PathBuf>,
}

impl Settings {
    /// Location of the per-user settings file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("obs-mirror").join("config.toml"))
    }

    /// Load and validate settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let settings = Self::from_toml(&content)
            .map_err(|e| e.context(format!("config file {}", path.display())))?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load `explicit` if given (it must exist), else the default file if it exists
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api.url)
            .map_err(|e| Error::ConfigError(format!("Invalid api.url '{}': {e}", self.api.url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::ConfigError(format!(
                "api.url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.api.timeout_secs == Some(0) {
            return Err(Error::ConfigError(
                "api.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// HTTP client settings derived from the `[api]` section
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.api.url.clone(),
            timeout: self.api.timeout_secs.map(Duration::from_secs),
            ..ClientConfig::default()
        }
    }

    pub fn mirror_root(&self) -> PathBuf {
        self.mirror
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MIRROR_ROOT))
    }
}
