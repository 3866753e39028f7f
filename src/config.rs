//! # Configuration Module
//!
//! Share-link settings: the origin links are built against and the framing
//! new tokens are written in.
//!
//! ## Config File
//!
//! Settings are read from a JSON file in the platform config directory:
//! - Linux: `~/.config/karaoke-share/config.json`
//! - macOS: `~/Library/Application Support/karaoke-share/config.json`
//! - Windows: `%APPDATA%\karaoke-share\config.json`
//!
//! ```json
//! { "origin": "https://karaoke.example.com", "framing": "delimited" }
//! ```
//!
//! Missing keys fall back to defaults; a missing file is not an error.
//! Command-line flags (and `KARAOKE_ORIGIN`) override whatever the file says.

use crate::encoder::Encoder;
use crate::serializer::Framing;
use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Origin used when nothing else is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Returns the platform-appropriate config file path.
///
/// The file itself may not exist; this only works out where it would live.
///
/// # Errors
///
/// Fails if the platform has no standard config directory.
///
/// # Examples
///
/// ```no_run
/// use karaoke_share::config::get_config_path;
///
/// let path = get_config_path()?;
/// println!("Config location: {}", path.display());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system config directory. Pass --config to point at a config file."
        )
    })?;

    Ok(config_dir.join("karaoke-share").join("config.json"))
}

/// Settings for building share links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Scheme and host links are built against, e.g. `https://example.com`
    pub origin: String,
    /// Framing used for newly encoded tokens
    pub framing: Framing,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            framing: Framing::default(),
        }
    }
}

impl ShareConfig {
    /// Load from the default location, or defaults when there is no file there
    /// (or no config directory at all).
    pub fn load() -> Result<Self> {
        let path = match get_config_path() {
            Ok(path) => path,
            Err(e) => {
                debug!("{e}; using defaults");
                return Ok(Self::default());
            }
        };
        if path.exists() {
            Self::from_file(&path)
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from an explicit file, which must exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Config file {} is not valid JSON", path.display()))?;

        debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, origin: Option<String>, framing: Option<Framing>) -> Self {
        if let Some(origin) = origin {
            self.origin = origin;
        }
        if let Some(framing) = framing {
            self.framing = framing;
        }
        self
    }

    pub fn encoder(&self) -> Encoder {
        Encoder::new(self.framing)
    }
}
