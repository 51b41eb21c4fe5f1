//! Config file support for zapflags.
//!
//! Loads default flag values from `zapflags.toml` in the working directory,
//! falling back to `<config dir>/zapflags/config.toml`. Command-line flags
//! always take precedence.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use zapflags_core::{InvalidValue, OptionValue, ZapOptions};

/// The config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "zapflags.toml";

/// Flag defaults loaded from a TOML file
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Same as `--zap-devel`
    pub devel: Option<bool>,
    /// Same as `--zap-encoder`
    pub encoder: Option<String>,
    /// Same as `--zap-level`; accepts a name or a bare integer
    pub level: Option<LevelSetting>,
    /// Same as `--zap-sample`
    pub sample: Option<bool>,
    /// Same as `--zap-timeformat`
    pub timeformat: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LevelSetting {
    Number(i64),
    Name(String),
}

impl LevelSetting {
    fn as_text(&self) -> String {
        match self {
            LevelSetting::Number(n) => n.to_string(),
            LevelSetting::Name(name) => name.clone(),
        }
    }
}

impl FileConfig {
    /// Load configuration for a working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if a config file exists and parses successfully
    /// - `Ok(None)` if no config file exists
    /// - `Err(...)` if a file exists but fails to parse (hard error)
    pub fn discover(working_dir: &Path) -> Result<Option<Self>> {
        let candidates = std::iter::once(working_dir.join(CONFIG_FILE_NAME))
            .chain(user_config_path());

        for path in candidates {
            if path.exists() {
                return Self::load(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Load configuration from an explicit path. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Run every configured value through the same validation as the flags.
    pub fn to_options(&self) -> Result<ZapOptions, InvalidValue> {
        let mut options = ZapOptions::new();
        options.devel = self.devel;
        if let Some(encoder) = &self.encoder {
            options.encoder.set(encoder)?;
        }
        if let Some(level) = &self.level {
            options.level.set(&level.as_text())?;
        }
        if let Some(sample) = self.sample {
            options.sample.set(&sample.to_string())?;
        }
        if let Some(timeformat) = &self.timeformat {
            options.timeformat.set(timeformat)?;
        }
        Ok(options)
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("zapflags").join("config.toml"))
}
