//! Persistent CLI settings.
//!
//! Settings live in `settings.toml` under the platform config directory:
//! - Linux: `~/.config/ship-insight/`
//! - macOS: `~/Library/Application Support/com.ShipInsight.ship-insight/`
//! - Windows: `%APPDATA%\ShipInsight\ship-insight\config\`
//!
//! Missing keys fall back to defaults. `OPENAI_API_KEY` and `SHIP_LLM_MODEL`
//! override the file; command-line flags override both.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use ship_geo::GeocoderSettings;
use ship_model::{DEFAULT_REQUIRED_FIELDS, StandardField};
use ship_query::{API_KEY_ENV, LlmSettings};
use tracing::{info, warn};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "ShipInsight";
const APP_NAME: &str = "ship-insight";
const CONFIG_FILENAME: &str = "settings.toml";
const CARRIERS_FILENAME: &str = "approved_carriers.json";

/// Environment variable that overrides the configured model name.
pub const MODEL_ENV: &str = "SHIP_LLM_MODEL";

/// CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fields that must be mapped for carrier and route analysis.
    pub required_fields: Vec<StandardField>,
    /// Approved carriers file; the platform data directory when unset.
    pub approved_carriers_path: Option<PathBuf>,
    /// Largest manifest accepted, in megabytes.
    pub max_file_size_mb: u64,
    pub geocoding: GeocoderSettings,
    pub llm: LlmSettings,
    /// Never read from or written to the settings file.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            required_fields: DEFAULT_REQUIRED_FIELDS.to_vec(),
            approved_carriers_path: None,
            max_file_size_mb: 10,
            geocoding: GeocoderSettings::default(),
            llm: LlmSettings::default(),
            api_key: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

impl Settings {
    /// Default settings file path.
    pub fn config_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
    }

    /// Loads from `path` (or the default path) and applies the environment.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map_or_else(Self::config_path, Path::to_path_buf);
        Self::load_from(&path).with_env(|key| std::env::var(key).ok())
    }

    /// Loads settings from `path`.
    ///
    /// A missing file yields defaults. An unreadable or invalid file is
    /// logged and also yields defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!(path = %path.display(), "Loaded settings");
                    settings
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Invalid settings file, using defaults");
                    Self::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read settings, using defaults");
                Self::default()
            }
        }
    }

    /// Applies environment overrides read through `lookup`.
    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(API_KEY_ENV).filter(|key| !key.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(model) = lookup(MODEL_ENV).filter(|model| !model.trim().is_empty()) {
            self.llm.model = model;
        }
        self
    }

    /// Writes the settings to `path` as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("serialize settings")?;
        fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), "Saved settings");
        Ok(())
    }

    /// The approved carriers file in effect.
    pub fn carriers_path(&self) -> PathBuf {
        if let Some(path) = &self.approved_carriers_path {
            return path.clone();
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join(CARRIERS_FILENAME))
            .unwrap_or_else(|| PathBuf::from(CARRIERS_FILENAME))
    }
}
