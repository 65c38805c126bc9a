//! Resolve a [`VentoConfig`] from the environment and the filesystem.

pub mod error;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::models::{ConfigSource, VentoConfig};
use crate::validation::{ConfigWarnings, apply_guard_rails};
use error::ConfigLoadError;

pub const CONFIG_PATH_VAR: &str = "VENTO_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "VENTO_CONFIG_JSON";

const DEFAULT_CANDIDATES: &[&str] = &["vento.toml", "vento.json"];

/// A validated configuration together with its origin.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: VentoConfig,
    pub source: ConfigSource,
    pub warnings: ConfigWarnings,
}

/// Resolves configuration in this order:
///
/// 1. `$VENTO_CONFIG_PATH` (TOML or JSON, chosen by extension),
/// 2. `$VENTO_CONFIG_JSON` (inline JSON),
/// 3. `vento.toml` / `vento.json` in the base directory,
/// 4. built-in defaults.
///
/// Variables from an optional `.env` file override the process
/// environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    base_dir: PathBuf,
    env_file: Option<PathBuf>,
    overrides: HashMap<String, String>,
    process_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            env_file: None,
            overrides: HashMap::new(),
            process_env: true,
        }
    }

    /// Directory searched for default config files.
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Read variables from a dotenv file before consulting the process
    /// environment.
    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Set a variable for this loader only.
    pub fn var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Ignore the process environment; only explicit variables and the
    /// dotenv file are consulted.
    pub fn isolated(mut self) -> Self {
        self.process_env = false;
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env = self.collect_env()?;
        let lookup = |key: &str| {
            env.get(key)
                .map(String::as_str)
                .filter(|value| !value.trim().is_empty())
        };

        let (config, source) = if let Some(path) = lookup(CONFIG_PATH_VAR) {
            let path = PathBuf::from(path);
            (load_from_file(&path)?, ConfigSource::EnvPath(path))
        } else if let Some(raw) = lookup(CONFIG_JSON_VAR) {
            (parse_json(raw, CONFIG_JSON_VAR)?, ConfigSource::EnvInline)
        } else if let Some(path) = self.find_default_file() {
            (load_from_file(&path)?, ConfigSource::File(path))
        } else {
            (VentoConfig::default(), ConfigSource::Default)
        };

        let warnings = apply_guard_rails(&config)?;
        for warning in &warnings.items {
            warn!(hint = warning.hint.as_deref(), "{}", warning.message);
        }
        info!(source = %source, "configuration loaded");

        Ok(ConfigLoad {
            config,
            source,
            warnings,
        })
    }

    fn collect_env(&self) -> Result<HashMap<String, String>, ConfigLoadError> {
        let mut env = HashMap::new();
        if self.process_env {
            for key in [CONFIG_PATH_VAR, CONFIG_JSON_VAR] {
                if let Ok(value) = std::env::var(key) {
                    env.insert(key.to_string(), value);
                }
            }
        }
        if let Some(path) = &self.env_file {
            debug!(path = %path.display(), "reading env file");
            for item in dotenvy::from_path_iter(path)? {
                let (key, value) = item?;
                env.insert(key, value);
            }
        }
        env.extend(self.overrides.clone());
        Ok(env)
    }

    fn find_default_file(&self) -> Option<PathBuf> {
        DEFAULT_CANDIDATES
            .iter()
            .map(|name| self.base_dir.join(name))
            .find(|path| path.is_file())
    }
}

/// Read and parse a config file without running guard rails.
pub fn load_from_file(path: &Path) -> Result<VentoConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let origin = path.display().to_string();

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json(&contents, &origin),
        Some("toml") | Some("tml") => parse_toml(&contents, &origin),
        _ => parse_from_str(&contents, &origin),
    }
}

/// Try TOML first, then JSON.
pub fn parse_from_str(
    contents: &str,
    origin: &str,
) -> Result<VentoConfig, ConfigLoadError> {
    toml::from_str(contents).or_else(|toml| {
        serde_json::from_str(contents).map_err(|json| {
            ConfigLoadError::UnknownFormat {
                origin: origin.to_string(),
                toml,
                json,
            }
        })
    })
}

pub fn parse_toml(
    contents: &str,
    origin: &str,
) -> Result<VentoConfig, ConfigLoadError> {
    toml::from_str(contents).map_err(|source| ConfigLoadError::Toml {
        origin: origin.to_string(),
        source,
    })
}

pub fn parse_json(
    contents: &str,
    origin: &str,
) -> Result<VentoConfig, ConfigLoadError> {
    serde_json::from_str(contents).map_err(|source| ConfigLoadError::Json {
        origin: origin.to_string(),
        source,
    })
}
