use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use menu_protocol::DEFAULT_CURRENCY_PREFIX;
use serde::Deserialize;
use thiserror::Error;

pub(crate) const CONFIG_ENV: &str = "MENU_ASSISTANT_CONFIG";
pub(crate) const CATALOG_ENV: &str = "MENU_ASSISTANT_CATALOG";

const DEFAULT_MIN_QUERY_CHARS: usize = 5;

/// Marks failures to load or parse a config file
#[derive(Error, Debug)]
#[error("Invalid configuration")]
pub struct ConfigInvalid;

/// Settings read from `config.toml`, then overridden by flags
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AssistantConfig {
    /// Catalog file; the built-in menu when unset
    pub catalog: Option<PathBuf>,
    /// Trimmed queries shorter than this are refused before matching
    pub min_query_chars: usize,
    pub currency_prefix: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            currency_prefix: DEFAULT_CURRENCY_PREFIX.to_string(),
        }
    }
}

/// Command-line values that take precedence over the config file
#[derive(Clone, Debug, Default)]
pub(crate) struct ConfigOverrides {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub min_query_chars: Option<usize>,
    pub currency_prefix: Option<String>,
}

impl AssistantConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;
        let mut cfg: Self = toml::from_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        // Catalog paths in a config file are relative to that file
        if let Some(catalog) = cfg.catalog.take() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            cfg.catalog = Some(if catalog.is_relative() {
                base.join(catalog)
            } else {
                catalog
            });
        }
        Ok(cfg)
    }

    /// Explicit `--config` (or env) must exist; the per-user default is optional.
    pub(crate) fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let mut cfg = match overrides.config {
            Some(path) => Self::from_path(&path).context(ConfigInvalid)?,
            None => match default_config_path().filter(|path| path.is_file()) {
                Some(path) => {
                    log::debug!("Using config {}", path.display());
                    Self::from_path(&path).context(ConfigInvalid)?
                }
                None => Self::default(),
            },
        };

        if let Some(catalog) = overrides.catalog {
            cfg.catalog = Some(catalog);
        }
        if let Some(min) = overrides.min_query_chars {
            cfg.min_query_chars = min;
        }
        if let Some(prefix) = overrides.currency_prefix {
            cfg.currency_prefix = prefix;
        }
        Ok(cfg)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("menu-assistant").join("config.toml"))
}
