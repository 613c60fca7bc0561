use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::suggestions::{default_catalog, SuggestionLimits};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid toml in {path}: {message}")]
    Toml { path: PathBuf, message: String },
    #[error("invalid json5 in {path}: {message}")]
    Json5 { path: PathBuf, message: String },
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub debounce_ms: u64,
    pub min_query_chars: usize,
    pub max_suggestions: usize,
    pub alert_visible_ms: u64,
    pub alert_fade_ms: u64,
    pub card_stagger_ms: u64,
    pub skip_link_target: String,
    pub modal_id: String,
    pub log_dir: PathBuf,
    pub catalog: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let base = std::env::temp_dir().join("medsearch");
        Self {
            debounce_ms: 300,
            min_query_chars: 3,
            max_suggestions: 5,
            alert_visible_ms: 5_000,
            alert_fade_ms: 300,
            card_stagger_ms: 100,
            skip_link_target: "main-content".to_string(),
            modal_id: "featureModal".to_string(),
            log_dir: base.join("logs"),
            catalog: default_catalog(),
        }
    }
}

impl Config {
    pub fn suggestion_limits(&self) -> SuggestionLimits {
        SuggestionLimits {
            min_chars: self.min_query_chars,
            max_results: self.max_suggestions,
            debounce_ms: self.debounce_ms,
        }
    }
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.debounce_ms > 5_000 {
        return Err(ConfigError::Invalid("debounce_ms out of range".into()));
    }

    if !(1..=32).contains(&cfg.min_query_chars) {
        return Err(ConfigError::Invalid("min_query_chars out of range".into()));
    }

    if !(1..=20).contains(&cfg.max_suggestions) {
        return Err(ConfigError::Invalid("max_suggestions out of range".into()));
    }

    if !(1..=60_000).contains(&cfg.alert_visible_ms) {
        return Err(ConfigError::Invalid("alert_visible_ms out of range".into()));
    }

    if cfg.alert_fade_ms > 5_000 {
        return Err(ConfigError::Invalid("alert_fade_ms out of range".into()));
    }

    if cfg.card_stagger_ms > 2_000 {
        return Err(ConfigError::Invalid("card_stagger_ms out of range".into()));
    }

    if cfg.skip_link_target.trim().is_empty() {
        return Err(ConfigError::Invalid("skip_link_target is required".into()));
    }

    if cfg.modal_id.trim().is_empty() {
        return Err(ConfigError::Invalid("modal_id is required".into()));
    }

    if cfg.catalog.iter().any(|entry| entry.trim().is_empty()) {
        return Err(ConfigError::Invalid("catalog entries must not be empty".into()));
    }

    Ok(())
}

pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let cfg = if is_json5(path) {
        json5::from_str::<Config>(&raw).map_err(|e| ConfigError::Json5 {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    } else {
        toml::from_str::<Config>(&raw).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    };

    validate(&cfg)?;
    Ok(cfg)
}

fn is_json5(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json5") || ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
