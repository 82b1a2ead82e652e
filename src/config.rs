// Configuration loading module
// YAML structures for the demo application and the tab bar it hosts

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::TabsError;

/// Errors raised while loading or converting configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unknown color '{value}' for {field}")]
    InvalidColor { field: &'static str, value: String },

    #[error("bar_height must be at least 1")]
    InvalidBarHeight,

    #[error("indicator_height must be between 1 and 8, got {0}")]
    InvalidIndicatorHeight(u8),

    #[error("unknown keyboard_should_persist_taps value '{0}' (expected never, always or handled)")]
    InvalidPersistTaps(String),

    #[error("unknown easing '{0}'")]
    InvalidEasing(String),

    #[error("unknown log level '{0}'")]
    InvalidLogLevel(String),

    #[error("invalid selected_index: {0}")]
    InvalidSelection(TabsError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub application: ApplicationConfig,
    pub tab_bar: TabBarConfigYaml,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    pub title: String,
    #[serde(default)]
    pub bindings: Vec<BindingConfigYaml>,
    pub status_bar: StatusBarConfigYaml,
    /// Where the log is written while the terminal is in raw mode
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_file() -> String {
    "material-tabs.log".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct BindingConfigYaml {
    pub key: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusBarConfigYaml {
    pub default_text: String,
}

/// A tab item: either a bare label or a keyed label
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TabItemYaml {
    Label(String),
    Keyed { key: String, label: String },
}

/// Text style overrides
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextStyleYaml {
    pub fg: Option<String>,
    pub bg: Option<String>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

/// Spring or timing description for a transition
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionYaml {
    Spring { tension: f32, friction: f32 },
    Timing { duration_ms: u64, easing: Option<String> },
    Instant,
}

/// Tab bar configuration from YAML; every option falls back to the compiled default
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TabBarConfigYaml {
    pub items: Vec<TabItemYaml>,
    #[serde(default)]
    pub selected_index: isize,
    pub bar_color: Option<String>,
    pub bar_height: Option<u16>,
    pub active_text_color: Option<String>,
    pub inactive_text_color: Option<String>,
    pub indicator_color: Option<String>,
    pub indicator_height: Option<u8>,
    pub scrollable: Option<bool>,
    pub uppercase: Option<bool>,
    pub shadow: Option<bool>,
    pub allow_font_scaling: Option<bool>,
    pub text_style: Option<TextStyleYaml>,
    pub active_text_style: Option<TextStyleYaml>,
    pub keyboard_should_persist_taps: Option<String>,
    pub indicator_transition: Option<TransitionYaml>,
    pub scroll_transition: Option<TransitionYaml>,
}

/// Default config location next to the sources
pub fn default_config_path() -> PathBuf {
    let mut default_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    default_path.push("src");
    default_path.push("config.yaml");
    default_path
}

pub fn parse_config(contents: &str) -> Result<AppConfig, ConfigError> {
    Ok(serde_yaml::from_str(contents)?)
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents)
}
