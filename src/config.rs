//! # Configuration
//!
//! Centralizes host settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.navstack/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::bridge::registry::ComponentSpec;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavstackConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub components: Vec<ComponentEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

/// A component preregistered at startup, before any registration arrives
/// over the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComponentEntry {
    pub name: String,
    pub view_class: Option<String>,
    pub description: Option<String>,
}

impl ComponentEntry {
    /// Builds the registry spec; without an explicit view class the name
    /// doubles as one.
    pub fn to_spec(&self) -> ComponentSpec {
        ComponentSpec::new(
            self.view_class
                .clone()
                .unwrap_or_else(|| self.name.clone()),
        )
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "navstack.log";
pub const DEFAULT_LOG_LEVEL: &str = "debug";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_file: String,
    pub log_level: String,
    pub components: Vec<ComponentEntry>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.navstack/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".navstack").join("config.toml"))
}

/// Load config from `~/.navstack/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NavstackConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NavstackConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NavstackConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(NavstackConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: NavstackConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Navstack Configuration
# All settings are optional - defaults are used for anything not specified.
# Override hierarchy: defaults -> this file -> env vars -> CLI flags.

# [general]
# log_file = "navstack.log"
# log_level = "debug"              # "off", "error", "warn", "info", "debug", "trace"

# Components registered before any wire registration arrives.
# Without view_class, the name doubles as the view class.

# [[components]]
# name = "Home"
# view_class = "screens.HomeScreen"
# description = "Landing screen"

# [[components]]
# name = "Detail"
# view_class = "screens.DetailScreen"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_log_level` is from the CLI flag (None = not specified).
pub fn resolve(config: &NavstackConfig, cli_log_level: Option<&str>) -> ResolvedConfig {
    // Log file: env → config → default
    let log_file = std::env::var("NAVSTACK_LOG_FILE")
        .ok()
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    // Log level: CLI → env → config → default
    let log_level = cli_log_level
        .map(|s| s.to_string())
        .or_else(|| std::env::var("NAVSTACK_LOG_LEVEL").ok())
        .or_else(|| config.general.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    ResolvedConfig {
        log_file,
        log_level,
        components: config.components.clone(),
    }
}

/// Parses a level string into a filter; unknown strings fall back to the
/// default with a warning.
pub fn log_level_filter(level: &str) -> log::LevelFilter {
    level.parse().unwrap_or_else(|_| {
        warn!("Unknown log level {level:?}, using {DEFAULT_LOG_LEVEL}");
        log::LevelFilter::Debug
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = NavstackConfig::default();
        assert!(config.components.is_empty());
        assert!(config.general.log_file.is_none());
        assert!(config.general.log_level.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = NavstackConfig::default();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.log_file, DEFAULT_LOG_FILE);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert!(resolved.components.is_empty());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = NavstackConfig {
            general: GeneralConfig {
                log_file: Some("/tmp/nav.log".to_string()),
                log_level: Some("warn".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.log_file, "/tmp/nav.log");
        assert_eq!(resolved.log_level, "warn");
    }

    #[test]
    fn test_resolve_cli_level_wins() {
        let config = NavstackConfig {
            general: GeneralConfig {
                log_level: Some("warn".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("trace"));
        assert_eq!(resolved.log_level, "trace");
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
log_file = "session.log"
log_level = "info"

[[components]]
name = "Home"
view_class = "screens.HomeScreen"
description = "Landing screen"

[[components]]
name = "Detail"
"#;
        let config: NavstackConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_file.as_deref(), Some("session.log"));
        assert_eq!(config.general.log_level.as_deref(), Some("info"));
        assert_eq!(config.components.len(), 2);
        assert_eq!(config.components[0].name, "Home");
        assert_eq!(config.components[1].view_class, None);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing - everything else stays default
        let toml_str = r#"
[general]
log_level = "trace"
"#;
        let config: NavstackConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level.as_deref(), Some("trace"));
        assert!(config.general.log_file.is_none());
        assert!(config.components.is_empty());
    }

    #[test]
    fn test_component_entry_spec_falls_back_to_name() {
        let explicit = ComponentEntry {
            name: "Home".to_string(),
            view_class: Some("screens.HomeScreen".to_string()),
            description: None,
        };
        assert_eq!(explicit.to_spec().view_class, "screens.HomeScreen");

        let bare = ComponentEntry {
            name: "Detail".to_string(),
            view_class: None,
            description: None,
        };
        assert_eq!(bare.to_spec().view_class, "Detail");
    }

    #[test]
    fn test_log_level_filter_parses_and_falls_back() {
        assert_eq!(log_level_filter("info"), log::LevelFilter::Info);
        assert_eq!(log_level_filter("OFF"), log::LevelFilter::Off);
        assert_eq!(log_level_filter("verbose"), log::LevelFilter::Debug);
    }
}
