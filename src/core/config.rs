//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.parley/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::conversation::endpoint_url;
use crate::core::theme::ThemeStore;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub endpoint: EndpointConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub preserve_history_on_failure: Option<bool>,
    pub theme_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub base_url: Option<String>,
    pub path: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides<'a> {
    pub base_url: Option<&'a str>,
    pub path: Option<&'a str>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_PATH: &str = "conversation";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub endpoint_url: String,
    /// `None` waits forever.
    pub request_timeout: Option<Duration>,
    pub log_level: LevelFilter,
    pub preserve_history_on_failure: bool,
    pub theme_path: Option<PathBuf>,
}

impl ResolvedConfig {
    pub fn theme_store(&self) -> Option<ThemeStore> {
        self.theme_path.clone().map(ThemeStore::new)
    }
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

/// Returns `~/.parley`.
pub fn parley_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".parley"))
}

/// Returns the path to `~/.parley/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    parley_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.parley/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ParleyConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ParleyConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ParleyConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ParleyConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ParleyConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ParleyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Parley Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "debug"                   # off, error, warn, info, debug, trace
# preserve_history_on_failure = false   # keep the transcript when a send fails
# theme_file = "theme"                  # relative to ~/.parley/

# [endpoint]
# base_url = "http://localhost:8080"    # Or set PARLEY_ENDPOINT
# path = "conversation"                 # Or set PARLEY_PATH ("api/conversation" for proxied setups)
# timeout_secs = 60                     # Or set PARLEY_TIMEOUT_SECS; unset = wait forever
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ParleyConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PARLEY_ENDPOINT").ok())
        .or_else(|| config.endpoint.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Path: CLI → env → config → default
    let path = cli
        .path
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PARLEY_PATH").ok())
        .or_else(|| config.endpoint.path.clone())
        .unwrap_or_else(|| DEFAULT_PATH.to_string());

    // Timeout: CLI → env → config → none. Zero means "no timeout".
    let timeout_secs = cli
        .timeout_secs
        .or_else(|| {
            std::env::var("PARLEY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
        })
        .or(config.endpoint.timeout_secs)
        .filter(|&secs| secs > 0);

    let log_level = match config.general.log_level.as_deref() {
        Some(level) => level.parse().unwrap_or_else(|_| {
            warn!("Unknown log level '{}', using {}", level, DEFAULT_LOG_LEVEL);
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    let theme_path = match config.general.theme_file.as_deref() {
        Some(file) => parley_dir().map(|d| d.join(file)),
        None => ThemeStore::default_path(),
    };

    ResolvedConfig {
        endpoint_url: endpoint_url(&base_url, &path),
        request_timeout: timeout_secs.map(Duration::from_secs),
        log_level,
        preserve_history_on_failure: config
            .general
            .preserve_history_on_failure
            .unwrap_or(false),
        theme_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::scratch_path;

    #[test]
    fn test_default_config_parses() {
        let config = ParleyConfig::default();
        assert!(config.endpoint.base_url.is_none());
        assert!(config.general.log_level.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&ParleyConfig::default(), &CliOverrides::default());
        assert_eq!(resolved.endpoint_url, "http://localhost:8080/conversation");
        assert_eq!(resolved.request_timeout, None);
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert!(!resolved.preserve_history_on_failure);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ParleyConfig {
            general: GeneralConfig {
                log_level: Some("warn".to_string()),
                preserve_history_on_failure: Some(true),
                theme_file: Some("my-theme".to_string()),
            },
            endpoint: EndpointConfig {
                base_url: Some("https://chat.example.com/".to_string()),
                path: Some("/api/conversation".to_string()),
                timeout_secs: Some(30),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(
            resolved.endpoint_url,
            "https://chat.example.com/api/conversation"
        );
        assert_eq!(resolved.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert!(resolved.preserve_history_on_failure);
        if let Some(path) = resolved.theme_path {
            assert!(path.ends_with("my-theme"));
        }
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = ParleyConfig {
            endpoint: EndpointConfig {
                base_url: Some("http://from-config".to_string()),
                path: Some("conversation".to_string()),
                timeout_secs: Some(10),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            base_url: Some("http://from-cli:9000"),
            path: Some("api/conversation"),
            timeout_secs: Some(0),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.endpoint_url, "http://from-cli:9000/api/conversation");
        // Zero disables the deadline
        assert_eq!(resolved.request_timeout, None);
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = ParleyConfig {
            general: GeneralConfig {
                log_level: Some("chatty".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            resolve(&config, &CliOverrides::default()).log_level,
            DEFAULT_LOG_LEVEL
        );
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[endpoint]
base_url = "http://10.0.0.5:8080"
"#;
        let config: ParleyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.endpoint.base_url.as_deref(),
            Some("http://10.0.0.5:8080")
        );
        assert!(config.endpoint.path.is_none());
        assert!(config.general.preserve_history_on_failure.is_none());
    }

    #[test]
    fn test_generated_default_is_valid_toml() {
        let config: ParleyConfig = toml::from_str(DEFAULT_CONFIG_CONTENT).unwrap();
        assert!(config.endpoint.base_url.is_none());
    }

    #[test]
    fn test_load_missing_file_generates_default() {
        let path = scratch_path("config-missing.toml");
        let config = load_config_from(&path).unwrap();
        assert!(config.endpoint.base_url.is_none());
        assert!(path.exists());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let path = scratch_path("config-bad.toml");
        fs::write(&path, "[endpoint\nbase_url = ").unwrap();
        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        fs::remove_file(&path).unwrap();
    }
}
