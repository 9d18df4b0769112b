//! Configuration System
//!
//! Two layers:
//! - [`SiteConfig`]: the two backend strings the page is built with, plus
//!   the startup guard that rejects missing or placeholder values.
//! - [`Config`]: the operator configuration for the `chaos-feed` binary,
//!   loaded from TOML with environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Marker left in the checked-in site config until real values are generated
pub const PLACEHOLDER_MARKER: &str = "YOUR_SUPABASE";

/// Environment variable carrying the backend URL
pub const URL_VAR: &str = "SUPABASE_URL";

/// Environment variable carrying the public (anon) backend key
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Backend location and public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl SiteConfig {
    pub fn new(supabase_url: impl Into<String>, supabase_anon_key: impl Into<String>) -> Self {
        Self {
            supabase_url: supabase_url.into(),
            supabase_anon_key: supabase_anon_key.into(),
        }
    }

    /// Check that both values are present and not placeholders
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_value(URL_VAR, &self.supabase_url)?;
        check_value(ANON_KEY_VAR, &self.supabase_anon_key)?;
        Ok(())
    }
}

fn check_value(name: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::Missing(name))
    } else if value.contains(PLACEHOLDER_MARKER) {
        Err(ConfigError::Placeholder(name))
    } else {
        Ok(())
    }
}

/// Operator configuration for the binary
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub anon_key: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("chaos-feed").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// The two strings the page needs
    pub fn site(&self) -> SiteConfig {
        SiteConfig::new(self.backend.url.clone(), self.backend.anon_key.clone())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(URL_VAR) {
            self.backend.url = url;
        }
        if let Ok(key) = std::env::var(ANON_KEY_VAR) {
            self.backend.anon_key = key;
        }

        if let Ok(level) = std::env::var("CHAOS_FEED_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CHAOS_FEED_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{0} still holds the placeholder value")]
    Placeholder(&'static str),

    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Chaos Feed Configuration
#
# Environment variables override these settings:
# - SUPABASE_URL
# - SUPABASE_ANON_KEY
# - CHAOS_FEED_LOG_LEVEL
# - CHAOS_FEED_LOG_FORMAT

[backend]
# Project URL of the hosted data service
url = "https://YOUR_SUPABASE_PROJECT.supabase.co"

# Public (anon) key of the project
anon_key = "YOUR_SUPABASE_ANON_KEY"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
