//! Configuration for beanlens: reflection cache behaviour and logging.
//!
//! Configuration is read from TOML:
//!
//! ```toml
//! [reflection]
//! class_cache_enabled = true
//! map_underscore_to_camel_case = false
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use std::path::Path;
use std::sync::Once;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod schema;

pub use schema::json_schema;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct BeanlensConfig {
    #[serde(default)]
    pub reflection: ReflectionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct ReflectionConfig {
    /// Keep one introspection result per class for the lifetime of the factory.
    #[serde(default = "ReflectionConfig::default_class_cache_enabled")]
    pub class_cache_enabled: bool,

    /// Strip underscores from column-style names (`user_name`) before looking up properties.
    #[serde(default)]
    pub map_underscore_to_camel_case: bool,
}

impl ReflectionConfig {
    fn default_class_cache_enabled() -> bool {
        true
    }
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            class_cache_enabled: Self::default_class_cache_enabled(),
            map_underscore_to_camel_case: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    /// Bare level names are canonicalised; anything else passes through as directives.
    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let level = input.trim();
        match level.to_ascii_lowercase().as_str() {
            "" => Self::default_level(),
            "warning" => "warn".to_owned(),
            lower @ ("trace" | "debug" | "info" | "warn" | "error") => lower.to_owned(),
            _ => level.to_owned(),
        }
    }

    /// The effective filter: `level` followed by any `RUST_LOG` directives, so the environment
    /// can refine individual targets.
    pub fn env_filter(&self) -> EnvFilter {
        let configured = Self::normalize_level_directives(&self.level);
        let from_env = std::env::var("RUST_LOG")
            .map(|value| value.trim().to_owned())
            .unwrap_or_default();

        if !from_env.is_empty() {
            let merged = EnvFilter::try_new(format!("{configured},{from_env}"))
                .or_else(|_| EnvFilter::try_new(&from_env));
            if let Ok(filter) = merged {
                return filter;
            }
        }
        EnvFilter::try_new(&configured)
            .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::INFO.into()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Toml(err.message().to_owned())
    }
}

impl BeanlensConfig {
    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

static TRACING_INIT: Once = Once::new();

/// Installs a global `fmt` subscriber filtered by [`LoggingConfig::env_filter`].
///
/// Safe to call more than once; only the first call has an effect, and an already installed
/// global subscriber is left in place.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();
        let installed = if config.json {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_ansi(false)
                .try_init()
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .try_init()
        };
        if installed.is_ok() {
            tracing::debug!(
                target: "beanlens.config",
                level = %config.level,
                json = config.json,
                "tracing initialized"
            );
        }
    });
}
