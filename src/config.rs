//! Configuration management for initscope
//!
//! Settings are read from environment variables with fallback defaults.
//!
//! # Environment Variables
//!
//! - `INITSCOPE_LOG_LEVEL`: Logging level - default: "info"
//! - `INITSCOPE_LOG_JSON`: Emit logs as JSON lines (true|false) - default: "false"
//! - `INITSCOPE_MAX_INPUT_SIZE`: Largest snippet accepted, in bytes - default: "1048576" (1MB)
//! - `INITSCOPE_MAX_NESTING_DEPTH`: Deepest array nesting that is materialized - default: "32"
//!
//! # Example
//!
//! ```no_run
//! use initscope::{ConfigExtractor, InitscopeConfig};
//!
//! let config = InitscopeConfig::default();
//! config.validate().expect("Invalid configuration");
//!
//! let extractor = ConfigExtractor::new().with_limits(config.to_limits());
//! ```

use crate::extract::{ExtractionLimits, DEFAULT_MAX_INPUT_BYTES, DEFAULT_MAX_NESTING_DEPTH};
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_JSON: bool = false;

const MIN_INPUT_SIZE: usize = 64;
const MAX_INPUT_SIZE: usize = 16 * 1024 * 1024;
const MAX_NESTING_DEPTH: usize = 256;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitscopeConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    pub log_json: bool,

    /// Maximum snippet size in bytes
    pub max_input_size: usize,

    /// Arrays nested deeper than this are kept as raw text
    pub max_nesting_depth: usize,
}

impl Default for InitscopeConfig {
    /// Loads from `INITSCOPE_*` variables, falling back to defaults for
    /// anything missing or unparsable
    fn default() -> Self {
        let log_level = env::var("INITSCOPE_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var("INITSCOPE_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_LOG_JSON);

        let max_input_size = env::var("INITSCOPE_MAX_INPUT_SIZE")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_INPUT_BYTES);

        let max_nesting_depth = env::var("INITSCOPE_MAX_NESTING_DEPTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_NESTING_DEPTH);

        Self {
            log_level,
            log_json,
            max_input_size,
            max_nesting_depth,
        }
    }
}

impl InitscopeConfig {
    /// Loads like [`Default`] but reports values that are set and fail to parse
    pub fn from_env() -> Result<Self, ConfigError> {
        fn parsed<T: std::str::FromStr>(field: &str) -> Result<Option<T>, ConfigError>
        where
            T::Err: fmt::Display,
        {
            match env::var(field) {
                Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| ConfigError::ParseError {
                    field: field.to_string(),
                    error: format!("'{}': {}", raw, e),
                }),
                Err(_) => Ok(None),
            }
        }

        let mut config = Self::default();
        if let Some(log_json) = parsed::<bool>("INITSCOPE_LOG_JSON")? {
            config.log_json = log_json;
        }
        if let Some(size) = parsed::<usize>("INITSCOPE_MAX_INPUT_SIZE")? {
            config.max_input_size = size;
        }
        if let Some(depth) = parsed::<usize>("INITSCOPE_MAX_NESTING_DEPTH")? {
            config.max_nesting_depth = depth;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_size < MIN_INPUT_SIZE {
            return Err(ConfigError::ValidationFailed(format!(
                "Max input size must be at least {} bytes",
                MIN_INPUT_SIZE
            )));
        }
        if self.max_input_size > MAX_INPUT_SIZE {
            return Err(ConfigError::ValidationFailed(
                "Max input size cannot exceed 16MB".to_string(),
            ));
        }

        if self.max_nesting_depth == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max nesting depth must be at least 1".to_string(),
            ));
        }
        if self.max_nesting_depth > MAX_NESTING_DEPTH {
            return Err(ConfigError::ValidationFailed(format!(
                "Max nesting depth cannot exceed {}",
                MAX_NESTING_DEPTH
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn to_limits(&self) -> ExtractionLimits {
        ExtractionLimits {
            max_input_bytes: self.max_input_size,
            max_nesting_depth: self.max_nesting_depth,
        }
    }

    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("log_level".to_string(), self.log_level.clone());
        map.insert("log_json".to_string(), self.log_json.to_string());
        map.insert("max_input_size".to_string(), self.max_input_size.to_string());
        map.insert(
            "max_nesting_depth".to_string(),
            self.max_nesting_depth.to_string(),
        );
        map
    }
}

impl fmt::Display for InitscopeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initscope Configuration:")?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Log JSON: {}", self.log_json)?;
        writeln!(f, "  Max Input Size: {} bytes", self.max_input_size)?;
        writeln!(f, "  Max Nesting Depth: {}", self.max_nesting_depth)?;
        Ok(())
    }
}
