//! Configuration module
//!
//! Environment-driven configuration for the storage backend, upload ceiling and
//! log output. Binaries load `.env` with `dotenvy` before calling [`Config::from_env`].

use std::env;
use std::str::FromStr;

use crate::constants::DEFAULT_MAX_SVG_SIZE_BYTES;
use crate::storage_types::StorageBackend;

const DEFAULT_LOCAL_STORAGE_PATH: &str = "./data";

/// Log output format for binaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub storage_backend: StorageBackend,
    pub local_storage_path: String,
    pub max_svg_size_bytes: usize,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            storage_backend: StorageBackend::Local,
            local_storage_path: DEFAULT_LOCAL_STORAGE_PATH.to_string(),
            max_svg_size_bytes: DEFAULT_MAX_SVG_SIZE_BYTES,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(v) if !v.trim().is_empty() => v.parse()?,
            _ => StorageBackend::Local,
        };

        let log_format = match env::var("LOG_FORMAT") {
            Ok(v) if !v.trim().is_empty() => v.parse()?,
            _ => LogFormat::Text,
        };

        let config = Config {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            storage_backend,
            local_storage_path: env::var("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|_| DEFAULT_LOCAL_STORAGE_PATH.to_string()),
            max_svg_size_bytes: env::var("MAX_SVG_SIZE_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_SVG_SIZE_BYTES.to_string())
                .parse()
                .unwrap_or(DEFAULT_MAX_SVG_SIZE_BYTES),
            log_format,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_svg_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_SVG_SIZE_BYTES must be greater than zero"));
        }

        if self.storage_backend == StorageBackend::Local && self.local_storage_path.trim().is_empty()
        {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH must be set when using local storage backend"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(!config.is_production());
    }

    #[test]
    fn zero_ceiling_is_rejected() {
        let config = Config {
            max_svg_size_bytes: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_local_path_is_rejected_only_for_local_backend() {
        let mut config = Config {
            local_storage_path: " ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
        config.storage_backend = StorageBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn log_format_parses() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn production_detection() {
        let config = Config {
            environment: "Prod".to_string(),
            ..Config::default()
        };
        assert!(config.is_production());
    }
}
