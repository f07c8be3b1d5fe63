//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FROSTLINE_DATA_DIR` - Directory for per-account order history files
//!
//! ## Optional
//! - `FROSTLINE_RECOMMENDATION_LIMIT` - How many "frequently bought"
//!   products to surface (default: 6)

use std::path::PathBuf;

use thiserror::Error;

use crate::recommend;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront engine configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory where the file-backed order store keeps its history files
    pub data_dir: PathBuf,
    /// How many recommended products to surface
    pub recommendation_limit: usize,
}

impl StoreConfig {
    /// Create a configuration with the default recommendation limit.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            recommendation_limit: recommend::DEFAULT_LIMIT,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = std::env::var("FROSTLINE_DATA_DIR")
            .map_err(|_| ConfigError::MissingEnvVar("FROSTLINE_DATA_DIR".to_owned()))?;

        let recommendation_limit = match std::env::var("FROSTLINE_RECOMMENDATION_LIMIT") {
            Ok(raw) => raw.parse::<usize>().map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "FROSTLINE_RECOMMENDATION_LIMIT".to_owned(),
                    e.to_string(),
                )
            })?,
            Err(_) => recommend::DEFAULT_LIMIT,
        };

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            recommendation_limit,
        })
    }
}
