use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::search::SearchConfig;

/// Main catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Document store configuration
    pub store: StoreConfig,

    /// Search index configuration
    pub search: SearchConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: BOOK_CATALOG_)
            .add_source(
                config::Environment::with_prefix("BOOK_CATALOG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store backend type
    #[serde(default)]
    pub backend: StoreBackend,

    /// Path for the embedded database (sled)
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    Sled,
    Memory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded_defaults() {
        let config = Config::load().unwrap();
        assert_eq!(config.store.backend, StoreBackend::Sled);
        assert!(config.store.path.is_some());
        assert!(config.search.max_results > 0);
    }

    #[test]
    fn test_backend_deserializes_from_snake_case() {
        let store: StoreConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "backend = \"memory\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(store.backend, StoreBackend::Memory);
        assert!(store.path.is_none());
    }
}
