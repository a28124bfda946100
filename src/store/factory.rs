use std::sync::Arc;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::{CatalogError, Result};
use crate::store::{BookStore, InMemoryStore, SledStore};

/// Create a book store based on configuration
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn BookStore>> {
    match config.backend {
        StoreBackend::Sled => {
            let path = config.path.as_ref().ok_or_else(|| {
                CatalogError::Configuration(
                    "Sled backend requires 'path' configuration".to_string(),
                )
            })?;

            tracing::info!(path = ?path, "Initializing Sled storage backend");

            let store = SledStore::new(path)?;
            Ok(Arc::new(store))
        }

        StoreBackend::Memory => Ok(create_in_memory_store()),
    }
}

/// Create an in-memory store (for testing and development)
pub fn create_in_memory_store() -> Arc<dyn BookStore> {
    tracing::info!("Initializing in-memory storage backend");
    Arc::new(InMemoryStore::new())
}
