use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::product::Product;

/// Source of truth for the product list.
///
/// Implementations hand back the complete, ordered list on every `load`;
/// there is no partial read. `save` replaces the persisted list wholesale.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Read every product, in store order.
    async fn load(&self) -> Result<Vec<Product>, StoreError>;

    /// Replace the persisted product list.
    async fn save(&self, products: &[Product]) -> Result<(), StoreError>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}

/// Configuration for selecting and building a store.
///
/// # Example
/// ```
/// use catalog::StoreConfig;
///
/// // In-memory (for testing)
/// let config = StoreConfig::in_memory();
///
/// // JSON array on disk
/// let config = StoreConfig::json_file("data/full-products.json");
/// ```
#[derive(Clone, Debug, Default)]
pub enum StoreConfig {
    /// A JSON file holding an array of product objects.
    JsonFile { path: PathBuf },
    /// An empty in-memory list.
    #[default]
    InMemory,
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        StoreConfig::InMemory
    }

    pub fn json_file<P: Into<PathBuf>>(path: P) -> Self {
        StoreConfig::JsonFile { path: path.into() }
    }

    /// Build the store. Opening a file store does not touch the disk; a
    /// missing file surfaces on the first `load`.
    pub fn build(&self) -> Arc<dyn ProductStore> {
        match self {
            StoreConfig::InMemory => Arc::new(InMemoryStore::new()),
            StoreConfig::JsonFile { path } => Arc::new(JsonFileStore::new(path.clone())),
        }
    }
}

/// An in-memory store using a `RwLock` around a `Vec`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    products: RwLock<Vec<Product>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn load(&self) -> Result<Vec<Product>, StoreError> {
        let guard = self
            .products
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.clone())
    }

    async fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let mut guard = self
            .products
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        *guard = products.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

/// The JSON file store.
pub mod json_file;

pub use json_file::JsonFileStore;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_round_trips_order() {
        let store = InMemoryStore::new();
        assert!(store.load().await.unwrap().is_empty());

        let products = vec![Product::new(2, ["x"]), Product::new(1, ["y"])];
        store.save(&products).await.unwrap();
        assert_eq!(store.load().await.unwrap(), products);
    }

    #[tokio::test]
    async fn config_builds_expected_backend() {
        let store = StoreConfig::in_memory().build();
        assert_eq!(store.describe(), "in-memory");

        let store = StoreConfig::json_file("/tmp/catalog.json").build();
        assert_eq!(store.describe(), "/tmp/catalog.json");
    }
}
