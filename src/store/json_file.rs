//! Product store backed by a single JSON file.
//!
//! The file holds an array of product objects. It is re-read on every
//! `load`, so edits made by other processes are picked up on the next
//! request. Writes go to a sibling temp file that is then renamed over the
//! target; a reader sees either the old list or the new one.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::product::Product;
use crate::store::ProductStore;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("products.json"));
        name.push(format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl ProductStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Product>, StoreError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        let products: Vec<Product> =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(
            path = %self.path.display(),
            count = products.len(),
            "loaded products"
        );
        Ok(products)
    }

    async fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(products).map_err(StoreError::Serialize)?;
        let tmp = self.temp_path();

        if let Err(e) = tokio::fs::write(&tmp, &bytes).await {
            return Err(StoreError::Io { path: tmp, source: e });
        }
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            // Best effort: don't leave the temp file behind.
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(self.io_error(e));
        }

        tracing::debug!(
            path = %self.path.display(),
            count = products.len(),
            "saved products"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn load_reads_array_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        let raw = json!([
            {"id": "b", "tags": ["x"], "description": "second"},
            {"id": "a", "tags": []}
        ]);
        std::fs::write(&path, raw.to_string()).unwrap();

        let products = JsonFileStore::new(&path).load().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id.to_string(), "b");
        assert_eq!(products[0].fields["description"], "second");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope.json"));
        assert!(matches!(store.load().await, Err(StoreError::Io { .. })));
    }

    #[tokio::test]
    async fn corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonFileStore::new(&path).load().await,
            Err(StoreError::Parse { .. })
        ));

        // Valid JSON that isn't a product array is just as unusable.
        std::fs::write(&path, r#"{"products": []}"#).unwrap();
        assert!(matches!(
            JsonFileStore::new(&path).load().await,
            Err(StoreError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn save_replaces_file_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "[]").unwrap();
        let store = JsonFileStore::new(&path);

        let products = vec![Product::new(1, ["a"]).with_field("name", "Lamp")];
        store.save(&products).await.unwrap();
        assert_eq!(store.load().await.unwrap(), products);

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name() != "products.json")
            .collect();
        assert!(leftovers.is_empty());
    }
}
