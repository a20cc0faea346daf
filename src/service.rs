use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::{CatalogError, CatalogResult};
use crate::product::Product;
use crate::query::{Page, Query, paginate};
use crate::store::ProductStore;

/// Catalog operations over a [`ProductStore`].
///
/// Reads go straight to the store and share nothing. Mutations are
/// load-modify-save cycles serialized by `write_lock`; readers never take it.
pub struct Catalog {
    store: Arc<dyn ProductStore>,
    write_lock: Mutex<()>,
}

impl Catalog {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<dyn ProductStore> {
        &self.store
    }

    async fn load(&self) -> CatalogResult<Vec<Product>> {
        self.store.load().await.map_err(|e| {
            tracing::warn!(store = %self.store.describe(), error = %e, "product store unavailable");
            CatalogError::StoreUnavailable(e)
        })
    }

    /// Filter by tag and cut one page out of the result.
    pub async fn query(&self, query: &Query) -> CatalogResult<Page> {
        let products = self.load().await?;
        Ok(paginate(products, query))
    }

    /// Number of products currently persisted.
    pub async fn count(&self) -> CatalogResult<usize> {
        Ok(self.load().await?.len())
    }

    pub async fn get(&self, id: &str) -> CatalogResult<Product> {
        self.load()
            .await?
            .into_iter()
            .find(|p| p.id.matches(id))
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub async fn create(&self, body: Value) -> CatalogResult<Product> {
        let product = Product::from_json(body)?;

        let _guard = self.write_lock.lock().await;
        let mut products = self.load().await?;
        // "1" and 1 share a path segment, so they count as the same id.
        if products.iter().any(|p| p.id.collides_with(&product.id)) {
            return Err(CatalogError::Conflict(product.id.to_string()));
        }
        products.push(product.clone());
        self.store.save(&products).await?;

        tracing::info!(id = %product.id, total = products.len(), "product created");
        Ok(product)
    }

    pub async fn update(&self, id: &str, patch: Value) -> CatalogResult<Product> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.load().await?;
        let product = products
            .iter_mut()
            .find(|p| p.id.matches(id))
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        product.apply_patch(patch)?;
        let updated = product.clone();
        self.store.save(&products).await?;

        tracing::info!(id = %updated.id, "product updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> CatalogResult<Product> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.load().await?;
        let position = products
            .iter()
            .position(|p| p.id.matches(id))
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        let removed = products.remove(position);
        self.store.save(&products).await?;

        tracing::info!(id = %removed.id, total = products.len(), "product deleted");
        Ok(removed)
    }
}
