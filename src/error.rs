use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by a [`ProductStore`](crate::ProductStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access product store at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("product store at {} is not a valid product list: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize products: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub(crate) fn backend(msg: impl Into<String>) -> Self {
        StoreError::Backend(msg.into())
    }
}

/// Errors surfaced by [`Catalog`](crate::Catalog) operations.
///
/// The listing pipeline only ever fails with [`CatalogError::StoreUnavailable`];
/// the remaining variants belong to parameter coercion and the single-entity
/// CRUD operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("invalid `{name}` parameter: {value:?} is not a number")]
    InvalidParameter { name: &'static str, value: String },

    #[error("invalid product: {0}")]
    InvalidProduct(String),

    #[error("product {0} not found")]
    NotFound(String),

    #[error("product {0} already exists")]
    Conflict(String),
}

impl CatalogError {
    pub(crate) fn invalid_product(msg: impl Into<String>) -> Self {
        CatalogError::InvalidProduct(msg.into())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
