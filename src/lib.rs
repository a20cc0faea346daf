//! Product catalog backed by a JSON file on disk.
//!
//! The crate holds the domain side of the catalog service: the [`Product`]
//! record, the tag-filter/paginate pipeline behind product listings, the
//! [`ProductStore`] abstraction with its file and in-memory backends, and
//! the [`Catalog`] service that runs queries and single-product CRUD on top
//! of a store. The HTTP surface lives in the `catalog-server` crate.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use catalog::{Catalog, InMemoryStore, Product, Query};
//!
//! # tokio_test_block(async {
//! let store = InMemoryStore::with_products(vec![
//!     Product::new(1, ["a"]),
//!     Product::new(2, ["b"]),
//!     Product::new(3, ["a", "b"]),
//! ]);
//! let catalog = Catalog::new(Arc::new(store));
//!
//! let page = catalog.query(&Query::new().with_tag("a")).await.unwrap();
//! assert_eq!(page.total, 2);
//! assert_eq!(page.products.len(), 2);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod error;
pub mod product;
pub mod query;
pub mod service;
pub mod store;

pub use error::{CatalogError, CatalogResult, StoreError};
pub use product::{Product, ProductId};
pub use query::{DEFAULT_LIMIT, DEFAULT_OFFSET, Page, Query, paginate};
pub use service::Catalog;
pub use store::{InMemoryStore, JsonFileStore, ProductStore, StoreConfig};
