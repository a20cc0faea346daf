use crate::error::ServerResult;
use crate::state::ServerState;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use catalog::{Page, Product, ProductId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Raw query string for `GET /products`.
///
/// Numbers arrive as strings and are coerced by [`catalog::Query::from_params`],
/// so a malformed number yields `INVALID_PARAMETER`. Only a query string that
/// does not fit this shape at all (e.g. a repeated key) is rejected as
/// `INVALID_QUERY`.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsParams {
    #[serde(default)]
    pub tag: Option<String>,

    #[serde(default)]
    pub offset: Option<String>,

    #[serde(default)]
    pub limit: Option<String>,
}

/// Response from product delete
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteProductResponse {
    pub id: ProductId,
    pub status: String,
}

/// List products with tag filtering and pagination
pub async fn list_products(
    State(state): State<Arc<ServerState>>,
    params: Result<Query<ListProductsParams>, QueryRejection>,
) -> ServerResult<Json<Page>> {
    let Query(params) = params?;
    let query = catalog::Query::from_params(
        params.tag,
        params.offset.as_deref(),
        params.limit.as_deref(),
    )?;
    let page = state.catalog.query(&query).await?;

    tracing::debug!(
        tag = query.tag.as_deref().unwrap_or(""),
        offset = query.offset,
        limit = query.limit,
        returned = page.products.len(),
        total = page.total,
        "listed products"
    );

    Ok(Json(page))
}

/// Get a single product by ID
pub async fn get_product(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<Product>> {
    Ok(Json(state.catalog.get(&id).await?))
}

/// Create a product; the ID is generated when the body has none
pub async fn create_product(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(body) = body?;
    let product = state.catalog.create(body).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Merge the body's fields into an existing product
pub async fn update_product(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ServerResult<Json<Product>> {
    let Json(body) = body?;
    Ok(Json(state.catalog.update(&id, body).await?))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<DeleteProductResponse>> {
    let removed = state.catalog.delete(&id).await?;
    Ok(Json(DeleteProductResponse {
        id: removed.id,
        status: "deleted".to_string(),
    }))
}
