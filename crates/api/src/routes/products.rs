//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use greenbasket_core::ProductId;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

/// Product listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    /// Exact-match category filter.
    pub category: Option<String>,
}

/// Product representation returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub category: String,
    pub stock: i32,
    pub brand: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            image_url: product.image_url,
            category: product.category,
            stock: product.stock,
            brand: product.brand,
        }
    }
}

/// `GET /products` - list products, optionally filtered by category.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductResponse>>> {
    let products = ProductRepository::new(state.pool())
        .list(query.category.as_deref())
        .await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// `GET /products/{id}` - single product or 404.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>> {
    let product = ProductRepository::new(state.pool())
        .get(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product.into()))
}

/// `GET /products/categories` - distinct category labels.
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let categories = ProductRepository::new(state.pool()).categories().await?;
    Ok(Json(categories))
}
