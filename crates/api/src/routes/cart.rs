//! Cart route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use greenbasket_core::{CartLineId, ProductId, SessionToken};

use crate::error::{AppError, Result};
use crate::models::CartLineWithProduct;
use crate::routes::products::ProductResponse;
use crate::services::CartService;
use crate::state::AppState;

/// Request body for adding a product to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: i32,
    pub quantity: i32,
    pub session_id: String,
}

/// Cart line representation returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineResponse {
    pub id: CartLineId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub product: ProductResponse,
}

impl From<CartLineWithProduct> for CartLineResponse {
    fn from(entry: CartLineWithProduct) -> Self {
        Self {
            id: entry.line.id,
            product_id: entry.line.product_id,
            quantity: entry.line.quantity,
            product: entry.product.into(),
        }
    }
}

/// Parse a session token from client input, surfacing a 400 on bad input.
pub(crate) fn parse_session(raw: &str) -> Result<SessionToken> {
    SessionToken::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// `GET /cart/{session_id}` - list a session's cart lines.
pub async fn list(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<CartLineResponse>>> {
    let session = parse_session(&session_id)?;
    let lines = CartService::new(state.pool()).list(&session).await?;

    Ok(Json(lines.into_iter().map(Into::into).collect()))
}

/// `POST /cart` - add a product to a session's cart, merging with any
/// existing line for the same product.
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddToCartRequest>,
) -> Result<Json<CartLineResponse>> {
    let session = parse_session(&body.session_id)?;
    let line = CartService::new(state.pool())
        .add(&session, ProductId::new(body.product_id), body.quantity)
        .await?;

    Ok(Json(line.into()))
}

/// `PUT /cart/{id}` - set a line's quantity. The body is a raw JSON integer;
/// zero or below removes the line.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(quantity): Json<i32>,
) -> Result<StatusCode> {
    CartService::new(state.pool())
        .set_quantity(CartLineId::new(id), quantity)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /cart/{id}` - remove a cart line.
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    CartService::new(state.pool())
        .remove(CartLineId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /cart/clear/{session_id}` - delete all of a session's cart lines.
/// Clearing an already-empty cart still returns 204.
pub async fn clear(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode> {
    let session = parse_session(&session_id)?;
    CartService::new(state.pool()).clear(&session).await?;

    Ok(StatusCode::NO_CONTENT)
}
