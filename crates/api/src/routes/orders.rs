//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use greenbasket_core::{OrderId, OrderNumber, OrderStatus, ProductId};

use crate::error::Result;
use crate::models::{ContactDetails, Order, OrderLine};
use crate::services::CheckoutService;
use crate::state::AppState;

use super::cart::parse_session;

/// Request body for placing an order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub session_id: String,
}

impl CreateOrderRequest {
    fn into_contact(self) -> ContactDetails {
        ContactDetails {
            customer_name: self.customer_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            zip_code: self.zip_code,
        }
    }
}

/// Order representation returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub order_number: OrderNumber,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub order_items: Vec<OrderItemResponse>,
}

/// Order line representation returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i32,
    pub price: Decimal,
}

impl From<OrderLine> for OrderItemResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            product_id: line.product_id,
            product_name: line.product_name,
            quantity: line.quantity,
            price: line.unit_price,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            customer_name: order.contact.customer_name,
            email: order.contact.email,
            phone: order.contact.phone,
            address: order.contact.address,
            city: order.contact.city,
            zip_code: order.contact.zip_code,
            total_amount: order.total_amount,
            status: order.status,
            created_at: order.created_at,
            order_items: order.lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// `POST /orders` - place an order from a session's cart.
///
/// Returns 201 with a `Location` header pointing at the created order.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse> {
    let session = parse_session(&body.session_id)?;
    let contact = body.into_contact();

    let order = CheckoutService::new(state.pool())
        .place_order(&session, contact)
        .await?;

    let location = format!("/orders/{}", order.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(OrderResponse::from(order)),
    ))
}

/// `GET /orders/{id}` - order with line items, or 404.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OrderResponse>> {
    let order = CheckoutService::new(state.pool())
        .get_order(OrderId::new(id))
        .await?;

    Ok(Json(order.into()))
}
