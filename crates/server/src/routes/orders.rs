//! Order handlers.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use namo_core::{ChangeEvent, ChangeKind, OrderId, OrderStatus, PaymentMethod, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MessageResponse, require_field};
use crate::config::StockPolicy;
use crate::db::RepositoryError;
use crate::db::orders::{NewOrder, OrderLine, OrderRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Order creation request body.
///
/// `items` is the submitted cart; it only matters under the automatic stock
/// policy and is ignored (accepted but unused) under the manual one.
#[derive(Debug, Deserialize)]
pub struct CreateOrderPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub total_price: Option<Decimal>,
    pub payment_method: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemPayload>,
}

/// One cart line inside an order creation request.
#[derive(Debug, Deserialize)]
pub struct OrderItemPayload {
    #[serde(rename = "productId")]
    pub product_id: i64,
    pub quantity: i64,
}

/// Order creation response.
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
}

/// Status update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: Option<String>,
}

/// POST /api/orders
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<(StatusCode, Json<CreateOrderResponse>)> {
    let name = require_field(payload.name, "name")?;
    let email = require_field(payload.email, "email")?;
    let address = require_field(payload.address, "address")?;

    let amount = payload
        .total_price
        .ok_or_else(|| AppError::Validation("total_price is required".to_owned()))?;
    let total_price =
        Price::new(amount).map_err(|e| AppError::Validation(e.to_string()))?;

    let payment_method = require_field(payload.payment_method, "payment_method")?;
    let payment_method = PaymentMethod::from_str(&payment_method).map_err(|_| {
        AppError::Validation("payment method must be 'COD' or 'UPI'".to_owned())
    })?;

    let lines = match state.config().stock_policy {
        StockPolicy::Manual => Vec::new(),
        StockPolicy::Automatic => payload
            .items
            .iter()
            .map(|item| {
                if item.quantity < 1 {
                    return Err(AppError::Validation(
                        "item quantity must be at least 1".to_owned(),
                    ));
                }
                Ok(OrderLine {
                    product_id: ProductId::new(item.product_id),
                    quantity: item.quantity,
                })
            })
            .collect::<Result<Vec<_>>>()?,
    };

    let order_id = OrderRepository::new(state.pool())
        .create(
            NewOrder {
                name: &name,
                email: &email,
                address: &address,
                total_price,
                payment_method,
            },
            &lines,
        )
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => {
                AppError::NotFound("product in order".to_owned())
            }
            RepositoryError::Conflict(msg) => AppError::Conflict(msg),
            other => AppError::Database(other),
        })?;

    state.events().publish(ChangeEvent::Order {
        change: ChangeKind::Created,
        id: order_id,
    });

    Ok((StatusCode::CREATED, Json(CreateOrderResponse { order_id })))
}

/// PUT /api/orders/{id}/status (admin)
///
/// Accepts only `Dispatched` and `Delivered`. The write is applied
/// regardless of the order's current status: the forward-only sequencing is
/// a dashboard rule (`OrderStatus::next`), not a store guard.
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<Json<MessageResponse>> {
    let id = OrderId::new(id);

    let status = require_field(payload.status, "status")?;
    let status = OrderStatus::from_str(&status).map_err(|_| {
        AppError::Validation("status must be 'Dispatched' or 'Delivered'".to_owned())
    })?;
    if status == OrderStatus::Pending {
        return Err(AppError::Validation(
            "status must be 'Dispatched' or 'Delivered'".to_owned(),
        ));
    }

    OrderRepository::new(state.pool())
        .update_status(id, status)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("order {id}")),
            other => AppError::Database(other),
        })?;

    state.events().publish(ChangeEvent::Order {
        change: ChangeKind::Updated,
        id,
    });

    Ok(Json(MessageResponse::new(format!(
        "order marked as {status}"
    ))))
}
