//! Product catalog handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use namo_core::{ChangeEvent, ChangeKind, Price, Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MessageResponse, require_field};
use crate::db::RepositoryError;
use crate::db::products::{NewProduct, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Product creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateProductPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i64>,
    pub image: Option<String>,
    pub category: Option<String>,
}

/// Product creation response.
#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
}

/// Stock update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateStockPayload {
    pub stock: Option<i64>,
}

/// GET /api/products
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>> {
    let id = ProductId::new(id);
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

/// POST /api/products (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<CreateProductPayload>,
) -> Result<(StatusCode, Json<CreateProductResponse>)> {
    let name = require_field(payload.name, "name")?;

    let amount = payload
        .price
        .ok_or_else(|| AppError::Validation("price is required".to_owned()))?;
    let price =
        Price::new(amount).map_err(|e| AppError::Validation(e.to_string()))?;

    let stock = payload
        .stock
        .ok_or_else(|| AppError::Validation("stock is required".to_owned()))?;
    if stock < 0 {
        return Err(AppError::Validation("stock cannot be negative".to_owned()));
    }

    let product_id = ProductRepository::new(state.pool())
        .create(NewProduct {
            name: &name,
            description: payload.description.as_deref(),
            price,
            stock,
            image: payload.image.as_deref(),
            category: payload.category.as_deref(),
        })
        .await?;

    state.events().publish(ChangeEvent::Product {
        change: ChangeKind::Created,
        id: product_id,
    });

    Ok((StatusCode::CREATED, Json(CreateProductResponse { product_id })))
}

/// PUT /api/products/{id} (admin)
pub async fn update_stock(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStockPayload>,
) -> Result<Json<MessageResponse>> {
    let id = ProductId::new(id);

    let stock = payload
        .stock
        .ok_or_else(|| AppError::Validation("stock is required".to_owned()))?;
    if stock < 0 {
        return Err(AppError::Validation("stock cannot be negative".to_owned()));
    }

    ProductRepository::new(state.pool())
        .update_stock(id, stock)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("product {id}")),
            other => AppError::Database(other),
        })?;

    state.events().publish(ChangeEvent::Product {
        change: ChangeKind::Updated,
        id,
    });

    Ok(Json(MessageResponse::new("product stock updated")))
}

/// DELETE /api/products/{id} (admin)
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    let id = ProductId::new(id);

    ProductRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("product {id}")),
            other => AppError::Database(other),
        })?;

    state.events().publish(ChangeEvent::Product {
        change: ChangeKind::Deleted,
        id,
    });

    Ok(Json(MessageResponse::new("product deleted")))
}
