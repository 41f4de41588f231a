//! Review handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use namo_core::{ChangeEvent, ChangeKind, ProductId, Rating, Review};
use serde::Deserialize;

use super::{MessageResponse, require_field};
use crate::db::RepositoryError;
use crate::db::products::ProductRepository;
use crate::db::reviews::{NewReview, ReviewRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Review creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateReviewPayload {
    pub name: Option<String>,
    pub review: Option<String>,
    #[serde(rename = "productId")]
    pub product_id: Option<i64>,
    pub rating: Option<i64>,
}

/// GET /api/reviews
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Review>>> {
    let reviews = ReviewRepository::new(state.pool()).list().await?;
    Ok(Json(reviews))
}

/// POST /api/reviews
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateReviewPayload>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let name = require_field(payload.name, "name")?;
    let review = require_field(payload.review, "review")?;

    let product_id = payload
        .product_id
        .map(ProductId::new)
        .ok_or_else(|| AppError::Validation("productId is required".to_owned()))?;

    let rating = payload
        .rating
        .ok_or_else(|| AppError::Validation("rating is required".to_owned()))?;
    let rating = u8::try_from(rating)
        .ok()
        .and_then(|stars| Rating::new(stars).ok())
        .ok_or_else(|| AppError::Validation("rating must be between 1 and 5".to_owned()))?;

    // Reviews must point at a real product.
    ProductRepository::new(state.pool())
        .get(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let review_id = ReviewRepository::new(state.pool())
        .create(NewReview {
            product_id,
            name: &name,
            review: &review,
            rating,
        })
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("product {product_id}")),
            other => AppError::Database(other),
        })?;

    state.events().publish(ChangeEvent::Review {
        change: ChangeKind::Created,
        id: review_id,
    });

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("review added successfully")),
    ))
}
