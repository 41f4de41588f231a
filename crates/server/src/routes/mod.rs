//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (DB ping)
//!
//! # Accounts
//! POST /api/register            - Register a customer account
//! POST /api/login               - Login, returns {token, user}
//! GET  /api/users               - List accounts (admin)
//!
//! # Products
//! GET    /api/products          - List the catalog
//! POST   /api/products          - Add a product (admin)
//! GET    /api/products/{id}     - Fetch one product
//! PUT    /api/products/{id}     - Set stock (admin)
//! DELETE /api/products/{id}     - Remove a product (admin)
//!
//! # Orders
//! POST /api/orders              - Place an order
//! PUT  /api/orders/{id}/status  - Mark Dispatched/Delivered (admin)
//!
//! # Reviews
//! GET  /api/reviews             - List reviews
//! POST /api/reviews             - Add a review
//!
//! # Dashboard
//! GET  /api/stats               - Sales/order/stock aggregates (admin)
//!
//! # Realtime
//! GET  /api/events              - SSE stream of typed change events
//! ```

pub mod auth;
pub mod events;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod stats;
pub mod users;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// Generic confirmation body for writes that return no resource.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Unwrap a required payload field, treating blank strings as missing the
/// way the checkout form does.
pub(crate) fn require_field(value: Option<String>, name: &str) -> Result<String, AppError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Validation(format!("{name} is required"))),
    }
}

/// Create the `/api` router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/users", get(users::list))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::show)
                .put(products::update_stock)
                .delete(products::delete),
        )
        .route("/orders", post(orders::create))
        .route("/orders/{id}/status", put(orders::update_status))
        .route("/reviews", get(reviews::list).post(reviews::create))
        .route("/stats", get(stats::show))
        .route("/events", get(events::subscribe))
}

/// Liveness health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity; returns 503 if the database is not
/// reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_field_accepts_value() {
        assert_eq!(
            require_field(Some("Sandalwood".into()), "name").ok(),
            Some("Sandalwood".to_string())
        );
    }

    #[test]
    fn test_require_field_rejects_missing_and_blank() {
        assert!(require_field(None, "name").is_err());
        assert!(require_field(Some(String::new()), "name").is_err());
        assert!(require_field(Some("   ".into()), "name").is_err());
    }
}
