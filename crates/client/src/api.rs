//! Typed client for the Namo REST API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use namo_core::{Order, OrderId, OrderStatus, PaymentMethod, Product, ProductId, Review, User};

/// Errors returned by [`ApiClient`] calls.
///
/// Every failure is transient and non-fatal to the caller; nothing is
/// retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an error status.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Server error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Request body for creating a product.
#[derive(Debug, Clone, Serialize)]
pub struct NewProductRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One cart line inside an order creation request.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Request body for placing an order.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderRequest {
    pub name: String,
    pub email: String,
    pub address: String,
    pub total_price: Decimal,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<OrderItem>,
}

/// Request body for adding a review.
#[derive(Debug, Clone, Serialize)]
pub struct NewReviewRequest {
    pub name: String,
    pub review: String,
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    pub rating: u8,
}

/// Successful login: the bearer token plus the account's public profile.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Dashboard aggregates.
#[derive(Debug, Deserialize)]
pub struct Stats {
    #[serde(rename = "totalSales")]
    pub total_sales: Decimal,
    #[serde(rename = "totalOrders")]
    pub total_orders: i64,
    pub stock: i64,
    pub orders: Vec<Order>,
}

#[derive(Debug, Deserialize)]
struct CreatedProduct {
    #[serde(rename = "productId")]
    product_id: ProductId,
}

#[derive(Debug, Deserialize)]
struct CreatedOrder {
    #[serde(rename = "orderId")]
    order_id: OrderId,
}

/// Typed HTTP client for the Namo API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// A client for the API at `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// The same client, presenting a bearer token on every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| "request failed".to_owned());

        tracing::debug!(status, %message, "api call failed");
        Err(ApiError::Api { status, message })
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Register a customer account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error response.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/register"))
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Login, returning the bearer token and the account profile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error response.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/api/login"))
            .json(&serde_json::json!({"email": email, "password": password}))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// List accounts (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error response.
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        let response = self
            .authorized(self.http.get(self.url("/api/users")))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Fetch the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error response.
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.http.get(self.url("/api/products")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Fetch one product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error response.
    pub async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/api/products/{id}")))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// Add a product (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error response.
    pub async fn create_product(&self, request: &NewProductRequest) -> Result<ProductId, ApiError> {
        let response = self
            .authorized(self.http.post(self.url("/api/products")))
            .json(request)
            .send()
            .await?;

        let created: CreatedProduct = Self::check(response).await?.json().await?;
        Ok(created.product_id)
    }

    /// Set a product's stock (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error response.
    pub async fn update_stock(&self, id: ProductId, stock: i64) -> Result<(), ApiError> {
        let response = self
            .authorized(self.http.put(self.url(&format!("/api/products/{id}"))))
            .json(&serde_json::json!({"stock": stock}))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Remove a product (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error response.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let response = self
            .authorized(self.http.delete(self.url(&format!("/api/products/{id}"))))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error response.
    pub async fn create_order(&self, request: &NewOrderRequest) -> Result<OrderId, ApiError> {
        let response = self
            .http
            .post(self.url("/api/orders"))
            .json(request)
            .send()
            .await?;

        let created: CreatedOrder = Self::check(response).await?.json().await?;
        Ok(created.order_id)
    }

    /// Mark an order Dispatched or Delivered (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error response.
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        let response = self
            .authorized(
                self.http
                    .put(self.url(&format!("/api/orders/{id}/status"))),
            )
            .json(&serde_json::json!({"status": status.to_string()}))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    /// Fetch all reviews.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error response.
    pub async fn reviews(&self) -> Result<Vec<Review>, ApiError> {
        let response = self.http.get(self.url("/api/reviews")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Add a review.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error response.
    pub async fn create_review(&self, request: &NewReviewRequest) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/reviews"))
            .json(request)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Fetch dashboard aggregates (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an error response.
    pub async fn stats(&self) -> Result<Stats, ApiError> {
        let response = self
            .authorized(self.http.get(self.url("/api/stats")))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }
}
