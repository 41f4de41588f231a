//! Dashboard aggregates (admin).

use axum::{Json, extract::State};
use namo_core::Order;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::orders::OrderRepository;
use crate::db::products::ProductRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Aggregate dashboard response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(rename = "totalSales")]
    pub total_sales: Decimal,
    #[serde(rename = "totalOrders")]
    pub total_orders: i64,
    /// Sum of stock across the catalog.
    pub stock: i64,
    /// The full order list, newest first.
    pub orders: Vec<Order>,
}

/// GET /api/stats (admin)
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<StatsResponse>> {
    let orders = OrderRepository::new(state.pool()).list().await?;
    let stock = ProductRepository::new(state.pool()).total_stock().await?;

    let total_sales: Decimal = orders.iter().map(|o| o.total_price.amount()).sum();
    let total_orders = i64::try_from(orders.len()).unwrap_or(i64::MAX);

    Ok(Json(StatsResponse {
        total_sales,
        total_orders,
        stock,
        orders,
    }))
}
