//! Customer order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{OrderId, OrderStatus, PaymentMethod, Price};

/// An order as submitted at checkout.
///
/// Contact details are denormalized free text - an order is a snapshot of
/// what the shopper typed, not a reference to an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    pub email: String,
    pub address: String,
    pub total_price: Price,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}
