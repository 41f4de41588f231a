//! Catalog product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product in the catalog.
///
/// Stock is a plain count; zero means unavailable. It never goes negative -
/// the schema carries the CHECK and the guarded decrement enforces it under
/// the automatic stock policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub stock: i64,
    pub image: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product can currently be added to a cart.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.stock > 0
    }
}
