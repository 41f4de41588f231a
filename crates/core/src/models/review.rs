//! Product review.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ProductId, Rating, ReviewId};

/// A shopper's review of a product. Append-only; never edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    pub name: String,
    pub review: String,
    pub rating: Rating,
    pub created_at: DateTime<Utc>,
}
