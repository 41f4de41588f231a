//! Typed change events carried by the broadcast channel.
//!
//! Every successful write to products, orders, or reviews publishes one of
//! these instead of re-sending the whole collection. Subscribers that need
//! the full state perform the initial REST fetch when they connect.

use serde::{Deserialize, Serialize};

use super::id::{OrderId, ProductId, ReviewId};

/// What happened to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// A change to one entity in one collection.
///
/// The SSE event name for each variant is the collection's channel name
/// ([`ChangeEvent::channel`]); the JSON payload is the serialized variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity", rename_all = "lowercase")]
pub enum ChangeEvent {
    Product { change: ChangeKind, id: ProductId },
    Order { change: ChangeKind, id: OrderId },
    Review { change: ChangeKind, id: ReviewId },
}

impl ChangeEvent {
    /// The channel (SSE event name) this change is published on.
    #[must_use]
    pub const fn channel(&self) -> &'static str {
        match self {
            Self::Product { .. } => "productUpdate",
            Self::Order { .. } => "orderUpdate",
            Self::Review { .. } => "reviewUpdate",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        let product = ChangeEvent::Product {
            change: ChangeKind::Created,
            id: ProductId::new(1),
        };
        let order = ChangeEvent::Order {
            change: ChangeKind::Updated,
            id: OrderId::new(2),
        };
        let review = ChangeEvent::Review {
            change: ChangeKind::Created,
            id: ReviewId::new(3),
        };
        assert_eq!(product.channel(), "productUpdate");
        assert_eq!(order.channel(), "orderUpdate");
        assert_eq!(review.channel(), "reviewUpdate");
    }

    #[test]
    fn test_payload_shape() {
        let event = ChangeEvent::Product {
            change: ChangeKind::Deleted,
            id: ProductId::new(12),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"entity": "product", "change": "deleted", "id": 12})
        );
    }
}
