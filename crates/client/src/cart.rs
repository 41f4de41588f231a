//! The shopper's cart.
//!
//! An explicit store owned by the application shell and passed by
//! reference - no ambient singleton. State is purely local; the only
//! side-channel is the [`CartStorage`] serialize/deserialize boundary that
//! persists the line list across page reloads.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use namo_core::{Price, Product, ProductId};

/// Flat delivery fee added to every order, in rupees.
#[must_use]
pub fn shipping_fee() -> Decimal {
    Decimal::from(30)
}

/// Errors from loading or saving the cart.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// The storage backend failed.
    #[error("cart storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The persisted payload didn't parse.
    #[error("cart serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Where the serialized cart lives between page loads.
///
/// The browser build backs this with local storage; natively it's a JSON
/// file ([`crate::storage::JsonFileStorage`]).
pub trait CartStorage {
    /// Read the persisted payload, `None` if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the backend fails.
    fn read(&self) -> std::io::Result<Option<String>>;

    /// Persist a payload, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the backend fails.
    fn write(&self, payload: &str) -> std::io::Result<()>;
}

/// One product-quantity pair in the cart, with the display fields
/// denormalized at add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    /// A single-quantity line for a catalog product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }
}

/// The in-progress order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a line. If a line for the same product already exists its
    /// quantity is incremented instead of appending a duplicate.
    pub fn add(&mut self, line: CartLine) {
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == line.product_id)
        {
            existing.quantity += line.quantity;
        } else {
            self.lines.push(line);
        }
    }

    /// Set a line's quantity, clamped to a minimum of 1. Removing a line
    /// is a separate, explicit action ([`CartStore::remove`]).
    ///
    /// Returns `false` if no line exists for the product.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity.max(1);
                true
            }
            None => false,
        }
    }

    /// Remove a line entirely.
    ///
    /// Returns `false` if no line exists for the product.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() < before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of price × quantity across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .map(|l| l.price.amount() * Decimal::from(l.quantity))
            .sum()
    }

    /// Subtotal plus the flat shipping fee.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subtotal() + shipping_fee()
    }

    /// Restore a cart from storage. An absent payload yields an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the backend fails or the payload is corrupt.
    pub fn load(storage: &dyn CartStorage) -> Result<Self, CartError> {
        match storage.read()? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(Self::new()),
        }
    }

    /// Persist the cart to storage.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if serialization or the backend fails.
    pub fn save(&self, storage: &dyn CartStorage) -> Result<(), CartError> {
        let payload = serde_json::to_string(self)?;
        storage.write(&payload)?;
        Ok(())
    }
}
