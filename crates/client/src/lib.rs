//! Namo client library.
//!
//! Everything the shop frontend owns that is not presentation: the cart
//! store with its local-storage persistence boundary, the checkout state
//! machine, and a typed client for the REST API.
//!
//! The cart makes no network calls; the checkout flow submits the cart as
//! a single order-creation call and only then clears it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod storage;

pub use api::{ApiClient, ApiError};
pub use cart::{CartLine, CartStore, CartStorage};
pub use checkout::{CheckoutDetails, CheckoutError, CheckoutFlow, CheckoutState, TerminalView};
pub use storage::JsonFileStorage;
