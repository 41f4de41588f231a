//! Namo Core - shared types library.
//!
//! This crate provides the domain types used across all Namo components:
//! - `server` - REST API and realtime broadcast
//! - `client` - cart store, checkout flow, and API client
//! - `cli` - migrations and management tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, prices, and ratings, plus
//!   the status enums and the typed change events carried by the broadcast
//!   channel
//! - [`models`] - The entities themselves: users, products, orders, reviews

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
