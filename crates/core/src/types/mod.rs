//! Core types for Namo.
//!
//! Type-safe wrappers for the domain concepts every component shares.

pub mod email;
pub mod events;
pub mod id;
pub mod price;
pub mod rating;
pub mod status;

pub use email::{Email, EmailError};
pub use events::{ChangeEvent, ChangeKind};
pub use id::*;
pub use price::{Price, PriceError};
pub use rating::{Rating, RatingError};
pub use status::*;
