//! User account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Email, UserId, UserRole};

/// The public view of an account.
///
/// The password hash never leaves the server's repository layer; this type
/// deliberately has no field for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether this account may perform administrative operations.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}
