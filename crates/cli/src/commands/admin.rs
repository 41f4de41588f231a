//! Administrator provisioning.
//!
//! Admins are ordinary accounts with the `admin` role, hashed and stored
//! exactly like customer registrations. There is no other way to mint an
//! administrative identity - in particular, no sentinel token.

use namo_core::{Email, UserRole};
use namo_server::db::users::{NewUser, UserRepository};
use namo_server::services::auth::hash_password;
use namo_server::db;

use super::CliError;

/// Minimum password length, matching the registration flow.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Create an administrator account.
pub async fn create(username: &str, email: &str, password: &str) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CliError::InvalidInput(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let password_hash = hash_password(password)?;

    let user = UserRepository::new(&pool)
        .create(NewUser {
            username,
            email: &email,
            password_hash: &password_hash,
            role: UserRole::Admin,
        })
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Administrator created");
    Ok(())
}
