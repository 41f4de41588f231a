//! Database migration command.
//!
//! Runs the server crate's embedded migrations. The server never migrates
//! on startup; this command is the only place the schema moves.

use namo_server::db;

use super::CliError;

/// Run all pending migrations.
pub async fn run() -> Result<(), CliError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
