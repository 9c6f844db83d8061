//! Database migration command.
//!
//! Runs the API crate's sqlx migrations. The server never migrates on
//! startup; this command is the only migration path.

use greenbasket_api::db;
use tracing::info;

use super::CommandError;

/// Run all pending database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration
/// fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    info!("Migrations complete");
    Ok(())
}
