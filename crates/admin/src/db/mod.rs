//! Database operations for the admin panel.
//!
//! Admin owns writes to the catalog, taxonomy and content tables, plus order
//! fulfilment updates; the storefront binary reads the same database.
//! Queries use runtime-checked `sqlx::query_as` with `FromRow` row types,
//! organised into repository structs per area.
//!
//! Migrations live in `crates/cli/migrations/` and run via:
//! ```bash
//! cargo run -p safegear-cli -- migrate
//! ```

pub mod admin_users;
pub mod content;
pub mod inbox;
pub mod orders;
pub mod products;
pub mod taxonomy;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Underlying database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The requested row does not exist.
    #[error("not found")]
    NotFound,

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a sqlx error, turning unique violations into `Conflict`.
    pub(crate) fn from_sqlx(e: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict_message.to_owned());
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// The admin panel serves few concurrent operators, so the pool is smaller
/// than the storefront's.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
