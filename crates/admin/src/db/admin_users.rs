//! Admin operator accounts.

use sqlx::PgPool;

use safegear_core::Email;

use super::RepositoryError;
use crate::models::AdminUser;

/// Repository for admin user accounts.
pub struct AdminUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminUserRepository<'a> {
    /// Create a new admin user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an admin and their password hash by email.
    ///
    /// Returns `None` if no such account exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(AdminUser, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminPasswordRow>(
            r"
            SELECT id, email, name, role, password_hash, created_at, updated_at
            FROM admin_users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| {
            (
                AdminUser {
                    id: r.id,
                    email: r.email,
                    name: r.name,
                    role: r.role,
                    created_at: r.created_at,
                    updated_at: r.updated_at,
                },
                r.password_hash,
            )
        }))
    }

    /// Create an admin account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        name: &str,
        password_hash: &str,
        role: safegear_core::AdminRole,
    ) -> Result<AdminUser, RepositoryError> {
        let admin = sqlx::query_as::<_, AdminUser>(
            r"
            INSERT INTO admin_users (email, name, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, name, role, created_at, updated_at
            ",
        )
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .bind(role)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "admin email already exists"))?;

        Ok(admin)
    }
}

#[derive(sqlx::FromRow)]
struct AdminPasswordRow {
    id: safegear_core::AdminUserId,
    email: Email,
    name: String,
    role: safegear_core::AdminRole,
    password_hash: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}
