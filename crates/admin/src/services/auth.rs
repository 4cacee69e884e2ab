//! Admin operator login.
//!
//! Operator accounts are created out of band (`safegear-cli admin create`);
//! there is no self-registration. Passwords are Argon2id hashes.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordVerifier};
use sqlx::PgPool;
use thiserror::Error;

use safegear_core::Email;
use safegear_core::types::email::EmailError;

use crate::db::RepositoryError;
use crate::db::admin_users::AdminUserRepository;
use crate::models::AdminUser;

/// Errors from admin login.
#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// No account or wrong password; callers must not distinguish.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The email address is not valid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Parsing a stored password hash failed.
    #[error("password hash error: {0}")]
    Hash(String),

    /// A database operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Authenticate an admin by email and password.
///
/// # Errors
///
/// Returns `AdminAuthError::InvalidCredentials` for both unknown accounts
/// and wrong passwords.
pub async fn login(pool: &PgPool, email: &str, password: &str) -> Result<AdminUser, AdminAuthError> {
    let email = Email::parse(email)?;

    let Some((admin, password_hash)) = AdminUserRepository::new(pool)
        .get_with_password_hash(&email)
        .await?
    else {
        return Err(AdminAuthError::InvalidCredentials);
    };

    let parsed =
        PasswordHash::new(&password_hash).map_err(|e| AdminAuthError::Hash(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AdminAuthError::InvalidCredentials)?;

    tracing::info!(admin_id = %admin.id, role = %admin.role, "admin logged in");
    Ok(admin)
}
