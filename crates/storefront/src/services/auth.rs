//! Customer registration and login.
//!
//! Passwords are hashed with Argon2id; only the hash is stored. Login and
//! registration both work on raw request strings and do their own email and
//! password validation, so route handlers stay thin.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use sqlx::PgPool;
use thiserror::Error;

use safegear_core::Email;
use safegear_core::types::email::EmailError;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors from registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Password verification failed.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account exists for the given email.
    #[error("user not found")]
    UserNotFound,

    /// An account with this email already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// The password doesn't meet the minimum requirements.
    #[error("{0}")]
    WeakPassword(String),

    /// The email address is not valid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Hashing or parsing a password hash failed.
    #[error("password hash error: {0}")]
    Hash(String),

    /// A database operation failed.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for AuthError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(_) => Self::UserAlreadyExists,
            other => Self::Repository(other),
        }
    }
}

/// Registration and login against the users table.
pub struct AuthService<'a> {
    pool: &'a PgPool,
}

impl<'a> AuthService<'a> {
    /// Create a new auth service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Register a new customer account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::WeakPassword` for
    /// rejected input, `AuthError::UserAlreadyExists` if the email is taken
    /// and `AuthError::Repository` for database failures.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;
        let user = UserRepository::new(self.pool)
            .create(&email, &password_hash, name)
            .await?;

        tracing::info!(user_id = %user.id, "customer account created");
        Ok(user)
    }

    /// Authenticate a customer by email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no account exists and
    /// `AuthError::InvalidCredentials` if the password doesn't match; both
    /// surface to the client as the same 401.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let Some((user, password_hash)) = UserRepository::new(self.pool)
            .get_password_hash(&email)
            .await?
        else {
            return Err(AuthError::UserNotFound);
        };

        verify_password(password, &password_hash)?;
        Ok(user)
    }
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::Hash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Verify a password against a stored PHC-format hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on mismatch and `AuthError::Hash`
/// if the stored hash cannot be parsed.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse battery", &hash).is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("correct horse battery").unwrap();
        let err = verify_password("wrong password", &hash).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let err = verify_password("anything", "not-a-phc-hash").unwrap_err();
        assert!(matches!(err, AuthError::Hash(_)));
    }

    #[test]
    fn test_short_password_rejected() {
        let err = validate_password("short").unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(_)));
        assert!(validate_password("long enough password").is_ok());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }
}
