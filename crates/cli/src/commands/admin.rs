//! Admin user management command.
//!
//! Operator accounts have no self-service registration path; this is the
//! only way to provision one.

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher};
use rand::Rng;
use rand::distr::Alphanumeric;
use sqlx::PgPool;
use thiserror::Error;

use safegear_core::types::{AdminRole, Email, EmailError};

/// Errors that can occur when managing admin users.
#[derive(Debug, Error)]
pub enum AdminCommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Email address failed validation.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Role string was not a known role.
    #[error("{0}")]
    InvalidRole(String),

    /// Password hashing failed.
    #[error("Password hashing error: {0}")]
    Hash(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An admin with this email already exists.
    #[error("An admin user with email {0} already exists")]
    AlreadyExists(String),
}

/// Create a new admin user.
///
/// If `password` is `None` the `SG_ADMIN_PASSWORD` environment variable is
/// consulted, and failing that a random password is generated and printed
/// to stdout once.
///
/// # Errors
///
/// Returns an error on invalid input, hashing failure or database failure.
#[allow(clippy::print_stdout)]
pub async fn create_user(
    email: &str,
    name: &str,
    role: &str,
    password: Option<&str>,
) -> Result<(), AdminCommandError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email)?;
    let role: AdminRole = role.parse().map_err(AdminCommandError::InvalidRole)?;

    let (password, generated) = match password {
        Some(p) => (p.to_owned(), false),
        None => match std::env::var("SG_ADMIN_PASSWORD") {
            Ok(p) => (p, false),
            Err(_) => (generate_password(), true),
        },
    };

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AdminCommandError::Hash(e.to_string()))?
        .to_string();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| AdminCommandError::MissingEnvVar("DATABASE_URL"))?;
    let pool = PgPool::connect(&database_url).await?;

    let result = sqlx::query(
        "INSERT INTO admin_users (email, name, password_hash, role)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(email.as_str())
    .bind(name)
    .bind(&password_hash)
    .bind(role)
    .execute(&pool)
    .await;

    match result {
        Ok(_) => {}
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(AdminCommandError::AlreadyExists(email.as_str().to_owned()));
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!("Created admin user {} with role {}", email.as_str(), role);
    if generated {
        // Printed once, never logged.
        println!("Generated password: {password}");
    }

    Ok(())
}

fn generate_password() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_passwords_are_long_and_unique() {
        let a = generate_password();
        let b = generate_password();
        assert_eq!(a.len(), 24);
        assert_ne!(a, b);
    }
}
