//! Contact and newsletter capture.

use sqlx::PgPool;

use safegear_core::Email;

use super::RepositoryError;

/// Repository for contact messages and newsletter subscriptions.
pub struct InboxRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InboxRepository<'a> {
    /// Create a new inbox repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a contact-form submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_contact(
        &self,
        name: &str,
        email: &Email,
        phone: Option<&str>,
        message: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO contact_messages (name, email, phone, message)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(message)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Subscribe an email to the newsletter.
    ///
    /// Idempotent: an existing subscription is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn subscribe(&self, email: &Email) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO newsletter_subscribers (email)
            VALUES ($1)
            ON CONFLICT (email) DO NOTHING
            ",
        )
        .bind(email)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
