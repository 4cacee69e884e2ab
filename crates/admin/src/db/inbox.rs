//! Contact message and newsletter subscriber reads.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use safegear_core::{ContactId, Email, SubscriberId};

use super::RepositoryError;

/// A contact-form submission.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: ContactId,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A newsletter subscriber.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}

/// Repository for inbox reads.
pub struct InboxRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InboxRepository<'a> {
    /// Create a new inbox repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List contact messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_contacts(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let contacts = sqlx::query_as::<_, ContactMessage>(
            r"
            SELECT id, name, email, phone, message, created_at
            FROM contact_messages
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(contacts)
    }

    /// Delete a contact message once handled.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the message doesn't exist.
    pub async fn delete_contact(&self, id: ContactId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List newsletter subscribers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_subscribers(&self) -> Result<Vec<Subscriber>, RepositoryError> {
        let subscribers = sqlx::query_as::<_, Subscriber>(
            "SELECT id, email, created_at FROM newsletter_subscribers ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(subscribers)
    }
}
