//! Content reads: banners and languages maintained by the admin binary.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use safegear_core::{BannerId, LanguageId};

use super::RepositoryError;

/// A home-page banner.
#[derive(Debug, Clone, FromRow, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: BannerId,
    pub image_url: String,
    pub link: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// A supported display language.
#[derive(Debug, Clone, FromRow, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: LanguageId,
    pub name: String,
    pub code: String,
}

/// Repository for content reads.
pub struct ContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContentRepository<'a> {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active banners ordered by position.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn active_banners(&self) -> Result<Vec<Banner>, RepositoryError> {
        let banners = sqlx::query_as::<_, Banner>(
            r"
            SELECT id, image_url, link, position, created_at
            FROM banners
            WHERE active
            ORDER BY position, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(banners)
    }

    /// List active languages.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn active_languages(&self) -> Result<Vec<Language>, RepositoryError> {
        let languages = sqlx::query_as::<_, Language>(
            r"
            SELECT id, name, code
            FROM languages
            WHERE active
            ORDER BY name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(languages)
    }
}
