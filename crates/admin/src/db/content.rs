//! Banner and language writes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use safegear_core::{BannerId, LanguageId};

use super::RepositoryError;

/// A home-page banner as the admin sees it.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminBanner {
    pub id: BannerId,
    pub image_url: String,
    pub link: Option<String>,
    pub position: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A display language as the admin sees it.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLanguage {
    pub id: LanguageId,
    pub name: String,
    pub code: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Repository for content writes.
pub struct ContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContentRepository<'a> {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all banners, active or not, in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_banners(&self) -> Result<Vec<AdminBanner>, RepositoryError> {
        let banners = sqlx::query_as::<_, AdminBanner>(
            r"
            SELECT id, image_url, link, position, active, created_at, updated_at
            FROM banners
            ORDER BY position, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(banners)
    }

    /// Create a banner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_banner(
        &self,
        image_url: &str,
        link: Option<&str>,
        position: i32,
    ) -> Result<AdminBanner, RepositoryError> {
        let banner = sqlx::query_as::<_, AdminBanner>(
            r"
            INSERT INTO banners (image_url, link, position)
            VALUES ($1, $2, $3)
            RETURNING id, image_url, link, position, active, created_at, updated_at
            ",
        )
        .bind(image_url)
        .bind(link)
        .bind(position)
        .fetch_one(self.pool)
        .await?;

        Ok(banner)
    }

    /// Update a banner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the banner doesn't exist.
    pub async fn update_banner(
        &self,
        id: BannerId,
        image_url: &str,
        link: Option<&str>,
        position: i32,
        active: bool,
    ) -> Result<AdminBanner, RepositoryError> {
        let banner = sqlx::query_as::<_, AdminBanner>(
            r"
            UPDATE banners
            SET image_url = $2, link = $3, position = $4, active = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, image_url, link, position, active, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(image_url)
        .bind(link)
        .bind(position)
        .bind(active)
        .fetch_optional(self.pool)
        .await?;

        banner.ok_or(RepositoryError::NotFound)
    }

    /// Delete a banner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the banner doesn't exist.
    pub async fn delete_banner(&self, id: BannerId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM banners WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List all languages.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_languages(&self) -> Result<Vec<AdminLanguage>, RepositoryError> {
        let languages = sqlx::query_as::<_, AdminLanguage>(
            "SELECT id, name, code, active, created_at FROM languages ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(languages)
    }

    /// Add a language.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a duplicate name or code.
    pub async fn create_language(
        &self,
        name: &str,
        code: &str,
    ) -> Result<AdminLanguage, RepositoryError> {
        let language = sqlx::query_as::<_, AdminLanguage>(
            r"
            INSERT INTO languages (name, code)
            VALUES ($1, $2)
            RETURNING id, name, code, active, created_at
            ",
        )
        .bind(name)
        .bind(code)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "language name or code already exists"))?;

        Ok(language)
    }

    /// Enable or disable a language.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the language doesn't exist.
    pub async fn set_language_active(
        &self,
        id: LanguageId,
        active: bool,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE languages SET active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a language.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the language doesn't exist.
    pub async fn delete_language(&self, id: LanguageId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM languages WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
