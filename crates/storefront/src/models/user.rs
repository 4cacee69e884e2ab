//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use safegear_core::{Email, UserId};

/// Session keys used by the storefront.
pub mod session_keys {
    /// The logged-in user, stored as [`super::CurrentUser`].
    pub const CURRENT_USER: &str = "current_user";
}

/// A storefront customer account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Optional display name.
    pub name: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The authenticated user as stored in the session.
///
/// Kept small: everything else is re-read from the database per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Email,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}
