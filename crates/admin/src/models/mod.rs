//! Admin domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use safegear_core::{AdminRole, AdminUserId, Email};

/// Session keys used by the admin panel.
pub mod session_keys {
    /// The logged-in admin, stored as [`super::CurrentAdmin`].
    pub const CURRENT_ADMIN: &str = "current_admin";
}

/// An admin operator account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The authenticated admin as stored in the session.
///
/// The role is captured at login time; changing an operator's role takes
/// effect on their next login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
}

impl From<&AdminUser> for CurrentAdmin {
    fn from(admin: &AdminUser) -> Self {
        Self {
            id: admin.id,
            email: admin.email.clone(),
            name: admin.name.clone(),
            role: admin.role,
        }
    }
}
