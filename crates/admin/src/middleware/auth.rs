//! Admin authentication extractors.
//!
//! `RequireAdmin` admits any logged-in operator; `RequireWriter` also
//! demands a role allowed to mutate (viewer accounts are read-only).

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::models::{CurrentAdmin, session_keys};

/// Extractor that requires a logged-in admin of any role.
pub struct RequireAdmin(pub CurrentAdmin);

/// Extractor that requires a logged-in admin whose role can write.
pub struct RequireWriter(pub CurrentAdmin);

/// Rejection for a missing login or insufficient role.
pub enum AdminRejection {
    Unauthenticated,
    ReadOnly,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Authentication required" })),
            )
                .into_response(),
            Self::ReadOnly => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Your role is read-only" })),
            )
                .into_response(),
        }
    }
}

async fn current_admin(parts: &mut Parts) -> Result<CurrentAdmin, AdminRejection> {
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AdminRejection::Unauthenticated)?;

    session
        .get(session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten()
        .ok_or(AdminRejection::Unauthenticated)
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_admin(parts).await?))
    }
}

impl<S> FromRequestParts<S> for RequireWriter
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = current_admin(parts).await?;
        if !admin.role.can_write() {
            return Err(AdminRejection::ReadOnly);
        }
        Ok(Self(admin))
    }
}

/// Set the current admin in the session after login.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Clear the current admin from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}
