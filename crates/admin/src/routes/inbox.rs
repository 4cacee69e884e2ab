//! Contact message and newsletter subscriber handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use safegear_core::ContactId;

use crate::db::inbox::{ContactMessage, InboxRepository, Subscriber};
use crate::error::Result;
use crate::middleware::auth::{RequireAdmin, RequireWriter};
use crate::state::AppState;

/// GET /api/contacts
pub async fn contacts(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<ContactMessage>>> {
    let contacts = InboxRepository::new(state.pool()).list_contacts().await?;
    Ok(Json(contacts))
}

/// DELETE /api/contacts/{id}
pub async fn delete_contact(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<ContactId>,
) -> Result<StatusCode> {
    InboxRepository::new(state.pool()).delete_contact(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/subscribers
pub async fn subscribers(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Subscriber>>> {
    let subscribers = InboxRepository::new(state.pool()).list_subscribers().await?;
    Ok(Json(subscribers))
}
