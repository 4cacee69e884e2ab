//! Contact-form and newsletter handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use safegear_core::Email;

use crate::db::inbox::InboxRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Body for POST /api/contact.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

/// Body for POST /api/newsletter.
#[derive(Debug, Deserialize)]
pub struct NewsletterRequest {
    pub email: String,
}

/// POST /api/contact
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<StatusCode> {
    let name = body.name.trim();
    let message = body.message.trim();
    if name.is_empty() || message.is_empty() {
        return Err(AppError::BadRequest(
            "name and message are required".to_string(),
        ));
    }

    let email = Email::parse(&body.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    InboxRepository::new(state.pool())
        .create_contact(name, &email, body.phone.as_deref(), message)
        .await?;

    Ok(StatusCode::CREATED)
}

/// POST /api/newsletter
///
/// Idempotent; subscribing twice is not an error.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<NewsletterRequest>,
) -> Result<Json<Value>> {
    let email = Email::parse(&body.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    InboxRepository::new(state.pool()).subscribe(&email).await?;

    Ok(Json(json!({ "subscribed": true })))
}
