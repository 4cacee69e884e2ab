//! Operator auth handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AdminError, Result};
use crate::middleware::auth::{RequireAdmin, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::auth;
use crate::state::AppState;

/// Body for POST /api/auth/login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<CurrentAdmin>> {
    let admin = auth::login(state.pool(), &body.email, &body.password).await?;

    // Fresh session id on login
    session
        .cycle_id()
        .await
        .map_err(|e| AdminError::Internal(format!("session cycle failed: {e}")))?;

    let current = CurrentAdmin::from(&admin);
    set_current_admin(&session, &current)
        .await
        .map_err(|e| AdminError::Internal(format!("session write failed: {e}")))?;

    Ok(Json(current))
}

/// POST /api/auth/logout
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AdminError::Internal(format!("session write failed: {e}")))?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/me
pub async fn me(RequireAdmin(admin): RequireAdmin) -> Json<CurrentAdmin> {
    Json(admin)
}
