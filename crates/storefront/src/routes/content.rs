//! Banner and language handlers.

use axum::{Json, extract::State};

use crate::db::content::{Banner, ContentRepository, Language};
use crate::error::Result;
use crate::state::AppState;

/// GET /api/banners
pub async fn banners(State(state): State<AppState>) -> Result<Json<Vec<Banner>>> {
    let banners = ContentRepository::new(state.pool()).active_banners().await?;
    Ok(Json(banners))
}

/// GET /api/languages
pub async fn languages(State(state): State<AppState>) -> Result<Json<Vec<Language>>> {
    let languages = ContentRepository::new(state.pool())
        .active_languages()
        .await?;
    Ok(Json(languages))
}
