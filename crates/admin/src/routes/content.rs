//! Banner and language handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use safegear_core::{BannerId, LanguageId};

use crate::db::content::{AdminBanner, AdminLanguage, ContentRepository};
use crate::error::{AdminError, Result};
use crate::middleware::auth::{RequireAdmin, RequireWriter};
use crate::state::AppState;

/// Body for banner create/update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerRequest {
    pub image_url: String,
    pub link: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Body for language creation.
#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub name: String,
    pub code: String,
}

/// Body for POST /api/languages/{id}/active.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

/// GET /api/banners
pub async fn banners(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<AdminBanner>>> {
    let banners = ContentRepository::new(state.pool()).list_banners().await?;
    Ok(Json(banners))
}

/// POST /api/banners
pub async fn create_banner(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Json(body): Json<BannerRequest>,
) -> Result<(StatusCode, Json<AdminBanner>)> {
    if body.image_url.trim().is_empty() {
        return Err(AdminError::BadRequest("image url is required".to_string()));
    }

    let banner = ContentRepository::new(state.pool())
        .create_banner(&body.image_url, body.link.as_deref(), body.position)
        .await?;

    Ok((StatusCode::CREATED, Json(banner)))
}

/// PUT /api/banners/{id}
pub async fn update_banner(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<BannerId>,
    Json(body): Json<BannerRequest>,
) -> Result<Json<AdminBanner>> {
    let banner = ContentRepository::new(state.pool())
        .update_banner(
            id,
            &body.image_url,
            body.link.as_deref(),
            body.position,
            body.active,
        )
        .await?;

    Ok(Json(banner))
}

/// DELETE /api/banners/{id}
pub async fn delete_banner(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<BannerId>,
) -> Result<StatusCode> {
    ContentRepository::new(state.pool()).delete_banner(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/languages
pub async fn languages(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<AdminLanguage>>> {
    let languages = ContentRepository::new(state.pool()).list_languages().await?;
    Ok(Json(languages))
}

/// POST /api/languages
pub async fn create_language(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Json(body): Json<LanguageRequest>,
) -> Result<(StatusCode, Json<AdminLanguage>)> {
    let language = ContentRepository::new(state.pool())
        .create_language(body.name.trim(), body.code.trim())
        .await?;

    Ok((StatusCode::CREATED, Json(language)))
}

/// POST /api/languages/{id}/active
pub async fn set_language_active(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<LanguageId>,
    Json(body): Json<SetActiveRequest>,
) -> Result<StatusCode> {
    ContentRepository::new(state.pool())
        .set_language_active(id, body.active)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/languages/{id}
pub async fn delete_language(
    State(state): State<AppState>,
    RequireWriter(_admin): RequireWriter,
    Path(id): Path<LanguageId>,
) -> Result<StatusCode> {
    ContentRepository::new(state.pool()).delete_language(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
