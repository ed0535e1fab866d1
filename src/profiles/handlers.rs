use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};
use uuid::Uuid;

use crate::{
    auth::services::AuthUser,
    profiles::{
        dto::{UpdateProfileRequest, UserPageResponse},
        repo::Profile,
    },
    state::AppState,
    tools,
};

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me).put(update_me))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profiles/:id", get(get_profile))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Profile>, (StatusCode, String)> {
    let profile = Profile::find(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Profile not found".to_string()))?;
    Ok(Json(profile))
}

#[instrument(skip(state, payload))]
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, (StatusCode, String)> {
    if let Some(name) = payload.full_name.as_deref() {
        if name.trim().is_empty() {
            return Err((StatusCode::BAD_REQUEST, "Full name cannot be empty".into()));
        }
    }

    let profile = Profile::update(
        &state.db,
        user_id,
        payload.full_name.as_deref().map(str::trim),
        payload.bio.as_deref(),
    )
    .await
    .map_err(internal)?
    .ok_or((StatusCode::NOT_FOUND, "Profile not found".to_string()))?;

    Ok(Json(profile))
}

/// GET /profiles/:id — public profile and the user's listings. The two
/// reads are independent, so they run concurrently.
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserPageResponse>, (StatusCode, String)> {
    let (profile, tool_rows) = tokio::try_join!(
        Profile::find(&state.db, id),
        tools::repo::list_by_owner(&state.db, id),
    )
    .map_err(internal)?;

    let profile = profile.ok_or((StatusCode::NOT_FOUND, "Profile not found".to_string()))?;

    Ok(Json(UserPageResponse {
        profile,
        tools: tool_rows
            .into_iter()
            .map(tools::dto::ToolResponse::from)
            .collect(),
    }))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "profiles handler failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
