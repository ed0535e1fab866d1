use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, instrument, warn};
use uuid::Uuid;

use crate::{auth::services::AuthUser, state::AppState, tools::repo};

use super::dto::{CreateToolRequest, ToolResponse, UpdateToolRequest, UploadImageResponse};
use super::services::{upload_tool_image, UploadItem};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/tools", get(list_tools))
        .route("/tools/:id", get(get_tool))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/tools", post(create_tool))
        .route(
            "/tools/:id",
            axum::routing::patch(update_tool).delete(delete_tool),
        )
        .route("/tools/images", post(upload_image))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024)) // 10MB
}

/// GET /tools — everything visible to the caller, newest first.
#[instrument(skip(state))]
pub async fn list_tools(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ToolResponse>>, (StatusCode, String)> {
    let rows = repo::list_visible_to(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(rows.into_iter().map(ToolResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_tool(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ToolResponse>, (StatusCode, String)> {
    let tool = repo::find_visible(&state.db, user_id, id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Tool not found".to_string()))?;
    Ok(Json(ToolResponse::from(tool)))
}

#[instrument(skip(state, payload))]
pub async fn create_tool(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateToolRequest>,
) -> Result<(StatusCode, Json<repo::Tool>), (StatusCode, String)> {
    let name = payload.name.trim();
    if name.is_empty() {
        warn!("empty tool name");
        return Err((StatusCode::BAD_REQUEST, "Tool name is required".into()));
    }

    let tool = repo::create(
        &state.db,
        user_id,
        name,
        payload.description.trim(),
        payload.image_url.as_deref(),
    )
    .await
    .map_err(internal)?;

    Ok((StatusCode::CREATED, Json(tool)))
}

#[instrument(skip(state, payload))]
pub async fn update_tool(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateToolRequest>,
) -> Result<Json<repo::Tool>, (StatusCode, String)> {
    let tool = repo::update(
        &state.db,
        id,
        user_id,
        payload.name.as_deref(),
        payload.description.as_deref(),
        payload.image_url.as_deref(),
    )
    .await
    .map_err(internal)?
    .ok_or((StatusCode::NOT_FOUND, "Tool not found".to_string()))?;
    Ok(Json(tool))
}

#[instrument(skip(state))]
pub async fn delete_tool(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = repo::delete(&state.db, id, user_id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Tool not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /tools/images (multipart, field "file") → public URL of the object.
#[instrument(skip(state, mp))]
pub async fn upload_image(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut mp: Multipart,
) -> Result<Json<UploadImageResponse>, (StatusCode, String)> {
    tracing::debug!(%user_id, "tool image upload");
    let mut image: Option<UploadItem> = None;
    while let Ok(Some(field)) = mp.next_field().await {
        let name = field.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".into());
            let data = field
                .bytes()
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
            image = Some(UploadItem {
                body: data,
                content_type,
            });
            break;
        }
    }

    let Some(image) = image else {
        return Err((StatusCode::BAD_REQUEST, "file field is required".into()));
    };

    let url = upload_tool_image(&state, image).await.map_err(internal)?;
    Ok(Json(UploadImageResponse { url }))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "tools handler failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
