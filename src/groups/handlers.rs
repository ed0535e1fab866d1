use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::services::AuthUser,
    groups::{
        dto::{CreateGroupRequest, InviteRequest, InviteResponse, UpdateGroupRequest},
        repo::{self, Group, MemberWithProfile},
        services::{invite_by_email, InviteError},
    },
    state::AppState,
    tools,
};

pub fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/groups", get(list_groups).post(create_group))
        .route(
            "/groups/:id",
            get(get_group).patch(update_group),
        )
        .route(
            "/groups/:id/members",
            get(list_members).post(invite_member),
        )
        .route("/groups/:id/tools", get(list_group_tools))
}

/// GET /groups — the caller's groups.
#[instrument(skip(state))]
pub async fn list_groups(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Group>>, (StatusCode, String)> {
    let groups = repo::list_for_user(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(groups))
}

#[instrument(skip(state, payload))]
pub async fn create_group(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), (StatusCode, String)> {
    let name = payload.name.trim();
    if name.is_empty() {
        warn!("empty group name");
        return Err((StatusCode::BAD_REQUEST, "Group name is required".into()));
    }

    let group = repo::create_with_admin(&state.db, name, payload.description.as_deref(), user_id)
        .await
        .map_err(internal)?;

    info!(group_id = %group.id, admin_id = %user_id, "group created");
    Ok((StatusCode::CREATED, Json(group)))
}

/// GET /groups/:id — member-only; non-members get the same 404 as a
/// missing group.
#[instrument(skip(state))]
pub async fn get_group(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Group>, (StatusCode, String)> {
    let group = member_only_group(&state, id, user_id).await?;
    Ok(Json(group))
}

/// PATCH /groups/:id — admin-only partial update of name/description.
#[instrument(skip(state, payload))]
pub async fn update_group(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGroupRequest>,
) -> Result<Json<Group>, (StatusCode, String)> {
    let group = repo::find(&state.db, id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Group not found".to_string()))?;

    if group.admin_id != user_id {
        warn!(group_id = %id, %user_id, "non-admin group update attempt");
        return Err((
            StatusCode::FORBIDDEN,
            "You do not have permission to update this group".into(),
        ));
    }

    let updated = repo::update(
        &state.db,
        id,
        payload.name.as_deref().map(str::trim),
        payload.description.as_deref(),
    )
    .await
    .map_err(internal)?
    .ok_or((StatusCode::NOT_FOUND, "Group not found".to_string()))?;

    Ok(Json(updated))
}

/// GET /groups/:id/members — membership rows with profile fields.
#[instrument(skip(state))]
pub async fn list_members(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MemberWithProfile>>, (StatusCode, String)> {
    member_only_group(&state, id, user_id).await?;
    let members = repo::members_with_profiles(&state.db, id)
        .await
        .map_err(internal)?;
    Ok(Json(members))
}

/// POST /groups/:id/members — admin invites an existing account by email.
#[instrument(skip(state, payload))]
pub async fn invite_member(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<InviteRequest>,
) -> Result<(StatusCode, Json<InviteResponse>), (StatusCode, String)> {
    let group = repo::find(&state.db, id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Group not found".to_string()))?;

    if group.admin_id != user_id {
        warn!(group_id = %id, %user_id, "non-admin invite attempt");
        return Err((
            StatusCode::FORBIDDEN,
            "You do not have permission to invite users to this group".into(),
        ));
    }

    let email = payload.email.trim().to_lowercase();
    match invite_by_email(&state.db, id, &email).await {
        Ok(()) => Ok((
            StatusCode::CREATED,
            Json(InviteResponse {
                message: "User invited successfully".into(),
            }),
        )),
        Err(e @ InviteError::UserNotFound) => Err((StatusCode::NOT_FOUND, e.to_string())),
        Err(e @ InviteError::AlreadyMember) => Err((StatusCode::CONFLICT, e.to_string())),
        Err(InviteError::Other(e)) => Err(internal(e)),
    }
}

/// GET /groups/:id/tools — tools owned by the group's members.
#[instrument(skip(state))]
pub async fn list_group_tools(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<tools::dto::ToolResponse>>, (StatusCode, String)> {
    member_only_group(&state, id, user_id).await?;
    let rows = tools::repo::list_by_group(&state.db, id)
        .await
        .map_err(internal)?;
    Ok(Json(
        rows.into_iter().map(tools::dto::ToolResponse::from).collect(),
    ))
}

/// Fetch a group the caller belongs to, concealing existence otherwise.
async fn member_only_group(
    state: &AppState,
    group_id: Uuid,
    user_id: Uuid,
) -> Result<Group, (StatusCode, String)> {
    let group = repo::find(&state.db, group_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Group not found".to_string()))?;

    if !repo::is_member(&state.db, group_id, user_id)
        .await
        .map_err(internal)?
    {
        return Err((StatusCode::NOT_FOUND, "Group not found".to_string()));
    }

    Ok(group)
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "groups handler failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
