use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tool {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub owner_id: Uuid,
    pub created_at: OffsetDateTime,
}

/// Tool row joined with the owner's public profile fields, as every
/// listing returns it.
#[derive(Debug, Clone, FromRow)]
pub struct ToolWithOwner {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub owner_id: Uuid,
    pub created_at: OffsetDateTime,
    pub owner_name: String,
    pub owner_email: String,
}

const TOOL_WITH_OWNER_COLS: &str = r#"
    t.id, t.name, t.description, t.image_url, t.owner_id, t.created_at,
    p.full_name AS owner_name, p.email AS owner_email
"#;

/// A tool is visible to its owner and to anyone who shares at least one
/// group with the owner.
const VISIBLE_PRED: &str = r#"
    (t.owner_id = $1 OR EXISTS (
        SELECT 1
        FROM group_members mine
        JOIN group_members theirs ON theirs.group_id = mine.group_id
        WHERE mine.user_id = $1 AND theirs.user_id = t.owner_id
    ))
"#;

pub async fn create(
    db: &PgPool,
    owner_id: Uuid,
    name: &str,
    description: &str,
    image_url: Option<&str>,
) -> anyhow::Result<Tool> {
    let tool = sqlx::query_as::<_, Tool>(
        r#"
        INSERT INTO tools (name, description, image_url, owner_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, description, image_url, owner_id, created_at
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(image_url)
    .bind(owner_id)
    .fetch_one(db)
    .await?;
    Ok(tool)
}

/// Everything the given user may see, newest first.
pub async fn list_visible_to(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<ToolWithOwner>> {
    let sql = format!(
        r#"
        SELECT {TOOL_WITH_OWNER_COLS}
        FROM tools t
        JOIN profiles p ON p.id = t.owner_id
        WHERE {VISIBLE_PRED}
        ORDER BY t.created_at DESC
        "#,
    );
    let rows = sqlx::query_as::<_, ToolWithOwner>(&sql)
        .bind(user_id)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

/// Tools owned by members of one group, newest first.
pub async fn list_by_group(db: &PgPool, group_id: Uuid) -> anyhow::Result<Vec<ToolWithOwner>> {
    let sql = format!(
        r#"
        SELECT {TOOL_WITH_OWNER_COLS}
        FROM tools t
        JOIN profiles p ON p.id = t.owner_id
        WHERE t.owner_id IN (
            SELECT user_id FROM group_members WHERE group_id = $1
        )
        ORDER BY t.created_at DESC
        "#,
    );
    let rows = sqlx::query_as::<_, ToolWithOwner>(&sql)
        .bind(group_id)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn list_by_owner(db: &PgPool, owner_id: Uuid) -> anyhow::Result<Vec<ToolWithOwner>> {
    let sql = format!(
        r#"
        SELECT {TOOL_WITH_OWNER_COLS}
        FROM tools t
        JOIN profiles p ON p.id = t.owner_id
        WHERE t.owner_id = $1
        ORDER BY t.created_at DESC
        "#,
    );
    let rows = sqlx::query_as::<_, ToolWithOwner>(&sql)
        .bind(owner_id)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

/// Single tool, visibility-checked against the viewer. A tool the viewer
/// may not see reads the same as a missing one.
pub async fn find_visible(
    db: &PgPool,
    viewer_id: Uuid,
    tool_id: Uuid,
) -> anyhow::Result<Option<ToolWithOwner>> {
    let sql = format!(
        r#"
        SELECT {TOOL_WITH_OWNER_COLS}
        FROM tools t
        JOIN profiles p ON p.id = t.owner_id
        WHERE t.id = $2 AND {VISIBLE_PRED}
        "#,
    );
    let row = sqlx::query_as::<_, ToolWithOwner>(&sql)
        .bind(viewer_id)
        .bind(tool_id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

/// Partial update, owner-scoped. Returns None when the row does not exist
/// or the caller is not the owner.
pub async fn update(
    db: &PgPool,
    tool_id: Uuid,
    owner_id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
    image_url: Option<&str>,
) -> anyhow::Result<Option<Tool>> {
    let tool = sqlx::query_as::<_, Tool>(
        r#"
        UPDATE tools
        SET name = COALESCE($3, name),
            description = COALESCE($4, description),
            image_url = COALESCE($5, image_url)
        WHERE id = $1 AND owner_id = $2
        RETURNING id, name, description, image_url, owner_id, created_at
        "#,
    )
    .bind(tool_id)
    .bind(owner_id)
    .bind(name)
    .bind(description)
    .bind(image_url)
    .fetch_optional(db)
    .await?;
    Ok(tool)
}

/// Owner-scoped delete. Returns false when nothing was deleted.
pub async fn delete(db: &PgPool, tool_id: Uuid, owner_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM tools
        WHERE id = $1 AND owner_id = $2
        "#,
    )
    .bind(tool_id)
    .bind(owner_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}
