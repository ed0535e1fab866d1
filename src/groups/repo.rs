use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MEMBER: &str = "member";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub admin_id: Uuid,
    pub created_at: OffsetDateTime,
}

/// Membership row joined with the member's public profile fields.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MemberWithProfile {
    pub user_id: Uuid,
    pub role: String,
    pub joined_at: OffsetDateTime,
    pub full_name: String,
    pub email: String,
}

/// Create a group and its creator's admin membership in one transaction.
/// If the membership insert fails the group row rolls back with it, so an
/// adminless group cannot exist.
pub async fn create_with_admin(
    db: &PgPool,
    name: &str,
    description: Option<&str>,
    admin_id: Uuid,
) -> anyhow::Result<Group> {
    let mut tx = db.begin().await?;

    let group = sqlx::query_as::<_, Group>(
        r#"
        INSERT INTO groups (name, description, admin_id)
        VALUES ($1, $2, $3)
        RETURNING id, name, description, admin_id, created_at
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(admin_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO group_members (group_id, user_id, role)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(group.id)
    .bind(admin_id)
    .bind(ROLE_ADMIN)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(group)
}

/// Groups the user belongs to. Inner-join semantics: no memberships means
/// an empty list, not an error.
pub async fn list_for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Group>> {
    let rows = sqlx::query_as::<_, Group>(
        r#"
        SELECT g.id, g.name, g.description, g.admin_id, g.created_at
        FROM groups g
        JOIN group_members gm ON gm.group_id = g.id
        WHERE gm.user_id = $1
        ORDER BY g.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find(db: &PgPool, group_id: Uuid) -> anyhow::Result<Option<Group>> {
    let group = sqlx::query_as::<_, Group>(
        r#"
        SELECT id, name, description, admin_id, created_at
        FROM groups
        WHERE id = $1
        "#,
    )
    .bind(group_id)
    .fetch_optional(db)
    .await?;
    Ok(group)
}

pub async fn update(
    db: &PgPool,
    group_id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
) -> anyhow::Result<Option<Group>> {
    let group = sqlx::query_as::<_, Group>(
        r#"
        UPDATE groups
        SET name = COALESCE($2, name),
            description = COALESCE($3, description)
        WHERE id = $1
        RETURNING id, name, description, admin_id, created_at
        "#,
    )
    .bind(group_id)
    .bind(name)
    .bind(description)
    .fetch_optional(db)
    .await?;
    Ok(group)
}

pub async fn members_with_profiles(
    db: &PgPool,
    group_id: Uuid,
) -> anyhow::Result<Vec<MemberWithProfile>> {
    let rows = sqlx::query_as::<_, MemberWithProfile>(
        r#"
        SELECT gm.user_id, gm.role, gm.joined_at, p.full_name, p.email
        FROM group_members gm
        JOIN profiles p ON p.id = gm.user_id
        WHERE gm.group_id = $1
        ORDER BY gm.joined_at ASC
        "#,
    )
    .bind(group_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn is_member(db: &PgPool, group_id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM group_members
            WHERE group_id = $1 AND user_id = $2
        )
        "#,
    )
    .bind(group_id)
    .bind(user_id)
    .fetch_one(db)
    .await?;
    Ok(exists)
}

/// Raw membership insert. Unique-violation handling is the caller's job;
/// the sqlx error is passed through untranslated for that reason.
pub async fn insert_member(
    db: &PgPool,
    group_id: Uuid,
    user_id: Uuid,
    role: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO group_members (group_id, user_id, role)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(group_id)
    .bind(user_id)
    .bind(role)
    .execute(db)
    .await?;
    Ok(())
}
