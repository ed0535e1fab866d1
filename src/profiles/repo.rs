use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Public profile row, one-to-one with a user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub updated_at: OffsetDateTime,
}

impl Profile {
    pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, email, full_name, bio, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(profile)
    }

    /// Exact-match email lookup, used when resolving invitations.
    pub async fn id_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM profiles WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(id)
    }

    /// Partial update of the owner-editable fields.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        full_name: Option<&str>,
        bio: Option<&str>,
    ) -> anyhow::Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET full_name = COALESCE($2, full_name),
                bio = COALESCE($3, bio),
                updated_at = now()
            WHERE id = $1
            RETURNING id, email, full_name, bio, updated_at
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(bio)
        .fetch_optional(db)
        .await?;
        Ok(profile)
    }
}
