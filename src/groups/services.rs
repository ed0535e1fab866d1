use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::groups::repo::{self, ROLE_MEMBER};
use crate::profiles::repo::Profile;

/// Outcomes of inviting an email address into a group. The unique-violation
/// case is the one store error the application translates into a domain
/// message instead of passing through.
#[derive(Debug, Error)]
pub enum InviteError {
    #[error("User not found. Please ask them to sign up first.")]
    UserNotFound,
    #[error("User is already a member of this group.")]
    AlreadyMember,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Resolve an email to an existing profile and add it as a member.
pub async fn invite_by_email(
    db: &PgPool,
    group_id: Uuid,
    email: &str,
) -> Result<(), InviteError> {
    let user_id = Profile::id_by_email(db, email)
        .await
        .map_err(InviteError::Other)?
        .ok_or(InviteError::UserNotFound)?;

    match repo::insert_member(db, group_id, user_id, ROLE_MEMBER).await {
        Ok(()) => {
            info!(%group_id, %user_id, "member invited");
            Ok(())
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(InviteError::AlreadyMember)
        }
        Err(e) => Err(InviteError::Other(e.into())),
    }
}

#[cfg(test)]
mod invite_error_tests {
    use super::*;

    #[test]
    fn messages_match_the_client_facing_wording() {
        assert_eq!(
            InviteError::UserNotFound.to_string(),
            "User not found. Please ask them to sign up first."
        );
        assert_eq!(
            InviteError::AlreadyMember.to_string(),
            "User is already a member of this group."
        );
    }

    #[test]
    fn other_errors_pass_their_message_through() {
        let err = InviteError::Other(anyhow::anyhow!("connection reset"));
        assert_eq!(err.to_string(), "connection reset");
    }
}
