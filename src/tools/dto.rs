use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::tools::repo::ToolWithOwner;

#[derive(Debug, Deserialize)]
pub struct CreateToolRequest {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateToolRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Owner fields attached to every listed tool.
#[derive(Debug, Serialize)]
pub struct ToolOwner {
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ToolResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub owner_id: Uuid,
    pub created_at: OffsetDateTime,
    pub owner: ToolOwner,
}

impl From<ToolWithOwner> for ToolResponse {
    fn from(t: ToolWithOwner) -> Self {
        Self {
            id: t.id,
            name: t.name,
            description: t.description,
            image_url: t.image_url,
            owner_id: t.owner_id,
            created_at: t.created_at,
            owner: ToolOwner {
                full_name: t.owner_name,
                email: t.owner_email,
            },
        }
    }
}

/// Response for an image upload: the stable public URL of the object.
#[derive(Debug, Serialize)]
pub struct UploadImageResponse {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_image_url_is_optional() {
        let req: CreateToolRequest =
            serde_json::from_str(r#"{"name":"Ladder","description":"3m aluminium"}"#).unwrap();
        assert_eq!(req.name, "Ladder");
        assert!(req.image_url.is_none());
    }

    #[test]
    fn tool_response_nests_owner_fields() {
        let row = ToolWithOwner {
            id: Uuid::new_v4(),
            name: "Drill".into(),
            description: "Cordless".into(),
            image_url: None,
            owner_id: Uuid::new_v4(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            owner_name: "Alice Example".into(),
            owner_email: "alice@example.com".into(),
        };
        let json = serde_json::to_value(ToolResponse::from(row)).unwrap();
        assert_eq!(json["owner"]["full_name"], "Alice Example");
        assert_eq!(json["owner"]["email"], "alice@example.com");
        assert!(json["image_url"].is_null());
    }
}
