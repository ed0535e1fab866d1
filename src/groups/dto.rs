use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct InviteResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_description_is_optional() {
        let req: CreateGroupRequest = serde_json::from_str(r#"{"name":"Garage"}"#).unwrap();
        assert_eq!(req.name, "Garage");
        assert!(req.description.is_none());
    }

    #[test]
    fn update_request_accepts_partial_bodies() {
        let req: UpdateGroupRequest =
            serde_json::from_str(r#"{"description":"Street tool pool"}"#).unwrap();
        assert!(req.name.is_none());
        assert_eq!(req.description.as_deref(), Some("Street tool pool"));
    }
}
