use serde::{Deserialize, Serialize};

use crate::profiles::repo::Profile;
use crate::tools::dto::ToolResponse;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub bio: Option<String>,
}

/// A public profile page: the profile plus the user's tool listings.
#[derive(Debug, Serialize)]
pub struct UserPageResponse {
    pub profile: Profile,
    pub tools: Vec<ToolResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_accepts_bio_only() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"bio":"I lend ladders."}"#).unwrap();
        assert!(req.full_name.is_none());
        assert_eq!(req.bio.as_deref(), Some("I lend ladders."));
    }
}
