use anyhow::Context;
use bytes::Bytes;
use uuid::Uuid;

use crate::state::AppState;

pub struct UploadItem {
    pub body: Bytes,
    pub content_type: String,
}

/// Store one tool image under a randomized key and return its public URL.
/// Collisions on the random key are treated as negligible; there is no
/// retry.
pub async fn upload_tool_image(st: &AppState, image: UploadItem) -> anyhow::Result<String> {
    anyhow::ensure!(!image.body.is_empty(), "empty image body");

    let ext = ext_from_mime(&image.content_type).unwrap_or("bin");
    let key = object_key(ext);
    st.storage
        .put_object(&key, image.body, &image.content_type)
        .await
        .with_context(|| format!("put_object {}", key))?;

    Ok(st.storage.public_url(&key))
}

fn object_key(ext: &str) -> String {
    format!("tool-images/{}.{}", Uuid::new_v4(), ext)
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

#[cfg(test)]
mod upload_tests {
    use super::*;
    use crate::state::AppState;

    #[test]
    fn test_ext_from_mime() {
        assert_eq!(ext_from_mime("image/jpeg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/jpg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/png"), Some("png"));
        assert_eq!(ext_from_mime("image/webp"), Some("webp"));
        assert_eq!(ext_from_mime("image/heic"), Some("heic"));
        assert_eq!(ext_from_mime("application/octet-stream"), None);
        assert_eq!(ext_from_mime("whatever/else"), None);
    }

    #[test]
    fn object_keys_are_randomized_and_keep_extension() {
        let a = object_key("png");
        let b = object_key("png");
        assert_ne!(a, b);
        assert!(a.starts_with("tool-images/"));
        assert!(a.ends_with(".png"));
    }

    #[tokio::test]
    async fn upload_returns_public_url() {
        let state = AppState::fake();
        let url = upload_tool_image(
            &state,
            UploadItem {
                body: Bytes::from_static(b"fake image bytes"),
                content_type: "image/webp".into(),
            },
        )
        .await
        .unwrap();
        assert!(url.starts_with("https://fake.local/tool-images/"));
        assert!(url.ends_with(".webp"));
    }

    #[tokio::test]
    async fn upload_rejects_empty_body() {
        let state = AppState::fake();
        let err = upload_tool_image(
            &state,
            UploadItem {
                body: Bytes::new(),
                content_type: "image/png".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("empty image body"));
    }
}
