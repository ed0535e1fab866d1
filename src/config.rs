use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub minio_endpoint: String,
    pub minio_bucket: String,
    pub minio_access_key: String,
    pub minio_secret_key: String,
    /// Base under which uploaded objects are publicly reachable,
    /// e.g. "https://cdn.example.com/tool-images".
    pub minio_public_url: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "toolshed".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "toolshed-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        let minio_endpoint = std::env::var("MINIO_ENDPOINT")?;
        let minio_bucket =
            std::env::var("MINIO_BUCKET").unwrap_or_else(|_| "tool-images".into());
        let minio_access_key = std::env::var("MINIO_ACCESS_KEY")?;
        let minio_secret_key = std::env::var("MINIO_SECRET_KEY")?;
        let minio_public_url = std::env::var("MINIO_PUBLIC_URL")
            .unwrap_or_else(|_| format!("{}/{}", minio_endpoint, minio_bucket));
        Ok(Self {
            database_url,
            jwt,
            minio_endpoint,
            minio_bucket,
            minio_access_key,
            minio_secret_key,
            minio_public_url,
        })
    }
}
