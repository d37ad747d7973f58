use anyhow::{Context, Result};

/// Application configuration loaded from environment variables at startup
/// and passed explicitly into each collaborator. Nothing reads the
/// environment after this point.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    /// Base under which stored objects are publicly resolvable. Defaults to
    /// `<s3_endpoint>/<s3_bucket>` for MinIO-style path addressing.
    pub media_public_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let s3_bucket = require_env("S3_BUCKET")?;
        let s3_endpoint = require_env("S3_ENDPOINT")?;
        let media_public_url = std::env::var("MEDIA_PUBLIC_URL").unwrap_or_else(|_| {
            format!("{}/{}", s3_endpoint.trim_end_matches('/'), s3_bucket)
        });

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a number")?,
            s3_bucket,
            s3_endpoint,
            media_public_url,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
