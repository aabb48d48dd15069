use anyhow::{Context, Result};

/// Connection settings for the object store.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub region: String,
    /// Custom endpoint (MinIO / LocalStack). `None` talks to AWS directly.
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl S3Settings {
    pub fn from_env() -> Self {
        S3Settings {
            region: optional_env("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            endpoint: optional_env("S3_ENDPOINT"),
            access_key_id: optional_env("AWS_ACCESS_KEY_ID"),
            secret_access_key: optional_env("AWS_SECRET_ACCESS_KEY"),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub s3: S3Settings,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            s3: S3Settings::from_env(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: log_level(),
        })
    }
}

/// Settings for the test-data uploader.
#[derive(Debug, Clone)]
pub struct UploaderConfig {
    pub s3: S3Settings,
    /// Target bucket; empty when `BUCKET_NAME` is unset.
    pub bucket_name: String,
    pub rust_log: String,
}

impl UploaderConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        UploaderConfig {
            s3: S3Settings::from_env(),
            bucket_name: std::env::var("BUCKET_NAME").unwrap_or_default(),
            rust_log: log_level(),
        }
    }
}

pub fn log_level() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}

/// Reads a variable, treating unset and empty values alike.
pub fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
