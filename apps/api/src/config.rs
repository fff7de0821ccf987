use anyhow::{Context, Result};

pub const DEFAULT_MONGODB_DATABASE: &str = "resume-tailor";
pub const DEFAULT_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Application configuration loaded from environment variables.
/// Startup aborts if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    /// Optional: hosted inference works anonymously at a lower rate limit.
    pub huggingface_api_token: Option<String>,
    pub inference_base_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            mongodb_uri: require_env("MONGODB_URI")?,
            mongodb_database: optional_env("MONGODB_DATABASE")
                .unwrap_or_else(|| DEFAULT_MONGODB_DATABASE.to_string()),
            huggingface_api_token: optional_env("HUGGINGFACE_API_TOKEN"),
            inference_base_url: optional_env("INFERENCE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_INFERENCE_BASE_URL.to_string()),
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

/// Treats an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
