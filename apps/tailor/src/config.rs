use anyhow::{Context, Result};

/// Default generateContent endpoint. Override with GEMINI_API_URL.
const DEFAULT_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-exp:generateContent";

/// Application configuration loaded from environment variables.
/// The API key is the only required value; it is checked for presence only,
/// never for validity. A bad key surfaces as an API error at call time.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_key: require_env("GEMINI_API_KEY")?,
            api_url: std::env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
