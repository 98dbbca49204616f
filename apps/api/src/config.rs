use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_IMAGE_ENDPOINT: &str = "https://image.pollinations.ai/prompt";
const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Application configuration loaded from environment variables.
/// Start-up fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_api_url: String,
    /// Base URL of the text-to-image endpoint. `None` disables AI images.
    pub image_endpoint: Option<String>,
    pub assets_dir: PathBuf,
    pub brand_profile_path: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` is the
    /// production entry point; this exists so the parsing rules stay testable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        Ok(Config {
            google_api_key: require("GOOGLE_API_KEY")?,
            gemini_api_url: lookup("GEMINI_API_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string()),
            image_endpoint: match lookup("IMAGE_ENDPOINT") {
                // Explicitly empty means "no AI images"
                Some(v) if v.trim().is_empty() => None,
                Some(v) => Some(v),
                None => Some(DEFAULT_IMAGE_ENDPOINT.to_string()),
            },
            assets_dir: lookup("ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("company-assets")),
            brand_profile_path: lookup("BRAND_PROFILE_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
