use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Brand attributes woven into every prompt. Loaded once at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandProfile {
    pub company_name: String,
    pub colors: Vec<String>,
    pub tone: String,
    pub audience: String,
    pub key_messages: Vec<String>,
}

impl Default for BrandProfile {
    fn default() -> Self {
        Self {
            company_name: "Your Company".to_string(),
            colors: vec![
                "#4285f4".to_string(),
                "#34a853".to_string(),
                "#ea4335".to_string(),
                "#fbbc05".to_string(),
            ],
            tone: "professional yet approachable".to_string(),
            audience: "tech professionals and businesses".to_string(),
            key_messages: vec![
                "Innovation through automation".to_string(),
                "Empowering teams with AI".to_string(),
                "Simplifying complex workflows".to_string(),
            ],
        }
    }
}

impl BrandProfile {
    /// Reads a brand profile from a JSON file, or returns the built-in
    /// profile when no path is configured.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read brand profile {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Brand profile {} is not valid JSON", path.display()))
    }
}
