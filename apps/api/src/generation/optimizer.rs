//! Post Optimizer: pure post-processing of generated copy.
//!
//! Order is fixed: trending tags, call-to-action variant, length cap.
//! The call-to-action variant is computed and returned but `final` is always
//! the trending variant (optionally truncated). Callers that want the CTA must
//! pick `with_call_to_action` explicitly.

use serde::Serialize;

use crate::generation::analyzer::{Engagement, TopicAnalysis};
use crate::generation::platform::Platform;

/// At most this many trending tags are appended.
const MAX_TRENDING_TAGS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedVariants {
    pub with_trending: String,
    pub with_call_to_action: String,
    #[serde(rename = "final")]
    pub final_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub raw_text: String,
    pub optimized_variants: OptimizedVariants,
}

impl GeneratedContent {
    /// The text callers publish.
    pub fn final_text(&self) -> &str {
        &self.optimized_variants.final_text
    }
}

/// Rough reach figures derived from the relevance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictedMetrics {
    pub engagement: Engagement,
    pub reach: u32,
    pub clicks: u32,
    pub shares: u32,
}

impl PredictedMetrics {
    pub fn from_analysis(analysis: &TopicAnalysis) -> Self {
        let score = u32::from(analysis.relevance_score);
        Self {
            engagement: analysis.estimated_engagement,
            reach: score * 1000,
            clicks: score * 50,
            shares: score * 10,
        }
    }
}

pub fn add_trending_tags(text: &str, analysis: &TopicAnalysis) -> String {
    if analysis.trending_tags.is_empty() {
        return text.to_string();
    }
    let tags = analysis
        .trending_tags
        .iter()
        .take(MAX_TRENDING_TAGS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    format!("{text}\n\n{tags}")
}

pub fn add_call_to_action(text: &str, platform: &Platform) -> String {
    format!("{text}\n\n{}", platform.profile().call_to_action)
}

/// Caps `text` at `limit` characters using whole lines only.
///
/// Lines are taken from the top while the running length, separators
/// included, stays within the limit. A line is never cut; if the first line
/// alone is too long the result is empty.
pub fn truncate_whole_lines(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let mut result = String::new();
    let mut length = 0usize;
    for (i, line) in text.split('\n').enumerate() {
        let added = line.chars().count() + usize::from(i > 0);
        if length + added > limit {
            break;
        }
        if i > 0 {
            result.push('\n');
        }
        result.push_str(line);
        length += added;
    }
    result
}

pub fn optimize(text: &str, platform: &Platform, analysis: &TopicAnalysis) -> GeneratedContent {
    let with_trending = add_trending_tags(text, analysis);
    let with_call_to_action = add_call_to_action(text, platform);

    let final_text = match platform.char_limit() {
        Some(limit) => truncate_whole_lines(&with_trending, limit),
        None => with_trending.clone(),
    };

    GeneratedContent {
        raw_text: text.to_string(),
        optimized_variants: OptimizedVariants {
            with_trending,
            with_call_to_action,
            final_text,
        },
    }
}
