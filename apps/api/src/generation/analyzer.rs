//! Topic Analyzer: asks the text model how a topic will land on social media.
//!
//! Never fails from the caller's point of view: `try_analyze` returns a
//! `Result<TopicAnalysis, AnalysisError>` and `analyze` collapses any error to
//! one of two fixed fallback analyses.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::generation::platform::Urgency;
use crate::generation::prompts::ANALYSIS_PROMPT_TEMPLATE;
use crate::llm_client::json_extract::first_balanced_object;
use crate::llm_client::prompts::{fill_template, JSON_OBJECT_INSTRUCTION};
use crate::llm_client::{LlmError, TextModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engagement {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingWindow {
    Morning,
    Afternoon,
    Evening,
    Anytime,
}

/// Structured judgement of a topic. Produced once per request, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicAnalysis {
    /// 1 – 10
    pub relevance_score: u8,
    pub trending_tags: Vec<String>,
    pub estimated_engagement: Engagement,
    pub competitor_insight: String,
    pub urgency_justification: String,
    pub optimal_timing: PostingWindow,
}

impl TopicAnalysis {
    /// Used when the model replied but no usable JSON object was found.
    pub fn unparseable_fallback() -> Self {
        Self {
            relevance_score: 7,
            trending_tags: vec!["#AI".into(), "#Automation".into(), "#Tech".into()],
            estimated_engagement: Engagement::Medium,
            competitor_insight: "Standard industry posting".into(),
            urgency_justification: "Regular business content".into(),
            optimal_timing: PostingWindow::Afternoon,
        }
    }

    /// Used when the model call itself failed.
    pub fn unavailable_fallback() -> Self {
        Self {
            relevance_score: 6,
            trending_tags: vec!["#Innovation".into(), "#Business".into()],
            estimated_engagement: Engagement::Medium,
            competitor_insight: "Limited data available".into(),
            urgency_justification: "Standard timing".into(),
            optimal_timing: PostingWindow::Anytime,
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis model call failed: {0}")]
    Unavailable(#[from] LlmError),

    #[error("analysis response contained no JSON object")]
    NoJsonObject,

    #[error("analysis JSON did not match the schema: {0}")]
    Schema(String),
}

/// Shape the model is asked to return. Enum fields stay strings here so that
/// casing differences can be normalised before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisReply {
    relevance_score: f64,
    #[serde(default)]
    trending: Vec<String>,
    estimated_engagement: String,
    #[serde(default)]
    competitor_insights: String,
    #[serde(default)]
    urgency_justification: String,
    optimal_timing: String,
}

impl TryFrom<AnalysisReply> for TopicAnalysis {
    type Error = AnalysisError;

    fn try_from(reply: AnalysisReply) -> Result<Self, Self::Error> {
        let score = reply.relevance_score.round();
        if !(1.0..=10.0).contains(&score) {
            return Err(AnalysisError::Schema(format!(
                "relevanceScore {} outside 1-10",
                reply.relevance_score
            )));
        }

        Ok(TopicAnalysis {
            relevance_score: score as u8,
            trending_tags: reply
                .trending
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            estimated_engagement: parse_lowercase_enum(
                "estimatedEngagement",
                &reply.estimated_engagement,
            )?,
            competitor_insight: reply.competitor_insights,
            urgency_justification: reply.urgency_justification,
            optimal_timing: parse_lowercase_enum("optimalTiming", &reply.optimal_timing)?,
        })
    }
}

fn parse_lowercase_enum<T: serde::de::DeserializeOwned>(
    field: &str,
    value: &str,
) -> Result<T, AnalysisError> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_lowercase()))
        .map_err(|_| AnalysisError::Schema(format!("{field} has unexpected value {value:?}")))
}

/// Decodes the first JSON object in a model reply into a `TopicAnalysis`.
pub fn decode_analysis(reply: &str) -> Result<TopicAnalysis, AnalysisError> {
    let object = first_balanced_object(reply).ok_or(AnalysisError::NoJsonObject)?;
    let parsed: AnalysisReply =
        serde_json::from_str(object).map_err(|e| AnalysisError::Schema(e.to_string()))?;
    parsed.try_into()
}

pub fn build_analysis_prompt(topic: &str, urgency: Urgency) -> String {
    let urgency = urgency.to_string();
    fill_template(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("json_instruction", JSON_OBJECT_INSTRUCTION),
            ("urgency", urgency.as_str()),
            ("topic", topic),
        ],
    )
}

/// Calls the model and decodes its reply, surfacing every failure.
pub async fn try_analyze(
    topic: &str,
    urgency: Urgency,
    llm: &dyn TextModel,
) -> Result<TopicAnalysis, AnalysisError> {
    let reply = llm.complete(&build_analysis_prompt(topic, urgency)).await?;
    decode_analysis(reply.trim())
}

/// Analyzes a topic, substituting a fixed fallback on any failure.
pub async fn analyze(topic: &str, urgency: Urgency, llm: &dyn TextModel) -> TopicAnalysis {
    match try_analyze(topic, urgency, llm).await {
        Ok(analysis) => {
            debug!("Topic analysis: relevance={}", analysis.relevance_score);
            analysis
        }
        Err(e @ AnalysisError::Unavailable(_)) => {
            warn!("Using fallback analysis: {e}");
            TopicAnalysis::unavailable_fallback()
        }
        Err(e) => {
            warn!("Using fallback analysis: {e}");
            TopicAnalysis::unparseable_fallback()
        }
    }
}
