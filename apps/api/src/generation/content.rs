//! Branded Content Generator: turns topic, brand and analysis into post copy.

use crate::errors::AppError;
use crate::generation::analyzer::{PostingWindow, TopicAnalysis};
use crate::generation::brand::BrandProfile;
use crate::generation::platform::Platform;
use crate::generation::prompts::BRANDED_POST_PROMPT_TEMPLATE;
use crate::llm_client::prompts::{fill_template, POST_ONLY_INSTRUCTION};
use crate::llm_client::TextModel;

fn timing_label(window: PostingWindow) -> &'static str {
    match window {
        PostingWindow::Morning => "morning",
        PostingWindow::Afternoon => "afternoon",
        PostingWindow::Evening => "evening",
        PostingWindow::Anytime => "anytime",
    }
}

/// Fills the branded post template. Pure and deterministic.
pub fn build_branded_prompt(
    topic: &str,
    platform: &Platform,
    analysis: &TopicAnalysis,
    brand: &BrandProfile,
) -> String {
    let key_messages = brand.key_messages.join(", ");
    let trending_list = analysis.trending_tags.join(", ");
    let trending_tags = analysis.trending_tags.join(" ");
    fill_template(
        BRANDED_POST_PROMPT_TEMPLATE,
        &[
            ("post_only_instruction", POST_ONLY_INSTRUCTION),
            ("platform_spec", platform.profile().spec),
            ("platform", platform.as_str()),
            ("company_name", brand.company_name.as_str()),
            ("tone", brand.tone.as_str()),
            ("audience", brand.audience.as_str()),
            ("key_messages", key_messages.as_str()),
            ("urgency_justification", analysis.urgency_justification.as_str()),
            ("trending_list", trending_list.as_str()),
            ("optimal_timing", timing_label(analysis.optimal_timing)),
            ("trending_tags", trending_tags.as_str()),
            ("topic", topic),
        ],
    )
}

/// Generates raw post text. Length and tags are not checked here; the
/// optimizer handles both.
pub async fn generate_branded_content(
    topic: &str,
    platform: &Platform,
    analysis: &TopicAnalysis,
    brand: &BrandProfile,
    llm: &dyn TextModel,
) -> Result<String, AppError> {
    let prompt = build_branded_prompt(topic, platform, analysis, brand);
    let text = llm
        .complete(&prompt)
        .await
        .map_err(|e| AppError::GenerationUnavailable(format!("Post generation failed: {e}")))?;
    Ok(text.trim().to_string())
}
