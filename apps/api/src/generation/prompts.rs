// All text-model prompt templates for the generation pipeline.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Topic analysis prompt template.
/// Replace: {topic}, {urgency}, {json_instruction}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this topic for social media posting: "{topic}"

Urgency level: {urgency}

Provide analysis in JSON format:
{
    "relevanceScore": 1-10,
    "trending": ["hashtag1", "hashtag2", "hashtag3"],
    "estimatedEngagement": "low|medium|high",
    "competitorInsights": "brief analysis of what competitors might be doing",
    "urgencyJustification": "why this urgency level makes sense",
    "optimalTiming": "morning|afternoon|evening|anytime"
}

Focus on tech, automation, and business relevance.
{json_instruction}"#;

/// Branded post prompt template.
/// Replace: {platform}, {topic}, {company_name}, {tone}, {audience},
///          {key_messages}, {urgency_justification}, {trending_list},
///          {optimal_timing}, {platform_spec}, {trending_tags}, {post_only_instruction}
pub const BRANDED_POST_PROMPT_TEMPLATE: &str = r#"Create a {platform} post about: {topic}

BRAND GUIDELINES:
- Company: {company_name}
- Tone: {tone}
- Target: {audience}
- Key Messages: {key_messages}

REAL-TIME CONTEXT:
- Urgency: {urgency_justification}
- Trending: {trending_list}
- Optimal timing: {optimal_timing}

PLATFORM SPECS:
{platform_spec}

Create engaging, on-brand content that feels authentic to our company voice.
Include relevant trending hashtags: {trending_tags}

{post_only_instruction}"#;

/// Image prompt template sent (URL-encoded) to the text-to-image endpoint.
/// Replace: {platform}, {company_name}, {topic}, {tone}, {colors}, {width}, {height}
pub const IMAGE_PROMPT_TEMPLATE: &str = r#"Professional {platform} image for {company_name} about: {topic}

Style: {tone}, modern, clean
Colors: {colors}
Dimensions: {width}x{height}
Elements: Subtle company branding, professional typography
Mood: Innovative, trustworthy, engaging"#;
