// Content generation pipeline.
// Implements: topic analysis, branded copy, post optimization, visual selection.
// All text-model calls go through llm_client. No direct Gemini calls here.

pub mod analyzer;
pub mod brand;
pub mod content;
pub mod handlers;
pub mod optimizer;
pub mod pipeline;
pub mod platform;
pub mod prompts;
pub mod visuals;

#[cfg(test)]
pub(crate) mod test_support;
