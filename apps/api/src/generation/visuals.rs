//! Visual Selector: pairs a post with a catalogued company image and an
//! AI-image reference URL.
//!
//! Local selection always recommends the first catalogued image; there is no
//! relevance ranking. The AI reference is a URL built against a stateless
//! text-to-image endpoint; it is never fetched here, so there is no guarantee
//! it resolves.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::assets::AssetListing;
use crate::generation::brand::BrandProfile;
use crate::generation::platform::Platform;
use crate::generation::prompts::IMAGE_PROMPT_TEMPLATE;
use crate::llm_client::prompts::fill_template;

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const IMAGE_SERVICE: &str = "pollinations";

#[derive(Debug, Error)]
pub enum VisualError {
    #[error("AI image generation is disabled")]
    Disabled,

    #[error("invalid image endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiImageRef {
    pub url: String,
    pub prompt_used: String,
    pub service: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualBundle {
    /// Recommended company image, if any are catalogued.
    pub local_asset_ref: Option<String>,
    pub ai_generated_ref: Option<AiImageRef>,
    pub company_images: Vec<String>,
    pub logos: Vec<String>,
}

/// Builds fetchable text-to-image URLs. `None` endpoint means disabled.
#[derive(Debug, Clone)]
pub struct ImageReferenceBuilder {
    endpoint: Option<String>,
}

impl ImageReferenceBuilder {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint: endpoint.map(|e| e.trim_end_matches('/').to_string()),
        }
    }

    pub fn build(&self, prompt: &str, width: u32, height: u32) -> Result<String, VisualError> {
        let endpoint = self.endpoint.as_deref().ok_or(VisualError::Disabled)?;
        let encoded = utf8_percent_encode(prompt, URI_COMPONENT).to_string();
        let raw = format!("{endpoint}/{encoded}?width={width}&height={height}&nologo=true");

        Url::parse(&raw).map_err(|e| VisualError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        Ok(raw)
    }
}

pub fn build_image_prompt(topic: &str, platform: &Platform, brand: &BrandProfile) -> String {
    let profile = platform.profile();
    let colors = brand.colors.join(", ");
    let width = profile.image_width.to_string();
    let height = profile.image_height.to_string();
    fill_template(
        IMAGE_PROMPT_TEMPLATE,
        &[
            ("platform", platform.as_str()),
            ("width", width.as_str()),
            ("height", height.as_str()),
            ("company_name", brand.company_name.as_str()),
            ("tone", brand.tone.as_str()),
            ("colors", colors.as_str()),
            ("topic", topic),
        ],
    )
}

/// Builds the AI image reference, surfacing why it could not be built.
pub fn try_ai_image(
    topic: &str,
    platform: &Platform,
    brand: &BrandProfile,
    images: &ImageReferenceBuilder,
) -> Result<AiImageRef, VisualError> {
    let prompt = build_image_prompt(topic, platform, brand);
    let profile = platform.profile();
    let url = images.build(&prompt, profile.image_width, profile.image_height)?;
    Ok(AiImageRef {
        url,
        prompt_used: prompt,
        service: IMAGE_SERVICE.to_string(),
    })
}

/// Assembles the visual bundle. Never fails; an AI reference that cannot be
/// built is simply absent.
pub fn select_visuals(
    topic: &str,
    platform: &Platform,
    local_assets: AssetListing,
    brand: &BrandProfile,
    images: &ImageReferenceBuilder,
) -> VisualBundle {
    let ai_generated_ref = match try_ai_image(topic, platform, brand, images) {
        Ok(image) => Some(image),
        Err(e) => {
            warn!("AI image skipped: {e}");
            None
        }
    };

    VisualBundle {
        local_asset_ref: local_assets.images.first().cloned(),
        ai_generated_ref,
        company_images: local_assets.images,
        logos: local_assets.logos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "https://image.pollinations.ai/prompt";

    fn builder() -> ImageReferenceBuilder {
        ImageReferenceBuilder::new(Some(ENDPOINT.to_string()))
    }

    #[test]
    fn test_empty_catalog_still_builds_ai_reference() {
        let bundle = select_visuals(
            "Fresh bread",
            &Platform::Twitter,
            AssetListing::default(),
            &BrandProfile::default(),
            &builder(),
        );
        assert!(bundle.local_asset_ref.is_none());
        let ai = bundle.ai_generated_ref.expect("AI reference should be built");
        assert!(ai.url.starts_with("https://image.pollinations.ai/prompt/Professional%20twitter%20image"));
        assert!(ai.url.ends_with("?width=1200&height=675&nologo=true"));
        assert_eq!(ai.service, "pollinations");
    }

    #[test]
    fn test_first_catalogued_image_is_recommended() {
        let listing = AssetListing {
            images: vec!["/assets/a.png".into(), "/assets/b.png".into()],
            logos: vec!["/assets/logo.png".into()],
        };
        let bundle = select_visuals(
            "t",
            &Platform::Instagram,
            listing,
            &BrandProfile::default(),
            &builder(),
        );
        assert_eq!(bundle.local_asset_ref.as_deref(), Some("/assets/a.png"));
        assert_eq!(bundle.company_images.len(), 2);
        assert_eq!(bundle.logos, vec!["/assets/logo.png"]);
    }

    #[test]
    fn test_dimensions_follow_platform() {
        let bundle = select_visuals(
            "t",
            &Platform::Instagram,
            AssetListing::default(),
            &BrandProfile::default(),
            &builder(),
        );
        let ai = bundle.ai_generated_ref.unwrap();
        assert!(ai.url.ends_with("?width=1080&height=1080&nologo=true"));
        assert!(ai.prompt_used.contains("Dimensions: 1080x1080"));
    }

    #[test]
    fn test_encoding_matches_uri_component_rules() {
        let url = builder().build("Jollof & chops: 100% (fresh)!", 1, 1).unwrap();
        assert_eq!(
            url,
            "https://image.pollinations.ai/prompt/Jollof%20%26%20chops%3A%20100%25%20(fresh)!?width=1&height=1&nologo=true"
        );
    }

    #[test]
    fn test_prompt_includes_brand_style() {
        let prompt = build_image_prompt("Ankara sale", &Platform::Facebook, &BrandProfile::default());
        assert!(prompt.starts_with("Professional facebook image for Your Company about: Ankara sale"));
        assert!(prompt.contains("Style: professional yet approachable, modern, clean"));
        assert!(prompt.contains("Colors: #4285f4, #34a853, #ea4335, #fbbc05"));
    }

    #[test]
    fn test_topic_with_placeholder_text_is_kept_verbatim() {
        let prompt = build_image_prompt("Promo {colors} {width}", &Platform::Twitter, &BrandProfile::default());
        assert!(prompt.starts_with("Professional twitter image for Your Company about: Promo {colors} {width}\n"));
        assert!(prompt.contains("Dimensions: 1200x675"));
    }

    #[test]
    fn test_disabled_endpoint_degrades_to_absent_reference() {
        let bundle = select_visuals(
            "t",
            &Platform::Twitter,
            AssetListing {
                images: vec!["/assets/a.png".into()],
                logos: vec![],
            },
            &BrandProfile::default(),
            &ImageReferenceBuilder::new(None),
        );
        assert!(bundle.ai_generated_ref.is_none());
        assert_eq!(bundle.local_asset_ref.as_deref(), Some("/assets/a.png"));
    }

    #[test]
    fn test_invalid_endpoint_is_reported() {
        let builder = ImageReferenceBuilder::new(Some("not a url".to_string()));
        assert!(matches!(
            builder.build("p", 1, 1),
            Err(VisualError::InvalidEndpoint { .. })
        ));
    }
}
