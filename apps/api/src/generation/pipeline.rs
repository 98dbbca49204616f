//! Content pipeline: orchestrates one post per platform.
//!
//! Flow: analyze → generate branded copy → optimize → attach visuals.
//!
//! Only the generation step can fail a request. Analysis and visuals degrade
//! to fallbacks, and a campaign isolates each platform's outcome.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::assets::{AssetCatalog, AssetListing};
use crate::errors::AppError;
use crate::generation::analyzer::{analyze, Engagement, TopicAnalysis};
use crate::generation::brand::BrandProfile;
use crate::generation::content::generate_branded_content;
use crate::generation::optimizer::{optimize, GeneratedContent, PredictedMetrics};
use crate::generation::platform::{Platform, Urgency, CAMPAIGN_PLATFORMS};
use crate::generation::visuals::{select_visuals, ImageReferenceBuilder, VisualBundle};
use crate::llm_client::TextModel;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One post request. Only the topic is validated.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub urgency: Urgency,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>, platform: Platform, urgency: Urgency) -> Self {
        Self {
            topic: topic.into(),
            platform,
            urgency,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.topic.trim().is_empty() {
            return Err(AppError::Validation("topic cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Stages a request passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PipelineStage {
    Started,
    Analyzed,
    Generated,
    Optimized,
    VisualsAttached,
    Complete,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAnalytics {
    pub relevance_score: u8,
    pub estimated_engagement: Engagement,
    pub generation_time_ms: u64,
    pub urgency: Urgency,
    pub predicted_metrics: PredictedMetrics,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealTimeData {
    pub trending_tags: Vec<String>,
    pub optimal_post_time: String,
    pub competitor_insight: String,
}

/// A finished post for one platform.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformPost {
    pub success: bool,
    pub platform: Platform,
    pub content: GeneratedContent,
    pub visuals: VisualBundle,
    pub analysis: TopicAnalysis,
    pub analytics: PostAnalytics,
    pub real_time_data: RealTimeData,
}

/// What a caller sees when one platform could not be generated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformFailure {
    pub success: bool,
    pub platform: Platform,
    pub error: String,
    /// Last stage the request completed before failing.
    pub failed_after: PipelineStage,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PlatformOutcome {
    Success(Box<PlatformPost>),
    Failure(PlatformFailure),
}

impl PlatformOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PlatformOutcome::Success(_))
    }

    pub fn post(&self) -> Option<&PlatformPost> {
        match self {
            PlatformOutcome::Success(post) => Some(&**post),
            PlatformOutcome::Failure(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub total_platforms: usize,
    pub successful_platforms: usize,
    pub avg_generation_time_ms: u64,
    pub total_estimated_reach: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Campaign {
    pub campaign: BTreeMap<String, PlatformOutcome>,
    pub summary: CampaignSummary,
}

/// A generation error tagged with how far the request got.
#[derive(Debug)]
pub struct StageError {
    pub stage: PipelineStage,
    pub error: AppError,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Everything a generation run needs. Read-only after construction, so one
/// instance is shared across requests and the automation scheduler.
pub struct ContentPipeline {
    llm: Arc<dyn TextModel>,
    brand: Arc<BrandProfile>,
    assets: AssetCatalog,
    images: ImageReferenceBuilder,
}

impl ContentPipeline {
    pub fn new(
        llm: Arc<dyn TextModel>,
        brand: Arc<BrandProfile>,
        assets: AssetCatalog,
        images: ImageReferenceBuilder,
    ) -> Self {
        Self {
            llm,
            brand,
            assets,
            images,
        }
    }

    pub async fn generate_for_platform(
        &self,
        request: &GenerationRequest,
    ) -> Result<PlatformPost, AppError> {
        self.run(request).await.map_err(|e| e.error)
    }

    /// Runs every stage, reporting the last completed stage on failure.
    ///
    /// Steps:
    /// 1. analyze() → TopicAnalysis (fallback on any failure)
    /// 2. generate_branded_content() → raw text (fails the request)
    /// 3. optimize() → GeneratedContent
    /// 4. select_visuals() → VisualBundle (partial on failure)
    pub async fn run(&self, request: &GenerationRequest) -> Result<PlatformPost, StageError> {
        let started = Instant::now();
        let platform = &request.platform;
        request.validate().map_err(|error| StageError {
            stage: PipelineStage::Started,
            error,
        })?;
        info!("Generating {} post (urgency: {})", platform, request.urgency);

        let analysis = analyze(&request.topic, request.urgency, self.llm.as_ref()).await;
        debug!("{platform}: {}", PipelineStage::Analyzed);

        let raw_text = generate_branded_content(
            &request.topic,
            platform,
            &analysis,
            &self.brand,
            self.llm.as_ref(),
        )
        .await
        .map_err(|error| StageError {
            stage: PipelineStage::Analyzed,
            error,
        })?;
        debug!("{platform}: {}", PipelineStage::Generated);

        let content = optimize(&raw_text, platform, &analysis);
        debug!("{platform}: {}", PipelineStage::Optimized);

        let listing = self.assets.listing().await.unwrap_or_else(|e| {
            warn!("Asset catalog unavailable, continuing without local images: {e}");
            AssetListing::default()
        });
        let visuals = select_visuals(&request.topic, platform, listing, &self.brand, &self.images);
        debug!("{platform}: {}", PipelineStage::VisualsAttached);

        let generation_time_ms = started.elapsed().as_millis() as u64;
        info!(
            "{} post ready in {}ms ({} chars)",
            platform,
            generation_time_ms,
            content.final_text().chars().count()
        );

        Ok(PlatformPost {
            success: true,
            platform: platform.clone(),
            analytics: PostAnalytics {
                relevance_score: analysis.relevance_score,
                estimated_engagement: analysis.estimated_engagement,
                generation_time_ms,
                urgency: request.urgency,
                predicted_metrics: PredictedMetrics::from_analysis(&analysis),
                timestamp: Utc::now(),
            },
            real_time_data: RealTimeData {
                trending_tags: analysis.trending_tags.clone(),
                optimal_post_time: platform.profile().optimal_post_time.to_string(),
                competitor_insight: analysis.competitor_insight.clone(),
            },
            content,
            visuals,
            analysis,
        })
    }

    /// Runs the pipeline, folding any failure into a `PlatformFailure`.
    pub async fn outcome(&self, request: &GenerationRequest) -> PlatformOutcome {
        match self.run(request).await {
            Ok(post) => PlatformOutcome::Success(Box::new(post)),
            Err(StageError { stage, error }) => {
                warn!("{} generation failed after {stage}: {error}", request.platform);
                PlatformOutcome::Failure(PlatformFailure {
                    success: false,
                    platform: request.platform.clone(),
                    error: error.to_string(),
                    failed_after: stage,
                    timestamp: Utc::now(),
                })
            }
        }
    }

    /// Generates one post per campaign platform, sequentially. Each platform's
    /// outcome is recorded independently.
    pub async fn generate_campaign(&self, topic: &str) -> Campaign {
        info!("Generating campaign across {} platforms", CAMPAIGN_PLATFORMS.len());

        let mut campaign = BTreeMap::new();
        for platform in CAMPAIGN_PLATFORMS {
            let request = GenerationRequest::new(topic, platform.clone(), Urgency::Urgent);
            campaign.insert(platform.to_string(), self.outcome(&request).await);
        }

        let summary = summarize(&campaign);
        Campaign { campaign, summary }
    }
}

fn summarize(campaign: &BTreeMap<String, PlatformOutcome>) -> CampaignSummary {
    let posts: Vec<&PlatformPost> = campaign.values().filter_map(PlatformOutcome::post).collect();
    let total_time: u64 = posts.iter().map(|p| p.analytics.generation_time_ms).sum();
    let total_platforms = campaign.len();

    CampaignSummary {
        total_platforms,
        successful_platforms: posts.len(),
        avg_generation_time_ms: total_time.checked_div(total_platforms as u64).unwrap_or(0),
        total_estimated_reach: posts
            .iter()
            .map(|p| u32::from(p.analytics.relevance_score) * 1000)
            .sum(),
        timestamp: Utc::now(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
