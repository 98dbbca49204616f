//! Recurring auto-posting.
//!
//! At most one schedule exists at a time. [`AutomationSlot::start`] shuts
//! down whatever is running before installing the new job, so the last start
//! wins and schedules never stack.

pub mod handlers;

use std::sync::Arc;

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::pipeline::{ContentPipeline, GenerationRequest, PlatformOutcome};
use crate::generation::platform::{Platform, Urgency};

/// Topics used when a schedule has no fixed topic.
pub const AUTO_TOPICS: &[&str] = &[
    "Fresh produce available for delivery in Lagos",
    "Quality phone accessories at Alaba Market",
    "Custom Ankara designs by skilled tailors in Surulere",
    "Fresh seafood special at our Victoria Island restaurant",
    "Affordable laptop repairs in Computer Village",
    "Organic vegetables from Osun State farms",
    "Professional catering services for events in Abuja",
    "Quality furniture made locally in Aba",
    "Fresh bakery items available in Ikeja",
    "Mobile money transfer services now available",
    "Quality fabrics at wholesale prices in Kano",
    "Professional photography services for weddings",
];

/// Supported posting cadences. Unknown labels fall back to every six hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingInterval {
    Hourly,
    EveryThreeHours,
    EverySixHours,
    EveryTwelveHours,
    Daily,
}

impl PostingInterval {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "1h" => Self::Hourly,
            "3h" => Self::EveryThreeHours,
            "12h" => Self::EveryTwelveHours,
            "24h" => Self::Daily,
            _ => Self::EverySixHours,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hourly => "1h",
            Self::EveryThreeHours => "3h",
            Self::EverySixHours => "6h",
            Self::EveryTwelveHours => "12h",
            Self::Daily => "24h",
        }
    }

    /// Six-field cron expression (seconds first).
    pub fn cron(&self) -> &'static str {
        match self {
            Self::Hourly => "0 0 * * * *",
            Self::EveryThreeHours => "0 0 */3 * * *",
            Self::EverySixHours => "0 0 */6 * * *",
            Self::EveryTwelveHours => "0 0 */12 * * *",
            Self::Daily => "0 0 0 * * *",
        }
    }
}

/// What the caller asks to automate.
#[derive(Debug, Clone, Deserialize)]
pub struct AutomationRequest {
    #[serde(default)]
    pub interval: String,
    pub topic: Option<String>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
}

/// The active schedule as reported back to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationSettings {
    pub interval: String,
    pub cron: String,
    pub topic: Option<String>,
    pub platforms: Vec<Platform>,
    pub job_id: Uuid,
}

/// The part of a running scheduler the slot needs to tear it down.
#[async_trait]
trait ScheduleHandle: Send + Sync {
    async fn shutdown(&mut self) -> Result<(), JobSchedulerError>;
}

#[async_trait]
impl ScheduleHandle for JobScheduler {
    async fn shutdown(&mut self) -> Result<(), JobSchedulerError> {
        JobScheduler::shutdown(self).await
    }
}

struct ActiveSchedule {
    scheduler: Box<dyn ScheduleHandle>,
    settings: AutomationSettings,
}

/// Single-slot holder for the running schedule.
#[derive(Default)]
pub struct AutomationSlot {
    active: Mutex<Option<ActiveSchedule>>,
}

impl AutomationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any running schedule with a new one.
    pub async fn start(
        &self,
        request: AutomationRequest,
        pipeline: Arc<ContentPipeline>,
    ) -> Result<AutomationSettings, AppError> {
        if request.platforms.is_empty() {
            return Err(AppError::Validation(
                "At least one platform is required".to_string(),
            ));
        }
        let interval = PostingInterval::from_label(&request.interval);
        let topic = request
            .topic
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let mut active = self.active.lock().await;
        // The previous schedule stays in the slot until it is confirmed down.
        if let Some(previous) = active.as_mut() {
            info!("Replacing automation job {}", previous.settings.job_id);
            previous.scheduler.shutdown().await?;
            *active = None;
        }

        let scheduler = JobScheduler::new().await?;
        let job = build_job(interval, topic.clone(), request.platforms.clone(), pipeline)?;
        let job_id = scheduler.add(job).await?;
        scheduler.start().await?;

        let settings = AutomationSettings {
            interval: interval.label().to_string(),
            cron: interval.cron().to_string(),
            topic,
            platforms: request.platforms,
            job_id,
        };
        info!(
            "Automation started: every {} to {:?}",
            settings.interval,
            settings.platforms.iter().map(Platform::as_str).collect::<Vec<_>>()
        );

        *active = Some(ActiveSchedule {
            scheduler: Box::new(scheduler),
            settings: settings.clone(),
        });
        Ok(settings)
    }

    /// Clears the slot. Stopping an empty slot is not an error.
    pub async fn stop(&self) -> Result<Option<AutomationSettings>, AppError> {
        let mut active = self.active.lock().await;
        let Some(schedule) = active.as_mut() else {
            return Ok(None);
        };
        schedule.scheduler.shutdown().await?;
        info!("Automation stopped");
        Ok(active.take().map(|s| s.settings))
    }

    pub async fn current(&self) -> Option<AutomationSettings> {
        self.active.lock().await.as_ref().map(|s| s.settings.clone())
    }
}

fn build_job(
    interval: PostingInterval,
    topic: Option<String>,
    platforms: Vec<Platform>,
    pipeline: Arc<ContentPipeline>,
) -> Result<Job, AppError> {
    let platforms = Arc::new(platforms);

    let job = Job::new_async(interval.cron(), move |_uuid, _lock| {
        let pipeline = Arc::clone(&pipeline);
        let platforms = Arc::clone(&platforms);
        let topic = topic.clone();

        Box::pin(async move {
            info!("automation: running scheduled content generation");
            run_scheduled_posts(&pipeline, topic.as_deref(), &platforms).await;
        })
    })?;

    Ok(job)
}

/// Picks the fixed topic, or a random auto topic.
pub fn choose_topic(topic: Option<&str>) -> String {
    match topic {
        Some(t) => t.to_string(),
        None => AUTO_TOPICS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(AUTO_TOPICS[0])
            .to_string(),
    }
}

/// One automation tick. Each platform is generated independently; a failure
/// is logged and the remaining platforms still run.
pub async fn run_scheduled_posts(
    pipeline: &ContentPipeline,
    topic: Option<&str>,
    platforms: &[Platform],
) -> Vec<PlatformOutcome> {
    let topic = choose_topic(topic);
    let mut outcomes = Vec::with_capacity(platforms.len());

    for platform in platforms {
        let request = GenerationRequest::new(topic.clone(), platform.clone(), Urgency::Normal);
        let outcome = pipeline.outcome(&request).await;
        match &outcome {
            PlatformOutcome::Success(post) => {
                let preview: String = post.content.final_text().chars().take(100).collect();
                info!("automation: generated {platform} post: {preview}");
            }
            PlatformOutcome::Failure(failure) => {
                error!("automation: {platform} failed: {}", failure.error);
            }
        }
        outcomes.push(outcome);
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCatalog;
    use crate::generation::brand::BrandProfile;
    use crate::generation::test_support::ScriptedModel;
    use crate::generation::visuals::ImageReferenceBuilder;

    fn pipeline(model: ScriptedModel) -> Arc<ContentPipeline> {
        Arc::new(ContentPipeline::new(
            Arc::new(model),
            Arc::new(BrandProfile::default()),
            AssetCatalog::new(std::env::temp_dir().join("autopost-test-no-assets")),
            ImageReferenceBuilder::new(None),
        ))
    }

    fn request(interval: &str, platforms: &[&str]) -> AutomationRequest {
        AutomationRequest {
            interval: interval.to_string(),
            topic: Some("Fresh bakery items available in Ikeja".to_string()),
            platforms: platforms.iter().map(|p| Platform::from(*p)).collect(),
        }
    }

    #[test]
    fn test_interval_labels_map_to_cron() {
        assert_eq!(PostingInterval::from_label("1h").cron(), "0 0 * * * *");
        assert_eq!(PostingInterval::from_label("3h").cron(), "0 0 */3 * * *");
        assert_eq!(PostingInterval::from_label("12h").cron(), "0 0 */12 * * *");
        assert_eq!(PostingInterval::from_label("24h").cron(), "0 0 0 * * *");
    }

    #[test]
    fn test_unknown_interval_defaults_to_six_hours() {
        let interval = PostingInterval::from_label("fortnightly");
        assert_eq!(interval, PostingInterval::EverySixHours);
        assert_eq!(interval.cron(), "0 0 */6 * * *");
        assert_eq!(interval.label(), "6h");
    }

    #[test]
    fn test_choose_topic_prefers_fixed_topic() {
        assert_eq!(choose_topic(Some("Suya night")), "Suya night");
        let random = choose_topic(None);
        assert!(AUTO_TOPICS.contains(&random.as_str()));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_start_replaces_previous_schedule() {
        let slot = AutomationSlot::new();
        let pipeline = pipeline(ScriptedModel::failing());

        let first = slot
            .start(request("1h", &["twitter"]), Arc::clone(&pipeline))
            .await
            .unwrap();
        let second = slot
            .start(request("24h", &["linkedin", "facebook"]), Arc::clone(&pipeline))
            .await
            .unwrap();

        assert_ne!(first.job_id, second.job_id);
        let current = slot.current().await.unwrap();
        assert_eq!(current, second);
        assert_eq!(current.cron, "0 0 0 * * *");
        assert_eq!(current.platforms, vec![Platform::Linkedin, Platform::Facebook]);

        slot.stop().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_stop_clears_slot() {
        let slot = AutomationSlot::new();
        slot.start(request("6h", &["twitter"]), pipeline(ScriptedModel::failing()))
            .await
            .unwrap();

        let stopped = slot.stop().await.unwrap();
        assert!(stopped.is_some());
        assert!(slot.current().await.is_none());
        assert!(slot.stop().await.unwrap().is_none());
    }

    struct StuckScheduler;

    #[async_trait]
    impl ScheduleHandle for StuckScheduler {
        async fn shutdown(&mut self) -> Result<(), JobSchedulerError> {
            Err(JobSchedulerError::Shutdown)
        }
    }

    async fn slot_with_stuck_schedule() -> (AutomationSlot, AutomationSettings) {
        let settings = AutomationSettings {
            interval: "1h".to_string(),
            cron: PostingInterval::Hourly.cron().to_string(),
            topic: None,
            platforms: vec![Platform::Twitter],
            job_id: Uuid::new_v4(),
        };
        let slot = AutomationSlot::new();
        *slot.active.lock().await = Some(ActiveSchedule {
            scheduler: Box::new(StuckScheduler),
            settings: settings.clone(),
        });
        (slot, settings)
    }

    #[tokio::test]
    async fn test_failed_shutdown_keeps_previous_schedule_on_start() {
        let (slot, previous) = slot_with_stuck_schedule().await;

        let err = slot
            .start(request("24h", &["linkedin"]), pipeline(ScriptedModel::failing()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Scheduler(_)));
        assert_eq!(slot.current().await, Some(previous));
    }

    #[tokio::test]
    async fn test_failed_shutdown_keeps_previous_schedule_on_stop() {
        let (slot, previous) = slot_with_stuck_schedule().await;

        assert!(matches!(slot.stop().await, Err(AppError::Scheduler(_))));
        assert_eq!(slot.current().await, Some(previous));
    }

    #[tokio::test]
    async fn test_start_requires_platforms() {
        let slot = AutomationSlot::new();
        let err = slot
            .start(request("1h", &[]), pipeline(ScriptedModel::failing()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(slot.current().await.is_none());
    }

    #[tokio::test]
    async fn test_scheduled_run_continues_past_failures() {
        // twitter fails (analysis ok, post fails), linkedin succeeds on fallback analysis
        let model = ScriptedModel::script([
            Some(r#"{"relevanceScore": 5, "estimatedEngagement": "low", "optimalTiming": "evening"}"#),
            None,
            None,
            Some("Linkedin post"),
        ]);
        let outcomes = run_scheduled_posts(
            &pipeline(model),
            Some("Suya night"),
            &[Platform::Twitter, Platform::Linkedin],
        )
        .await;

        assert_eq!(outcomes.len(), 2);
        assert!(!outcomes[0].is_success());
        assert!(outcomes[1].is_success());
        let post = outcomes[1].post().unwrap();
        assert_eq!(post.analytics.urgency, Urgency::Normal);
    }
}
