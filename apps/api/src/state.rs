use std::sync::Arc;
use std::time::Instant;

use crate::assets::AssetCatalog;
use crate::automation::AutomationSlot;
use crate::config::Config;
use crate::generation::pipeline::ContentPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ContentPipeline>,
    /// Same directory the pipeline's catalog reads; used by the upload/delete routes.
    pub assets: AssetCatalog,
    pub automation: Arc<AutomationSlot>,
    pub config: Config,
    pub started_at: Instant,
}
