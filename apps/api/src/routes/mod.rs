pub mod dashboard;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::assets::{handlers as assets, ASSET_URL_PREFIX, MAX_ASSET_UPLOAD_SIZE};
use crate::automation::handlers as automation;
use crate::generation::handlers as generation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let asset_files = ServeDir::new(state.assets.dir());

    Router::new()
        .route("/", get(dashboard::dashboard_handler))
        .route("/health", get(health::health_handler))
        // Generation
        .route("/generate-live", post(generation::handle_generate_live))
        .route(
            "/generate-campaign",
            post(generation::handle_generate_campaign),
        )
        // Company assets
        .route("/api/assets", get(assets::handle_list_assets))
        .route(
            "/upload-asset",
            post(assets::handle_upload_asset).layer(DefaultBodyLimit::max(MAX_ASSET_UPLOAD_SIZE)),
        )
        .route(
            "/upload-assets",
            post(assets::handle_upload_assets).layer(DefaultBodyLimit::max(MAX_ASSET_UPLOAD_SIZE)),
        )
        .route("/delete-asset", delete(assets::handle_delete_asset))
        .nest_service(ASSET_URL_PREFIX, asset_files)
        // Automation
        .route("/start-automation", post(automation::handle_start_automation))
        .route("/stop-automation", post(automation::handle_stop_automation))
        .route("/automation", get(automation::handle_automation_status))
        .with_state(state)
}
