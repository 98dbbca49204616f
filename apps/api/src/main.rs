mod assets;
mod automation;
mod config;
mod errors;
mod generation;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assets::AssetCatalog;
use crate::automation::AutomationSlot;
use crate::config::Config;
use crate::generation::brand::BrandProfile;
use crate::generation::pipeline::ContentPipeline;
use crate::generation::visuals::ImageReferenceBuilder;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Autopost v{}", env!("CARGO_PKG_VERSION"));

    // Brand profile is read once and never mutated
    let brand = Arc::new(BrandProfile::load(config.brand_profile_path.as_deref())?);
    info!("Brand profile loaded: {}", brand.company_name);

    // Asset directory
    let assets = AssetCatalog::new(&config.assets_dir);
    assets
        .ensure_dir()
        .await
        .context("Failed to prepare asset directory")?;
    let listing = assets.listing().await?;
    info!(
        "Found {} company images and {} logos in {}",
        listing.images.len(),
        listing.logos.len(),
        assets.dir().display()
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.google_api_key.clone(), config.gemini_api_url.clone())
        .context("Failed to build LLM client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let images = ImageReferenceBuilder::new(config.image_endpoint.clone());
    match &config.image_endpoint {
        Some(endpoint) => info!("AI image references via {endpoint}"),
        None => info!("AI image references disabled"),
    }

    let pipeline = Arc::new(ContentPipeline::new(
        Arc::new(llm),
        brand,
        assets.clone(),
        images,
    ));

    // Build app state
    let state = AppState {
        pipeline,
        assets,
        automation: Arc::new(AutomationSlot::new()),
        config: config.clone(),
        started_at: Instant::now(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
