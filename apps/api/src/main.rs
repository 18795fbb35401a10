mod assessment;
mod config;
mod errors;
mod llm_client;
mod routes;
mod skills;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::{QuestionBank, ScoringEngine};
use crate::config::Config;
use crate::llm_client::{LlmClient, LlmSettings};
use crate::routes::build_router;
use crate::skills::{KeywordCatalog, LlmSkillAnalyzer, SkillExtractor};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mavericks API v{}", env!("CARGO_PKG_VERSION"));

    let catalog = Arc::new(KeywordCatalog::default());
    info!("Keyword catalog loaded ({} skills)", catalog.len());

    let extractor = build_extractor(&config, catalog)?;

    let question_bank = Arc::new(QuestionBank::default());
    info!("Question bank loaded ({} templates)", question_bank.len());

    let scoring = Arc::new(ScoringEngine::new(config.scoring.clone()));
    info!("Scoring weights: {:?}", scoring.weights());

    let state = AppState {
        extractor,
        question_bank,
        scoring,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins once the web front-end host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Keyword-only unless an OpenRouter key is configured.
fn build_extractor(config: &Config, catalog: Arc<KeywordCatalog>) -> Result<SkillExtractor> {
    let extractor = SkillExtractor::new(catalog);

    let Some(api_key) = config.openrouter_api_key.clone() else {
        info!("OPENROUTER_API_KEY not set; skill extraction is keyword-only");
        return Ok(extractor);
    };

    let llm = LlmClient::new(LlmSettings {
        api_key,
        base_url: config.openrouter_base_url.clone(),
        model: config.openrouter_model.clone(),
        timeout: config.analyzer_timeout,
    })?;
    info!(
        "Skill analyzer enabled (model: {}, timeout: {:?})",
        llm.model(),
        config.analyzer_timeout
    );

    Ok(extractor.with_analyzer(Arc::new(LlmSkillAnalyzer(llm)), config.analyzer_timeout))
}
