mod auth;
mod cli;
mod config;
mod db;
mod errors;
mod jobs;
mod llm_client;
mod models;
mod ranking;
mod resume;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::JwtAuthenticator;
use crate::cli::{issue_token_command, Cli, Command};
use crate::config::{jwt_from_env, Config};
use crate::db::create_pool;
use crate::jobs::seed::seed_jobs;
use crate::jobs::store::PgJobCatalog;
use crate::llm_client::{GeminiClient, GenerativeModel};
use crate::ranking::fallback::KeywordScorer;
use crate::ranking::orchestrator::JobRanker;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    match Cli::parse().command {
        Some(Command::IssueToken { username, role }) => {
            println!("{}", issue_token_command(&username, role, &jwt_from_env()?)?);
            Ok(())
        }
        Some(Command::Serve) | None => serve().await,
    }
}

async fn serve() -> Result<()> {
    // Missing DATABASE_URL / GEMINI_API_KEY / JWT_SECRET aborts startup here
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Matchmaker API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;

    if config.seed_jobs {
        seed_jobs(&db).await?;
    }

    // One model client shared by ranking and the resume services
    let gemini = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone())?;
    info!("LLM client initialized (model: {})", gemini.model());
    let llm: Arc<dyn GenerativeModel> = Arc::new(gemini);

    let ranker = JobRanker::new(llm.clone(), KeywordScorer::new(config.fallback.clone()));
    info!(
        "Session pacing: thinking={:?} ranked={:?} per_application={:?}",
        config.pacing.thinking, config.pacing.ranked, config.pacing.per_application
    );

    let state = AppState {
        db: db.clone(),
        llm,
        ranker,
        authenticator: Arc::new(JwtAuthenticator::new(config.jwt.clone(), db.clone())),
        jobs: Arc::new(PgJobCatalog::new(db)),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
