use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::Authenticator;
use crate::config::Config;
use crate::jobs::store::JobCatalog;
use crate::llm_client::GenerativeModel;
use crate::ranking::orchestrator::JobRanker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Generative model used by the resume services. The ranker holds the same client.
    pub llm: Arc<dyn GenerativeModel>,
    pub ranker: JobRanker,
    pub authenticator: Arc<dyn Authenticator>,
    /// Read side of the job corpus. Default: `PgJobCatalog` over `db`.
    pub jobs: Arc<dyn JobCatalog>,
    pub config: Config,
}
