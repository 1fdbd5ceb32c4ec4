use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::models::job::{JobPosting, NewJob};

// `id` may be INT4 (SERIAL) in existing databases; every read casts it to BIGINT.
const SELECT_JOBS: &str = "SELECT id::BIGINT AS id, title, company, description, requirements \
     FROM jobs ORDER BY id";

const INSERT_JOB: &str = r#"
    INSERT INTO jobs (title, company, description, requirements)
    VALUES ($1, $2, $3, $4)
    RETURNING id::BIGINT AS id, title, company, description, requirements
"#;

/// Read-only source of the job corpus used by ranking.
#[async_trait]
pub trait JobCatalog: Send + Sync {
    /// Snapshot of every posting, ordered by id.
    async fn list_jobs(&self) -> Result<Vec<JobPosting>>;
}

/// PostgreSQL-backed catalog.
#[derive(Clone)]
pub struct PgJobCatalog {
    pool: PgPool,
}

impl PgJobCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobCatalog for PgJobCatalog {
    async fn list_jobs(&self) -> Result<Vec<JobPosting>> {
        // Dedicated connection for the snapshot; returned to the pool on drop,
        // whether the query succeeds or not.
        let mut conn = self.pool.acquire().await?;
        let jobs = sqlx::query_as::<_, JobPosting>(SELECT_JOBS)
            .fetch_all(&mut *conn)
            .await?;
        debug!("Loaded job snapshot of {} postings", jobs.len());
        Ok(jobs)
    }
}

/// Inserts a posting and returns it with its assigned id.
pub async fn create_job(pool: &PgPool, job: &NewJob) -> Result<JobPosting, sqlx::Error> {
    sqlx::query_as::<_, JobPosting>(INSERT_JOB)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.description)
        .bind(&job.requirements)
        .fetch_one(pool)
        .await
}

pub async fn count_jobs(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(pool)
        .await
}
