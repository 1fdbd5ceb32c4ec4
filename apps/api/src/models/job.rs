use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A job posting as stored in the `jobs` table.
/// The ranking pipeline only ever reads snapshots of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct JobPosting {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: String,
}

/// Body of `POST /jobs`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: String,
}
