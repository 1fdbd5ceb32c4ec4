//! Match session state machine.
//!
//! Connected → Authenticating → Thinking → Ranking → Ranked → Applying → Complete,
//! with Error reachable from every non-terminal state. Phases run strictly in
//! sequence; the only suspensions are the pacing sleeps and the I/O calls.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::auth::{AuthError, Authenticator, Role};
use crate::jobs::store::JobCatalog;
use crate::ranking::orchestrator::JobRanker;
use crate::session::events::{MatchRequest, ProgressEvent, COMPLETE_MESSAGE, THINKING_MESSAGE};
use crate::session::Pacing;

/// How many of the ranked jobs get the simulated auto-apply.
pub const AUTO_APPLY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connected,
    Authenticating,
    Thinking,
    Ranking,
    Ranked,
    Applying,
    Complete,
    Error,
    /// Peer went away; nothing more can be sent.
    Disconnected,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid request: {0}")]
    MalformedRequest(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Failed to load jobs: {0}")]
    Storage(anyhow::Error),

    #[error("Failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Peer disconnected")]
    Disconnected,
}

/// Bidirectional transport for one session.
#[async_trait]
pub trait EventChannel: Send {
    /// Next text message from the peer; `None` once the peer is gone.
    async fn recv_text(&mut self) -> Option<String>;

    async fn send(&mut self, event: &ProgressEvent) -> Result<(), SessionError>;

    async fn close(&mut self);
}

/// One connection's run through the match flow.
pub struct MatchSession<'a> {
    authenticator: &'a dyn Authenticator,
    catalog: &'a dyn JobCatalog,
    ranker: &'a JobRanker,
    pacing: Pacing,
    state: SessionState,
}

impl<'a> MatchSession<'a> {
    pub fn new(
        authenticator: &'a dyn Authenticator,
        catalog: &'a dyn JobCatalog,
        ranker: &'a JobRanker,
        pacing: Pacing,
    ) -> Self {
        Self {
            authenticator,
            catalog,
            ranker,
            pacing,
            state: SessionState::Connected,
        }
    }

    /// Drives the session to a terminal state, then closes the channel.
    ///
    /// The peer sees either the full event sequence or a single `error` event.
    pub async fn run<C: EventChannel>(mut self, channel: &mut C) -> SessionState {
        match self.drive(channel).await {
            Ok(()) => {}
            Err(SessionError::Disconnected) => {
                info!(state = ?self.state, "Peer disconnected");
                self.state = SessionState::Disconnected;
            }
            Err(err) => {
                warn!(state = ?self.state, "Match session failed: {err}");
                self.state = SessionState::Error;
                if channel.send(&ProgressEvent::error(err.to_string())).await.is_err() {
                    self.state = SessionState::Disconnected;
                }
            }
        }

        channel.close().await;
        self.state
    }

    async fn drive<C: EventChannel>(&mut self, channel: &mut C) -> Result<(), SessionError> {
        // 1. Authenticate
        let raw = channel
            .recv_text()
            .await
            .ok_or(SessionError::Disconnected)?;
        self.state = SessionState::Authenticating;

        let request: MatchRequest = serde_json::from_str(&raw)
            .map_err(|e| SessionError::MalformedRequest(e.to_string()))?;
        let identity = self.authenticator.authenticate(&request.token).await?;
        identity.require(Role::Candidate)?;
        info!(user = %identity.username, "Match session authenticated");

        // 2. Thinking
        self.state = SessionState::Thinking;
        channel
            .send(&ProgressEvent::Thinking {
                message: THINKING_MESSAGE.to_string(),
            })
            .await?;
        tokio::time::sleep(self.pacing.thinking).await;

        // 3. Ranking
        self.state = SessionState::Ranking;
        let jobs = self
            .catalog
            .list_jobs()
            .await
            .map_err(SessionError::Storage)?;
        let ranked = self.ranker.rank_and_merge(&request.resume_text, &jobs).await;

        let shortlist: Vec<(i64, String)> = ranked
            .iter()
            .take(AUTO_APPLY_LIMIT)
            .map(|view| (view.job.id, view.job.title.clone()))
            .collect();

        self.state = SessionState::Ranked;
        channel.send(&ProgressEvent::Ranked { jobs: ranked }).await?;
        tokio::time::sleep(self.pacing.ranked).await;

        // 4. Auto-apply
        self.state = SessionState::Applying;
        for (job_id, job_title) in shortlist {
            channel
                .send(&ProgressEvent::Applying { job_id, job_title })
                .await?;
            tokio::time::sleep(self.pacing.per_application).await;
            channel.send(&ProgressEvent::Applied { job_id }).await?;
        }

        channel
            .send(&ProgressEvent::Complete {
                message: COMPLETE_MESSAGE.to_string(),
            })
            .await?;
        self.state = SessionState::Complete;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::auth::testing::StaticAuthenticator;
    use crate::llm_client::testing::ScriptedModel;
    use crate::models::job::JobPosting;
    use crate::ranking::fallback::KeywordScorer;

    /// In-memory channel: scripted inbound messages, recorded outbound events.
    #[derive(Default)]
    struct ScriptedChannel {
        inbound: VecDeque<String>,
        sent: Vec<ProgressEvent>,
        closed: bool,
        /// Sends fail once this many events have gone out.
        drop_after: Option<usize>,
    }

    impl ScriptedChannel {
        fn with_message(message: &str) -> Self {
            Self {
                inbound: VecDeque::from([message.to_string()]),
                ..Self::default()
            }
        }

        fn statuses(&self) -> Vec<&'static str> {
            self.sent.iter().map(|e| e.status()).collect()
        }

        fn count(&self, status: &str) -> usize {
            self.sent.iter().filter(|e| e.status() == status).count()
        }
    }

    #[async_trait]
    impl EventChannel for ScriptedChannel {
        async fn recv_text(&mut self) -> Option<String> {
            self.inbound.pop_front()
        }

        async fn send(&mut self, event: &ProgressEvent) -> Result<(), SessionError> {
            if self.drop_after.is_some_and(|n| self.sent.len() >= n) {
                return Err(SessionError::Disconnected);
            }
            self.sent.push(event.clone());
            Ok(())
        }

        async fn close(&mut self) {
            self.closed = true;
        }
    }

    struct CountingCatalog {
        jobs: Vec<JobPosting>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl CountingCatalog {
        fn new(n: i64) -> Self {
            Self {
                jobs: (1..=n)
                    .map(|id| JobPosting {
                        id,
                        title: format!("Python Engineer {id}"),
                        company: "ZenithTech".to_string(),
                        description: "Build services.".to_string(),
                        requirements: "SQL".to_string(),
                    })
                    .collect(),
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(0)
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JobCatalog for CountingCatalog {
        async fn list_jobs(&self) -> anyhow::Result<Vec<JobPosting>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("connection refused");
            }
            Ok(self.jobs.clone())
        }
    }

    fn authenticator() -> StaticAuthenticator {
        StaticAuthenticator::default()
            .with("candidate-token", "ada", Role::Candidate)
            .with("employer-token", "acme", Role::Employer)
    }

    fn fallback_ranker() -> JobRanker {
        JobRanker::new(Arc::new(ScriptedModel::failing()), KeywordScorer::default())
    }

    const VALID_REQUEST: &str = r#"{"token": "candidate-token", "resume_text": "python and sql"}"#;

    async fn run_session(
        catalog: &CountingCatalog,
        channel: &mut ScriptedChannel,
        pacing: Pacing,
    ) -> SessionState {
        let auth = authenticator();
        let ranker = fallback_ranker();
        MatchSession::new(&auth, catalog, &ranker, pacing)
            .run(channel)
            .await
    }

    #[tokio::test]
    async fn test_successful_session_emits_full_sequence() {
        let catalog = CountingCatalog::new(25);
        let mut channel = ScriptedChannel::with_message(VALID_REQUEST);

        let state = run_session(&catalog, &mut channel, Pacing::none()).await;

        assert_eq!(state, SessionState::Complete);
        assert!(channel.closed);
        assert_eq!(catalog.calls(), 1);
        assert_eq!(channel.count("thinking"), 1);
        assert_eq!(channel.count("ranked"), 1);
        assert_eq!(channel.count("applying"), AUTO_APPLY_LIMIT);
        assert_eq!(channel.count("applied"), AUTO_APPLY_LIMIT);
        assert_eq!(channel.count("complete"), 1);

        let statuses = channel.statuses();
        assert_eq!(&statuses[..2], &["thinking", "ranked"]);
        assert_eq!(statuses.last(), Some(&"complete"));
        for pair in statuses[2..statuses.len() - 1].chunks(2) {
            assert_eq!(pair, &["applying", "applied"]);
        }
    }

    #[tokio::test]
    async fn test_ranked_event_is_capped_and_apply_follows_its_order() {
        let catalog = CountingCatalog::new(45);
        let mut channel = ScriptedChannel::with_message(VALID_REQUEST);

        run_session(&catalog, &mut channel, Pacing::none()).await;

        let ranked = match &channel.sent[1] {
            ProgressEvent::Ranked { jobs } => jobs.clone(),
            other => panic!("expected ranked event, got {other:?}"),
        };
        assert_eq!(ranked.len(), 30);

        let applied: Vec<i64> = channel
            .sent
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Applying { job_id, .. } => Some(*job_id),
                _ => None,
            })
            .collect();
        let top: Vec<i64> = ranked.iter().take(10).map(|v| v.job.id).collect();
        assert_eq!(applied, top);
    }

    #[tokio::test]
    async fn test_short_ranking_applies_to_every_job() {
        let catalog = CountingCatalog::new(3);
        let mut channel = ScriptedChannel::with_message(VALID_REQUEST);

        let state = run_session(&catalog, &mut channel, Pacing::none()).await;

        assert_eq!(state, SessionState::Complete);
        assert_eq!(channel.count("applying"), 3);
        assert_eq!(channel.count("applied"), 3);
    }

    #[tokio::test]
    async fn test_empty_corpus_completes_without_applications() {
        let catalog = CountingCatalog::new(0);
        let mut channel = ScriptedChannel::with_message(VALID_REQUEST);

        let state = run_session(&catalog, &mut channel, Pacing::none()).await;

        assert_eq!(state, SessionState::Complete);
        assert_eq!(channel.statuses(), vec!["thinking", "ranked", "complete"]);
    }

    #[tokio::test]
    async fn test_invalid_token_errors_without_fetching_jobs() {
        let catalog = CountingCatalog::new(5);
        let mut channel =
            ScriptedChannel::with_message(r#"{"token": "forged", "resume_text": "python"}"#);

        let state = run_session(&catalog, &mut channel, Pacing::none()).await;

        assert_eq!(state, SessionState::Error);
        assert_eq!(catalog.calls(), 0);
        assert!(channel.closed);
        assert_eq!(channel.sent, vec![ProgressEvent::error("Invalid token")]);
    }

    #[tokio::test]
    async fn test_non_candidate_role_is_rejected() {
        let catalog = CountingCatalog::new(5);
        let mut channel =
            ScriptedChannel::with_message(r#"{"token": "employer-token", "resume_text": "x"}"#);

        let state = run_session(&catalog, &mut channel, Pacing::none()).await;

        assert_eq!(state, SessionState::Error);
        assert_eq!(catalog.calls(), 0);
        assert_eq!(channel.statuses(), vec!["error"]);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_rejected() {
        let catalog = CountingCatalog::new(5);
        let mut channel = ScriptedChannel::with_message("not json at all");

        let state = run_session(&catalog, &mut channel, Pacing::none()).await;

        assert_eq!(state, SessionState::Error);
        match &channel.sent[..] {
            [ProgressEvent::Error { message }] => assert!(message.starts_with("Invalid request")),
            other => panic!("unexpected events {other:?}"),
        }
        assert!(channel.closed);
    }

    #[tokio::test]
    async fn test_storage_failure_ends_with_single_error_event() {
        let catalog = CountingCatalog::failing();
        let mut channel = ScriptedChannel::with_message(VALID_REQUEST);

        let state = run_session(&catalog, &mut channel, Pacing::none()).await;

        assert_eq!(state, SessionState::Error);
        assert_eq!(channel.statuses(), vec!["thinking", "error"]);
        assert!(channel.closed);
    }

    #[tokio::test]
    async fn test_peer_closing_before_request_ends_quietly() {
        let catalog = CountingCatalog::new(5);
        let mut channel = ScriptedChannel::default();

        let state = run_session(&catalog, &mut channel, Pacing::none()).await;

        assert_eq!(state, SessionState::Disconnected);
        assert!(channel.sent.is_empty());
        assert!(channel.closed);
    }

    #[tokio::test]
    async fn test_disconnect_mid_apply_stops_the_session() {
        let catalog = CountingCatalog::new(20);
        let mut channel = ScriptedChannel {
            drop_after: Some(5),
            ..ScriptedChannel::with_message(VALID_REQUEST)
        };

        let state = run_session(&catalog, &mut channel, Pacing::none()).await;

        assert_eq!(state, SessionState::Disconnected);
        assert_eq!(channel.sent.len(), 5);
        assert!(channel.closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacing_delays_are_applied_between_phases() {
        let catalog = CountingCatalog::new(12);
        let mut channel = ScriptedChannel::with_message(VALID_REQUEST);
        let pacing = Pacing::default();

        let started = tokio::time::Instant::now();
        let state = run_session(&catalog, &mut channel, pacing).await;

        assert_eq!(state, SessionState::Complete);
        // 2s thinking + 1s ranked + 10 × 1.5s per application
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(18_000), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(18_100), "elapsed {elapsed:?}");
    }
}
