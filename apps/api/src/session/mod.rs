//! Progress streaming session: one WebSocket connection from authentication to
//! the final `complete` (or `error`) event.
//!
//! - [`events`] -- wire shapes of the progress events.
//! - [`machine`] -- the phase sequence, independent of the transport.
//! - [`ws`] -- Axum WebSocket upgrade and channel adapter.

use std::time::Duration;

pub mod events;
pub mod machine;
pub mod ws;

/// UX pauses between phases. Not computation: tests run with `Pacing::none()`
/// or paused tokio time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// After the `thinking` event.
    pub thinking: Duration,
    /// After the `ranked` event.
    pub ranked: Duration,
    /// Between `applying` and `applied` for each job.
    pub per_application: Duration,
}

impl Pacing {
    #[cfg(test)]
    pub fn none() -> Self {
        Self {
            thinking: Duration::ZERO,
            ranked: Duration::ZERO,
            per_application: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            thinking: Duration::from_millis(2000),
            ranked: Duration::from_millis(1000),
            per_application: Duration::from_millis(1500),
        }
    }
}
