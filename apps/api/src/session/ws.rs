use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::{debug, info, Instrument};

use crate::session::events::ProgressEvent;
use crate::session::machine::{EventChannel, MatchSession, SessionError};
use crate::state::AppState;

/// GET /ws/match
///
/// Upgrades to a WebSocket and runs one match session on it.
pub async fn ws_match_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    let span = tracing::info_span!("match_session", conn_id = %conn_id);

    async move {
        info!("WebSocket connected");
        let mut channel = WsChannel { socket };
        let session = MatchSession::new(
            state.authenticator.as_ref(),
            state.jobs.as_ref(),
            &state.ranker,
            state.config.pacing,
        );
        let final_state = session.run(&mut channel).await;
        info!(?final_state, "WebSocket session ended");
    }
    .instrument(span)
    .await
}

struct WsChannel {
    socket: WebSocket,
}

/// What one received frame means to the session.
#[derive(Debug, PartialEq)]
enum Inbound {
    Text(String),
    /// Control frame (ping / pong); keep reading.
    Skip,
    Closed,
}

fn classify(frame: Message) -> Inbound {
    match frame {
        Message::Text(text) => Inbound::Text(text),
        // Some clients send JSON as binary frames
        Message::Binary(bytes) => Inbound::Text(String::from_utf8_lossy(&bytes).into_owned()),
        Message::Close(_) => Inbound::Closed,
        _ => Inbound::Skip, // ping / pong
    }
}

fn encode(event: &ProgressEvent) -> Result<Message, SessionError> {
    Ok(Message::Text(serde_json::to_string(event)?))
}

#[async_trait]
impl EventChannel for WsChannel {
    async fn recv_text(&mut self) -> Option<String> {
        while let Some(result) = self.socket.recv().await {
            match result.map(classify) {
                Ok(Inbound::Text(text)) => return Some(text),
                Ok(Inbound::Skip) => continue,
                Ok(Inbound::Closed) => return None,
                Err(e) => {
                    debug!(error = %e, "WebSocket receive error");
                    return None;
                }
            }
        }
        None
    }

    async fn send(&mut self, event: &ProgressEvent) -> Result<(), SessionError> {
        let frame = encode(event)?;
        self.socket
            .send(frame)
            .await
            .map_err(|_| SessionError::Disconnected)?;
        debug!(status = event.status(), "Progress event sent");
        Ok(())
    }

    async fn close(&mut self) {
        if let Err(e) = self.socket.send(Message::Close(None)).await {
            debug!(error = %e, "WebSocket already closed");
        }
    }
}
