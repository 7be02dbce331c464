use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use memo_core::NoteEvent;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::state::AppState;

pub fn event_routes() -> Router<AppState> {
    Router::new().route("/events", get(subscribe))
}

async fn subscribe(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| event_stream(socket, state))
}

/// Forward broadcast change events to one websocket subscriber
///
/// Events are hints to refetch, so a lagged receiver just skips ahead; the
/// subscriber reconciles against `GET /notes` either way.
async fn event_stream(mut socket: WebSocket, state: AppState) {
    let mut events = state.subscribe();

    if send_event(&mut socket, &NoteEvent::Connected).await.is_err() {
        return;
    }

    debug!("subscriber connected");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    if send_event(&mut socket, &event).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "subscriber lagged behind event stream");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // Inbound frames carry nothing in this protocol
                Some(Ok(_)) => {}
            },
        }
    }

    debug!("subscriber disconnected");
}

async fn send_event(socket: &mut WebSocket, event: &NoteEvent) -> Result<(), axum::Error> {
    let payload = match serde_json::to_string(event) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("failed to encode event: {e}");
            return Ok(());
        }
    };

    socket.send(Message::Text(payload)).await
}
