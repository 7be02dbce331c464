use futures_util::StreamExt;
use memo_core::NoteEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, warn};

/// Spawn the change-notification subscription task
///
/// Best effort: a failed connect leaves the client without live updates but
/// does not affect remote-mode operations, and a dropped socket is not
/// re-established within a session.
pub fn subscribe(url: String, hints: mpsc::UnboundedSender<()>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let (stream, _) = match connect_async(url.as_str()).await {
            Ok(connected) => connected,
            Err(e) => {
                warn!("change notifier unavailable at {url}: {e}");
                return;
            }
        };

        debug!("subscribed to change notifier at {url}");

        let (_write, mut read) = stream.split();

        while let Some(frame) = read.next().await {
            match frame {
                Ok(Message::Text(payload)) => {
                    match serde_json::from_str::<NoteEvent>(&payload) {
                        // Lifecycle signals are diagnostics only
                        Ok(NoteEvent::Connected) => debug!("change notifier handshake complete"),
                        // The payload is only a hint to refetch; it may be
                        // stale by the time it is handled
                        Ok(event) => {
                            debug!(?event, "change notification received");
                            if hints.send(()).is_err() {
                                return;
                            }
                        }
                        Err(e) => warn!("ignoring malformed change notification: {e}"),
                    }
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!("change notifier connection error: {e}");
                    break;
                }
            }
        }

        debug!("disconnected from change notifier");
    })
}
