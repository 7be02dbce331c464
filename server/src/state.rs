use memo_core::NoteEvent;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// Broadcast capacity; slow subscribers that lag past this re-derive truth
/// from `GET /notes` instead of replaying events.
const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct AppState {
    /// Notes database; acquired per request, never held across awaits
    pub db: Arc<Mutex<Connection>>,
    /// Change-notification fanout to websocket subscribers
    pub events: broadcast::Sender<NoteEvent>,
}

impl AppState {
    pub fn new(db: Connection) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            db: Arc::new(Mutex::new(db)),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NoteEvent> {
        self.events.subscribe()
    }

    /// Publish a change event to all connected subscribers
    ///
    /// Zero subscribers is not an error; delivery is best-effort by design.
    pub fn publish(&self, event: NoteEvent) {
        let _ = self.events.send(event);
    }
}
