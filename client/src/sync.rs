use std::time::Duration;

use memo_core::Note;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::notifier;
use crate::store::{LocalDb, RemoteStore, StoreError};

/// Delay between a change notification and the refresh it schedules, giving
/// the originating write time to settle (store write and notification
/// delivery order is not guaranteed).
const NOTIFY_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    Remote,
    LocalFallback,
}

impl ConnectionMode {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionMode::Remote => "connected",
            ConnectionMode::LocalFallback => "offline (local notes)",
        }
    }
}

/// User intents forwarded from the presentation layer
#[derive(Debug)]
pub enum Command {
    Add(String),
    Delete(i64),
    Refresh,
}

/// Updates pushed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Fresh snapshot of the note list, newest first
    Notes(Vec<Note>),
    Mode(ConnectionMode),
    /// Transient sync or validation feedback
    Status(String),
    /// Local store failure; there is no further fallback
    FatalLocal(String),
}

/// Handle used by the presentation layer to drive the sync client
///
/// Commands are queued onto the client's single loop, so operations issued
/// while another is in flight wait instead of racing shared state.
#[derive(Clone)]
pub struct SyncHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl SyncHandle {
    pub fn add(&self, content: String) {
        let _ = self.commands.send(Command::Add(content));
    }

    pub fn delete(&self, id: i64) {
        let _ = self.commands.send(Command::Delete(id));
    }

    pub fn refresh(&self) {
        let _ = self.commands.send(Command::Refresh);
    }
}

/// Dual-mode synchronization client
///
/// Starts in remote mode against the authoritative store; the first remote
/// failure switches it to the local fallback store for the rest of the
/// session. There is no retry before falling back and no automatic return
/// to remote mode; reconnecting requires a restart. Known limitation,
/// favoring responsiveness over resilience.
pub struct SyncClient {
    mode: ConnectionMode,
    remote: RemoteStore,
    local: LocalDb,
    /// Cache of the last successful list(); always safe to discard and refetch
    last_known_notes: Vec<Note>,
    commands: mpsc::UnboundedReceiver<Command>,
    notifications: mpsc::UnboundedReceiver<()>,
    subscription: Option<JoinHandle<()>>,
    refresh_due: Option<Instant>,
    ui: mpsc::UnboundedSender<UiEvent>,
}

impl SyncClient {
    /// Build a client in remote mode and spawn its reconciliation loop
    pub fn start(
        remote: RemoteStore,
        local: LocalDb,
    ) -> (SyncHandle, mpsc::UnboundedReceiver<UiEvent>, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (hint_tx, hint_rx) = mpsc::unbounded_channel();

        // Subscription establishment is independent of store operations; if
        // it fails the client stays in remote mode without live updates
        let subscription = notifier::subscribe(remote.events_url(), hint_tx);

        let client = SyncClient {
            mode: ConnectionMode::Remote,
            remote,
            local,
            last_known_notes: Vec::new(),
            commands: command_rx,
            notifications: hint_rx,
            subscription: Some(subscription),
            refresh_due: None,
            ui: ui_tx,
        };

        let task = tokio::spawn(client.run());

        (SyncHandle { commands: command_tx }, ui_rx, task)
    }

    async fn run(mut self) {
        self.send_ui(UiEvent::Mode(self.mode));
        self.refresh().await;

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    // Presentation layer went away
                    None => break,
                },
                Some(()) = self.notifications.recv() => self.schedule_refresh(),
                () = wait_until(self.refresh_due) => {
                    self.refresh_due = None;
                    self.refresh().await;
                }
            }
        }

        if let Some(subscription) = self.subscription.take() {
            subscription.abort();
        }
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Add(content) => self.add(content).await,
            Command::Delete(id) => self.delete(id).await,
            Command::Refresh => self.refresh().await,
        }
    }

    /// Add a note against the active store
    ///
    /// Remote success re-fetches the full list instead of appending the
    /// returned note, since a notification-driven refresh could race a
    /// locally-optimistic update. Remote failure falls back and retries the
    /// same add locally, so the user sees "saved" rather than an error
    /// unless the local store fails too.
    async fn add(&mut self, content: String) {
        if content.trim().is_empty() {
            self.send_ui(UiEvent::Status("Note content cannot be empty".to_string()));
            return;
        }

        if self.mode == ConnectionMode::Remote {
            match self.remote.insert(&content).await {
                Ok(note) => {
                    debug!(id = note.id, "note saved remotely");
                    self.send_ui(UiEvent::Status("Note saved".to_string()));
                    self.refresh().await;
                    return;
                }
                Err(StoreError::EmptyContent) => {
                    self.send_ui(UiEvent::Status("Note content cannot be empty".to_string()));
                    return;
                }
                Err(e) => self.fall_back(&e),
            }
        }

        match self.local.insert(&content) {
            Ok(note) => {
                debug!(id = note.id, "note saved locally");
                self.send_ui(UiEvent::Status("Note saved locally".to_string()));
                self.refresh().await;
            }
            Err(e) => self.fatal_local(&e),
        }
    }

    /// Delete a note against the active store
    ///
    /// Remote success leaves the cached list alone and arms the debounced
    /// refresh: the authoritative post-delete list may already contain
    /// concurrent adds from other clients, so reconciliation goes through a
    /// full refetch instead of editing the cache in place.
    async fn delete(&mut self, id: i64) {
        if self.mode == ConnectionMode::Remote {
            match self.remote.delete(id).await {
                Ok(true) => {
                    self.send_ui(UiEvent::Status("Note deleted".to_string()));
                    self.schedule_refresh();
                    return;
                }
                Ok(false) => {
                    // Already gone; nothing to reconcile
                    self.send_ui(UiEvent::Status("Note was already deleted".to_string()));
                    return;
                }
                Err(e) => self.fall_back(&e),
            }
        }

        match self.local.delete(id) {
            Ok(deleted) => {
                let status = if deleted {
                    "Note deleted"
                } else {
                    "Note was already deleted"
                };
                self.send_ui(UiEvent::Status(status.to_string()));
                self.refresh().await;
            }
            Err(e) => self.fatal_local(&e),
        }
    }

    /// Replace the cached note list with a full read from the active store
    /// and signal the presentation layer
    async fn refresh(&mut self) {
        let notes = match self.mode {
            ConnectionMode::Remote => match self.remote.list().await {
                Ok(notes) => notes,
                Err(e) => {
                    self.fall_back(&e);
                    match self.local.list() {
                        Ok(notes) => notes,
                        Err(e) => {
                            self.fatal_local(&e);
                            return;
                        }
                    }
                }
            },
            ConnectionMode::LocalFallback => match self.local.list() {
                Ok(notes) => notes,
                Err(e) => {
                    self.fatal_local(&e);
                    return;
                }
            },
        };

        self.last_known_notes = notes;
        self.send_ui(UiEvent::Notes(self.last_known_notes.clone()));
    }

    /// Arm (or re-arm) the debounced refresh; duplicate notifications within
    /// the window coalesce into a single refetch
    fn schedule_refresh(&mut self) {
        self.refresh_due = Some(Instant::now() + NOTIFY_DEBOUNCE);
    }

    /// One-way transition to the local store for the rest of the session
    fn fall_back(&mut self, reason: &StoreError) {
        warn!("remote store unavailable, switching to local notes: {reason}");

        self.mode = ConnectionMode::LocalFallback;
        self.refresh_due = None;

        if let Some(subscription) = self.subscription.take() {
            subscription.abort();
        }

        self.send_ui(UiEvent::Mode(self.mode));
        self.send_ui(UiEvent::Status(
            "Server unreachable, using local notes".to_string(),
        ));
    }

    fn fatal_local(&mut self, err: &StoreError) {
        self.send_ui(UiEvent::FatalLocal(format!(
            "Local notes database failed: {err}"
        )));
    }

    fn send_ui(&self, event: UiEvent) {
        let _ = self.ui.send(event);
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
