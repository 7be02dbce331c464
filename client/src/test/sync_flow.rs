#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use memo_core::NoteEvent;
use tempfile::TempDir;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::sleep;

use crate::store::RemoteStore;
use crate::sync::{ConnectionMode, SyncClient, UiEvent};
use crate::test::{local_store, notes_with, spawn_server, wait_for};

/// Grace period for the websocket subscription to settle before relying on
/// live notifications
const SUBSCRIBE_SETTLE: Duration = Duration::from_millis(500);

/// Past the 250ms notification debounce window
const PAST_DEBOUNCE: Duration = Duration::from_millis(600);

// A port from the discard range; connections are refused immediately
fn dead_remote() -> RemoteStore {
    RemoteStore::new("http://127.0.0.1:9").unwrap()
}

#[tokio::test]
async fn remote_failure_falls_back_exactly_once() {
    let dir = TempDir::new().unwrap();

    let (handle, mut ui, task) = SyncClient::start(dead_remote(), local_store(&dir, "local.db"));

    // The initial refresh hits the dead server and triggers the switch
    wait_for(&mut ui, |e| {
        matches!(e, UiEvent::Mode(ConnectionMode::LocalFallback)).then_some(())
    })
    .await;

    let notes = wait_for(&mut ui, |e| match e {
        UiEvent::Notes(notes) => Some(notes),
        _ => None,
    })
    .await;
    assert!(notes.is_empty());

    // Local-path semantics match the remote path: validation, add, no-op
    // delete, delete
    handle.add("  ".to_string());
    wait_for(&mut ui, |e| match e {
        UiEvent::Status(s) if s == "Note content cannot be empty" => Some(()),
        _ => None,
    })
    .await;

    handle.add("saved offline".to_string());
    let notes = wait_for(&mut ui, notes_with(&["saved offline"])).await;
    assert!(notes[0].id > 0);
    assert!(notes[0].created_at > 0);

    handle.delete(notes[0].id + 100);
    wait_for(&mut ui, |e| match e {
        UiEvent::Status(s) if s == "Note was already deleted" => Some(()),
        _ => None,
    })
    .await;

    handle.delete(notes[0].id);
    wait_for(&mut ui, notes_with(&[])).await;

    // The transition happened exactly once: no further Mode events
    handle.refresh();
    wait_for(&mut ui, |e| match e {
        UiEvent::Notes(_) => Some(()),
        UiEvent::Mode(_) => panic!("unexpected second mode transition"),
        _ => None,
    })
    .await;

    task.abort();
}

#[tokio::test]
async fn empty_content_never_reaches_the_store() {
    let (url, _state, _server, _server_dir) = spawn_server().await;
    let dir = TempDir::new().unwrap();

    let (handle, mut ui, task) =
        SyncClient::start(RemoteStore::new(&url).unwrap(), local_store(&dir, "local.db"));

    wait_for(&mut ui, notes_with(&[])).await;

    handle.add(String::new());
    handle.add("   ".to_string());

    for _ in 0..2 {
        wait_for(&mut ui, |e| match e {
            UiEvent::Status(s) if s == "Note content cannot be empty" => Some(()),
            UiEvent::Mode(_) => panic!("validation must not touch the remote store"),
            _ => None,
        })
        .await;
    }

    // The store saw nothing and the client is still in remote mode
    handle.refresh();
    wait_for(&mut ui, notes_with(&[])).await;

    task.abort();
}

#[tokio::test]
async fn remote_delete_missing_is_noop() {
    let (url, _state, _server, _server_dir) = spawn_server().await;
    let dir = TempDir::new().unwrap();

    let (handle, mut ui, task) =
        SyncClient::start(RemoteStore::new(&url).unwrap(), local_store(&dir, "local.db"));

    wait_for(&mut ui, notes_with(&[])).await;

    handle.add("kept".to_string());
    wait_for(&mut ui, notes_with(&["kept"])).await;

    handle.delete(4242);
    wait_for(&mut ui, |e| match e {
        UiEvent::Status(s) if s == "Note was already deleted" => Some(()),
        UiEvent::Mode(_) => panic!("not-found must not trigger fallback"),
        _ => None,
    })
    .await;

    handle.refresh();
    wait_for(&mut ui, notes_with(&["kept"])).await;

    task.abort();
}

#[tokio::test]
async fn remote_delete_reconciles_via_refetch() {
    let (url, _state, _server, _server_dir) = spawn_server().await;
    let dir = TempDir::new().unwrap();

    let (handle, mut ui, task) =
        SyncClient::start(RemoteStore::new(&url).unwrap(), local_store(&dir, "local.db"));

    wait_for(&mut ui, notes_with(&[])).await;

    handle.add("doomed".to_string());
    let notes = wait_for(&mut ui, notes_with(&["doomed"])).await;

    handle.delete(notes[0].id);
    wait_for(&mut ui, |e| match e {
        UiEvent::Status(s) if s == "Note deleted" => Some(()),
        _ => None,
    })
    .await;

    // No eager cache edit; the deletion shows up through the scheduled
    // full refetch
    wait_for(&mut ui, notes_with(&[])).await;

    task.abort();
}

#[tokio::test]
async fn add_propagates_to_subscribed_client() {
    let (url, _state, _server, _server_dir) = spawn_server().await;
    let dir = TempDir::new().unwrap();

    let (handle_a, mut ui_a, task_a) =
        SyncClient::start(RemoteStore::new(&url).unwrap(), local_store(&dir, "a.db"));
    let (_handle_b, mut ui_b, task_b) =
        SyncClient::start(RemoteStore::new(&url).unwrap(), local_store(&dir, "b.db"));

    wait_for(&mut ui_a, notes_with(&[])).await;
    wait_for(&mut ui_b, notes_with(&[])).await;
    sleep(SUBSCRIBE_SETTLE).await;

    handle_a.add("Buy milk".to_string());

    // The originating client re-fetches; the second client hears about it
    // through the change notifier
    let notes_a = wait_for(&mut ui_a, notes_with(&["Buy milk"])).await;
    let notes_b = wait_for(&mut ui_b, notes_with(&["Buy milk"])).await;

    assert_eq!(notes_a, notes_b);

    task_a.abort();
    task_b.abort();
}

#[tokio::test]
async fn duplicate_notifications_coalesce_into_one_refresh() {
    let (url, state, _server, _server_dir) = spawn_server().await;
    let dir = TempDir::new().unwrap();

    let (_handle, mut ui, task) =
        SyncClient::start(RemoteStore::new(&url).unwrap(), local_store(&dir, "local.db"));

    wait_for(&mut ui, notes_with(&[])).await;
    sleep(SUBSCRIBE_SETTLE).await;

    // Insert behind the API's back and publish the same event twice, as a
    // flaky notifier might
    let note = {
        let conn = state.db.lock().unwrap();
        memo_core::insert_note(&conn, "dup").unwrap()
    };
    state.publish(NoteEvent::NoteAdded { note: note.clone() });
    state.publish(NoteEvent::NoteAdded { note });

    // Exactly one reconciled snapshot comes out of the debounce window
    wait_for(&mut ui, notes_with(&["dup"])).await;
    sleep(PAST_DEBOUNCE).await;
    assert!(matches!(ui.try_recv(), Err(TryRecvError::Empty)));

    task.abort();
}

#[tokio::test]
async fn add_survives_remote_failure_mid_session() {
    let (url, _state, server, _server_dir) = spawn_server().await;
    let dir = TempDir::new().unwrap();

    let (handle, mut ui, task) =
        SyncClient::start(RemoteStore::new(&url).unwrap(), local_store(&dir, "local.db"));

    wait_for(&mut ui, notes_with(&[])).await;

    handle.add("reaches the server".to_string());
    wait_for(&mut ui, notes_with(&["reaches the server"])).await;

    // Kill the server; the next add must still get saved, just locally
    server.abort();
    sleep(Duration::from_millis(100)).await;

    handle.add("still got saved".to_string());

    wait_for(&mut ui, |e| {
        matches!(e, UiEvent::Mode(ConnectionMode::LocalFallback)).then_some(())
    })
    .await;
    wait_for(&mut ui, |e| match e {
        UiEvent::Status(s) if s == "Note saved locally" => Some(()),
        _ => None,
    })
    .await;

    // The local store never saw the remote note; only the retried add
    wait_for(&mut ui, notes_with(&["still got saved"])).await;

    task.abort();
}
