#![allow(clippy::unwrap_used)]


use axum_test::TestServer;
use tempfile::TempDir;

use crate::router::setup_router;
use crate::state::AppState;

/// Spin up a test server over a fresh temp-backed database
///
/// The state is returned too so tests can subscribe to the event channel.
pub fn setup_server() -> (TestServer, AppState, TempDir) {
    let dir = TempDir::new().unwrap();
    let db = memo_core::open_db(&dir.path().join("notes.db")).unwrap();
    let state = AppState::new(db);

    let server = TestServer::new(setup_router(state.clone())).unwrap();

    (server, state, dir)
}
