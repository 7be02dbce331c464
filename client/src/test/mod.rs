#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod sync_flow;

use std::time::Duration;

use axum::extract::Request;
use axum::http::header::CONNECTION;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use memo_server::router::setup_router;
use memo_server::state::AppState;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::store::LocalDb;
use crate::sync::UiEvent;

pub const WAIT: Duration = Duration::from_secs(5);

/// Spin up a real server on an ephemeral port
///
/// The state is returned so tests can publish events directly, the way a
/// flaky notifier would; aborting the returned task kills the server.
pub async fn spawn_server() -> (String, AppState, tokio::task::JoinHandle<()>, TempDir) {
    let dir = TempDir::new().unwrap();
    let db = memo_core::open_db(&dir.path().join("server.db")).unwrap();
    let state = AppState::new(db);
    // Disable HTTP keep-alive so aborting the serve task actually takes the
    // server offline: axum serves each connection on its own spawned task,
    // so a pooled keep-alive connection would survive the abort. Leaves the
    // websocket handshake's own `Connection: upgrade` header alone.
    let app = setup_router(state.clone()).layer(axum::middleware::from_fn(close_connections));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app.into_make_service()).await;
    });

    (format!("http://{}", addr), state, server, dir)
}

async fn close_connections(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .entry(CONNECTION)
        .or_insert(HeaderValue::from_static("close"));
    response
}

pub fn local_store(dir: &TempDir, name: &str) -> LocalDb {
    LocalDb::open(&dir.path().join(name)).unwrap()
}

/// Receive UI events until one matches, failing the test on timeout
pub async fn wait_for<F, T>(ui: &mut mpsc::UnboundedReceiver<UiEvent>, mut matcher: F) -> T
where
    F: FnMut(UiEvent) -> Option<T>,
{
    timeout(WAIT, async {
        loop {
            let event = ui.recv().await.expect("ui channel closed");
            if let Some(value) = matcher(event) {
                return value;
            }
        }
    })
    .await
    .expect("timed out waiting for ui event")
}

/// Matcher for a note-list snapshot with exactly these contents, in order
pub fn notes_with<'a>(
    contents: &'a [&'a str],
) -> impl FnMut(UiEvent) -> Option<Vec<memo_core::Note>> + 'a {
    move |event| match event {
        UiEvent::Notes(notes)
            if notes.iter().map(|n| n.content.as_str()).collect::<Vec<_>>() == contents =>
        {
            Some(notes)
        }
        _ => None,
    }
}
