use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use memo_core::{AddNoteRequest, DeleteResponse, Note, NoteEvent};
use tracing::debug;

use crate::errors::{RestError, RestResult};
use crate::state::AppState;

pub fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/notes", get(get_notes).post(create_note))
        .route("/notes/:id", delete(delete_note))
}

/// List all notes, newest first
async fn get_notes(State(state): State<AppState>) -> RestResult<Json<Vec<Note>>> {
    let notes = {
        let conn = lock_db(&state)?;
        memo_core::list_notes(&conn)?
    };

    Ok(Json(notes))
}

/// Create a note and broadcast the change to subscribers
async fn create_note(
    State(state): State<AppState>,
    Json(request): Json<AddNoteRequest>,
) -> RestResult<(StatusCode, Json<Note>)> {
    let note = {
        let conn = lock_db(&state)?;
        memo_core::insert_note(&conn, &request.content)?
    };

    debug!(id = note.id, "note created");
    state.publish(NoteEvent::NoteAdded { note: note.clone() });

    Ok((StatusCode::CREATED, Json(note)))
}

/// Delete a note by id and broadcast the change to subscribers
async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> RestResult<Json<DeleteResponse>> {
    let deleted = {
        let conn = lock_db(&state)?;
        memo_core::delete_note(&conn, id)?
    };

    if !deleted {
        return Err(RestError::NotFound("Note not found".to_string()));
    }

    debug!(id, "note deleted");
    state.publish(NoteEvent::NoteDeleted { id });

    Ok(Json(DeleteResponse { deleted: true }))
}

fn lock_db(state: &AppState) -> Result<std::sync::MutexGuard<'_, rusqlite::Connection>, RestError> {
    state
        .db
        .lock()
        .map_err(|_| RestError::Internal("notes database lock poisoned".to_string()))
}
