use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod events;
pub mod health;
pub mod notes;

pub fn setup_router(app_state: AppState) -> Router {
    Router::new()
        .merge(health::health_routes())
        .merge(notes::note_routes())
        .merge(events::event_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
