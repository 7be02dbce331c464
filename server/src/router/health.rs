use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health/ping", get(ping))
}

pub async fn ping() -> StatusCode {
    StatusCode::OK
}
