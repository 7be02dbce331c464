use std::time::Duration;

use memo_core::{AddNoteRequest, Note};
use reqwest::StatusCode;

use super::StoreError;

/// Bounded timeout for remote calls; expiry is treated like any other
/// remote failure and triggers the fallback transition
const REQUEST_TIMEOUT: Duration = Duration::from_secs(4);

/// HTTP client for the authoritative remote note store
#[derive(Clone)]
pub struct RemoteStore {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Websocket URL of the change-notification endpoint
    pub fn events_url(&self) -> String {
        let ws_base = if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            format!("ws://{}", self.base_url)
        };

        format!("{ws_base}/events")
    }

    pub async fn list(&self) -> Result<Vec<Note>, StoreError> {
        let response = self
            .http
            .get(format!("{}/notes", self.base_url))
            .send()
            .await
            .map_err(unavailable)?;

        let response = check_success(response)?;

        response.json::<Vec<Note>>().await.map_err(unavailable)
    }

    pub async fn insert(&self, content: &str) -> Result<Note, StoreError> {
        let request = AddNoteRequest {
            content: content.to_string(),
        };

        let response = self
            .http
            .post(format!("{}/notes", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(unavailable)?;

        // Server-side trim rejected the content; mirrors the client-side check
        if response.status() == StatusCode::BAD_REQUEST {
            return Err(StoreError::EmptyContent);
        }

        let response = check_success(response)?;

        response.json::<Note>().await.map_err(unavailable)
    }

    /// Returns Ok(false) when the note no longer exists; "not found" is a
    /// no-op success, not a connectivity failure
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let response = self
            .http
            .delete(format!("{}/notes/{}", self.base_url, id))
            .send()
            .await
            .map_err(unavailable)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }

        check_success(response)?;

        Ok(true)
    }
}

fn unavailable(err: reqwest::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

fn check_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(StoreError::Unavailable(format!(
            "server responded with {}",
            response.status()
        )))
    }
}
