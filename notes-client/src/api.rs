//! Typed HTTP client for the notes REST API.

use async_trait::async_trait;
use notes_types::{ErrorBody, Note, NoteInput};
use reqwest::StatusCode;
use thiserror::Error;

/// Message shown when a failed response carries no usable `error` field
pub const GENERIC_FAILURE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-2xx response; `message` is what the server put in `error`
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Server { status, .. } if *status == StatusCode::NOT_FOUND.as_u16())
    }
}

/// The five note operations, as seen from a client
#[async_trait]
pub trait NotesApi: Send + Sync {
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError>;
    async fn get_note(&self, id: &str) -> Result<Note, ApiError>;
    async fn create_note(&self, input: &NoteInput) -> Result<Note, ApiError>;
    async fn update_note(&self, id: &str, input: &NoteInput) -> Result<Note, ApiError>;
    async fn delete_note(&self, id: &str) -> Result<(), ApiError>;
}

pub struct NotesApiClient {
    base_url: String,
    client: reqwest::Client,
}

/// Pull the `error` field out of a failure body, falling back to [`GENERIC_FAILURE`]
pub fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

impl NotesApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn notes_url(&self) -> String {
        format!("{}/api/notes", self.base_url)
    }

    pub fn note_url(&self, id: &str) -> String {
        format!("{}/api/notes/{}", self.base_url, id)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp.bytes().await.unwrap_or_default();
        let message = error_message(&body);
        log::debug!("Notes API HTTP {}: {}", status, message);
        Err(ApiError::Server { status, message })
    }

    async fn note_from(resp: reqwest::Response) -> Result<Note, ApiError> {
        Self::check(resp)
            .await?
            .json::<Note>()
            .await
            .map_err(ApiError::Decode)
    }
}

#[async_trait]
impl NotesApi for NotesApiClient {
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let resp = self
            .client
            .get(self.notes_url())
            .send()
            .await
            .map_err(ApiError::Transport)?;

        Self::check(resp)
            .await?
            .json::<Vec<Note>>()
            .await
            .map_err(ApiError::Decode)
    }

    async fn get_note(&self, id: &str) -> Result<Note, ApiError> {
        let resp = self
            .client
            .get(self.note_url(id))
            .send()
            .await
            .map_err(ApiError::Transport)?;

        Self::note_from(resp).await
    }

    async fn create_note(&self, input: &NoteInput) -> Result<Note, ApiError> {
        let resp = self
            .client
            .post(self.notes_url())
            .json(input)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        Self::note_from(resp).await
    }

    async fn update_note(&self, id: &str, input: &NoteInput) -> Result<Note, ApiError> {
        let resp = self
            .client
            .put(self.note_url(id))
            .json(input)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        Self::note_from(resp).await
    }

    async fn delete_note(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .client
            .delete(self.note_url(id))
            .send()
            .await
            .map_err(ApiError::Transport)?;

        // 204, nothing to decode
        Self::check(resp).await?;
        Ok(())
    }
}
