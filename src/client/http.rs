use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::bookmarks::dto::{CreateBookmarkRequest, MessageResponse, UpdateBookmarkRequest};
use crate::bookmarks::model::Bookmark;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection refused, body read error, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Thin binding over the five bookmark service operations. One request per
/// call; no retries, no timeouts, no cancellation.
#[derive(Debug, Clone)]
pub struct BookmarkClient {
    client: Client,
    base_url: String,
}

impl BookmarkClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    pub async fn list(&self) -> ClientResult<Vec<Bookmark>> {
        let response = self.client.get(self.url("api/bookmarks")).send().await?;
        Self::handle_response(response).await
    }

    pub async fn get(&self, id: Uuid) -> ClientResult<Bookmark> {
        let response = self
            .client
            .get(self.url(&format!("api/bookmarks/{id}")))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn create(&self, request: &CreateBookmarkRequest) -> ClientResult<Bookmark> {
        let response = self
            .client
            .post(self.url("api/bookmarks"))
            .json(request)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn update(&self, id: Uuid, request: &UpdateBookmarkRequest) -> ClientResult<Bookmark> {
        let response = self
            .client
            .put(self.url(&format!("api/bookmarks/{id}")))
            .json(request)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn delete(&self, id: Uuid) -> ClientResult<MessageResponse> {
        let response = self
            .client
            .delete(self.url(&format!("api/bookmarks/{id}")))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<MessageResponse>(&text)
                .map(|m| m.message)
                .unwrap_or(text);
            return match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(message)),
                _ => Err(ClientError::Internal(message)),
            };
        }

        response.json().await.map_err(Into::into)
    }
}
