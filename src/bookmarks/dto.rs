use serde::{Deserialize, Serialize};

use super::model::{BookmarkPatch, NewBookmark};

/// Request body for `POST /api/bookmarks`. Serialize is derived so the
/// client binding can reuse the same type. `title` and `url` default to
/// empty when the key is missing, so the required-field check at the store
/// boundary answers with 400 `{message}` instead of a deserialization
/// rejection.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBookmarkRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl CreateBookmarkRequest {
    pub fn into_new_bookmark(self) -> NewBookmark {
        NewBookmark {
            title: self.title,
            url: self.url,
            description: self.description.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
        }
    }
}

/// Request body for `PUT /api/bookmarks/{id}`. Every field is optional;
/// absent fields keep their stored value, so `None` must not serialize
/// as an explicit null.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateBookmarkRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl UpdateBookmarkRequest {
    pub fn into_patch(self) -> BookmarkPatch {
        BookmarkPatch {
            title: self.title,
            url: self.url,
            description: self.description,
            tags: self.tags,
        }
    }
}

/// Plain `{message}` body used for the liveness route, delete confirmations
/// and every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
