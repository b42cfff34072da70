use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::StoreError;

/// A persisted bookmark record. `id` and `created_at` are assigned once at
/// insert time; `updated_at` is refreshed on every successful save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Fields accepted when creating a bookmark.
#[derive(Debug, Clone, Default)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl NewBookmark {
    /// Trim all text fields, mirroring what the schema expects to receive.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.url = self.url.trim().to_string();
        self.description = self.description.trim().to_string();
        self.tags = self.tags.iter().map(|t| t.trim().to_string()).collect();
        self
    }

    /// Required-field check at the store boundary: `title` and `url` must be
    /// non-empty once trimmed.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.title.trim().is_empty() {
            return Err(StoreError::Validation("title is required".into()));
        }
        if self.url.trim().is_empty() {
            return Err(StoreError::Validation("url is required".into()));
        }
        Ok(())
    }
}

/// Partial update. Text fields that are absent or blank keep the existing
/// value; `tags` is replaced whenever present, even by an empty list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.tags.is_none()
    }

    /// Merge this patch into `bookmark`, leaving `id` and `created_at`
    /// untouched. The caller refreshes `updated_at`.
    pub fn apply(&self, bookmark: &mut Bookmark) {
        if let Some(title) = non_blank(self.title.as_deref()) {
            bookmark.title = title;
        }
        if let Some(url) = non_blank(self.url.as_deref()) {
            bookmark.url = url;
        }
        if let Some(description) = non_blank(self.description.as_deref()) {
            bookmark.description = description;
        }
        if let Some(tags) = &self.tags {
            bookmark.tags = tags.iter().map(|t| t.trim().to_string()).collect();
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
