use thiserror::Error;

use super::http::{BookmarkClient, ClientError};
use crate::bookmarks::dto::CreateBookmarkRequest;
use crate::bookmarks::model::Bookmark;

/// Predefined tags offered as a multi-select alongside free-typed ones.
pub const COMMON_TAGS: [&str; 12] = [
    "work",
    "personal",
    "reading",
    "development",
    "design",
    "tutorial",
    "blog",
    "news",
    "social",
    "entertainment",
    "shopping",
    "finance",
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("Title and URL are required")]
    MissingRequired,

    #[error("Please enter a valid URL")]
    InvalidUrl,

    #[error("Failed to add bookmark. Please try again.")]
    SubmitFailed,
}

/// State behind the add-bookmark form. Validation runs entirely client-side;
/// a rejected submission never reaches the network.
#[derive(Debug, Default)]
pub struct BookmarkForm {
    pub title: String,
    pub url: String,
    pub description: String,
    selected_common_tags: Vec<String>,
    custom_tags: Vec<String>,
    tag_input: String,
    error: Option<FormError>,
    submitting: bool,
}

impl BookmarkForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    /// Whether the submit control should be disabled: one in-flight request
    /// per action.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn selected_common_tags(&self) -> &[String] {
        &self.selected_common_tags
    }

    pub fn custom_tags(&self) -> &[String] {
        &self.custom_tags
    }

    pub fn tag_input(&self) -> &str {
        &self.tag_input
    }

    pub fn set_tag_input(&mut self, value: impl Into<String>) {
        self.tag_input = value.into();
    }

    /// Click on a common tag: select it, or deselect if already selected.
    pub fn toggle_common_tag(&mut self, tag: &str) {
        if let Some(pos) = self.selected_common_tags.iter().position(|t| t == tag) {
            self.selected_common_tags.remove(pos);
        } else {
            self.selected_common_tags.push(tag.to_string());
        }
    }

    /// Enter or comma pressed in the tag input: turn the buffer into a chip.
    /// Blank input and exact duplicates are dropped.
    pub fn commit_tag_input(&mut self) {
        let tag = self.tag_input.trim().to_string();
        if !tag.is_empty() && !self.custom_tags.contains(&tag) {
            self.custom_tags.push(tag);
        }
        self.tag_input.clear();
    }

    pub fn remove_custom_tag(&mut self, tag: &str) {
        self.custom_tags.retain(|t| t != tag);
    }

    /// Common-tag selection unioned with the custom chips, deduplicated
    /// within this submission. The store itself permits duplicates.
    pub fn assembled_tags(&self) -> Vec<String> {
        let mut tags = self.selected_common_tags.clone();
        for tag in &self.custom_tags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags
    }

    /// Client-side gate before the create call.
    pub fn validate(&self) -> Result<CreateBookmarkRequest, FormError> {
        if self.title.trim().is_empty() || self.url.trim().is_empty() {
            return Err(FormError::MissingRequired);
        }
        if reqwest::Url::parse(self.url.trim()).is_err() {
            return Err(FormError::InvalidUrl);
        }
        Ok(CreateBookmarkRequest {
            title: self.title.clone(),
            url: self.url.clone(),
            description: Some(self.description.clone()),
            tags: Some(self.assembled_tags()),
        })
    }

    /// Validate, then issue the create call. On success all fields reset; on
    /// failure the fields are preserved and an inline error is recorded so
    /// the user can retry.
    pub async fn submit(&mut self, client: &BookmarkClient) -> Result<Bookmark, FormError> {
        let request = match self.validate() {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.clone());
                return Err(e);
            }
        };

        self.submitting = true;
        self.error = None;
        let result = client.create(&request).await;
        self.submitting = false;

        match result {
            Ok(bookmark) => {
                self.reset();
                Ok(bookmark)
            }
            Err(e) => {
                log_submit_failure(&e);
                self.error = Some(FormError::SubmitFailed);
                Err(FormError::SubmitFailed)
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn log_submit_failure(e: &ClientError) {
    tracing::warn!(error = %e, "failed to create bookmark");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> BookmarkForm {
        let mut form = BookmarkForm::new();
        form.title = "Example".into();
        form.url = "https://example.com".into();
        form
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut form = filled_form();
        form.title = "  ".into();
        assert_eq!(form.validate().unwrap_err(), FormError::MissingRequired);
    }

    #[test]
    fn empty_url_is_rejected() {
        let mut form = filled_form();
        form.url = String::new();
        assert_eq!(form.validate().unwrap_err(), FormError::MissingRequired);
    }

    #[test]
    fn syntactically_invalid_url_is_rejected() {
        let mut form = filled_form();
        form.url = "not a url".into();
        assert_eq!(form.validate().unwrap_err(), FormError::InvalidUrl);
    }

    #[tokio::test]
    async fn invalid_submission_never_reaches_the_network() {
        // Nothing listens on this port: any request through the client would
        // fail with a transport error, but validation must reject first.
        let mut form = filled_form();
        form.url = "not a url".into();
        let client = BookmarkClient::new("http://127.0.0.1:1");

        let err = form.submit(&client).await.unwrap_err();
        assert_eq!(err, FormError::InvalidUrl);
        assert_eq!(form.error(), Some(&FormError::InvalidUrl));
        assert_eq!(form.title, "Example");
    }

    #[test]
    fn valid_form_produces_the_create_request() {
        let mut form = filled_form();
        form.description = "notes".into();
        form.toggle_common_tag("work");
        let request = form.validate().unwrap();
        assert_eq!(request.title, "Example");
        assert_eq!(request.tags, Some(vec!["work".to_string()]));
    }

    #[test]
    fn common_tags_toggle_on_and_off() {
        let mut form = BookmarkForm::new();
        form.toggle_common_tag("work");
        form.toggle_common_tag("news");
        form.toggle_common_tag("work");
        assert_eq!(form.selected_common_tags(), ["news".to_string()]);
    }

    #[test]
    fn tag_input_commits_trimmed_unique_chips() {
        let mut form = BookmarkForm::new();
        form.set_tag_input(" rust ");
        form.commit_tag_input();
        form.set_tag_input("rust");
        form.commit_tag_input();
        form.set_tag_input("   ");
        form.commit_tag_input();
        assert_eq!(form.custom_tags(), ["rust".to_string()]);
        assert_eq!(form.tag_input(), "");
    }

    #[test]
    fn assembled_tags_union_deduplicates_across_lists() {
        let mut form = BookmarkForm::new();
        form.toggle_common_tag("work");
        form.toggle_common_tag("news");
        form.set_tag_input("work");
        form.commit_tag_input();
        form.set_tag_input("rust");
        form.commit_tag_input();
        assert_eq!(
            form.assembled_tags(),
            vec!["work".to_string(), "news".to_string(), "rust".to_string()]
        );
    }

    #[test]
    fn remove_custom_tag_drops_the_chip() {
        let mut form = BookmarkForm::new();
        form.set_tag_input("rust");
        form.commit_tag_input();
        form.remove_custom_tag("rust");
        assert!(form.custom_tags().is_empty());
    }

    #[test]
    fn reset_clears_every_field() {
        let mut form = filled_form();
        form.toggle_common_tag("work");
        form.set_tag_input("rust");
        form.commit_tag_input();
        form.reset();
        assert!(form.title.is_empty());
        assert!(form.url.is_empty());
        assert!(form.assembled_tags().is_empty());
        assert!(form.error().is_none());
    }
}
