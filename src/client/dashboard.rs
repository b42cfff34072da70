use std::collections::BTreeSet;

use uuid::Uuid;

use super::http::{BookmarkClient, ClientResult};
use crate::bookmarks::model::Bookmark;

/// Application state behind the bookmark dashboard: the fetched list, the
/// active tag filter and the add-form visibility flag. Derivations are pure
/// so they can be tested without any rendering layer.
///
/// The list is a cache of server state. Mutation handlers only ever accept
/// server-confirmed records; a local write is never applied before the
/// service has acknowledged it.
#[derive(Debug, Default)]
pub struct Dashboard {
    bookmarks: Vec<Bookmark>,
    selected_tag: Option<String>,
    show_form: bool,
    loading: bool,
    pending_delete: Option<Uuid>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }

    /// Initial fetch. A failure is logged and the dashboard settles on an
    /// empty list; no error is surfaced to the user.
    pub async fn load(&mut self, client: &BookmarkClient) {
        match client.list().await {
            Ok(bookmarks) => self.bookmarks = bookmarks,
            Err(e) => tracing::warn!(error = %e, "failed to fetch bookmarks"),
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn selected_tag(&self) -> Option<&str> {
        self.selected_tag.as_deref()
    }

    pub fn show_form(&self) -> bool {
        self.show_form
    }

    pub fn toggle_form(&mut self) {
        self.show_form = !self.show_form;
    }

    /// Selecting the already-selected tag clears the filter.
    pub fn toggle_tag(&mut self, tag: &str) {
        if self.selected_tag.as_deref() == Some(tag) {
            self.selected_tag = None;
        } else {
            self.selected_tag = Some(tag.to_string());
        }
    }

    /// Bookmarks matching the active tag filter, or everything when no tag
    /// is selected.
    pub fn filtered_bookmarks(&self) -> Vec<&Bookmark> {
        match &self.selected_tag {
            Some(tag) => self
                .bookmarks
                .iter()
                .filter(|b| b.tags.iter().any(|t| t == tag))
                .collect(),
            None => self.bookmarks.iter().collect(),
        }
    }

    /// Distinct tags across all bookmarks. Order is not significant.
    pub fn all_tags(&self) -> Vec<String> {
        self.bookmarks
            .iter()
            .flat_map(|b| b.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// A freshly created, server-confirmed bookmark: prepend and close the
    /// form.
    pub fn bookmark_added(&mut self, bookmark: Bookmark) {
        self.bookmarks.insert(0, bookmark);
        self.show_form = false;
    }

    /// A server-confirmed update: replace the entry with the same id.
    pub fn bookmark_updated(&mut self, bookmark: Bookmark) {
        if let Some(existing) = self.bookmarks.iter_mut().find(|b| b.id == bookmark.id) {
            *existing = bookmark;
        }
    }

    pub fn bookmark_deleted(&mut self, id: Uuid) {
        self.bookmarks.retain(|b| b.id != id);
    }

    /// First half of the destructive flow: remember which record the user
    /// asked to delete, pending confirmation.
    pub fn request_delete(&mut self, id: Uuid) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<Uuid> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second half: issue the delete for the confirmed record and reconcile
    /// the local list on success. Errors leave the list untouched.
    pub async fn confirm_delete(&mut self, client: &BookmarkClient) -> ClientResult<()> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(());
        };
        client.delete(id).await?;
        self.bookmark_deleted(id);
        Ok(())
    }
}
