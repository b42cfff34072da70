use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{Bookmark, BookmarkPatch, NewBookmark};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Bookmark not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Storage boundary for bookmark records. The service is stateless; every
/// request resolves against one of these implementations.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// All bookmarks, newest `created_at` first.
    async fn list_all(&self) -> Result<Vec<Bookmark>, StoreError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Bookmark, StoreError>;
    async fn insert(&self, new: NewBookmark) -> Result<Bookmark, StoreError>;
    /// Partial merge by `id`; refreshes `updated_at` even when the patch
    /// changes nothing. Last write wins, no conflict detection.
    async fn update_fields(&self, id: Uuid, patch: BookmarkPatch) -> Result<Bookmark, StoreError>;
    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;
}

pub struct PgBookmarkStore {
    db: PgPool,
}

impl PgBookmarkStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookmarkStore for PgBookmarkStore {
    async fn list_all(&self) -> Result<Vec<Bookmark>, StoreError> {
        let rows = sqlx::query_as::<_, Bookmark>(
            r#"
            SELECT id, title, url, description, tags, created_at, updated_at
            FROM bookmarks
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Bookmark, StoreError> {
        let row = sqlx::query_as::<_, Bookmark>(
            r#"
            SELECT id, title, url, description, tags, created_at, updated_at
            FROM bookmarks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        row.ok_or(StoreError::NotFound)
    }

    async fn insert(&self, new: NewBookmark) -> Result<Bookmark, StoreError> {
        let new = new.normalized();
        new.validate()?;

        let now = OffsetDateTime::now_utc();
        let row = sqlx::query_as::<_, Bookmark>(
            r#"
            INSERT INTO bookmarks (id, title, url, description, tags, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id, title, url, description, tags, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(&new.url)
        .bind(&new.description)
        .bind(&new.tags)
        .bind(now)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn update_fields(&self, id: Uuid, patch: BookmarkPatch) -> Result<Bookmark, StoreError> {
        let mut bookmark = self.get_by_id(id).await?;
        patch.apply(&mut bookmark);
        bookmark.updated_at = OffsetDateTime::now_utc();

        let row = sqlx::query_as::<_, Bookmark>(
            r#"
            UPDATE bookmarks
            SET title = $2, url = $3, description = $4, tags = $5, updated_at = $6
            WHERE id = $1
            RETURNING id, title, url, description, tags, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&bookmark.title)
        .bind(&bookmark.url)
        .bind(&bookmark.description)
        .bind(&bookmark.tags)
        .bind(bookmark.updated_at)
        .fetch_optional(&self.db)
        .await?;
        row.ok_or(StoreError::NotFound)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

/// In-memory store with the same boundary semantics as the Postgres one.
/// Rows are kept newest-first, matching the `ORDER BY created_at DESC` scan.
#[derive(Default)]
pub struct MemoryBookmarkStore {
    rows: RwLock<Vec<Bookmark>>,
}

impl MemoryBookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookmarkStore for MemoryBookmarkStore {
    async fn list_all(&self) -> Result<Vec<Bookmark>, StoreError> {
        let rows = self.rows.read().await;
        let mut out = rows.clone();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Bookmark, StoreError> {
        let rows = self.rows.read().await;
        rows.iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, new: NewBookmark) -> Result<Bookmark, StoreError> {
        let new = new.normalized();
        new.validate()?;

        let now = OffsetDateTime::now_utc();
        let bookmark = Bookmark {
            id: Uuid::new_v4(),
            title: new.title,
            url: new.url,
            description: new.description,
            tags: new.tags,
            created_at: now,
            updated_at: now,
        };
        let mut rows = self.rows.write().await;
        rows.insert(0, bookmark.clone());
        Ok(bookmark)
    }

    async fn update_fields(&self, id: Uuid, patch: BookmarkPatch) -> Result<Bookmark, StoreError> {
        let mut rows = self.rows.write().await;
        let bookmark = rows
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound)?;
        patch.apply(bookmark);
        bookmark.updated_at = OffsetDateTime::now_utc();
        Ok(bookmark.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|b| b.id != id);
        if rows.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_bookmark(title: &str) -> NewBookmark {
        NewBookmark {
            title: title.into(),
            url: "https://example.com".into(),
            description: String::new(),
            tags: vec!["work".into()],
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_equal_timestamps() {
        let store = MemoryBookmarkStore::new();
        let created = store.insert(new_bookmark("Example")).await.unwrap();
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(store.get_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn insert_rejects_blank_required_fields() {
        let store = MemoryBookmarkStore::new();
        let err = store.insert(new_bookmark("  ")).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryBookmarkStore::new();
        let first = store.insert(new_bookmark("first")).await.unwrap();
        let second = store.insert(new_bookmark("second")).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn update_merges_and_refreshes_updated_at() {
        let store = MemoryBookmarkStore::new();
        let created = store.insert(new_bookmark("Example")).await.unwrap();

        let patch = BookmarkPatch {
            description: Some("note".into()),
            ..Default::default()
        };
        let updated = store.update_fields(created.id, patch).await.unwrap();
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.url, created.url);
        assert_eq!(updated.description, "note");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn empty_patch_is_content_idempotent() {
        let store = MemoryBookmarkStore::new();
        let created = store.insert(new_bookmark("Example")).await.unwrap();

        let updated = store
            .update_fields(created.id, BookmarkPatch::default())
            .await
            .unwrap();
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.url, created.url);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.tags, created.tags);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = MemoryBookmarkStore::new();
        let created = store.insert(new_bookmark("Example")).await.unwrap();

        store.delete_by_id(created.id).await.unwrap();
        assert!(matches!(
            store.get_by_id(created.id).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.delete_by_id(created.id).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = MemoryBookmarkStore::new();
        let err = store
            .update_fields(Uuid::new_v4(), BookmarkPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
