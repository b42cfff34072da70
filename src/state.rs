use crate::bookmarks::repo::{BookmarkStore, MemoryBookmarkStore, PgBookmarkStore};
use crate::config::AppConfig;
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookmarkStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Connect to Postgres and run pending migrations. A failed connection
    /// aborts startup; a missing migrations folder only warns.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            tracing::warn!(error = %e, "migrations folder not found or migration failed; continuing");
        }

        Ok(Self {
            store: Arc::new(PgBookmarkStore::new(db)),
            config,
        })
    }

    pub fn from_parts(store: Arc<dyn BookmarkStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    /// State backed by the in-memory store, for tests and embedded use.
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemoryBookmarkStore::new()),
            config: Arc::new(AppConfig::local_defaults()),
        }
    }
}
