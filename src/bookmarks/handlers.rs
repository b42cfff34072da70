use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{CreateBookmarkRequest, MessageResponse, UpdateBookmarkRequest};
use super::model::Bookmark;
use super::repo::StoreError;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/bookmarks", get(list_bookmarks))
        .route("/bookmarks/:id", get(get_bookmark))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/bookmarks", post(create_bookmark))
        .route("/bookmarks/:id", put(update_bookmark))
        .route("/bookmarks/:id", delete(delete_bookmark))
}

#[instrument(skip(state))]
pub async fn list_bookmarks(
    State(state): State<AppState>,
) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let bookmarks = state.store.list_all().await.map_err(internal)?;
    Ok(Json(bookmarks))
}

#[instrument(skip(state))]
pub async fn get_bookmark(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Bookmark>, ApiError> {
    match state.store.get_by_id(id).await {
        Ok(bookmark) => Ok(Json(bookmark)),
        Err(StoreError::NotFound) => Err(not_found()),
        Err(e) => Err(internal(e)),
    }
}

#[instrument(skip(state, body))]
pub async fn create_bookmark(
    State(state): State<AppState>,
    Json(body): Json<CreateBookmarkRequest>,
) -> Result<(StatusCode, Json<Bookmark>), ApiError> {
    // Validation and store failures both surface as 400 here.
    let bookmark = state
        .store
        .insert(body.into_new_bookmark())
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok((StatusCode::CREATED, Json(bookmark)))
}

#[instrument(skip(state, body))]
pub async fn update_bookmark(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBookmarkRequest>,
) -> Result<Json<Bookmark>, ApiError> {
    match state.store.update_fields(id, body.into_patch()).await {
        Ok(bookmark) => Ok(Json(bookmark)),
        Err(StoreError::NotFound) => Err(not_found()),
        Err(e) => Err(ApiError::BadRequest(e.to_string())),
    }
}

#[instrument(skip(state))]
pub async fn delete_bookmark(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    match state.store.delete_by_id(id).await {
        Ok(()) => Ok(Json(MessageResponse::new("Bookmark deleted"))),
        Err(StoreError::NotFound) => Err(not_found()),
        Err(e) => Err(internal(e)),
    }
}

fn not_found() -> ApiError {
    ApiError::NotFound("Bookmark not found".into())
}

fn internal(e: StoreError) -> ApiError {
    tracing::error!(error = %e, "store operation failed");
    ApiError::Internal(e.to_string())
}
