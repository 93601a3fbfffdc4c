//! Post routes

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::content::{NewPost, Post, PostPatch};

/// `GET /api/posts`
pub async fn list_published(State(state): State<Arc<AppState>>) -> Json<Vec<Post>> {
    Json(state.store.published_posts().await)
}

/// `GET /api/posts/:slug`; drafts are hidden
pub async fn get_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Post>> {
    match state.store.post_by_slug(&slug).await {
        Some(post) if post.published => Ok(Json(post)),
        _ => Err(ApiError::not_found("Post not found")),
    }
}

/// `GET /api/admin/posts`
pub async fn list_all(State(state): State<Arc<AppState>>) -> Json<Vec<Post>> {
    Json(state.store.all_posts().await)
}

/// `POST /api/admin/posts`
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewPost>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let Json(data) = payload.map_err(|e| ApiError::invalid_body(e, "Invalid post data"))?;

    let post = state
        .store
        .create_post(data)
        .await
        .map_err(|e| ApiError::from_store(e, "Invalid post data", "Failed to create post"))?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// `PUT /api/admin/posts/:id`
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<PostPatch>, JsonRejection>,
) -> ApiResult<Json<Post>> {
    let Json(patch) = payload.map_err(|e| ApiError::invalid_body(e, "Invalid post data"))?;

    state
        .store
        .update_post(&id, patch)
        .await
        .map_err(|e| ApiError::from_store(e, "Invalid post data", "Failed to update post"))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Post not found"))
}

/// `DELETE /api/admin/posts/:id`
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    if !state.store.delete_post(&id).await {
        return Err(ApiError::not_found("Post not found"));
    }

    Ok(Json(json!({ "message": "Post deleted successfully" })))
}
