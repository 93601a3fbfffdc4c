//! Category routes

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::content::{Category, CategoryPatch, NewCategory, Post};

/// `GET /api/categories`
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Category>> {
    Json(state.store.all_categories().await)
}

/// `GET /api/categories/:slug`
pub async fn get_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Category>> {
    state
        .store
        .category_by_slug(&slug)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Category not found"))
}

/// `GET /api/categories/:slug/posts`
///
/// Posts name their category, so the slug is resolved to a name first. A
/// segment that is not a known slug is matched as a name directly.
pub async fn posts(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Json<Vec<Post>> {
    let name = match state.store.category_by_slug(&slug).await {
        Some(category) => category.name,
        None => slug,
    };

    Json(state.store.posts_by_category(&name).await)
}

/// `POST /api/admin/categories`
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Json(data) = payload.map_err(|e| ApiError::invalid_body(e, "Invalid category data"))?;

    let category = state.store.create_category(data).await.map_err(|e| {
        ApiError::from_store(e, "Invalid category data", "Failed to create category")
    })?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// `PUT /api/admin/categories/:id`
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryPatch>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let Json(patch) = payload.map_err(|e| ApiError::invalid_body(e, "Invalid category data"))?;

    state
        .store
        .update_category(&id, patch)
        .await
        .map_err(|e| ApiError::from_store(e, "Invalid category data", "Failed to update category"))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Category not found"))
}

/// `DELETE /api/admin/categories/:id`
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let removed = state.store.delete_category(&id).await.map_err(|e| {
        ApiError::from_store(e, "Invalid category data", "Failed to delete category")
    })?;

    if !removed {
        return Err(ApiError::not_found("Category not found"));
    }

    Ok(Json(json!({ "message": "Category deleted successfully" })))
}
