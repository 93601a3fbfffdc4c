//! Static-password admin gate
//!
//! There are no sessions: logging in echoes the password back as the token,
//! and admin requests carry it as `Authorization: Bearer <password>`.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiResult};
use super::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub success: bool,
}

/// `POST /api/admin/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if payload.password != state.config.admin_password {
        tracing::warn!("Rejected admin login");
        return Err(ApiError::unauthorized("Invalid password"));
    }

    Ok(Json(LoginResponse {
        token: state.config.admin_password.clone(),
        success: true,
    }))
}

/// Middleware for every admin route except login
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let expected = format!("Bearer {}", state.config.admin_password);
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == expected)
        .unwrap_or(false);

    if !authorized {
        return Err(ApiError::unauthorized("Unauthorized"));
    }

    Ok(next.run(request).await)
}
