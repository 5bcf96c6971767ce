// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::extract::State;

use crate::api::ApiJson;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{AuthResponse, AuthService, LoginRequest};
use crate::state::AppState;

/// POST /api/auth/login - Authenticate user and receive a token
///
/// Expected Input:
/// ```json
/// {
///   "email": "ada@example.com",
///   "password": "string"
/// }
/// ```
pub async fn login_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let response = AuthService::from_state(&state).login(payload).await?;
    Ok(ApiResponse::success(response))
}
