// handlers/public/auth/register.rs - POST /api/auth/register handler

use axum::extract::State;

use crate::api::ApiJson;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{AuthResponse, AuthService, RegisterRequest};
use crate::state::AppState;

/// POST /api/auth/register - Register new user account
///
/// Expected Input:
/// ```json
/// {
///   "email": "ada@example.com",
///   "password": "at least 6 characters",
///   "name": "Ada"
/// }
/// ```
///
/// Returns 201 with the created user (no password hash) and a token.
pub async fn register_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<AuthResponse> {
    let response = AuthService::from_state(&state).register(payload).await?;
    Ok(ApiResponse::created(response))
}
