use axum::extract::{Extension, State};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{AuthService, ProfileResponse};
use crate::state::AppState;

/// GET /api/auth/profile - The user the presented token belongs to
///
/// 404 if the account no longer exists even though the token is still valid.
pub async fn profile_get(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<ProfileResponse> {
    let response = AuthService::from_state(&state).profile(auth_user.id).await?;
    Ok(ApiResponse::success(response))
}
