use axum::extract::{Extension, State};
use serde_json::Value;

use crate::api::{required_number, ApiJson};
use crate::database::models::{NewThreshold, Threshold};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// POST /api/thresholds - Set a new threshold
///
/// Expected Input:
/// ```json
/// { "threshold_value": 30 }
/// ```
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiJson(payload): ApiJson<Value>,
) -> ApiResult<Threshold> {
    let threshold = NewThreshold {
        threshold_value: required_number(payload.get("threshold_value"), "threshold_value")?,
    };

    let created = state.thresholds().create(threshold).await?;
    tracing::info!(
        threshold_id = created.id,
        value = created.threshold_value,
        set_by = %auth_user.email,
        "Threshold updated"
    );

    Ok(ApiResponse::created(created))
}
