// handlers/public/thresholds.rs - GET /api/thresholds handlers
// Creation lives in handlers/protected/thresholds.rs

use axum::extract::{Query, State};

use crate::api::{Page, PageQuery, PageRequest};
use crate::database::models::Threshold;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/thresholds?page=&limit= - Thresholds, newest first
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<Threshold>> {
    let request = PageRequest::from_query(&query)?;

    let total = state.thresholds().count().await?;
    let data = state
        .thresholds()
        .list(request.offset(), request.limit())
        .await?;

    Ok(ApiResponse::success(Page::new(data, request, total)))
}

/// GET /api/thresholds/latest - Threshold currently in effect, or `null`
pub async fn latest(State(state): State<AppState>) -> ApiResult<Option<Threshold>> {
    let threshold = state.thresholds().latest().await?;
    Ok(ApiResponse::success(threshold))
}
