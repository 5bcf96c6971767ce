// handlers/public/readings.rs - /api/readings handlers

use axum::extract::{Query, State};
use serde_json::Value;

use crate::api::{optional_number, required_number, ApiJson, Page, PageQuery, PageRequest};
use crate::database::models::{NewReading, SensorReading};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/readings?page=&limit= - Readings, newest first
///
/// `page` defaults to 1 and `limit` to 10 (max 100).
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<SensorReading>> {
    let request = PageRequest::from_query(&query)?;

    let total = state.readings().count().await?;
    let data = state
        .readings()
        .list(request.offset(), request.limit())
        .await?;

    Ok(ApiResponse::success(Page::new(data, request, total)))
}

/// GET /api/readings/latest - Most recent reading, or `null` when there is none
pub async fn latest(State(state): State<AppState>) -> ApiResult<Option<SensorReading>> {
    let reading = state.readings().latest().await?;
    Ok(ApiResponse::success(reading))
}

/// POST /api/readings - Record a reading
///
/// Expected Input:
/// ```json
/// { "temperature": 21.5, "threshold_value": 30 }
/// ```
/// `threshold_value` is optional and may be `null`.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Value>,
) -> ApiResult<SensorReading> {
    let reading = NewReading {
        temperature: required_number(payload.get("temperature"), "temperature")?,
        threshold_value: optional_number(payload.get("threshold_value"), "threshold_value")?,
    };

    let created = state.readings().create(reading).await?;
    tracing::debug!(reading_id = created.id, "Reading recorded");

    Ok(ApiResponse::created(created))
}
