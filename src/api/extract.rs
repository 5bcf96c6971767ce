use axum::extract::FromRequest;
use serde_json::Value;

use crate::error::ApiError;

/// JSON body extractor that reports rejections as `ApiError` JSON bodies
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Read a JSON field that must be a number when present; `null` counts as absent.
pub fn optional_number(value: Option<&Value>, field: &str) -> Result<Option<f64>, ApiError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| not_a_number(field)),
        Some(_) => Err(not_a_number(field)),
    }
}

/// Read a JSON field that must be present and numeric.
pub fn required_number(value: Option<&Value>, field: &str) -> Result<f64, ApiError> {
    optional_number(value, field)?.ok_or_else(|| not_a_number(field))
}

fn not_a_number(field: &str) -> ApiError {
    ApiError::validation_error(format!("{} must be a number", field))
}
