use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

const INVALID_PAGINATION: &str = "Invalid pagination parameters";

/// Raw `?page=&limit=` query; values are validated by `PageRequest`
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// A validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Result<Self, ApiError> {
        if page < 1 || limit < 1 || limit > MAX_LIMIT {
            return Err(ApiError::validation_error(INVALID_PAGINATION));
        }
        Ok(Self { page, limit })
    }

    /// Values without a leading integer fall back to defaults; `"20abc"` reads as 20
    /// and `"1.5"` as 1. Whatever integer is read must be in range.
    pub fn from_query(query: &PageQuery) -> Result<Self, ApiError> {
        let page = parse_param(query.page.as_deref(), DEFAULT_PAGE)?;
        let limit = parse_param(query.limit.as_deref(), DEFAULT_LIMIT)?;
        Self::new(page, limit)
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }
}

fn parse_param(raw: Option<&str>, default: u32) -> Result<u32, ApiError> {
    match leading_integer(raw.unwrap_or_default()) {
        None => Ok(default),
        Some(value) => {
            u32::try_from(value).map_err(|_| ApiError::validation_error(INVALID_PAGINATION))
        }
    }
}

/// Optional sign plus the run of digits at the start of `raw`, ignoring leading
/// whitespace. Digit runs too large for `i64` saturate.
fn leading_integer(raw: &str) -> Option<i64> {
    let value = raw.trim_start();
    let (negative, rest) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let magnitude = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let limit = i64::from(request.limit);
        let total = total.max(0);
        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages: (total + limit - 1) / limit,
        }
    }
}

/// One page of results plus its metadata
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T: Serialize> Page<T> {
    pub fn new(data: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            data,
            pagination: Pagination::new(request, total),
        }
    }
}
