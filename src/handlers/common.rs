use crate::errors::{ApiError, ServiceError};
use crate::services::catalog::INVALID_PAGINATION;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Unwraps a JSON body, turning unreadable payloads into the validation envelope
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))
}

/// Pagination parameters for list operations.
///
/// Kept as raw text so that non-numeric values are reported as a pagination
/// error rather than a query rejection.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
pub struct PaginationParams {
    /// Page number, starting at 1
    pub page: Option<String>,
    /// Items per page
    pub page_size: Option<String>,
}

impl PaginationParams {
    /// Returns `(page, page_size)`, falling back to page 1 and `default_page_size`
    pub fn resolve(&self, default_page_size: u64) -> Result<(u64, u64), ServiceError> {
        let page = parse_positive(self.page.as_deref(), 1)?;
        let page_size = parse_positive(self.page_size.as_deref(), default_page_size)?;
        Ok((page, page_size))
    }
}

fn parse_positive(raw: Option<&str>, default: u64) -> Result<u64, ServiceError> {
    let invalid = || ServiceError::ValidationError(INVALID_PAGINATION.to_string());
    let value = match raw {
        None => return Ok(default),
        Some(raw) => raw.trim().parse::<i64>().map_err(|_| invalid())?,
    };
    u64::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn params(page: Option<&str>, page_size: Option<&str>) -> PaginationParams {
        PaginationParams {
            page: page.map(str::to_string),
            page_size: page_size.map(str::to_string),
        }
    }

    #[test]
    fn defaults_apply_when_absent() {
        assert_eq!(params(None, None).resolve(10).unwrap(), (1, 10));
        assert_eq!(params(Some("3"), None).resolve(7).unwrap(), (3, 7));
    }

    #[test]
    fn non_numeric_and_non_positive_values_are_rejected() {
        for (page, size) in [
            (Some("abc"), None),
            (None, Some("1.5")),
            (Some("0"), None),
            (None, Some("-4")),
            (Some(""), None),
        ] {
            assert_matches!(
                params(page, size).resolve(10),
                Err(ServiceError::ValidationError(ref msg)) if msg == INVALID_PAGINATION
            );
        }
    }
}
