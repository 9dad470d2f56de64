use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// Error envelope returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `"error"`
    #[schema(example = "error")]
    pub status: String,
    /// Human-readable error description
    pub message: String,
    /// Per-field validation messages, present for rejected submissions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    /// Unique request identifier for support and debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Field name to the list of messages rejecting it.
///
/// Nested fields use a path form, e.g. `items[1].product`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }
}

impl IntoIterator for FieldErrors {
    type Item = (String, Vec<String>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errors) in err.field_errors() {
            // A blank value makes every other complaint about the field noise.
            let blank = errors.iter().any(|e| e.code == "blank");
            for error in errors.iter().filter(|e| !blank || e.code == "blank") {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value.".to_string());
                fields.add(field.to_string(), message);
            }
        }
        fields
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("Invalid data provided")]
    InvalidSubmission(FieldErrors),
}

impl ServiceError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationError(_) | Self::InvalidSubmission(_) => StatusCode::BAD_REQUEST,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Returns the error message suitable for HTTP responses.
    /// Internal errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    /// Replaces the body of a 5xx error with an operation-specific generic message.
    /// Client errors pass through untouched.
    pub fn with_generic_message(self, message: &str) -> ApiError {
        if self.is_server_error() {
            tracing::error!(error = %self, "{}", message);
            ApiError::Internal(message.to_string())
        } else {
            ApiError::Service(self)
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        ApiError::Service(self).into_response()
    }
}

/// API error type for HTTP responses
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// 500 carrying a caller-chosen generic message
    #[error("{0}")]
    Internal(String),

    #[error("Invalid data provided")]
    MalformedBody(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::Service(ServiceError::InvalidSubmission(errors)) => (
                StatusCode::BAD_REQUEST,
                "Invalid data provided".to_string(),
                Some(errors),
            ),
            ApiError::Service(err) => {
                if err.is_server_error() {
                    tracing::error!(error = %err, "request failed");
                }
                (err.status_code(), err.response_message(), None)
            }
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message, None),
            ApiError::MalformedBody(detail) => {
                let mut errors = FieldErrors::new();
                errors.add("non_field_errors", detail);
                (
                    StatusCode::BAD_REQUEST,
                    "Invalid data provided".to_string(),
                    Some(errors),
                )
            }
        };

        let body = ErrorResponse {
            status: "error".to_string(),
            message,
            errors,
            request_id: current_request_id(),
        };

        (status, Json(body)).into_response()
    }
}
