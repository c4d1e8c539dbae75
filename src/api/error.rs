//! API error type and domain error → HTTP status mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::error::{RunError, StoreError, ValidationError};

/// Message returned for run failures that are not the caller's fault.
pub const RUN_FAILED_MESSAGE: &str = "Graph run failed.";

/// Error returned by every handler; rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
  pub status: StatusCode,
  pub message: String,
}

impl ApiError {
  pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status,
      message: message.into(),
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::new(StatusCode::NOT_FOUND, message)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status, Json(json!({ "error": self.message }))).into_response()
  }
}

impl From<StoreError> for ApiError {
  fn from(err: StoreError) -> Self {
    let status = match &err {
      StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
      StoreError::Conflict(_) | StoreError::NodeInUse { .. } => StatusCode::CONFLICT,
      StoreError::InvalidReference(_) => StatusCode::BAD_REQUEST,
      StoreError::Io(_) | StoreError::Json(_) => {
        error!(error = %err, "store failure");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    Self::new(status, err.to_string())
  }
}

impl From<ValidationError> for ApiError {
  fn from(err: ValidationError) -> Self {
    match err {
      ValidationError::GraphNotFound(_) => Self::not_found(err.to_string()),
      ValidationError::Store(e) => e.into(),
      other => Self::bad_request(other.to_string()),
    }
  }
}

impl From<RunError> for ApiError {
  fn from(err: RunError) -> Self {
    match err {
      RunError::Config(e) => Self::bad_request(e.to_string()),
      RunError::GraphNotFound(_) => Self::not_found(err.to_string()),
      RunError::Store(StoreError::NotFound { .. }) => Self::not_found(err.to_string()),
      other => {
        error!(error = %other, "graph run failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, RUN_FAILED_MESSAGE)
      }
    }
  }
}
