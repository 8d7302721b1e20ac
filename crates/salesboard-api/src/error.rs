//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Two response envelopes exist for dashboard-client compatibility:
//! `/sales` failures carry `{"success": false, "error": ...}` while
//! `/filter-options` failures keep the flat `{"error": ...}` shape.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Malformed client input: unparseable filter JSON, bad age range, bad
  /// date boundary.
  #[error("bad request: {0}")]
  BadRequest(String),

  /// Storage failure on the sales listing path.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// Storage failure while recomputing filter options.
  #[error("filter options unavailable: {0}")]
  Options(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
    Self::Store(Box::new(err))
  }

  pub fn options<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
    Self::Options(Box::new(err))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::BadRequest(message) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "error": message })),
      )
        .into_response(),
      // Storage failures: log the real cause, answer with a generic
      // message so store internals never reach clients.
      ApiError::Store(e) => {
        tracing::error!(error = %e, "storage failure while listing sales");
        (
          StatusCode::SERVICE_UNAVAILABLE,
          Json(json!({ "success": false, "error": "storage unavailable" })),
        )
          .into_response()
      }
      ApiError::Options(e) => {
        tracing::error!(error = %e, "storage failure while computing filter options");
        (
          StatusCode::SERVICE_UNAVAILABLE,
          Json(json!({ "error": "storage unavailable" })),
        )
          .into_response()
      }
    }
  }
}
