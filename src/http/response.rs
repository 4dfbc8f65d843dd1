//! Response shaping for proxied routes.
//!
//! # Responsibilities
//! - Relay upstream JSON bytes unmodified with status 200
//! - Build the uniform `{error, details}` envelope with status 500
//!
//! # Design Decisions
//! - Upstream bodies are never re-serialized, so key order and
//!   whitespace survive the round trip
//! - Callers always get a JSON body, never a raw transport error

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Upstream JSON relayed as-is.
#[derive(Debug, Clone)]
pub struct JsonPassthrough(pub Bytes);

impl IntoResponse for JsonPassthrough {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.0));
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        response
    }
}

/// Body returned when an upstream call fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Fixed message naming what the route tried to do.
    pub error: String,
    /// Text of the underlying failure.
    pub details: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>, details: impl ToString) -> Self {
        Self {
            error: error.into(),
            details: details.to_string(),
        }
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passthrough_keeps_bytes() {
        let raw = Bytes::from_static(br#"{"z": 1,  "a": [true, null]}"#);
        let response = JsonPassthrough(raw.clone()).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json; charset=utf-8"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, raw);
    }

    #[tokio::test]
    async fn test_error_envelope_response() {
        let response = ErrorEnvelope::new("Failed to fetch coin", "connection refused").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Failed to fetch coin");
        assert_eq!(value["details"], "connection refused");
    }
}
