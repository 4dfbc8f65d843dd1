//! Liveness endpoint.
//!
//! `GET /health` answers from the process alone. It never contacts the
//! upstream, so it stays 200 while the upstream is down.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub timestamp: String,
}

impl HealthStatus {
    /// Status stamped with the current time.
    pub fn now() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn test_health_payload() {
        let Json(body) = health().await;
        assert_eq!(body.status, "ok");
        assert!(body.timestamp.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
    }
}
