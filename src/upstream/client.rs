//! HTTP client for the upstream API.
//!
//! # Responsibilities
//! - Hold one pooled reqwest client with the fixed outbound headers
//! - Issue exactly one GET per proxied request
//! - Reject non-2xx statuses and non-JSON bodies
//! - Hand back the upstream bytes untouched on success

use axum::body::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::IgnoredAny;
use std::time::Duration;
use url::Url;

use crate::config::UpstreamConfig;
use crate::upstream::types::{UpstreamError, UpstreamResult};

/// Client for the upstream API. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
}

impl UpstreamClient {
    /// Create a new upstream client from configuration.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let base_url = Url::parse(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        tracing::info!(
            base_url = %base_url,
            timeout_secs = ?config.timeout_secs,
            "Upstream client initialized"
        );

        Ok(Self { http, base_url })
    }

    /// Base URL all upstream routes are built under.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch `url` and return its body if it is a JSON document.
    ///
    /// The body is parsed only to check it; the returned bytes are exactly
    /// what the upstream sent.
    pub async fn fetch_json(&self, url: Url) -> UpstreamResult<Bytes> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { status });
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<IgnoredAny>(&body)?;
        Ok(body)
    }
}
