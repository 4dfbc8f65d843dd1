//! Route handlers.
//!
//! Each proxied handler only resolves its `UpstreamRoute` from the path and
//! query; [`forward`] does the call and the translation for all of them.

use axum::{
    extract::{rejection::PathRejection, Path, RawQuery, State},
    http::{HeaderMap, Uri},
    response::{IntoResponse, Response},
};
use std::time::Instant;

use crate::http::request::request_id;
use crate::http::response::{ErrorEnvelope, JsonPassthrough};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::{Listing, UpstreamRoute};

/// Prefix stripped from passthrough requests.
pub const PASSTHROUGH_PREFIX: &str = "/api/proxy/";

/// Value of `key` in a raw query string.
///
/// Repeated keys are joined with `,` in order of appearance rather than
/// rejected, so `?q=a&q=b` yields `"a,b"`.
pub fn query_param(raw: Option<&str>, key: &str) -> Option<String> {
    let values: Vec<String> = url::form_urlencoded::parse(raw?.as_bytes())
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

/// Perform one upstream call for `route` and translate the outcome.
///
/// Success relays the upstream JSON with 200. Any failure becomes the
/// 500 envelope carrying the route's message and the error text.
pub async fn forward(state: &AppState, headers: &HeaderMap, route: UpstreamRoute<'_>) -> Response {
    let start = Instant::now();
    let request_id = request_id(headers);
    let url = route.url(state.upstream.base_url());

    tracing::debug!(
        request_id = %request_id,
        route = route.name(),
        url = %url,
        "Proxying request"
    );

    match state.upstream.fetch_json(url).await {
        Ok(body) => {
            metrics::record_request(route.name(), 200, start);
            JsonPassthrough(body).into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                route = route.name(),
                error = %e,
                "Upstream request failed"
            );
            metrics::record_request(route.name(), 500, start);
            ErrorEnvelope::new(route.failure_message(), e).into_response()
        }
    }
}

pub async fn coins_new(State(state): State<AppState>, headers: HeaderMap) -> Response {
    forward(&state, &headers, UpstreamRoute::Listing(Listing::New)).await
}

pub async fn coins_trending(State(state): State<AppState>, headers: HeaderMap) -> Response {
    forward(&state, &headers, UpstreamRoute::Listing(Listing::Trending)).await
}

pub async fn coins_graduating(State(state): State<AppState>, headers: HeaderMap) -> Response {
    forward(&state, &headers, UpstreamRoute::Listing(Listing::Graduating)).await
}

pub async fn coins_graduated(State(state): State<AppState>, headers: HeaderMap) -> Response {
    forward(&state, &headers, UpstreamRoute::Listing(Listing::Graduated)).await
}

pub async fn coin(
    State(state): State<AppState>,
    mint: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> Response {
    let Path(mint) = match mint {
        Ok(mint) => mint,
        Err(e) => return rejected(&headers, UpstreamRoute::Coin { mint: "" }, e),
    };
    forward(&state, &headers, UpstreamRoute::Coin { mint: &mint }).await
}

pub async fn coin_trades(
    State(state): State<AppState>,
    mint: Result<Path<String>, PathRejection>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let empty = UpstreamRoute::Trades { mint: "", limit: None };
    let Path(mint) = match mint {
        Ok(mint) => mint,
        Err(e) => return rejected(&headers, empty, e),
    };
    let limit = query_param(query.as_deref(), "limit");
    let route = UpstreamRoute::Trades {
        mint: &mint,
        limit: limit.as_deref(),
    };
    forward(&state, &headers, route).await
}

pub async fn search(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let text = query_param(query.as_deref(), "q");
    let route = UpstreamRoute::Search {
        query: text.as_deref(),
    };
    forward(&state, &headers, route).await
}

/// Envelope for a path that could not be decoded; no upstream call is made.
fn rejected(headers: &HeaderMap, route: UpstreamRoute<'_>, e: PathRejection) -> Response {
    tracing::warn!(
        request_id = %request_id(headers),
        route = route.name(),
        error = %e,
        "Rejected path parameter"
    );
    ErrorEnvelope::new(route.failure_message(), e.body_text()).into_response()
}

/// Forward any path under `/api/proxy/` with its raw query string.
pub async fn passthrough(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let path = uri.path().strip_prefix(PASSTHROUGH_PREFIX).unwrap_or_default();
    let route = UpstreamRoute::Passthrough {
        path,
        query: uri.query(),
    };
    forward(&state, &headers, route).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param_single_and_missing() {
        assert_eq!(query_param(Some("q=moon&x=1"), "q").as_deref(), Some("moon"));
        assert_eq!(query_param(Some("x=1"), "q"), None);
        assert_eq!(query_param(None, "q"), None);
        assert_eq!(query_param(Some("q="), "q").as_deref(), Some(""));
    }

    #[test]
    fn test_query_param_decodes_value() {
        assert_eq!(query_param(Some("q=to%20the+moon"), "q").as_deref(), Some("to the moon"));
    }

    #[test]
    fn test_query_param_joins_repeated_keys() {
        assert_eq!(query_param(Some("q=a&q=b"), "q").as_deref(), Some("a,b"));
        assert_eq!(
            query_param(Some("limit=10&offset=3&limit=20"), "limit").as_deref(),
            Some("10,20")
        );
    }
}
