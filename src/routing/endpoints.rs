//! Mapping from proxy routes to upstream URLs.
//!
//! # Responsibilities
//! - Enumerate every proxied route with its parameters
//! - Build the upstream URL for a route (pure, no I/O)
//! - Name each route for logs, metrics and the error envelope
//!
//! # Design Decisions
//! - Identifiers and limits are not validated; the upstream decides
//! - Passthrough path and query are forwarded raw, never re-encoded
//! - Deterministic: same inputs always build the same URL

use url::Url;

/// Page size used by every listing endpoint.
pub const LISTING_LIMIT: &str = "50";

/// Page size for trades when the caller sends none.
pub const DEFAULT_TRADES_LIMIT: &str = "50";

/// Page size for search results.
pub const SEARCH_LIMIT: &str = "20";

/// The fixed coin listings mirrored from the upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// Recently created coins.
    New,
    /// King of the hill.
    Trending,
    /// Coins close to completing their bonding curve.
    Graduating,
    /// Coins that migrated off the bonding curve.
    Graduated,
}

impl Listing {
    fn upstream_segment(self) -> &'static str {
        match self {
            Listing::New => "latest",
            Listing::Trending => "king-of-the-hill",
            Listing::Graduating => "about-to-graduate",
            Listing::Graduated => "graduated",
        }
    }
}

/// A proxied request, resolved from the inbound path and query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamRoute<'a> {
    Listing(Listing),
    Coin {
        mint: &'a str,
    },
    Trades {
        mint: &'a str,
        limit: Option<&'a str>,
    },
    Search {
        query: Option<&'a str>,
    },
    Passthrough {
        path: &'a str,
        query: Option<&'a str>,
    },
}

impl UpstreamRoute<'_> {
    /// Stable label for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            UpstreamRoute::Listing(Listing::New) => "coins_new",
            UpstreamRoute::Listing(Listing::Trending) => "coins_trending",
            UpstreamRoute::Listing(Listing::Graduating) => "coins_graduating",
            UpstreamRoute::Listing(Listing::Graduated) => "coins_graduated",
            UpstreamRoute::Coin { .. } => "coin",
            UpstreamRoute::Trades { .. } => "coin_trades",
            UpstreamRoute::Search { .. } => "search",
            UpstreamRoute::Passthrough { .. } => "passthrough",
        }
    }

    /// Human-readable message placed in the error envelope.
    pub fn failure_message(&self) -> &'static str {
        match self {
            UpstreamRoute::Listing(Listing::New) => "Failed to fetch new coins",
            UpstreamRoute::Listing(Listing::Trending) => "Failed to fetch trending coins",
            UpstreamRoute::Listing(Listing::Graduating) => "Failed to fetch graduating coins",
            UpstreamRoute::Listing(Listing::Graduated) => "Failed to fetch graduated coins",
            UpstreamRoute::Coin { .. } => "Failed to fetch coin",
            UpstreamRoute::Trades { .. } => "Failed to fetch trades",
            UpstreamRoute::Search { .. } => "Search failed",
            UpstreamRoute::Passthrough { .. } => "Proxy failed",
        }
    }

    /// Build the upstream URL for this route under `base`.
    ///
    /// `base` must be able to carry a path (checked by config validation);
    /// any path it already has is kept as a prefix.
    pub fn url(&self, base: &Url) -> Url {
        match self {
            UpstreamRoute::Listing(listing) => {
                let mut url = with_segments(base, &["coins", listing.upstream_segment()]);
                url.query_pairs_mut()
                    .append_pair("limit", LISTING_LIMIT)
                    .append_pair("offset", "0")
                    .append_pair("includeNsfw", "false");
                url
            }
            UpstreamRoute::Coin { mint } => with_segments(base, &["coins", *mint]),
            UpstreamRoute::Trades { mint, limit } => {
                let limit = limit
                    .filter(|l| !l.is_empty())
                    .unwrap_or(DEFAULT_TRADES_LIMIT);
                let mut url = with_segments(base, &["coins", *mint, "trades"]);
                url.query_pairs_mut()
                    .append_pair("limit", limit)
                    .append_pair("offset", "0");
                url
            }
            UpstreamRoute::Search { query } => {
                let mut url = with_segments(base, &["coins", "search"]);
                url.query_pairs_mut()
                    .append_pair("query", query.unwrap_or_default())
                    .append_pair("limit", SEARCH_LIMIT);
                url
            }
            UpstreamRoute::Passthrough { path, query } => {
                let mut url = base.clone();
                let prefix = base.path().trim_end_matches('/');
                url.set_path(&format!("{}/{}", prefix, path.trim_start_matches('/')));
                url.set_query(query.filter(|q| !q.is_empty()));
                url
            }
        }
    }
}

fn with_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
