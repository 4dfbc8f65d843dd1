//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use pumparena_proxy::{HttpServer, ProxyConfig, Shutdown};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// What the mock upstream answers with.
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Json(&'static str),
    Text(&'static str),
    Status(u16, &'static str),
}

/// One request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct Seen {
    pub path: String,
    pub query: Option<String>,
    pub user_agent: Option<String>,
    pub accept: Option<String>,
}

impl Seen {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let url = url::Url::parse(&format!(
            "http://upstream{}?{}",
            self.path,
            self.query.clone().unwrap_or_default()
        ))
        .unwrap();
        url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect()
    }

    pub fn query_value(&self, key: &str) -> Option<String> {
        self.query_pairs().into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

#[derive(Clone)]
struct MockState {
    reply: Reply,
    seen: Arc<Mutex<Vec<Seen>>>,
}

async fn record(State(state): State<MockState>, uri: Uri, headers: HeaderMap) -> Response {
    let get = |name: header::HeaderName| {
        headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
    };
    state.seen.lock().unwrap().push(Seen {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        user_agent: get(header::USER_AGENT),
        accept: get(header::ACCEPT),
    });

    match state.reply {
        Reply::Json(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Reply::Text(body) => ([(header::CONTENT_TYPE, "text/html")], body).into_response(),
        Reply::Status(code, body) => {
            let status = StatusCode::from_u16(code).unwrap();
            (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
        }
    }
}

/// A running mock upstream.
pub struct MockUpstream {
    pub addr: SocketAddr,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl MockUpstream {
    pub async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().fallback(record).with_state(MockState {
            reply,
            seen: seen.clone(),
        });
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self { addr, seen }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    /// The single request the proxy made.
    pub fn only_request(&self) -> Seen {
        let seen = self.requests();
        assert_eq!(seen.len(), 1, "expected exactly one upstream call, got {seen:?}");
        seen[0].clone()
    }
}

/// A running proxy pointed at some upstream.
pub struct TestProxy {
    pub addr: SocketAddr,
    shutdown: Shutdown,
    pub client: reqwest::Client,
}

impl TestProxy {
    pub async fn start(upstream_url: &str) -> Self {
        let mut config = ProxyConfig::default();
        config.listener.host = "127.0.0.1".into();
        config.listener.port = 0;
        config.upstream.base_url = upstream_url.to_string();

        let listener = TcpListener::bind(config.listener.bind_address()).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = HttpServer::new(config).unwrap();

        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, rx).await;
        });

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        Self { addr, shutdown, client }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("http://{}{}", self.addr, path))
            .send()
            .await
            .expect("proxy unreachable")
    }
}

impl Drop for TestProxy {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// An address with nothing listening on it.
pub fn dead_upstream_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Every fixed route with the envelope message it fails with.
pub const FIXED_ROUTES: &[(&str, &str)] = &[
    ("/api/coins/new", "Failed to fetch new coins"),
    ("/api/coins/trending", "Failed to fetch trending coins"),
    ("/api/coins/graduating", "Failed to fetch graduating coins"),
    ("/api/coins/graduated", "Failed to fetch graduated coins"),
    ("/api/coin/abc123", "Failed to fetch coin"),
    ("/api/coin/abc123/trades", "Failed to fetch trades"),
    ("/api/search?q=moon", "Search failed"),
    ("/api/proxy/coins/latest", "Proxy failed"),
];
