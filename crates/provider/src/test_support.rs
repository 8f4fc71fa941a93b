//! In-process upstream server and fake transports shared by unit tests.

use async_trait::async_trait;
use axum::{
    Router,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::post,
};
use farelink_types::{FarelinkError, HttpCall, Transport, traits::Result};
use serde_json::Value;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

/// A canned upstream reply.
#[derive(Clone)]
pub struct Reply {
    status: u16,
    body: String,
    delay: Duration,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// One request as the upstream saw it.
#[derive(Clone, Debug)]
pub struct Hit {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Hit {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}

pub struct Upstream {
    base_url: String,
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl Upstream {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hits_on(&self, path: &str) -> usize {
        self.hits().iter().filter(|h| h.path == path).count()
    }
}

/// Starts an upstream on an ephemeral port answering each path with its reply.
pub async fn spawn_upstream(routes: Vec<(&'static str, Reply)>) -> Upstream {
    let hits: Arc<Mutex<Vec<Hit>>> = Arc::default();
    let mut app = Router::new();
    for (path, reply) in routes {
        let hits = Arc::clone(&hits);
        app = app.route(
            path,
            post(move |uri: Uri, headers: HeaderMap, body: String| {
                let hits = Arc::clone(&hits);
                let reply = reply.clone();
                async move {
                    hits.lock().unwrap().push(Hit {
                        path: uri.path().to_string(),
                        headers,
                        body: serde_json::from_str(&body).unwrap_or(Value::String(body)),
                    });
                    if !reply.delay.is_zero() {
                        tokio::time::sleep(reply.delay).await;
                    }
                    let status = StatusCode::from_u16(reply.status).unwrap();
                    let resp: Response =
                        (status, [(header::CONTENT_TYPE, "application/json")], reply.body)
                            .into_response();
                    resp
                }
            }),
        );
    }

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Upstream {
        base_url: format!("http://{addr}"),
        hits,
    }
}

/// A URL on a port nothing listens on, so connecting is refused.
pub fn closed_port_url(path: &str) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}{path}")
}

/// Records every call and answers with a fixed outcome.
pub struct RecordingTransport {
    calls: Mutex<Vec<HttpCall>>,
    outcome: fn() -> Result<Value>,
}

impl RecordingTransport {
    pub fn new(outcome: fn() -> Result<Value>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            outcome,
        })
    }

    pub fn calls(&self) -> Vec<HttpCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn execute(&self, call: &HttpCall) -> Result<Value> {
        self.calls.lock().unwrap().push(call.clone());
        (self.outcome)()
    }
}

pub fn unreachable() -> Result<Value> {
    Err(FarelinkError::Transport("connection refused".into()))
}
