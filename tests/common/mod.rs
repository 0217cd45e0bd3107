//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use kong_healthcheck::admin_api::{AdminApi, FetchError, FetchResult, Target, Upstream};

/// Request as seen by a programmable backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Start a programmable HTTP backend on an ephemeral port.
///
/// Each request is answered with the `(status, body)` returned by `f`.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(RecordedRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let (read_half, mut write_half) = socket.into_split();
                        let mut reader = BufReader::new(read_half);
                        let Some(request) = read_request(&mut reader).await else {
                            return;
                        };

                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            201 => "201 Created",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = write_half.write_all(response_str.as_bytes()).await;
                        let _ = write_half.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a backend that always answers with a fixed status and counts hits.
pub async fn start_status_backend(status: u16, delay: Duration) -> (SocketAddr, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let addr = start_programmable_backend(move |_req| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            (status, String::new())
        }
    })
    .await;
    (addr, hits)
}

async fn read_request<R: tokio::io::AsyncRead + Unpin>(reader: &mut BufReader<R>) -> Option<RecordedRequest> {
    let mut request_line = String::new();
    reader.read_line(&mut request_line).await.ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).await.ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await.ok()?;

    Some(RecordedRequest {
        method,
        path,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn target(id: &str, url: &str, weight: i64, upstream_id: &str) -> Target {
    Target {
        id: id.to_string(),
        url: url.to_string(),
        weight,
        upstream_id: upstream_id.to_string(),
    }
}

pub fn upstream(id: &str) -> Upstream {
    Upstream {
        id: id.to_string(),
        name: format!("upstream{}", id),
    }
}

/// In-memory admin API that records every call.
///
/// Weights are never updated by writes, so every tick observes the same
/// topology.
#[derive(Default)]
pub struct FakeAdmin {
    upstreams: Mutex<Option<Vec<Upstream>>>,
    targets: Mutex<HashMap<String, Option<Vec<Target>>>>,
    fail_writes: AtomicBool,
    pub upstream_calls: AtomicUsize,
    pub target_calls: Mutex<Vec<String>>,
    pub writes: Mutex<Vec<(String, String, i64)>>,
}

impl FakeAdmin {
    pub fn new() -> Self {
        Self {
            upstreams: Mutex::new(Some(Vec::new())),
            ..Default::default()
        }
    }

    pub fn with_upstreams(self, upstreams: Vec<Upstream>) -> Self {
        *self.upstreams.lock().unwrap() = Some(upstreams);
        self
    }

    pub fn failing_upstreams(self) -> Self {
        *self.upstreams.lock().unwrap() = None;
        self
    }

    pub fn with_targets(self, upstream_id: &str, targets: Vec<Target>) -> Self {
        self.targets
            .lock()
            .unwrap()
            .insert(upstream_id.to_string(), Some(targets));
        self
    }

    pub fn failing_targets(self, upstream_id: &str) -> Self {
        self.targets.lock().unwrap().insert(upstream_id.to_string(), None);
        self
    }

    pub fn failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    pub fn writes(&self) -> Vec<(String, String, i64)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn target_calls(&self) -> Vec<String> {
        self.target_calls.lock().unwrap().clone()
    }
}

fn fake_failure(what: &str) -> FetchError {
    FetchError::Status {
        status: 500,
        body: format!("failed to fetch {}", what),
    }
}

#[async_trait]
impl AdminApi for FakeAdmin {
    async fn list_upstreams(&self) -> FetchResult<Vec<Upstream>> {
        self.upstream_calls.fetch_add(1, Ordering::SeqCst);
        self.upstreams
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| fake_failure("upstreams"))
    }

    async fn list_targets(&self, upstream_id: &str) -> FetchResult<Vec<Target>> {
        self.target_calls.lock().unwrap().push(upstream_id.to_string());
        self.targets
            .lock()
            .unwrap()
            .get(upstream_id)
            .cloned()
            .unwrap_or_else(|| Some(Vec::new()))
            .ok_or_else(|| fake_failure("targets"))
    }

    async fn set_target_weight(&self, upstream_id: &str, target_url: &str, weight: i64) -> FetchResult<()> {
        self.writes
            .lock()
            .unwrap()
            .push((upstream_id.to_string(), target_url.to_string(), weight));
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(fake_failure("weight"));
        }
        Ok(())
    }
}

/// Poll `predicate` every 5ms until it holds or `timeout` elapses.
pub async fn wait_until<F: Fn() -> bool>(timeout: Duration, predicate: F) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if predicate() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    predicate()
}
