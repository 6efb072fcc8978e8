//! Fixed-window rate limiting for the OAuth entrypoint routes.
//!
//! Keyed by client IP: the first `x-forwarded-for` hop when present (the
//! gateway normally sits behind a reverse proxy), otherwise the socket
//! address, otherwise a single shared bucket.

use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dashmap::DashMap;
use log::*;
use service::config::Config;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::controller::ApiResponse;

#[derive(Debug)]
struct Window {
    started_at: Instant,
    count: u64,
}

/// Per-client fixed-window request counter.
#[derive(Clone)]
pub struct RateLimiter {
    max_requests: u64,
    window: Duration,
    windows: Arc<DashMap<String, Window>>,
    last_sweep: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    pub fn new(max_requests: u64, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Arc::new(DashMap::new()),
            last_sweep: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.critical_rate_limit_requests,
            Duration::from_secs(config.critical_rate_limit_window_secs),
        )
    }

    /// Counts a request against the client's current window. Returns `false`
    /// once the window budget is exhausted.
    fn try_acquire(&self, key: &str) -> bool {
        self.evict_stale();

        let mut entry = self
            .windows
            .entry(key.to_string())
            .or_insert_with(|| Window {
                started_at: Instant::now(),
                count: 0,
            });

        if entry.started_at.elapsed() >= self.window {
            entry.started_at = Instant::now();
            entry.count = 0;
        }

        entry.count += 1;
        entry.count <= self.max_requests
    }

    /// Drops expired windows, at most once per window length. The map is
    /// keyed by client-supplied addresses, so it must not grow with every
    /// address an abusive client invents.
    fn evict_stale(&self) {
        let Ok(mut last_sweep) = self.last_sweep.lock() else {
            return;
        };
        if last_sweep.elapsed() < self.window {
            return;
        }
        *last_sweep = Instant::now();
        drop(last_sweep);

        self.windows
            .retain(|_, window| window.started_at.elapsed() < self.window);
    }
}

/// Middleware guarding abuse-sensitive routes, the OAuth entrypoints in
/// particular. Applied with `from_fn_with_state(limiter, critical_rate_limit)`.
pub async fn critical_rate_limit(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);

    if limiter.try_acquire(&key) {
        next.run(request).await
    } else {
        warn!("Rate limit exceeded for client {key} on {}", request.uri());
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ApiResponse::<()>::failure("Too many requests")),
        )
            .into_response()
    }
}

fn client_key(request: &Request) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
