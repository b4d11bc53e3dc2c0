//! Per-IP rate limiting for the authentication endpoints.
//!
//! Fixed-window counters keyed by client IP. Exceeding the window
//! budget returns 429 until the window rolls over.

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::warn;

/// Auth requests allowed per IP per window.
pub const AUTH_REQUESTS_PER_WINDOW: u32 = 100;

/// Window size for the auth limiter.
pub const AUTH_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Entries idle past this are dropped on cleanup.
const STALE_THRESHOLD: Duration = Duration::from_secs(30 * 60);

#[derive(Debug)]
struct WindowState {
    count: u32,
    window_start: Instant,
}

/// Fixed-window per-IP rate limiter.
pub struct IpRateLimiter {
    max_per_window: u32,
    window: Duration,
    states: Mutex<HashMap<IpAddr, WindowState>>,
}

impl IpRateLimiter {
    pub fn new(max_per_window: u32, window: Duration) -> Self {
        Self {
            max_per_window,
            window,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether a request from `ip` is allowed and record it.
    /// Returns Err(retry_after_secs) when over budget.
    pub fn check_and_record(&self, ip: IpAddr) -> Result<(), u64> {
        let mut states = self.states.lock().unwrap();
        let state = states.entry(ip).or_insert_with(|| WindowState {
            count: 0,
            window_start: Instant::now(),
        });

        if state.window_start.elapsed() > self.window {
            state.count = 0;
            state.window_start = Instant::now();
        }

        if state.count >= self.max_per_window {
            let elapsed = state.window_start.elapsed();
            let retry_after = self.window.saturating_sub(elapsed).as_secs().max(1);
            return Err(retry_after);
        }

        state.count += 1;
        Ok(())
    }

    /// Drop counters that have been idle past the stale threshold.
    pub fn cleanup_stale_entries(&self) {
        let mut states = self.states.lock().unwrap();
        states.retain(|_, state| state.window_start.elapsed() < STALE_THRESHOLD);
    }
}

impl Default for IpRateLimiter {
    fn default() -> Self {
        Self::new(AUTH_REQUESTS_PER_WINDOW, AUTH_WINDOW)
    }
}

/// Extract the client IP from request extensions; connections without
/// ConnectInfo share one bucket.
fn client_ip(request: &Request<Body>) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

pub async fn limit_by_ip(
    State(limiter): State<Arc<IpRateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(&request);
    match limiter.check_and_record(ip) {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            warn!(
                "Rate limit exceeded: {} {} ip={}",
                request.method(),
                request.uri().path(),
                ip
            );
            (
                StatusCode::TOO_MANY_REQUESTS,
                [("Retry-After", retry_after.to_string())],
            )
                .into_response()
        }
    }
}
