//! Rate limiting for the credential endpoints.
//!
//! Fixed windows keyed by client IP. State is in-process only, so limits are
//! per server instance.

#![allow(missing_docs)]

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderValue, Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::RwLock;
use wishboard_common::AppError;

/// Rate limit configuration.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Time window duration in seconds.
    pub window_secs: u64,
}

impl RateLimitConfig {
    /// Create a new rate limit config.
    pub const fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
        }
    }
}

/// Limits per endpoint.
pub mod limits {
    use super::RateLimitConfig;

    /// Registration: 5 per hour.
    pub const REGISTER: RateLimitConfig = RateLimitConfig::new(5, 3600);

    /// Login: 10 per 5 minutes.
    pub const LOGIN: RateLimitConfig = RateLimitConfig::new(10, 300);
}

#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    window_start: Instant,
}

/// A fixed-window limiter for one endpoint.
#[derive(Clone)]
pub struct ApiRateLimiter {
    config: RateLimitConfig,
    states: Arc<RwLock<HashMap<String, WindowState>>>,
}

/// Rate limit check result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    Allowed {
        remaining: u32,
        limit: u32,
        /// Seconds until the window resets.
        reset: u64,
    },
    Limited {
        /// Seconds until the window resets.
        retry_after: u64,
        limit: u32,
    },
}

impl ApiRateLimiter {
    /// Create a limiter with the given window.
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            states: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Record a request for `key` and report whether it is allowed.
    pub async fn check(&self, key: &str) -> RateLimitResult {
        let mut states = self.states.write().await;
        let now = Instant::now();
        let window = Duration::from_secs(self.config.window_secs);
        let limit = self.config.max_requests;

        let state = states
            .entry(key.to_string())
            .or_insert_with(|| WindowState {
                count: 0,
                window_start: now,
            });

        if now.duration_since(state.window_start) >= window {
            state.count = 0;
            state.window_start = now;
        }

        // Round up so a client never retries a fraction of a second early
        let remaining_window = window.saturating_sub(now.duration_since(state.window_start));
        let reset = remaining_window.as_secs() + u64::from(remaining_window.subsec_nanos() > 0);

        if state.count >= limit {
            return RateLimitResult::Limited {
                retry_after: reset.max(1),
                limit,
            };
        }

        state.count += 1;
        RateLimitResult::Allowed {
            remaining: limit.saturating_sub(state.count),
            limit,
            reset,
        }
    }

    /// Drop windows that have already expired.
    pub async fn cleanup(&self) {
        let mut states = self.states.write().await;
        let now = Instant::now();
        let window = Duration::from_secs(self.config.window_secs);

        states.retain(|_, state| now.duration_since(state.window_start) < window);
    }

    /// Number of tracked keys.
    pub async fn key_count(&self) -> usize {
        self.states.read().await.len()
    }
}

/// Limiters shared by the rate limiting middleware.
#[derive(Clone)]
pub struct RateLimiterState {
    pub register: ApiRateLimiter,
    pub login: ApiRateLimiter,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiterState {
    /// Create limiters with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            register: ApiRateLimiter::new(limits::REGISTER),
            login: ApiRateLimiter::new(limits::LOGIN),
        }
    }

    /// Drop expired windows from every limiter.
    pub async fn cleanup(&self) {
        self.register.cleanup().await;
        self.login.cleanup().await;
    }
}

/// Rate limit error response: the standard `RATE_LIMITED` body plus
/// `Retry-After`.
#[derive(Debug)]
pub struct RateLimitError {
    pub retry_after: u64,
}

impl IntoResponse for RateLimitError {
    fn into_response(self) -> Response {
        let mut response = AppError::RateLimited.into_response();
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(self.retry_after));
        response
    }
}

/// Client IP: first `X-Forwarded-For` hop, then `X-Real-IP`, then the peer
/// address when the server was started with connect info.
fn extract_client_ip(req: &Request<Body>) -> Option<IpAddr> {
    let headers = req.headers();

    if let Some(ip) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse::<IpAddr>().ok())
    {
        return Some(ip);
    }

    if let Some(ip) = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<IpAddr>().ok())
    {
        return Some(ip);
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

/// Rate limiting middleware for registration.
pub async fn rate_limit_register_middleware(
    State(limiters): State<RateLimiterState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, RateLimitError> {
    rate_limit_with(&limiters.register, req, next).await
}

/// Rate limiting middleware for login.
pub async fn rate_limit_login_middleware(
    State(limiters): State<RateLimiterState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, RateLimitError> {
    rate_limit_with(&limiters.login, req, next).await
}

async fn rate_limit_with(
    limiter: &ApiRateLimiter,
    req: Request<Body>,
    next: Next,
) -> Result<Response, RateLimitError> {
    let key = extract_client_ip(&req).map_or_else(|| "unknown".to_string(), |ip| ip.to_string());

    match limiter.check(&key).await {
        RateLimitResult::Allowed {
            remaining,
            limit,
            reset,
        } => {
            let mut response = next.run(req).await;

            let headers = response.headers_mut();
            headers.insert("x-ratelimit-limit", HeaderValue::from(limit));
            headers.insert("x-ratelimit-remaining", HeaderValue::from(remaining));
            headers.insert("x-ratelimit-reset", HeaderValue::from(reset));

            Ok(response)
        }
        RateLimitResult::Limited { retry_after, .. } => {
            tracing::warn!(client = %key, "Rate limit exceeded");
            Err(RateLimitError { retry_after })
        }
    }
}
