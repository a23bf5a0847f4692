//! Per-client request throttling.
//!
//! Each client IP owns a token bucket holding at most `burst` tokens. A request
//! spends one token; one token comes back every `refill_every`. A client with
//! an empty bucket gets `429 Too Many Requests`.

use crate::response::ErrorResponse;
use crate::state::AppState;
use axum::{
    Json,
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use util::config;

/// Tracked clients beyond which idle buckets are dropped.
const EVICT_ABOVE: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct Bucket {
    tokens: f64,
    last_seen: Instant,
}

#[derive(Debug, Clone)]
pub struct RateLimiter {
    refill_every: Duration,
    burst: u32,
    evict_above: usize,
    buckets: Arc<Mutex<HashMap<IpAddr, Bucket>>>,
}

impl RateLimiter {
    pub fn new(refill_every: Duration, burst: u32) -> Self {
        Self {
            refill_every,
            burst,
            evict_above: EVICT_ABOVE,
            buckets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Limiter from `RATE_LIMIT_SECONDS` and `RATE_BURST`, or `None` when
    /// either is zero.
    pub fn from_config() -> Option<Self> {
        let seconds = config::rate_limit_seconds();
        let burst = config::rate_burst();
        if seconds == 0 || burst == 0 {
            tracing::info!("rate limiting disabled");
            return None;
        }
        Some(Self::new(Duration::from_secs(seconds), burst))
    }

    /// Spends one token for `ip`. `false` means the client is over its limit.
    pub async fn check(&self, ip: IpAddr) -> bool {
        self.check_at(ip, Instant::now()).await
    }

    async fn check_at(&self, ip: IpAddr, now: Instant) -> bool {
        let mut buckets = self.buckets.lock().await;

        // A bucket idle long enough to refill completely equals a new one.
        if buckets.len() > self.evict_above {
            let idle = self.refill_every.saturating_mul(self.burst);
            buckets.retain(|_, b| now.saturating_duration_since(b.last_seen) < idle);
        }

        let burst = f64::from(self.burst);
        let bucket = buckets.entry(ip).or_insert(Bucket {
            tokens: burst,
            last_seen: now,
        });

        let elapsed = now.saturating_duration_since(bucket.last_seen);
        let refilled = elapsed.as_secs_f64() / self.refill_every.as_secs_f64();
        bucket.tokens = (bucket.tokens + refilled).min(burst);
        bucket.last_seen = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Number of clients currently holding a bucket.
    pub async fn tracked_clients(&self) -> usize {
        self.buckets.lock().await.len()
    }
}

/// Rejects requests from clients that ran out of tokens.
///
/// Clients are keyed by peer IP from `ConnectInfo`. Requests without it
/// (in-process callers) share the unspecified address.
///
/// ```ignore
/// let app = Router::new().layer(from_fn_with_state(state, rate_limit));
/// ```
pub async fn rate_limit(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(limiter) = app_state.rate_limiter() else {
        return next.run(req).await;
    };

    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if limiter.check(ip).await {
        return next.run(req).await;
    }

    tracing::warn!(%ip, path = %req.uri().path(), "rate limit exceeded");
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(ErrorResponse {
            success: false,
            error: "rate_limited",
            message: "Too many requests".into(),
        }),
    )
        .into_response()
}
