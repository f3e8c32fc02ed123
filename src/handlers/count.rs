use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderName, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use crate::error::AppError;
use crate::metrics::{CACHE_HITS, CACHE_MISSES, FETCH_FAILURES, FETCH_LATENCY, RATE_LIMITED, REQUEST_TOTAL};
use crate::models::CountResponse;
use crate::state::AppState;

const CORS_HEADERS: [(HeaderName, &str); 2] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        "authorization, x-client-info, apikey, content-type",
    ),
];

const UNKNOWN_CLIENT: &str = "unknown";

// Client key for rate limiting, unidentified callers share one bucket
fn client_id(headers: &HeaderMap) -> &str {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or(UNKNOWN_CLIENT)
}

async fn current_count(state: &AppState, headers: &HeaderMap) -> Result<u64, AppError> {
    let client = client_id(headers);
    if !state.rate_limiter.check_and_record(client) {
        RATE_LIMITED.inc();
        warn!(client, "rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    if let Some(count) = state.cache.get() {
        CACHE_HITS.inc();
        debug!(count, "cache hit");
        return Ok(count);
    }
    CACHE_MISSES.inc();
    debug!(collection = %state.collection, "cache miss, querying data source");

    let start_time = Instant::now();
    let result = state.count_source.count_rows(&state.collection).await;
    FETCH_LATENCY.observe(start_time.elapsed().as_secs_f64());

    // a failed fetch leaves the previous entry alone
    let count = result.inspect_err(|_| FETCH_FAILURES.inc())?;
    state.cache.set(count);
    Ok(count)
}

pub async fn count_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    if method == Method::OPTIONS {
        return (StatusCode::OK, CORS_HEADERS).into_response();
    }
    REQUEST_TOTAL.inc();

    match current_count(&state, &headers).await {
        Ok(count) => (CORS_HEADERS, Json(CountResponse { count })).into_response(),
        Err(e) => (CORS_HEADERS, e).into_response(),
    }
}
