use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("skater_count_requests_total", "Total number of count requests").unwrap();
    pub static ref CACHE_HITS: Counter =
        register_counter!("skater_count_cache_hits_total", "Total cache hits").unwrap();
    pub static ref CACHE_MISSES: Counter =
        register_counter!("skater_count_cache_misses_total", "Total cache misses").unwrap();
    pub static ref RATE_LIMITED: Counter =
        register_counter!("skater_count_rate_limited_total", "Requests rejected by the rate limiter").unwrap();
    pub static ref FETCH_FAILURES: Counter =
        register_counter!("skater_count_fetch_failures_total", "Failed count queries against the data source").unwrap();
    pub static ref FETCH_LATENCY: Histogram = register_histogram!(
        "skater_count_fetch_latency_seconds",
        "Count query latency in seconds"
    )
    .unwrap();
    pub static ref TRACKED_CLIENTS: Gauge =
        register_gauge!("skater_count_tracked_clients", "Clients currently tracked by the rate limiter").unwrap();
}
