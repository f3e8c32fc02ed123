use std::sync::Arc;
use crate::cache::CountCache;
use crate::clock::Clock;
use crate::count_source::CountSource;
use crate::rate_limit::RateLimiter;

// app's shared state, lives as long as the process

pub struct AppState {
    pub rate_limiter: RateLimiter,
    pub cache: CountCache,
    pub count_source: Arc<dyn CountSource>,
    pub collection: String, // table whose rows are counted
}

impl AppState {
    pub fn new(clock: Arc<dyn Clock>, count_source: Arc<dyn CountSource>, collection: String) -> Self {
        Self {
            rate_limiter: RateLimiter::new(clock.clone()),
            cache: CountCache::new(clock),
            count_source,
            collection,
        }
    }
}
