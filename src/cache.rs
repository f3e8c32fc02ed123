use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use crate::clock::Clock;

pub const CACHE_TTL: Duration = Duration::from_secs(60);

// Cache entry with timestamp
#[derive(Clone, Copy)]
pub struct CacheEntry {
    pub value: u64,
    pub computed_at: Instant,
}

/// Single slot holding the last successfully fetched count.
pub struct CountCache {
    slot: Mutex<Option<CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl CountCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(clock, CACHE_TTL)
    }

    pub fn with_ttl(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            ttl,
            clock,
        }
    }

    // Returns the cached count while it is younger than the TTL.
    // A stale entry stays in the slot until the next set.
    pub fn get(&self) -> Option<u64> {
        let entry = (*self.slot.lock().unwrap_or_else(PoisonError::into_inner))?;
        let age = self.clock.now().saturating_duration_since(entry.computed_at);
        (age < self.ttl).then_some(entry.value)
    }

    pub fn set(&self, value: u64) {
        let entry = CacheEntry {
            value,
            computed_at: self.clock.now(),
        };
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn cache() -> (Arc<ManualClock>, CountCache) {
        let clock = Arc::new(ManualClock::new());
        let cache = CountCache::new(clock.clone());
        (clock, cache)
    }

    #[test]
    fn empty_until_first_set() {
        let (_clock, cache) = cache();
        assert_eq!(cache.get(), None);

        cache.set(0);
        assert_eq!(cache.get(), Some(0));
    }

    #[test]
    fn serves_value_until_ttl_elapses() {
        let (clock, cache) = cache();
        cache.set(42);

        clock.advance(CACHE_TTL - Duration::from_millis(1));
        assert_eq!(cache.get(), Some(42));

        clock.advance(Duration::from_millis(1));
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn set_overwrites_value_and_restarts_ttl() {
        let (clock, cache) = cache();
        cache.set(1);

        clock.advance(Duration::from_secs(59));
        cache.set(2);

        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.get(), Some(2));
    }

    #[test]
    fn stale_entry_is_replaced_on_next_set() {
        let (clock, cache) = cache();
        cache.set(7);
        clock.advance(Duration::from_secs(120));
        assert_eq!(cache.get(), None);

        cache.set(8);
        assert_eq!(cache.get(), Some(8));
    }
}
