// src/services/cache.rs
use chrono::{DateTime, Duration, Utc};

use crate::models::RateSnapshot;

/// Single-slot TTL cache for the last rate snapshot.
///
/// The slot exists to bound call volume to the external rates endpoint, not
/// for correctness; up to an hour of staleness is acceptable for a rate
/// display. Fallback snapshots are cached too, so repeated fetch failures
/// inside one TTL window stay off the network for the full hour.
///
/// Time is threaded in by the caller rather than read from a clock, so TTL
/// behavior is testable without sleeping.
#[derive(Debug)]
pub struct RateCache {
    entry: Option<CacheEntry>,
    ttl: Duration,
}

#[derive(Debug)]
struct CacheEntry {
    snapshot: RateSnapshot,
    fetched_at: DateTime<Utc>,
}

impl RateCache {
    pub fn new() -> Self {
        RateCache {
            entry: None,
            ttl: Duration::hours(1),
        }
    }

    /// Override the default one-hour TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// True iff a snapshot is present and younger than the TTL at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match &self.entry {
            Some(entry) => now - entry.fetched_at < self.ttl,
            None => false,
        }
    }

    /// The stored snapshot regardless of age; callers that need "current"
    /// data must check `is_fresh` first.
    pub fn get(&self) -> Option<&RateSnapshot> {
        self.entry.as_ref().map(|e| &e.snapshot)
    }

    /// Unconditionally overwrite the slot.
    pub fn put(&mut self, snapshot: RateSnapshot, now: DateTime<Utc>) {
        self.entry = Some(CacheEntry {
            snapshot,
            fetched_at: now,
        });
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(thirty: f64) -> RateSnapshot {
        RateSnapshot {
            thirty_year_rate: thirty,
            fifteen_year_rate: 5.9,
            source: "Test Feed".to_string(),
            last_updated: "2026-08-25T12:00:00Z".to_string(),
            is_live: true,
        }
    }

    #[test]
    fn empty_cache_is_never_fresh() {
        let cache = RateCache::new();
        assert!(!cache.is_fresh(Utc::now()));
        assert!(cache.get().is_none());
    }

    #[test]
    fn fresh_within_ttl_stale_at_boundary() {
        let t0 = Utc::now();
        let mut cache = RateCache::new();
        cache.put(snapshot(6.5), t0);

        assert!(cache.is_fresh(t0));
        assert!(cache.is_fresh(t0 + Duration::minutes(59)));
        // exactly TTL old is stale: freshness requires age strictly < TTL
        assert!(!cache.is_fresh(t0 + Duration::hours(1)));
        assert!(!cache.is_fresh(t0 + Duration::hours(2)));
    }

    #[test]
    fn get_returns_stale_entries_too() {
        let t0 = Utc::now();
        let mut cache = RateCache::new();
        cache.put(snapshot(6.5), t0);

        assert!(!cache.is_fresh(t0 + Duration::hours(3)));
        assert_eq!(cache.get().unwrap().thirty_year_rate, 6.5);
    }

    #[test]
    fn put_overwrites_snapshot_and_timestamp() {
        let t0 = Utc::now();
        let mut cache = RateCache::new();
        cache.put(snapshot(6.5), t0);

        let t1 = t0 + Duration::hours(2);
        cache.put(snapshot(7.0), t1);

        assert_eq!(cache.get().unwrap().thirty_year_rate, 7.0);
        assert!(cache.is_fresh(t1 + Duration::minutes(30)));
    }

    #[test]
    fn custom_ttl_is_honored() {
        let t0 = Utc::now();
        let mut cache = RateCache::new().with_ttl(Duration::seconds(10));
        cache.put(snapshot(6.5), t0);

        assert!(cache.is_fresh(t0 + Duration::seconds(9)));
        assert!(!cache.is_fresh(t0 + Duration::seconds(10)));
    }
}
