//! In-process result cache with a fixed time-to-live.
//!
//! Keyed by [`ComputationRequest::cache_key`](crate::registry::ComputationRequest::cache_key).
//! Only successful envelopes are stored. Expired entries are dropped lazily on
//! lookup, and in bulk when the cache reaches its entry limit.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::lock_or_recover;
use crate::registry::ComputationResult;

const MAX_ENTRIES: usize = 10_000;

pub struct ResultCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, ComputationResult)>>,
}

impl ResultCache {
    /// A zero `ttl` disables caching.
    pub fn new(ttl: Duration) -> Self {
        ResultCache {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub fn get(&self, key: &str) -> Option<ComputationResult> {
        if !self.is_enabled() {
            return None;
        }
        let mut entries = lock_or_recover(&self.entries);
        match entries.get(key) {
            Some((stored, result)) if stored.elapsed() < self.ttl => Some(result.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: String, result: ComputationResult) {
        if !self.is_enabled() || !result.success {
            return;
        }
        let mut entries = lock_or_recover(&self.entries);
        if entries.len() >= MAX_ENTRIES {
            let ttl = self.ttl;
            entries.retain(|_, (stored, _)| stored.elapsed() < ttl);
            if entries.len() >= MAX_ENTRIES {
                entries.clear();
            }
        }
        entries.insert(key, (Instant::now(), result));
    }

    pub fn len(&self) -> usize {
        lock_or_recover(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::registry::{Parameters, Registry};

    fn result(difficulty: i64) -> ComputationResult {
        Registry::new(&EngineConfig::default()).dispatch("perfect-numbers", difficulty, &Parameters::new())
    }

    #[test]
    fn stores_and_returns_success() {
        let cache = ResultCache::new(Duration::from_secs(60));
        cache.insert("k".into(), result(1));
        let hit = cache.get("k").unwrap();
        assert!(hit.success);
        assert!(cache.get("other").is_none());
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = ResultCache::new(Duration::from_secs(60));
        cache.insert("k".into(), result(0));
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_ttl_disables() {
        let cache = ResultCache::new(Duration::ZERO);
        cache.insert("k".into(), result(1));
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn expired_entries_are_dropped() {
        let cache = ResultCache::new(Duration::from_millis(1));
        cache.insert("k".into(), result(1));
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
    }
}
