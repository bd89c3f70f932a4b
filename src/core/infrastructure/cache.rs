use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

/// Storage for loaded documents, keyed by resource name.
///
/// Implementations hand out shared `Arc`s so a cache hit returns the very
/// document that was stored.
pub trait DocumentCache: Send + Sync {
    fn get(&self, name: &str) -> Option<Arc<Value>>;
    fn put(&self, name: &str, doc: Arc<Value>);
    fn clear(&self);
    fn names(&self) -> Vec<String>;
    fn stats(&self) -> CacheStats;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_requests: u64,
    pub cache_hits: u64,
    pub hit_rate_percent: f64,
}

/// In-memory cache living for one session.
///
/// No eviction, TTL or size bound: the resource set is small and the cache
/// is dropped with the session.
#[derive(Default)]
pub struct SessionCache {
    entries: RwLock<HashMap<String, Arc<Value>>>,
    total_requests: AtomicU64,
    cache_hits: AtomicU64,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentCache for SessionCache {
    fn get(&self, name: &str) -> Option<Arc<Value>> {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);

        match entries.get(name) {
            Some(doc) => {
                self.cache_hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for {}", name);
                Some(Arc::clone(doc))
            }
            None => {
                debug!("Cache miss for {}", name);
                None
            }
        }
    }

    fn put(&self, name: &str, doc: Arc<Value>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(name.to_string(), doc);
        debug!("Cached document {}", name);
    }

    fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let removed = entries.len();
        entries.clear();
        self.total_requests.store(0, Ordering::Relaxed);
        self.cache_hits.store(0, Ordering::Relaxed);
        info!("Session cache cleared, removed {} documents", removed);
    }

    fn names(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = entries.keys().cloned().collect();
        names.sort();
        names
    }

    fn stats(&self) -> CacheStats {
        let total_entries = self.entries.read().unwrap_or_else(PoisonError::into_inner).len();
        let total_requests = self.total_requests.load(Ordering::Relaxed);
        let cache_hits = self.cache_hits.load(Ordering::Relaxed);
        let hit_rate_percent = if total_requests > 0 {
            (cache_hits as f64 / total_requests as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            total_entries,
            total_requests,
            cache_hits,
            hit_rate_percent,
        }
    }
}
