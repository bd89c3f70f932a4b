use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::core::data::Resource;
use crate::core::infrastructure::cache::{CacheStats, DocumentCache, SessionCache};
use crate::core::infrastructure::source::DocumentSource;
use crate::error::{FolioError, LoadError, Result};

type InFlight = Arc<OnceCell<Arc<Value>>>;

/// Resolves resources through the session cache, fetching on a miss.
///
/// Concurrent first-time loads of one resource share a single fetch. A
/// failed fetch is not shared: a caller still waiting on it issues its own.
/// Clearing the cache detaches fetches already in flight; their results are
/// returned to their callers but never cached.
pub struct DataLoader {
    source: Arc<dyn DocumentSource>,
    cache: Arc<dyn DocumentCache>,
    in_flight: Mutex<InFlightLoads>,
}

#[derive(Default)]
struct InFlightLoads {
    generation: u64,
    cells: HashMap<String, InFlight>,
}

impl DataLoader {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self::with_cache(source, Arc::new(SessionCache::new()))
    }

    pub fn with_cache(source: Arc<dyn DocumentSource>, cache: Arc<dyn DocumentCache>) -> Self {
        Self {
            source,
            cache,
            in_flight: Mutex::new(InFlightLoads::default()),
        }
    }

    pub fn source(&self) -> &dyn DocumentSource {
        self.source.as_ref()
    }

    pub fn serves(&self, resource: &Resource) -> bool {
        self.source.serves(resource)
    }

    pub async fn load(&self, resource: &Resource) -> Result<Arc<Value>> {
        let name = resource.name();

        if let Some(doc) = self.cache.get(&name) {
            debug!("Loading {} from cache", name);
            return Ok(doc);
        }

        let (cell, generation) = {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            let cell = Arc::clone(in_flight.cells.entry(name.clone()).or_default());
            (cell, in_flight.generation)
        };

        let result = cell
            .get_or_try_init(|| async {
                let doc = Arc::new(self.source.fetch(resource).await?);
                if self.store(&name, &doc, generation) {
                    info!("Loaded fresh data for {} from {} source", name, self.source.kind());
                } else {
                    debug!("Cache was cleared while {} was loading; result not cached", name);
                }
                Ok::<_, LoadError>(doc)
            })
            .await
            .map(Arc::clone);

        {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            if in_flight.cells.get(&name).is_some_and(|current| Arc::ptr_eq(current, &cell)) {
                in_flight.cells.remove(&name);
            }
        }

        result.map_err(|source| {
            warn!("Error loading {}: {}", name, source);
            FolioError::load(name, source)
        })
    }

    /// Caches `doc` unless the cache was cleared after the fetch started.
    fn store(&self, name: &str, doc: &Arc<Value>, generation: u64) -> bool {
        let in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if in_flight.generation != generation {
            return false;
        }
        self.cache.put(name, Arc::clone(doc));
        true
    }

    pub fn clear_cache(&self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.generation += 1;
        in_flight.cells.clear();
        self.cache.clear();
    }

    pub fn cached_resources(&self) -> Vec<String> {
        self.cache.names()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Ends the session: cached documents are released with the loader.
    pub fn dispose(self) {
        let stats = self.cache.stats();
        self.cache.clear();
        info!(
            "Data loader disposed ({} documents, {}/{} cache hits)",
            stats.total_entries, stats.cache_hits, stats.total_requests
        );
    }
}
