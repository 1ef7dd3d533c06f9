//! Memoization of computed summaries
//!
//! Recomputing a summary is cheap but not free, and interactive hosts ask
//! for the same (table, comparison) pair over and over as users toggle
//! unrelated controls. [`SummaryCache`] memoizes successful analyses behind
//! a mutex-guarded map keyed by the table's content hash and the compared
//! label pair, with an explicit eviction policy and hit/miss statistics.
//!
//! # Concurrency
//!
//! The map lock is held only for lookups and inserts, never during
//! analysis. Concurrent callers missing on the same key may therefore both
//! compute; the engine's purity makes their results identical, so whichever
//! insert lands last changes nothing observable. Wrap the cache in an
//! `Arc` to share it across threads.
//!
//! # Errors
//!
//! Errors are never cached: a failed analysis leaves no entry behind, and
//! the next request with the same key runs the engine again.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use splitstat_core::{RecordTable, Result, SummaryTable};
use tracing::debug;

use crate::analyze::Analyzer;
use crate::config::Comparison;

/// Cache eviction policy
#[derive(Clone, Debug)]
pub enum CachePolicy {
    /// No caching
    NoCache,
    /// Least recently used eviction once `max_entries` is reached.
    ///
    /// Suits a long-running host holding many tables; a capacity below one
    /// behaves as one.
    Lru { max_entries: usize },
    /// Unbounded - never evict, only add.
    ///
    /// Suits a single interactive session over a handful of tables.
    Unbounded,
}

/// Cache key: table fingerprint plus the compared label pair
type SummaryKey = (u64, String, String);

/// Thread-safe memoization of analysis results
pub struct SummaryCache {
    /// Main storage for cache entries
    storage: Mutex<HashMap<SummaryKey, Arc<SummaryTable>>>,
    /// Cache eviction policy
    policy: CachePolicy,
    /// Cache hit counter (atomic for lock-free updates)
    hits: AtomicUsize,
    /// Cache miss counter (atomic for lock-free updates)
    misses: AtomicUsize,
    /// LRU tracking: maps keys to their last access time
    access_order: Mutex<HashMap<SummaryKey, u64>>,
    /// Monotonic counter for generating access timestamps
    access_counter: AtomicUsize,
}

impl SummaryCache {
    /// Create a cache with the specified policy
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            storage: Mutex::new(HashMap::new()),
            policy,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            access_order: Mutex::new(HashMap::new()),
            access_counter: AtomicUsize::new(0),
        }
    }

    /// Fetch the summary for this table and comparison, running the
    /// analyzer on a miss.
    ///
    /// All callers asking for the same key receive clones of the same
    /// `Arc`. The key covers table contents and both labels, so editing
    /// the table or swapping the compared pair misses as it must.
    pub fn get_or_compute(
        &self,
        analyzer: &Analyzer,
        table: &RecordTable,
        comparison: &Comparison,
    ) -> Result<Arc<SummaryTable>> {
        if matches!(self.policy, CachePolicy::NoCache) {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::new(analyzer.analyze(table, comparison)?));
        }

        let key = (
            table.content_hash(),
            comparison.variant_a.clone(),
            comparison.variant_b.clone(),
        );

        let cached = self.storage.lock().unwrap().get(&key).cloned();
        if let Some(value) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            self.touch(&key);
            return Ok(value);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(table_hash = key.0, "summary cache miss, computing");

        // Analysis runs outside the lock
        let value = Arc::new(analyzer.analyze(table, comparison)?);
        self.insert(key, Arc::clone(&value));
        Ok(value)
    }

    /// Cache statistics snapshot
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let entries = self.storage.lock().unwrap().len();

        CacheStats {
            hits,
            misses,
            entries,
            hit_rate: if hits + misses > 0 {
                hits as f64 / (hits + misses) as f64
            } else {
                0.0
            },
        }
    }

    /// Drop all entries. The hit/miss counters keep accumulating.
    pub fn clear(&self) {
        self.storage.lock().unwrap().clear();
        self.access_order.lock().unwrap().clear();
    }

    fn touch(&self, key: &SummaryKey) {
        if matches!(self.policy, CachePolicy::Lru { .. }) {
            let access_time = self.access_counter.fetch_add(1, Ordering::Relaxed) as u64;
            self.access_order
                .lock()
                .unwrap()
                .insert(key.clone(), access_time);
        }
    }

    fn insert(&self, key: SummaryKey, value: Arc<SummaryTable>) {
        let mut storage = self.storage.lock().unwrap();
        if let CachePolicy::Lru { max_entries } = self.policy {
            let cap = max_entries.max(1);
            while storage.len() >= cap {
                self.evict_oldest(&mut storage);
            }
        }
        storage.insert(key.clone(), value);
        drop(storage);
        self.touch(&key);
    }

    fn evict_oldest(&self, storage: &mut HashMap<SummaryKey, Arc<SummaryTable>>) {
        let victim = {
            let access_order = self.access_order.lock().unwrap();
            storage
                .keys()
                .min_by_key(|k| access_order.get(*k).copied().unwrap_or(0))
                .cloned()
        };
        if let Some(victim) = victim {
            storage.remove(&victim);
            self.access_order.lock().unwrap().remove(&victim);
            debug!(table_hash = victim.0, "evicted least recently used summary");
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Number of entries currently in cache
    pub entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}
