//! LRU cache of resolved ancestor chains
//!
//! Climbing the resource hierarchy is repeated for every permission query on
//! a resource, so chains are memoized per node. The graph is frozen once the
//! manager is built, which keeps cached chains valid for its whole lifetime.

use crate::graph::NodeId;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

/// Thread-safe cache of `resource -> ancestors (nearest first)`
pub struct AncestorCache {
    cache: Option<Mutex<LruCache<NodeId, Vec<NodeId>>>>,
}

impl AncestorCache {
    /// Create a cache holding up to `capacity` chains; 0 disables it
    pub fn new(capacity: usize) -> Self {
        AncestorCache {
            cache: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    /// Get a cached chain
    pub fn get(&self, resource: NodeId) -> Option<Vec<NodeId>> {
        self.cache.as_ref()?.lock().get(&resource).cloned()
    }

    /// Store a chain
    pub fn put(&self, resource: NodeId, ancestors: Vec<NodeId>) {
        if let Some(cache) = &self.cache {
            cache.lock().put(resource, ancestors);
        }
    }

    /// Clear the cache
    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }

    pub fn len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }
}

impl std::fmt::Debug for AncestorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AncestorCache")
            .field("enabled", &self.is_enabled())
            .field("len", &self.len())
            .finish()
    }
}
