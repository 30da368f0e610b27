//! Compiled selector cache
//!
//! Compiling a selector is cheap but not free; scrapers tend to run the
//! same handful of selectors over many documents. The cache is keyed by
//! the selector string and shared across threads.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

use lru::LruCache;

use super::compile;
use crate::error::SelectorError;
use crate::matcher::Match;

/// Entries kept by [`SelectorCache::default`]
pub const DEFAULT_CAPACITY: usize = 256;

/// LRU cache of compiled selectors
pub struct SelectorCache {
    entries: Mutex<LruCache<String, Arc<Match<'static>>>>,
}

impl SelectorCache {
    /// A cache holding at most `capacity` selectors (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        SelectorCache {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Compiled matcher for `selector`, compiling and caching it on a miss.
    /// Failed compilations are not cached.
    pub fn get(&self, selector: &str) -> Result<Arc<Match<'static>>, SelectorError> {
        if let Some(hit) = self.lock().get(selector) {
            tracing::trace!(selector, "selector cache hit");
            return Ok(Arc::clone(hit));
        }
        tracing::trace!(selector, "selector cache miss");
        let compiled = Arc::new(compile(selector)?);
        self.lock().put(selector.to_string(), Arc::clone(&compiled));
        Ok(compiled)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<String, Arc<Match<'static>>>> {
        // entries stay consistent even if a holder panicked
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SelectorCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for SelectorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectorCache")
            .field("len", &self.len())
            .finish()
    }
}
