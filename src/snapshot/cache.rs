//! Snapshot cache with LRU eviction
//!
//! Sits in front of a `SnapshotFetcher` and remembers document and page
//! snapshots per type filter until the next remote mutation.
//!
//! # Thread Safety
//!
//! Every map sits behind its own `parking_lot::Mutex`. Snapshots are shared
//! through `Arc`, so a hit never copies element lists. A fetch runs with no
//! lock held; two threads missing on the same key may both fetch.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

use super::types::{DocumentSnapshot, PageSnapshot, TypedDocumentSnapshot, TypedPageSnapshot};
use crate::error::Result;
use crate::refs::{ObjectRef, RefVariant};

/// Key used for an empty or blank type filter
pub const ALL_TYPES_KEY: &str = "__ALL__";

/// Default number of entries per cache map
pub const DEFAULT_CACHE_SIZE: usize = 64;

/// Source of snapshots, normally the remote document service
///
/// `types` is a comma separated type filter; `None` or blank means all
/// types. The typed variants default to fetching untyped data and wrapping
/// it.
pub trait SnapshotFetcher {
    fn fetch_document_snapshot(&self, types: Option<&str>) -> Result<DocumentSnapshot>;

    fn fetch_page_snapshot(&self, page_index: u32, types: Option<&str>) -> Result<PageSnapshot>;

    fn fetch_typed_document_snapshot<T: RefVariant>(
        &self,
        types: Option<&str>,
    ) -> Result<TypedDocumentSnapshot<T>> {
        Ok(self.fetch_document_snapshot(types)?.into())
    }

    fn fetch_typed_page_snapshot<T: RefVariant>(
        &self,
        page_index: u32,
        types: Option<&str>,
    ) -> Result<TypedPageSnapshot<T>> {
        Ok(self.fetch_page_snapshot(page_index, types)?.into())
    }
}

/// Canonical cache key for a type filter
///
/// Splits on commas, trims, drops empty names, uppercases and sorts.
pub fn normalize_types(types: Option<&str>) -> String {
    let mut names: Vec<String> = types
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase)
        .collect();
    if names.is_empty() {
        return ALL_TYPES_KEY.to_string();
    }
    names.sort();
    names.join(",")
}

type PageKey = (u32, String);
type TypedKey = (&'static str, String);
type TypedPageKey = (u32, &'static str, String);

/// Caching snapshot source
pub struct SnapshotCache<F> {
    fetcher: F,
    documents: Mutex<LruCache<String, Arc<DocumentSnapshot>>>,
    pages: Mutex<LruCache<PageKey, Arc<PageSnapshot>>>,
    typed_documents: Mutex<LruCache<TypedKey, TypedDocumentSnapshot<ObjectRef>>>,
    typed_pages: Mutex<LruCache<TypedPageKey, TypedPageSnapshot<ObjectRef>>>,
}

impl<F: SnapshotFetcher> SnapshotCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_capacity(fetcher, DEFAULT_CACHE_SIZE)
    }

    /// Capacity applies to each map; zero is treated as one
    pub fn with_capacity(fetcher: F, capacity: usize) -> Self {
        let size = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            fetcher,
            documents: Mutex::new(LruCache::new(size)),
            pages: Mutex::new(LruCache::new(size)),
            typed_documents: Mutex::new(LruCache::new(size)),
            typed_pages: Mutex::new(LruCache::new(size)),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Document snapshot; a fetch also seeds the page cache for every page
    pub fn document_snapshot(&self, types: Option<&str>) -> Result<Arc<DocumentSnapshot>> {
        let key = normalize_types(types);
        if let Some(hit) = self.documents.lock().get(&key) {
            tracing::debug!(key = %key, "Document snapshot cache hit");
            return Ok(Arc::clone(hit));
        }

        tracing::debug!(key = %key, "Document snapshot cache miss");
        let snapshot = Arc::new(self.fetcher.fetch_document_snapshot(types)?);
        {
            let mut pages = self.pages.lock();
            for (index, page) in snapshot.pages.iter().flatten().enumerate() {
                if let Some(page) = page {
                    pages.put((index as u32, key.clone()), Arc::new(page.clone()));
                }
            }
        }
        self.documents.lock().put(key, Arc::clone(&snapshot));
        Ok(snapshot)
    }

    pub fn page_snapshot(&self, page_index: u32, types: Option<&str>) -> Result<Arc<PageSnapshot>> {
        let key = (page_index, normalize_types(types));
        if let Some(hit) = self.pages.lock().get(&key) {
            tracing::debug!(page = page_index, key = %key.1, "Page snapshot cache hit");
            return Ok(Arc::clone(hit));
        }

        tracing::debug!(page = page_index, key = %key.1, "Page snapshot cache miss");
        let snapshot = Arc::new(self.fetcher.fetch_page_snapshot(page_index, types)?);
        self.pages.lock().put(key, Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Typed document snapshot; a fetch also seeds the typed page cache
    pub fn typed_document_snapshot<T: RefVariant>(
        &self,
        types: Option<&str>,
    ) -> Result<TypedDocumentSnapshot<T>> {
        let key = (T::NAME, normalize_types(types));
        if let Some(hit) = self.typed_documents.lock().get(&key) {
            tracing::debug!(variant = T::NAME, key = %key.1, "Typed document snapshot cache hit");
            return Ok(hit.cast());
        }

        tracing::debug!(variant = T::NAME, key = %key.1, "Typed document snapshot cache miss");
        let snapshot = self.fetcher.fetch_typed_document_snapshot::<T>(types)?;
        {
            let mut pages = self.typed_pages.lock();
            for (index, page) in snapshot.page_slots().iter().enumerate() {
                if let Some(page) = page {
                    pages.put((index as u32, T::NAME, key.1.clone()), page.cast());
                }
            }
        }
        self.typed_documents.lock().put(key, snapshot.cast());
        Ok(snapshot)
    }

    pub fn typed_page_snapshot<T: RefVariant>(
        &self,
        page_index: u32,
        types: Option<&str>,
    ) -> Result<TypedPageSnapshot<T>> {
        let key = (page_index, T::NAME, normalize_types(types));
        if let Some(hit) = self.typed_pages.lock().get(&key) {
            tracing::debug!(page = page_index, variant = T::NAME, "Typed page snapshot cache hit");
            return Ok(hit.cast());
        }

        tracing::debug!(page = page_index, variant = T::NAME, "Typed page snapshot cache miss");
        let snapshot = self
            .fetcher
            .fetch_typed_page_snapshot::<T>(page_index, types)?;
        self.typed_pages.lock().put(key, snapshot.cast());
        Ok(snapshot)
    }

    /// Drop everything; call after any remote mutation
    pub fn invalidate(&self) {
        self.documents.lock().clear();
        self.pages.lock().clear();
        self.typed_documents.lock().clear();
        self.typed_pages.lock().clear();
        tracing::info!("Snapshot cache invalidated");
    }

    pub fn stats(&self) -> CacheStats {
        let documents = {
            let cache = self.documents.lock();
            (cache.len(), cache.cap().get())
        };
        let pages = {
            let cache = self.pages.lock();
            (cache.len(), cache.cap().get())
        };
        let typed_documents = {
            let cache = self.typed_documents.lock();
            (cache.len(), cache.cap().get())
        };
        let typed_pages = {
            let cache = self.typed_pages.lock();
            (cache.len(), cache.cap().get())
        };

        CacheStats {
            documents_used: documents.0,
            documents_capacity: documents.1,
            pages_used: pages.0,
            pages_capacity: pages.1,
            typed_documents_used: typed_documents.0,
            typed_documents_capacity: typed_documents.1,
            typed_pages_used: typed_pages.0,
            typed_pages_capacity: typed_pages.1,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached document snapshots
    pub documents_used: usize,
    /// Document snapshot capacity
    pub documents_capacity: usize,
    /// Number of cached page snapshots
    pub pages_used: usize,
    /// Page snapshot capacity
    pub pages_capacity: usize,
    /// Number of cached typed document snapshots
    pub typed_documents_used: usize,
    /// Typed document snapshot capacity
    pub typed_documents_capacity: usize,
    /// Number of cached typed page snapshots
    pub typed_pages_used: usize,
    /// Typed page snapshot capacity
    pub typed_pages_capacity: usize,
}
