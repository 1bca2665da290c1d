//! Document and page snapshots
//!
//! Snapshot value graphs, the fetcher seam to the remote service, an LRU
//! cache in front of it and an in-memory source for saved snapshots.

mod cache;
mod source;
mod types;

pub use cache::{
    normalize_types, CacheStats, SnapshotCache, SnapshotFetcher, ALL_TYPES_KEY, DEFAULT_CACHE_SIZE,
};
pub use source::LocalSnapshotSource;
pub use types::{DocumentSnapshot, PageSnapshot, TypedDocumentSnapshot, TypedPageSnapshot};
