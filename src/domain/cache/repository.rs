//! Result cache trait definition

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::key::QueryCacheKey;

/// Store of successful upstream query results.
///
/// Entries expire a fixed time after insertion. An expired entry is never
/// returned from [`ResultCache::get`], whether or not it has been swept yet.
/// There is no explicit invalidation: entries leave the cache by expiry,
/// by the optional capacity bound, or when the process exits.
#[async_trait]
pub trait ResultCache: Send + Sync + Debug {
    /// Returns the live entry for `key`, if any
    async fn get(&self, key: &QueryCacheKey) -> Option<Arc<Value>>;

    /// Stores `value` under `key`, replacing any previous entry and
    /// restarting its time-to-live
    async fn set(&self, key: QueryCacheKey, value: Arc<Value>);

    /// Removes every expired entry, returning how many were removed
    async fn purge_expired(&self) -> usize;

    /// Approximate number of stored entries, including expired ones that
    /// have not been swept yet
    async fn len(&self) -> u64;
}
