//! Policy Store Module
//!
//! The contract every eviction policy satisfies, and the factory that picks one.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::cache::{ByteSize, LruStore};
use crate::config::StoreOptions;
use crate::error::Result;

// == Policy Store ==
/// A bounded key/value store with its own eviction policy.
///
/// Lookups hand back owned values, never references into the store.
#[async_trait]
pub trait PolicyStore<V>: Send + Sync {
    /// Inserts `key` or updates its value.
    async fn insert(&self, key: String, value: V) -> Result<()>;

    /// Removes `key`; absent keys are not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Returns the value for `key`, recording the access.
    async fn lookup(&self, key: &str) -> Option<V>;

    /// Number of live entries.
    async fn len(&self) -> usize;

    /// Summed size of live entries, in bytes.
    async fn current_bytes(&self) -> usize;

    /// Stops background work. Safe to call more than once.
    fn close(&self);

    /// Returns true once background work has stopped.
    fn is_closed(&self) -> bool;
}

// == Policy Kind ==
/// Registered eviction policy identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Least recently used with interval-based expiry
    #[default]
    Lru,
}

impl PolicyKind {
    /// Parses a policy identifier, falling back to [`PolicyKind::Lru`] when
    /// the identifier is not recognized.
    pub fn parse(identifier: &str) -> Self {
        match identifier.trim().to_ascii_lowercase().as_str() {
            "lru" => Self::Lru,
            other => {
                warn!(policy = other, "unknown eviction policy, falling back to lru");
                Self::Lru
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lru => "lru",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Factory ==
/// Builds the store for `kind`.
///
/// Must be called from within a Tokio runtime, which runs the store's reaper.
pub fn new_store<V>(kind: PolicyKind, options: StoreOptions<V>) -> Result<Arc<dyn PolicyStore<V>>>
where
    V: ByteSize + Clone + Send + Sync + 'static,
{
    match kind {
        PolicyKind::Lru => Ok(Arc::new(LruStore::new(options)?)),
    }
}
