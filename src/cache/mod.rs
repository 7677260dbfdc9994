//! Cache Module
//!
//! Provides a byte-bounded in-memory store with LRU eviction and interval-based expiry.

mod entry;
mod lru;
mod policy;
mod stats;
mod store;


use std::time::Duration;

// Re-export public types
pub use entry::{entry_size, ByteSize, ByteView, Entry};
pub use lru::RecencyList;
pub use policy::{new_store, PolicyKind, PolicyStore};
pub use stats::{CacheStats, EngineMetrics, SweepReport};
pub use store::LruStore;

pub(crate) use store::LruState;
#[cfg(test)]
pub(crate) use store::Removal;

// == Public Constants ==
/// Byte ceiling used when none (or zero) is configured
pub const DEFAULT_MAX_BYTES: usize = 8 * 1024 * 1024; // 8 MiB

/// Sweep interval used when none (or zero) is configured
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Longest accepted sweep interval; larger values are clamped to it
pub const MAX_CLEANUP_INTERVAL: Duration = Duration::from_secs(u32::MAX as u64);
