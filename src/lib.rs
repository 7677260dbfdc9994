//! LRU TTL Cache - A thread-safe in-process cache
//!
//! Provides byte-bounded LRU eviction with interval-based expiry and a
//! background reaper, plus a lazily initialized facade with hit/miss accounting.

pub mod cache;
pub mod config;
pub mod error;
pub mod facade;
pub mod tasks;

pub use cache::{ByteSize, ByteView, LruStore, PolicyKind, PolicyStore};
pub use config::{Config, StoreOptions};
pub use error::{CacheError, Result};
pub use facade::Cache;
