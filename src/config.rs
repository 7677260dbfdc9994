//! Configuration Module
//!
//! Handles loading cache configuration from environment variables and turning
//! it into construction-time options for a policy store.

use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{
    PolicyKind, DEFAULT_CLEANUP_INTERVAL, DEFAULT_MAX_BYTES, MAX_CLEANUP_INTERVAL,
};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Eviction policy identifier
    pub policy: PolicyKind,
    /// Ceiling on the summed size of all entries, in bytes
    pub max_bytes: usize,
    /// Sweep cadence; also the lifetime given to newly inserted entries
    pub cleanup_interval: Duration,
    /// How often the demo binary logs a stats snapshot, in seconds
    pub stats_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_POLICY` - Eviction policy (default: lru, unknown values fall back to lru)
    /// - `CACHE_MAX_BYTES` - Byte ceiling (default: 8 MiB, 0 means default)
    /// - `CACHE_CLEANUP_INTERVAL_MS` - Sweep interval in milliseconds (default: 60000)
    /// - `STATS_INTERVAL_SECS` - Stats reporting interval in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            policy: env::var("CACHE_POLICY")
                .map(|v| PolicyKind::parse(&v))
                .unwrap_or(defaults.policy),
            max_bytes: env::var("CACHE_MAX_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v: &usize| v > 0)
                .unwrap_or(defaults.max_bytes),
            cleanup_interval: env::var("CACHE_CLEANUP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v: &u64| v > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.cleanup_interval),
            stats_interval: env::var("STATS_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.stats_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Lru,
            max_bytes: DEFAULT_MAX_BYTES,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            stats_interval: 10,
        }
    }
}

// == Store Options ==
/// Callback invoked synchronously, under the engine's write lock, on every removal.
pub type EvictCallback<V> = Arc<dyn Fn(&str, &V) + Send + Sync>;

/// Construction-time options for a policy store.
pub struct StoreOptions<V> {
    /// Byte ceiling; zero selects [`DEFAULT_MAX_BYTES`]
    pub max_bytes: usize,
    /// Sweep cadence and expiry basis; zero selects [`DEFAULT_CLEANUP_INTERVAL`],
    /// anything above [`MAX_CLEANUP_INTERVAL`] is clamped to it
    pub cleanup_interval: Duration,
    /// Invoked with `(key, value)` whenever an entry leaves the store
    pub on_evicted: Option<EvictCallback<V>>,
}

impl<V> StoreOptions<V> {
    /// Builds options from a loaded [`Config`], with no eviction callback.
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_bytes: config.max_bytes,
            cleanup_interval: config.cleanup_interval,
            on_evicted: None,
        }
    }

    /// Sets the eviction callback.
    pub fn on_evicted<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, &V) + Send + Sync + 'static,
    {
        self.on_evicted = Some(Arc::new(callback));
        self
    }

    /// Replaces non-positive values with their defaults and clamps the
    /// interval so instant arithmetic cannot overflow.
    pub(crate) fn with_defaults(mut self) -> Self {
        if self.max_bytes == 0 {
            self.max_bytes = DEFAULT_MAX_BYTES;
        }
        if self.cleanup_interval.is_zero() {
            self.cleanup_interval = DEFAULT_CLEANUP_INTERVAL;
        }
        self.cleanup_interval = self.cleanup_interval.min(MAX_CLEANUP_INTERVAL);
        self
    }
}

impl<V> Default for StoreOptions<V> {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            on_evicted: None,
        }
    }
}

impl<V> Clone for StoreOptions<V> {
    fn clone(&self) -> Self {
        Self {
            max_bytes: self.max_bytes,
            cleanup_interval: self.cleanup_interval,
            on_evicted: self.on_evicted.clone(),
        }
    }
}

impl<V> fmt::Debug for StoreOptions<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreOptions")
            .field("max_bytes", &self.max_bytes)
            .field("cleanup_interval", &self.cleanup_interval)
            .field("on_evicted", &self.on_evicted.is_some())
            .finish()
    }
}
