//! Cache Facade
//!
//! Caller-facing wrapper that builds its policy store on first use and keeps
//! hit/miss counters.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::cache::{new_store, ByteView, CacheStats, PolicyStore};
use crate::config::{Config, StoreOptions};
use crate::error::{CacheError, Result};

type Backend = Arc<dyn PolicyStore<ByteView>>;

// == Cache ==
/// Lazily initialized cache of [`ByteView`] values.
///
/// The backend is constructed at most once, by whichever call needs it first;
/// concurrent first calls wait for that single construction.
pub struct Cache {
    config: Config,
    options: StoreOptions<ByteView>,
    store: OnceCell<Backend>,
    closed: AtomicBool,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Cache {
    /// Creates a cache from configuration. No backend is built yet.
    pub fn new(config: Config) -> Self {
        let options = StoreOptions::from_config(&config);
        Self::with_options(config, options)
    }

    /// Creates a cache with explicit store options, e.g. an eviction callback.
    ///
    /// `options` take precedence over the byte and interval settings in `config`.
    pub fn with_options(config: Config, options: StoreOptions<ByteView>) -> Self {
        Self {
            config,
            options,
            store: OnceCell::new(),
            closed: AtomicBool::new(false),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    async fn backend(&self) -> Result<&Backend> {
        self.store
            .get_or_try_init(|| async {
                let store = new_store(self.config.policy, self.options.clone())?;
                info!(policy = %self.config.policy, "Cache backend initialized");
                Ok::<_, CacheError>(store)
            })
            .await
    }

    /// Like [`backend`](Self::backend), but fails once the cache is closed.
    ///
    /// `close` may run while the backend is being built and find nothing to
    /// shut down, so the flag is checked again afterwards.
    async fn open_backend(&self) -> Result<&Backend> {
        if self.is_closed() {
            return Err(CacheError::Closed);
        }
        let store = self.backend().await?;
        if self.is_closed() {
            store.close();
            return Err(CacheError::Closed);
        }
        Ok(store)
    }

    // == Add ==
    /// Inserts or updates `key`, building the backend if needed.
    pub async fn add(&self, key: impl Into<String>, value: ByteView) -> Result<()> {
        let key = key.into();
        let result = self.open_backend().await?.insert(key.clone(), value).await;
        if let Err(err) = &result {
            warn!(key = %key, error = %err, "Cache add failed");
        }
        result
    }

    // == Get ==
    /// Returns the value for `key`, counting a hit or a miss.
    ///
    /// A closed cache returns `None` without counting.
    pub async fn get(&self, key: &str) -> Option<ByteView> {
        if self.is_closed() {
            return None;
        }
        let value = match self.store.get() {
            Some(store) => store.lookup(key).await,
            None => None,
        };
        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        value
    }

    // == Delete ==
    /// Removes `key`. Does nothing if the cache is closed or was never used.
    pub async fn delete(&self, key: &str) -> Result<()> {
        if self.is_closed() {
            return Ok(());
        }
        match self.store.get() {
            Some(store) => store.delete(key).await,
            None => Ok(()),
        }
    }

    // == Close ==
    /// Closes the cache and its backend. Later calls are no-ops.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(store) = self.store.get() {
            store.close();
        }
        info!("Cache closed");
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn is_initialized(&self) -> bool {
        self.store.initialized()
    }

    // == Stats ==
    /// Returns a snapshot of hit/miss counters and backend occupancy.
    pub async fn stats(&self) -> CacheStats {
        let (entries, bytes) = match self.store.get() {
            Some(store) => (store.len().await, store.current_bytes().await),
            None => (0, 0),
        };
        CacheStats::new(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            entries,
            bytes,
        )
    }
}
