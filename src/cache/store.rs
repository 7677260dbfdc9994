//! Cache Store Module
//!
//! The eviction engine: a recency list, a key index, and an expiry map kept in
//! step under one read-write lock, with a byte budget enforced by sweeping.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::runtime;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::lru::{Handle, RecencyList};
use crate::cache::{entry_size, ByteSize, EngineMetrics, Entry, PolicyStore, SweepReport};
use crate::config::{EvictCallback, StoreOptions};
use crate::error::{CacheError, Result};
use crate::tasks::Reaper;

/// Why an entry left the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Removal {
    Deleted,
    Expired,
    Evicted,
}

// == Engine State ==
/// Everything guarded by the engine lock.
///
/// Invariants at every quiescent point:
/// - `index` keys are exactly the keys in `list`
/// - `expires` keys are a subset of `index` keys
/// - `current_bytes` is the summed size of live entries and never exceeds `max_bytes`
pub(crate) struct LruState<V> {
    list: RecencyList<V>,
    index: HashMap<String, Handle>,
    expires: HashMap<String, Instant>,
    current_bytes: usize,
    max_bytes: usize,
    ttl: Duration,
    on_evicted: Option<EvictCallback<V>>,
    metrics: EngineMetrics,
}

impl<V: ByteSize + Clone> LruState<V> {
    /// Creates empty state. `options` must already have defaults applied.
    pub(crate) fn new(options: &StoreOptions<V>) -> Self {
        Self {
            list: RecencyList::new(),
            index: HashMap::new(),
            expires: HashMap::new(),
            current_bytes: 0,
            max_bytes: options.max_bytes,
            ttl: options.cleanup_interval,
            on_evicted: options.on_evicted.clone(),
            metrics: EngineMetrics::default(),
        }
    }

    // == Insert ==
    /// Inserts a new key or updates an existing one.
    ///
    /// A new key is appended as most recently used, given an expiry of
    /// `now + ttl`, and followed by a sweep. An update that would push the
    /// byte total past `max_bytes` is rejected without touching any state;
    /// an accepted update moves the entry to the tail but keeps its expiry.
    pub(crate) fn insert(&mut self, key: String, value: V, now: Instant) -> Result<()> {
        if let Some(&handle) = self.index.get(&key) {
            return self.update(handle, key, value);
        }

        let size = entry_size(&key, &value);
        let handle = self.list.push_back(Entry::new(key.clone(), value));
        self.index.insert(key.clone(), handle);
        self.current_bytes += size;
        // An expiry past the clock's range means the entry never expires.
        if let Some(at) = now.checked_add(self.ttl) {
            self.expires.insert(key, at);
        }

        self.sweep(now);
        Ok(())
    }

    fn update(&mut self, handle: Handle, key: String, value: V) -> Result<()> {
        let Some(entry) = self.list.get_mut(handle) else {
            return Ok(());
        };

        let required = self.current_bytes - entry.size() + entry_size(&key, &value);
        if required > self.max_bytes {
            self.metrics.rejected_updates += 1;
            debug!(key = %key, required, max = self.max_bytes, "update rejected");
            return Err(CacheError::CapacityExceeded {
                key,
                required,
                max: self.max_bytes,
            });
        }

        entry.value = value;
        self.current_bytes = required;
        self.list.move_to_back(handle);
        Ok(())
    }

    // == Peek ==
    /// Returns a copy of the value and whether its expiry instant has passed.
    pub(crate) fn peek(&self, key: &str, now: Instant) -> Option<(V, bool)> {
        let handle = *self.index.get(key)?;
        let entry = self.list.get(handle)?;
        let expired = self.expires.get(key).is_some_and(|&at| at < now);
        Some((entry.value.clone(), expired))
    }

    // == Touch ==
    /// Moves a still-live key to the tail. Returns false if the key is gone.
    pub(crate) fn touch(&mut self, key: &str) -> bool {
        match self.index.get(key) {
            Some(&handle) => {
                self.list.move_to_back(handle);
                true
            }
            None => false,
        }
    }

    // == Remove ==
    /// Removes a key from every structure, invoking the eviction callback.
    pub(crate) fn remove(&mut self, key: &str, reason: Removal) -> Option<V> {
        let handle = self.index.remove(key)?;
        self.expires.remove(key);
        let entry = self.list.remove(handle)?;
        self.current_bytes -= entry.size();

        match reason {
            Removal::Deleted => self.metrics.deletions += 1,
            Removal::Expired => self.metrics.expirations += 1,
            Removal::Evicted => self.metrics.evictions += 1,
        }
        debug!(key = %entry.key, ?reason, "entry removed");

        if let Some(callback) = &self.on_evicted {
            callback(&entry.key, &entry.value);
        }
        Some(entry.value)
    }

    // == Sweep ==
    /// Removes expired entries, then evicts from the head until the byte
    /// total fits the budget.
    pub(crate) fn sweep(&mut self, now: Instant) -> SweepReport {
        let mut report = SweepReport::default();

        let expired: Vec<String> = self
            .expires
            .iter()
            .filter(|(_, at)| **at < now)
            .map(|(key, _)| key.clone())
            .collect();
        for key in expired {
            if self.remove(&key, Removal::Expired).is_some() {
                report.expired += 1;
            }
        }

        while self.current_bytes > self.max_bytes {
            let Some(key) = self
                .list
                .front()
                .and_then(|handle| self.list.get(handle))
                .map(|entry| entry.key.clone())
            else {
                break;
            };
            if self.remove(&key, Removal::Evicted).is_none() {
                break;
            }
            report.evicted += 1;
        }

        report
    }

    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn current_bytes(&self) -> usize {
        self.current_bytes
    }

    pub(crate) fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub(crate) fn metrics(&self) -> EngineMetrics {
        self.metrics.clone()
    }

    /// Keys from least to most recently used.
    #[cfg(test)]
    pub(crate) fn keys_in_order(&self) -> Vec<String> {
        self.list.iter().map(|(_, entry)| entry.key.clone()).collect()
    }

    /// Panics if any structural invariant is broken.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        use std::collections::HashSet;

        let listed: HashSet<&str> = self.list.iter().map(|(_, e)| e.key.as_str()).collect();
        let indexed: HashSet<&str> = self.index.keys().map(String::as_str).collect();
        assert_eq!(listed, indexed, "index/list key mismatch");
        assert_eq!(self.list.len(), self.index.len(), "duplicate keys in list");

        for (key, &handle) in &self.index {
            let entry = self.list.get(handle).expect("index points at freed slot");
            assert_eq!(&entry.key, key, "index points at wrong entry");
        }
        for key in self.expires.keys() {
            assert!(self.index.contains_key(key), "expiry for dead key {}", key);
        }

        let summed: usize = self.list.iter().map(|(_, e)| e.size()).sum();
        assert_eq!(summed, self.current_bytes, "byte accounting drifted");
        assert!(self.current_bytes <= self.max_bytes, "byte budget exceeded");
    }
}

// == LRU Store ==
/// Thread-safe LRU store with a byte budget and interval-based expiry.
///
/// Each newly inserted entry expires `cleanup_interval` after its insertion;
/// updates do not push that instant back. A [`Reaper`] started at
/// construction sweeps on the same interval until [`close`](Self::close) is
/// called or the store is dropped.
///
/// The eviction callback runs while the write lock is held and must not call
/// back into the store.
pub struct LruStore<V> {
    state: Arc<RwLock<LruState<V>>>,
    runtime: runtime::Handle,
    reaper: Reaper,
}

impl<V> LruStore<V>
where
    V: ByteSize + Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a store and starts its reaper on the current Tokio runtime.
    ///
    /// Zero `max_bytes` or `cleanup_interval` fall back to 8 MiB and one minute.
    pub fn new(options: StoreOptions<V>) -> Result<Self> {
        let options = options.with_defaults();
        let runtime =
            runtime::Handle::try_current().map_err(|_| CacheError::RuntimeUnavailable)?;

        let state = Arc::new(RwLock::new(LruState::new(&options)));
        let reaper = Reaper::spawn(&runtime, Arc::downgrade(&state), options.cleanup_interval);

        Ok(Self {
            state,
            runtime,
            reaper,
        })
    }

    // == Insert ==
    /// Inserts or updates `key`.
    ///
    /// Fails with [`CacheError::CapacityExceeded`] when updating an existing
    /// key would exceed the byte budget; the old value stays in place.
    pub async fn insert(&self, key: impl Into<String>, value: V) -> Result<()> {
        let mut state = self.state.write().await;
        state.insert(key.into(), value, Instant::now())
    }

    // == Lookup ==
    /// Returns a copy of the value for `key` and marks it most recently used.
    ///
    /// An entry past its expiry instant is still returned; its removal is
    /// scheduled on the runtime and happens independently of this call.
    pub async fn lookup(&self, key: &str) -> Option<V> {
        let (value, expired) = {
            let state = self.state.read().await;
            state.peek(key, Instant::now())?
        };

        if expired {
            self.spawn_removal(key.to_string());
        }

        // The key may have been deleted between the two lock acquisitions.
        self.state.write().await.touch(key);
        Some(value)
    }

    fn spawn_removal(&self, key: String) {
        let state = Arc::clone(&self.state);
        self.runtime.spawn(async move {
            if state.write().await.remove(&key, Removal::Expired).is_some() {
                debug!(key = %key, "stale entry removed after lookup");
            }
        });
    }

    // == Delete ==
    /// Removes `key` if present. Deleting an absent key succeeds.
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.state.write().await.remove(key, Removal::Deleted);
        Ok(())
    }

    // == Sweep ==
    /// Runs an expiry pass followed by a capacity pass immediately.
    pub async fn sweep(&self) -> SweepReport {
        self.state.write().await.sweep(Instant::now())
    }

    // == Length ==
    /// Returns the number of live entries.
    pub async fn len(&self) -> usize {
        self.state.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Returns the summed size of live entries, in bytes.
    pub async fn current_bytes(&self) -> usize {
        self.state.read().await.current_bytes()
    }

    pub async fn max_bytes(&self) -> usize {
        self.state.read().await.max_bytes()
    }

    /// Returns cumulative removal and rejection counters.
    pub async fn metrics(&self) -> EngineMetrics {
        self.state.read().await.metrics()
    }

    // == Close ==
    /// Stops the reaper. Calling this more than once is a no-op.
    pub fn close(&self) {
        self.reaper.stop();
    }

    /// Returns true once the reaper task has finished.
    pub fn is_closed(&self) -> bool {
        self.reaper.is_stopped()
    }
}

#[async_trait]
impl<V> PolicyStore<V> for LruStore<V>
where
    V: ByteSize + Clone + Send + Sync + 'static,
{
    async fn insert(&self, key: String, value: V) -> Result<()> {
        LruStore::insert(self, key, value).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        LruStore::delete(self, key).await
    }

    async fn lookup(&self, key: &str) -> Option<V> {
        LruStore::lookup(self, key).await
    }

    async fn len(&self) -> usize {
        LruStore::len(self).await
    }

    async fn current_bytes(&self) -> usize {
        LruStore::current_bytes(self).await
    }

    fn close(&self) {
        LruStore::close(self)
    }

    fn is_closed(&self) -> bool {
        LruStore::is_closed(self)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    type Evicted = Arc<Mutex<Vec<(String, String)>>>;

    fn options(max_bytes: usize, interval: Duration) -> StoreOptions<String> {
        StoreOptions {
            max_bytes,
            cleanup_interval: interval,
            on_evicted: None,
        }
    }

    fn recording(max_bytes: usize, interval: Duration) -> (StoreOptions<String>, Evicted) {
        let evicted: Evicted = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&evicted);
        let options = options(max_bytes, interval).on_evicted(move |key, value: &String| {
            sink.lock().unwrap().push((key.to_string(), value.clone()));
        });
        (options, evicted)
    }

    /// A value that makes a one-character key occupy `size` bytes.
    fn sized(size: usize) -> String {
        "v".repeat(size - 1)
    }

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_store_insert_and_lookup() {
        let store = LruStore::new(options(1024, HOUR)).unwrap();

        store.insert("key1", "value1".to_string()).await.unwrap();

        assert_eq!(store.lookup("key1").await, Some("value1".to_string()));
        assert_eq!(store.len().await, 1);
        assert_eq!(store.current_bytes().await, 10);
    }

    #[tokio::test]
    async fn test_store_lookup_nonexistent() {
        let store = LruStore::new(options(1024, HOUR)).unwrap();
        assert_eq!(store.lookup("missing").await, None);
    }

    #[tokio::test]
    async fn test_store_defaults_for_zero_options() {
        let store = LruStore::new(options(0, Duration::ZERO)).unwrap();
        assert_eq!(store.max_bytes().await, 8 * 1024 * 1024);
    }

    #[tokio::test]
    async fn test_store_accepts_maximum_interval() {
        let store = LruStore::new(options(1024, Duration::MAX)).unwrap();

        store.insert("k", "v".to_string()).await.unwrap();
        assert_eq!(store.sweep().await.removed(), 0);
        assert_eq!(store.lookup("k").await, Some("v".to_string()));
        store.close();
    }

    #[test]
    fn test_state_unclamped_ttl_never_expires() {
        let mut state = LruState::new(&options(1024, Duration::MAX));
        let now = Instant::now();

        state.insert("k".to_string(), "v".to_string(), now).unwrap();
        state.assert_invariants();
        assert_eq!(state.sweep(now + HOUR).expired, 0);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_store_requires_runtime() {
        let result = LruStore::new(options(1024, HOUR));
        assert!(matches!(result.err(), Some(CacheError::RuntimeUnavailable)));
    }

    #[tokio::test]
    async fn test_store_capacity_evicts_oldest() {
        let store = LruStore::new(options(20, HOUR)).unwrap();

        store.insert("a", sized(10)).await.unwrap();
        store.insert("b", sized(10)).await.unwrap();
        store.insert("c", sized(10)).await.unwrap();

        assert_eq!(store.lookup("a").await, None);
        assert_eq!(store.len().await, 2);
        assert!(store.current_bytes().await <= 20);
    }

    #[tokio::test]
    async fn test_store_lookup_touch_protects_entry() {
        let store = LruStore::new(options(20, HOUR)).unwrap();

        store.insert("a", sized(10)).await.unwrap();
        store.insert("b", sized(10)).await.unwrap();
        assert!(store.lookup("a").await.is_some());
        store.insert("d", sized(10)).await.unwrap();

        assert!(store.lookup("a").await.is_some());
        assert_eq!(store.lookup("b").await, None);
        assert!(store.lookup("d").await.is_some());
    }

    #[tokio::test]
    async fn test_store_touch_after_eviction() {
        let store = LruStore::new(options(20, HOUR)).unwrap();

        store.insert("a", sized(10)).await.unwrap();
        store.insert("b", sized(10)).await.unwrap();
        store.insert("c", sized(10)).await.unwrap();
        // "a" is already gone, so touching it is a miss; "b" is now LRU.
        assert_eq!(store.lookup("a").await, None);
        assert!(store.lookup("b").await.is_some());
        store.insert("d", sized(10)).await.unwrap();

        assert!(store.lookup("b").await.is_some());
        assert_eq!(store.lookup("c").await, None);
    }

    #[tokio::test]
    async fn test_store_update_rejected_over_capacity() {
        let store = LruStore::new(options(15, HOUR)).unwrap();

        store.insert("k", sized(10)).await.unwrap();
        store.insert("x", sized(5)).await.unwrap();

        let result = store.insert("k", sized(20)).await;
        assert_eq!(
            result,
            Err(CacheError::CapacityExceeded {
                key: "k".to_string(),
                required: 25,
                max: 15,
            })
        );
        assert_eq!(store.lookup("k").await, Some(sized(10)));
        assert_eq!(store.current_bytes().await, 15);
        assert_eq!(store.metrics().await.rejected_updates, 1);
    }

    #[tokio::test]
    async fn test_store_rejected_update_keeps_order() {
        let store = LruStore::new(options(15, HOUR)).unwrap();

        store.insert("k", sized(10)).await.unwrap();
        store.insert("x", sized(5)).await.unwrap();
        assert!(store.insert("k", sized(20)).await.is_err());

        assert_eq!(store.state.read().await.keys_in_order(), vec!["k", "x"]);
    }

    #[tokio::test]
    async fn test_store_update_moves_to_tail() {
        let store = LruStore::new(options(1024, HOUR)).unwrap();

        store.insert("a", "1".to_string()).await.unwrap();
        store.insert("b", "2".to_string()).await.unwrap();
        store.insert("a", "333".to_string()).await.unwrap();

        let state = store.state.read().await;
        assert_eq!(state.keys_in_order(), vec!["b", "a"]);
        assert_eq!(state.current_bytes(), 2 + 4);
        state.assert_invariants();
    }

    #[tokio::test]
    async fn test_store_delete() {
        let (opts, evicted) = recording(1024, HOUR);
        let store = LruStore::new(opts).unwrap();

        store.insert("key1", "value1".to_string()).await.unwrap();
        store.delete("key1").await.unwrap();

        assert!(store.is_empty().await);
        assert_eq!(store.current_bytes().await, 0);
        assert_eq!(store.lookup("key1").await, None);
        assert_eq!(
            *evicted.lock().unwrap(),
            vec![("key1".to_string(), "value1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_store_delete_absent_is_noop() {
        let (opts, evicted) = recording(1024, HOUR);
        let store = LruStore::new(opts).unwrap();

        assert!(store.delete("missing").await.is_ok());
        assert!(evicted.lock().unwrap().is_empty());
        assert_eq!(store.metrics().await.deletions, 0);
    }

    #[tokio::test]
    async fn test_store_callback_on_capacity_eviction() {
        let (opts, evicted) = recording(20, HOUR);
        let store = LruStore::new(opts).unwrap();

        store.insert("a", sized(10)).await.unwrap();
        store.insert("b", sized(10)).await.unwrap();
        store.insert("c", sized(10)).await.unwrap();

        assert_eq!(*evicted.lock().unwrap(), vec![("a".to_string(), sized(10))]);
        assert_eq!(store.metrics().await.evictions, 1);
    }

    #[tokio::test]
    async fn test_store_oversized_insert_is_evicted() {
        let store = LruStore::new(options(10, HOUR)).unwrap();

        store.insert("small", "1".to_string()).await.unwrap();
        store.insert("big", sized(50)).await.unwrap();

        assert!(store.is_empty().await);
        assert_eq!(store.current_bytes().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_expiry_sweep() {
        let interval = Duration::from_millis(50);
        let (opts, evicted) = recording(1024, interval);
        let store = LruStore::new(opts).unwrap();

        store.insert("k", "last".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        store.sweep().await;

        assert_eq!(store.lookup("k").await, None);
        assert_eq!(
            *evicted.lock().unwrap(),
            vec![("k".to_string(), "last".to_string())]
        );
        assert_eq!(store.metrics().await.expirations, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_update_does_not_refresh_expiry() {
        let interval = Duration::from_secs(10);
        let store = LruStore::new(options(1024, interval)).unwrap();

        tokio::time::sleep(Duration::from_secs(1)).await;
        store.insert("k", "v1".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_secs(6)).await;
        store.insert("k", "v2".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        // Expired at 11s despite the update at 7s.
        let report = store.sweep().await;
        assert_eq!(report.expired, 1);
        assert!(store.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_stale_lookup_returns_value_then_removes() {
        let interval = Duration::from_secs(60);
        let store = LruStore::new(options(1024, interval)).unwrap();

        // Reaper ticks at 60s and 120s; the entry expires at 90s.
        tokio::time::sleep(Duration::from_secs(30)).await;
        store.insert("k", "stale".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_secs(65)).await;

        assert_eq!(store.lookup("k").await, Some("stale".to_string()));

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(store.lookup("k").await, None);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_expired_space_reclaimed_before_lru() {
        let interval = Duration::from_secs(10);
        let (opts, evicted) = recording(20, interval);
        let store = LruStore::new(opts).unwrap();

        tokio::time::sleep(Duration::from_secs(1)).await;
        store.insert("old", sized(10)).await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        store.insert("a", sized(5)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5_500)).await;
        // "old" expired at 11s, after the reaper's 10s tick.
        store.insert("b", sized(10)).await.unwrap();

        let evicted = evicted.lock().unwrap();
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].0, "old");
        drop(evicted);
        assert!(store.lookup("a").await.is_some());
        assert!(store.lookup("b").await.is_some());
    }

    #[test]
    fn test_state_touch_after_remove_does_not_resurrect() {
        let mut state = LruState::new(&options(1024, HOUR));
        let now = Instant::now();
        state.insert("k".to_string(), "v".to_string(), now).unwrap();
        state.insert("other".to_string(), "w".to_string(), now).unwrap();

        // Read phase sees the key, then a delete lands before the write phase.
        assert_eq!(state.peek("k", now), Some(("v".to_string(), false)));
        assert_eq!(state.remove("k", Removal::Deleted), Some("v".to_string()));

        assert!(!state.touch("k"));
        assert_eq!(state.keys_in_order(), vec!["other"]);
        assert_eq!(state.current_bytes(), 6);
        state.assert_invariants();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_store_concurrent_touch_and_delete() {
        let store = Arc::new(LruStore::new(options(1024, HOUR)).unwrap());

        for _ in 0..200 {
            store.insert("k", "v".to_string()).await.unwrap();

            let reader = {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.lookup("k").await })
            };
            let deleter = {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.delete("k").await })
            };

            let _ = reader.await.unwrap();
            deleter.await.unwrap().unwrap();

            assert_eq!(store.lookup("k").await, None);
            store.state.read().await.assert_invariants();
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_store_concurrent_mixed_workload() {
        let store = Arc::new(LruStore::new(options(512, HOUR)).unwrap());

        let mut tasks = Vec::new();
        for worker in 0..8 {
            let store = Arc::clone(&store);
            tasks.push(tokio::spawn(async move {
                for i in 0..250 {
                    let key = format!("key{}", (worker * 7 + i) % 40);
                    match i % 4 {
                        0 | 1 => {
                            let _ = store.insert(key, "x".repeat(i % 30)).await;
                        }
                        2 => {
                            store.lookup(&key).await;
                        }
                        _ => {
                            store.delete(&key).await.unwrap();
                        }
                    }
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let state = store.state.read().await;
        state.assert_invariants();
    }

    #[tokio::test]
    async fn test_store_close_is_idempotent() {
        let store = LruStore::new(options(1024, Duration::from_millis(10))).unwrap();

        store.close();
        store.close();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(store.is_closed());

        // Operations still work after close; only the reaper is gone.
        store.insert("k", "v".to_string()).await.unwrap();
        assert_eq!(store.lookup("k").await, Some("v".to_string()));
    }
}
