//! Cache Statistics Module
//!
//! Counters reported by the engine and by the facade.

use serde::Serialize;

// == Sweep Report ==
/// Outcome of a single sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Entries removed because their expiry instant had passed
    pub expired: usize,
    /// Entries removed by the capacity pass, least recently used first
    pub evicted: usize,
}

impl SweepReport {
    /// Total entries removed by the sweep.
    pub fn removed(&self) -> usize {
        self.expired + self.evicted
    }
}

// == Engine Metrics ==
/// Cumulative removal and rejection counters kept by the eviction engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngineMetrics {
    /// Entries removed after their expiry instant passed
    pub expirations: u64,
    /// Entries removed to bring the byte budget back under its ceiling
    pub evictions: u64,
    /// Entries removed by explicit delete
    pub deletions: u64,
    /// Updates rejected because they would exceed the byte budget
    pub rejected_updates: u64,
}

// == Cache Stats ==
/// Snapshot of facade-level performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals
    pub misses: u64,
    /// hits / (hits + misses), or 0.0 if no requests have been made
    pub hit_rate: f64,
    /// Current number of live entries
    pub entries: usize,
    /// Current summed size of live entries, in bytes
    pub bytes: usize,
}

impl CacheStats {
    /// Builds a snapshot, deriving the hit rate from the counters.
    pub fn new(hits: u64, misses: u64, entries: usize, bytes: usize) -> Self {
        let total = hits + misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };
        Self {
            hits,
            misses,
            hit_rate,
            entries,
            bytes,
        }
    }
}
