//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine and facade.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// An update to an existing key would push the byte budget over its ceiling.
    ///
    /// The update is rejected as a whole; the previous value stays in place.
    #[error("capacity exceeded updating '{key}': {required} bytes required, {max} allowed")]
    CapacityExceeded {
        key: String,
        required: usize,
        max: usize,
    },

    /// The cache has been closed and no longer accepts writes
    #[error("cache is closed")]
    Closed,

    /// The engine was constructed outside of a Tokio runtime
    #[error("no Tokio runtime available to run the reaper")]
    RuntimeUnavailable,
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_exceeded_message() {
        let err = CacheError::CapacityExceeded {
            key: "k".to_string(),
            required: 25,
            max: 15,
        };
        let msg = err.to_string();
        assert!(msg.contains("'k'"));
        assert!(msg.contains("25"));
        assert!(msg.contains("15"));
    }

    #[test]
    fn test_closed_message() {
        assert_eq!(CacheError::Closed.to_string(), "cache is closed");
    }
}
