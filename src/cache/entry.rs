//! Cache Entry Module
//!
//! Defines the stored unit and the byte-size capability values must provide.

use std::fmt;
use std::sync::Arc;

// == Byte Size ==
/// A value whose footprint can be charged against the byte budget.
pub trait ByteSize {
    /// Number of bytes this value occupies.
    fn byte_len(&self) -> usize;
}

impl ByteSize for String {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl ByteSize for &'static str {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl ByteSize for Vec<u8> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

// == Byte View ==
/// An immutable, cheaply cloneable view over a byte buffer.
///
/// Clones share the underlying allocation, so handing a view to a caller
/// never exposes a mutable reference into the store.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ByteView {
    bytes: Arc<[u8]>,
}

impl ByteView {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns an owned copy of the bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }
}

impl Default for ByteView {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ByteSize for ByteView {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for ByteView {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<&str> for ByteView {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<String> for ByteView {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bytes))
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView")
            .field("len", &self.len())
            .field("bytes", &String::from_utf8_lossy(&self.bytes))
            .finish()
    }
}

// == Entry ==
/// A single stored key/value pair.
///
/// The expiry instant is not part of the entry; the engine tracks it separately.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    pub key: String,
    pub value: V,
}

impl<V: ByteSize> Entry<V> {
    pub fn new(key: String, value: V) -> Self {
        Self { key, value }
    }

    /// Bytes charged for this entry: key length plus value length.
    pub fn size(&self) -> usize {
        entry_size(&self.key, &self.value)
    }
}

/// Bytes charged for a key/value pair.
pub fn entry_size<V: ByteSize>(key: &str, value: &V) -> usize {
    key.len() + value.byte_len()
}
