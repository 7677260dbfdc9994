//! Recency List Module
//!
//! Arena-backed doubly-linked list that keeps entries in access order.
//!
//! Nodes live in a `Vec` and link to each other by index, so the index map can
//! hold plain `usize` handles without the list owning any back-pointers.
//! Removed slots go onto a free list and are reused by later pushes.

use crate::cache::Entry;

/// Null link.
const NIL: usize = usize::MAX;

/// Stable handle to a node in a [`RecencyList`].
pub type Handle = usize;

#[derive(Debug)]
struct Node<V> {
    entry: Option<Entry<V>>,
    prev: usize,
    next: usize,
}

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// - Head = least recently used
/// - Tail = most recently used
#[derive(Debug)]
pub struct RecencyList<V> {
    nodes: Vec<Node<V>>,
    head: usize,
    tail: usize,
    free: usize,
    len: usize,
}

impl<V> Default for RecencyList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RecencyList<V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    // == Push Back ==
    /// Appends an entry as the most recently used and returns its handle.
    pub fn push_back(&mut self, entry: Entry<V>) -> Handle {
        let handle = self.alloc(entry);
        self.link_back(handle);
        self.len += 1;
        handle
    }

    // == Move To Back ==
    /// Marks the entry behind `handle` as most recently used.
    ///
    /// Stale handles are ignored.
    pub fn move_to_back(&mut self, handle: Handle) {
        if !self.is_live(handle) || self.tail == handle {
            return;
        }
        self.unlink(handle);
        self.link_back(handle);
    }

    // == Remove ==
    /// Unlinks the entry behind `handle` and returns it.
    pub fn remove(&mut self, handle: Handle) -> Option<Entry<V>> {
        if !self.is_live(handle) {
            return None;
        }
        self.unlink(handle);
        let entry = self.nodes[handle].entry.take();
        self.nodes[handle].next = self.free;
        self.free = handle;
        self.len -= 1;
        entry
    }

    // == Front ==
    /// Returns the handle of the least recently used entry.
    pub fn front(&self) -> Option<Handle> {
        (self.head != NIL).then_some(self.head)
    }

    pub fn get(&self, handle: Handle) -> Option<&Entry<V>> {
        self.nodes.get(handle).and_then(|node| node.entry.as_ref())
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Entry<V>> {
        self.nodes.get_mut(handle).and_then(|node| node.entry.as_mut())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates entries from least to most recently used.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    fn is_live(&self, handle: Handle) -> bool {
        self.nodes
            .get(handle)
            .is_some_and(|node| node.entry.is_some())
    }

    fn alloc(&mut self, entry: Entry<V>) -> Handle {
        let node = Node {
            entry: Some(entry),
            prev: NIL,
            next: NIL,
        };
        if self.free != NIL {
            let handle = self.free;
            self.free = self.nodes[handle].next;
            self.nodes[handle] = node;
            handle
        } else {
            self.nodes.push(node);
            self.nodes.len() - 1
        }
    }

    fn link_back(&mut self, handle: Handle) {
        self.nodes[handle].prev = self.tail;
        self.nodes[handle].next = NIL;
        if self.tail != NIL {
            self.nodes[self.tail].next = handle;
        } else {
            self.head = handle;
        }
        self.tail = handle;
    }

    fn unlink(&mut self, handle: Handle) {
        let prev = self.nodes[handle].prev;
        let next = self.nodes[handle].next;

        if prev != NIL {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.nodes[handle].prev = NIL;
        self.nodes[handle].next = NIL;
    }
}

/// Iterator over a [`RecencyList`], least recently used first.
pub struct Iter<'a, V> {
    list: &'a RecencyList<V>,
    current: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Handle, &'a Entry<V>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == NIL {
            return None;
        }
        let handle = self.current;
        let node = &self.list.nodes[handle];
        self.current = node.next;
        node.entry.as_ref().map(|entry| (handle, entry))
    }
}
