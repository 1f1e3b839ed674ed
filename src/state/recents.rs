//! Recently used emoji with a deferred-write buffer.
//!
//! Two explicit sequences: the visible list the recents page renders, and a
//! pending buffer that collects picks made while the user is looking at that
//! page. Only [`RecentsStore::flush_pending`] moves pending entries across, so
//! the visible list never reorders under the user's finger.

use std::num::NonZeroUsize;

use lru::LruCache;

/// Default maximum number of recent emoji to retain (most-recent-first).
pub const RECENTS_CAPACITY: usize = 32;

/// What: Provide the non-zero default capacity used by the recents LRU.
///
/// Output:
/// - `RECENTS_CAPACITY` as `NonZeroUsize`.
#[must_use]
pub const fn recents_capacity() -> NonZeroUsize {
    match NonZeroUsize::new(RECENTS_CAPACITY) {
        Some(n) => n,
        None => NonZeroUsize::MIN,
    }
}

/// Bounded most-recent-first emoji list plus pending buffer.
#[derive(Debug)]
pub struct RecentsStore {
    /// Visible sequence; LRU order is most-recent-first.
    visible: LruCache<String, ()>,
    /// Keys picked while the recents page was active, oldest first.
    pending: Vec<String>,
}

impl Default for RecentsStore {
    fn default() -> Self {
        Self::new(recents_capacity())
    }
}

impl RecentsStore {
    /// Create an empty store holding at most `capacity` keys.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            visible: LruCache::new(capacity),
            pending: Vec::new(),
        }
    }

    /// What: Insert `key` at the front of the visible sequence.
    ///
    /// Inputs:
    /// - `key`: Emoji key; empty strings are ignored.
    ///
    /// Output:
    /// - `true` when the visible sequence changed.
    ///
    /// Details:
    /// - A key already present moves to the front; the store length is unchanged in that case.
    /// - When full, the least recently used key is evicted.
    pub fn add_first(&mut self, key: &str) -> bool {
        if key.is_empty() {
            return false;
        }
        if self.front() == Some(key) {
            return false;
        }
        self.visible.put(key.to_string(), ());
        true
    }

    /// What: Buffer `key` without touching the visible sequence.
    ///
    /// Details:
    /// - A key already buffered moves to the newest end, so each key is buffered once.
    /// - The buffer never holds more keys than the visible capacity; the oldest is dropped,
    ///   since a flush would evict it anyway.
    pub fn add_pending(&mut self, key: &str) {
        if key.is_empty() {
            return;
        }
        self.pending.retain(|k| k != key);
        if self.pending.len() >= self.visible.cap().get() {
            self.pending.remove(0);
        }
        self.pending.push(key.to_string());
    }

    /// What: Apply every pending key to the visible sequence, then clear the buffer.
    ///
    /// Output:
    /// - `true` when the visible sequence changed.
    ///
    /// Details:
    /// - Applied oldest-first through [`Self::add_first`], so the last pick ends up frontmost.
    pub fn flush_pending(&mut self) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        let pending = std::mem::take(&mut self.pending);
        let mut changed = false;
        for key in &pending {
            changed |= self.add_first(key);
        }
        tracing::debug!(
            applied = pending.len(),
            visible = self.visible.len(),
            "flushed pending recent emoji"
        );
        changed
    }

    /// What: Seed the visible sequence from a persisted most-recent-first list.
    ///
    /// Inputs:
    /// - `keys`: Most-recent-first keys; entries past capacity are dropped.
    pub fn restore<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: Vec<S> = keys.into_iter().collect();
        for key in keys.iter().rev() {
            self.add_first(key.as_ref());
        }
    }

    /// Change the capacity, evicting the oldest keys if it shrinks.
    pub fn resize(&mut self, capacity: NonZeroUsize) {
        self.visible.resize(capacity);
        let excess = self.pending.len().saturating_sub(capacity.get());
        if excess > 0 {
            self.pending = self.pending.split_off(excess);
        }
    }

    /// Visible keys, most-recent-first.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.visible.iter().map(|(k, ())| k.clone()).collect()
    }

    /// Most recent visible key, if any.
    #[must_use]
    pub fn front(&self) -> Option<&str> {
        self.visible.iter().next().map(|(k, ())| k.as_str())
    }

    /// Number of visible keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Whether the visible sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Maximum number of visible keys.
    #[must_use]
    pub fn capacity(&self) -> NonZeroUsize {
        self.visible.cap()
    }

    /// Pending keys in the order they were picked.
    #[must_use]
    pub fn pending(&self) -> &[String] {
        &self.pending
    }
}
