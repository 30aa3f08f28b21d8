//! Bounded sound cache with LRU eviction
//!
//! Maps filenames to loaded [`Sound`] handles, holding at most one live
//! handle per filename. Inserting past capacity hands the least-recently
//! used handle back to the caller so its backend resource can be released
//! exactly once.

use std::collections::{HashMap, VecDeque};

use crate::sound::Sound;

/// Default maximum number of cached sounds.
const DEFAULT_CAPACITY: usize = 100;

/// Filename-keyed cache of sound handles with LRU eviction.
pub struct SoundCache {
    /// Handles indexed by filename
    entries: HashMap<String, Sound>,
    /// Access order, front = least recently used
    order: VecDeque<String>,
    /// Maximum number of entries
    capacity: usize,
}

impl SoundCache {
    /// Create a cache with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a cache bounded at `capacity` entries (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Check whether a filename is cached, without refreshing recency.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Look up a handle without refreshing recency.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Sound> {
        self.entries.get(name)
    }

    /// Look up a handle, marking it most recently used.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Sound> {
        if self.entries.contains_key(name) {
            self.touch(name);
        }
        self.entries.get_mut(name)
    }

    /// Insert a handle, evicting the least-recently-used entry if at
    /// capacity.
    ///
    /// Returns the displaced handle (the evicted entry, or the previous
    /// handle for this filename) so the caller can release its resource.
    pub fn insert(&mut self, name: String, sound: Sound) -> Option<Sound> {
        if let Some(old) = self.entries.remove(&name) {
            self.entries.insert(name.clone(), sound);
            self.touch(&name);
            return Some(old);
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.order
                .pop_front()
                .and_then(|oldest| self.entries.remove(&oldest))
        } else {
            None
        };

        self.order.push_back(name.clone());
        self.entries.insert(name, sound);
        evicted
    }

    /// Empty the cache, yielding every handle for release.
    pub fn drain(&mut self) -> Vec<Sound> {
        self.order.clear();
        self.entries.drain().map(|(_, sound)| sound).collect()
    }

    /// Number of cached handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configured capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    fn touch(&mut self, name: &str) {
        if let Some(pos) = self.order.iter().position(|n| n == name)
            && let Some(entry) = self.order.remove(pos)
        {
            self.order.push_back(entry);
        }
    }
}

impl Default for SoundCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SoundCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut cache = SoundCache::with_capacity(4);
        assert!(cache.insert("a.wav".to_string(), Sound::unloaded("a.wav")).is_none());

        assert!(cache.contains("a.wav"));
        assert!(!cache.contains("b.wav"));
        assert_eq!(cache.get("a.wav").map(Sound::name), Some("a.wav"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_eviction_order() {
        let mut cache = SoundCache::with_capacity(2);
        cache.insert("a.wav".to_string(), Sound::unloaded("a.wav"));
        cache.insert("b.wav".to_string(), Sound::unloaded("b.wav"));

        let evicted = cache.insert("c.wav".to_string(), Sound::unloaded("c.wav"));
        assert_eq!(evicted.as_ref().map(|s| s.name()), Some("a.wav"));
        assert!(!cache.contains("a.wav"));
        assert!(cache.contains("b.wav"));
        assert!(cache.contains("c.wav"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_access_refreshes_recency() {
        let mut cache = SoundCache::with_capacity(2);
        cache.insert("a.wav".to_string(), Sound::unloaded("a.wav"));
        cache.insert("b.wav".to_string(), Sound::unloaded("b.wav"));

        // Touch "a" so "b" becomes the LRU entry.
        assert!(cache.get_mut("a.wav").is_some());

        let evicted = cache.insert("c.wav".to_string(), Sound::unloaded("c.wav"));
        assert_eq!(evicted.as_ref().map(|s| s.name()), Some("b.wav"));
        assert!(cache.contains("a.wav"));
    }

    #[test]
    fn test_reinsert_returns_previous_handle() {
        let mut cache = SoundCache::with_capacity(2);
        cache.insert("a.wav".to_string(), Sound::unloaded("a.wav"));

        let old = cache.insert("a.wav".to_string(), Sound::unloaded("a.wav"));
        assert!(old.is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_drain_empties_cache() {
        let mut cache = SoundCache::with_capacity(2);
        cache.insert("a.wav".to_string(), Sound::unloaded("a.wav"));
        cache.insert("b.wav".to_string(), Sound::unloaded("b.wav"));

        let drained = cache.drain();
        assert_eq!(drained.len(), 2);
        assert!(cache.is_empty());

        // Order list is cleared too: a fresh insert must not evict.
        assert!(cache.insert("c.wav".to_string(), Sound::unloaded("c.wav")).is_none());
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let cache = SoundCache::with_capacity(0);
        assert_eq!(cache.capacity(), 1);
    }
}
