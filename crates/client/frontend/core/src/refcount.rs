//! Multiset membership used by every highlight layer.
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::trace;

/// Set where each key is a member for as long as its count is positive.
///
/// Every independent reason to mark a key calls [`inc`](Self::inc) once and
/// [`dec`](Self::dec) once. A key whose count drops to zero is removed, so a
/// stray `dec` on an absent key is a no-op rather than a negative count.
#[derive(Clone)]
pub struct RefCountSet<K> {
    counts: HashMap<K, u32>,
}

impl<K> Default for RefCountSet<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> RefCountSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one reason for `key`; returns the new count.
    pub fn inc(&mut self, key: K) -> u32 {
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    /// Drops one reason for `key`; returns the remaining count.
    pub fn dec(&mut self, key: &K) -> u32 {
        match self.counts.get_mut(key) {
            Some(count) if *count > 1 => {
                *count -= 1;
                *count
            }
            Some(_) => {
                self.counts.remove(key);
                0
            }
            None => {
                trace!(target: "frontend::highlight", "dec on an unmarked key ignored");
                0
            }
        }
    }

    pub fn has(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }

    pub fn count(&self, key: &K) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Every member exactly once, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &K> {
        self.counts.keys()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

impl<K: fmt::Debug> fmt::Debug for RefCountSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.counts.iter()).finish()
    }
}
