//! Caller-owned memoization keyed by content hash.
//!
//! Nothing in the library caches behind the caller's back. Callers that load
//! the same assets repeatedly (a long-running preview server, say) hold a
//! [`Cache`] and pass it in, and decide themselves when to invalidate.

use std::collections::HashMap;
use std::fmt;

/// SHA-1 digest identifying a cached value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey([u8; 20]);

impl CacheKey {
    /// Hash a sequence of byte strings.
    ///
    /// Each part is length-prefixed, so `["ab", "c"]` and `["a", "bc"]` give
    /// different keys.
    pub fn from_parts<I, P>(parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let mut hasher = sha1_smol::Sha1::new();
        for part in parts {
            let part = part.as_ref();
            hasher.update(&(part.len() as u64).to_le_bytes());
            hasher.update(part);
        }
        CacheKey(hasher.digest().bytes())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// A map from [`CacheKey`] to values, with explicit invalidation.
#[derive(Debug)]
pub struct Cache<V> {
    entries: HashMap<CacheKey, V>,
}

impl<V> Default for Cache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V> Cache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: CacheKey, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// Errors from `f` are returned and nothing is stored.
    pub fn get_or_try_insert_with<E, F>(&mut self, key: CacheKey, f: F) -> Result<&V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        use std::collections::hash_map::Entry;

        match self.entries.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(f()?)),
        }
    }

    /// Drop one entry, returning it if present.
    pub fn invalidate(&mut self, key: &CacheKey) -> Option<V> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
