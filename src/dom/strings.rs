//! String Interning Pool
//!
//! Deduplicated storage for unknown tag names, attribute names, attribute
//! values and decoded text payloads. Everything is copied into one buffer
//! so the document owns its strings and carries no lifetime.
//!
//! Uses hash-based lookup to avoid storing duplicate string data.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Interned string handle. Id 0 is always the empty string.
pub type StringId = u32;

/// String interning pool
///
/// Memory layout:
/// - `entries`: (offset, len) into `data` for each string id
/// - `data`: one buffer holding every distinct string
/// - `hash_index`: hash -> ids with that hash (handles rare collisions)
#[derive(Debug)]
pub struct StringPool {
    entries: Vec<(u32, u32)>,
    data: String,
    hash_index: HashMap<u64, Vec<StringId>>,
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

impl StringPool {
    /// Create a new pool; entry 0 is reserved for ""
    pub fn new() -> Self {
        let mut pool = StringPool {
            entries: Vec::with_capacity(256),
            data: String::with_capacity(4096),
            hash_index: HashMap::new(),
        };
        pool.entries.push((0, 0));
        pool
    }

    #[inline]
    fn compute_hash(s: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        hasher.finish()
    }

    /// Intern a string, returning the id of an existing copy when present
    pub fn intern(&mut self, s: &str) -> StringId {
        if s.is_empty() {
            return 0;
        }

        let hash = Self::compute_hash(s);
        if let Some(ids) = self.hash_index.get(&hash) {
            if let Some(&id) = ids.iter().find(|&&id| self.get(id) == s) {
                return id;
            }
        }

        let offset = self.data.len() as u32;
        self.data.push_str(s);
        let id = self.entries.len() as StringId;
        self.entries.push((offset, s.len() as u32));
        self.hash_index.entry(hash).or_default().push(id);
        id
    }

    /// Resolve an id. Unknown ids resolve to "".
    #[inline]
    pub fn get(&self, id: StringId) -> &str {
        match self.entries.get(id as usize) {
            Some(&(offset, len)) => {
                let start = offset as usize;
                &self.data[start..start + len as usize]
            }
            None => "",
        }
    }

    /// Number of distinct strings, including the reserved empty string
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }

    /// Bytes used for string storage
    pub fn bytes_used(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern() {
        let mut pool = StringPool::new();
        let id = pool.intern("hello");
        assert!(id > 0);
        assert_eq!(pool.get(id), "hello");
    }

    #[test]
    fn test_intern_duplicate() {
        let mut pool = StringPool::new();
        let id1 = pool.intern("hello");
        let id2 = pool.intern("hello");
        assert_eq!(id1, id2);
        assert_eq!(pool.bytes_used(), 5);
    }

    #[test]
    fn test_intern_different() {
        let mut pool = StringPool::new();
        let id1 = pool.intern("hello");
        let id2 = pool.intern("world");
        assert_ne!(id1, id2);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_empty_string() {
        let mut pool = StringPool::new();
        assert!(pool.is_empty());
        assert_eq!(pool.intern(""), 0);
        assert_eq!(pool.get(0), "");
    }

    #[test]
    fn test_unicode() {
        let mut pool = StringPool::new();
        let id = pool.intern("caf\u{e9} \u{2014}");
        assert_eq!(pool.get(id), "caf\u{e9} \u{2014}");
    }
}
