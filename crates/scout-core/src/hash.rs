//! Fast hash map and hash set type aliases.
//!
//! Type aliases for [`FxHashMap`] and [`FxHashSet`] from the `rustc-hash`
//! crate. The Fx hash algorithm is roughly 2x faster than the standard
//! library's default hasher for the short string keys this workspace uses
//! (application names), at the cost of denial-of-service resistance, which
//! is irrelevant for internal lookups.
//!
//! # Examples
//!
//! ```
//! use scout_core::{fx_hash_map, FxHashMap};
//!
//! let mut map: FxHashMap<String, usize> = fx_hash_map();
//! map.insert("ghostty".to_owned(), 0);
//! ```

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// The hasher used by [`FxHashMap`] and [`FxHashSet`].
pub type FxBuildHasher = rustc_hash::FxBuildHasher;

/// Creates a new empty [`FxHashMap`].
///
/// Equivalent to `FxHashMap::default()` but can be more ergonomic in some
/// contexts due to type inference.
#[inline]
#[must_use]
pub fn fx_hash_map<K, V>() -> FxHashMap<K, V> {
    FxHashMap::default()
}

/// Creates a new empty [`FxHashSet`].
#[inline]
#[must_use]
pub fn fx_hash_set<V>() -> FxHashSet<V> {
    FxHashSet::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fx_hash_map() {
        let mut map: FxHashMap<&str, i32> = fx_hash_map();
        assert!(map.is_empty());
        map.insert("key", 42);
        assert_eq!(map.get("key"), Some(&42));
    }

    #[test]
    fn test_fx_hash_set() {
        let mut set: FxHashSet<&str> = fx_hash_set();
        assert!(set.insert("alacritty"));
        assert!(!set.insert("alacritty"));
    }
}
