//! Collection type aliases for treesift.
//!
//! Use these instead of `std::collections::HashMap`/`HashSet` so every crate
//! hashes the same way. Lookups here are by code strings and stop words,
//! short keys where FxHash does well.
//!
//! # Example
//!
//! ```rust
//! use treesift_common::collections::{SiftMap, SiftSet, sift_map_with_capacity, sift_set};
//!
//! let mut by_code: SiftMap<String, usize> = sift_map_with_capacity(16);
//! by_code.insert("01.11".to_string(), 3);
//!
//! let mut stop_words: SiftSet<&str> = sift_set();
//! stop_words.insert("and");
//! ```

use rustc_hash::FxBuildHasher;

/// HashMap with FxHash (fast, non-cryptographic).
pub type SiftMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// HashSet with FxHash.
pub type SiftSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Create a new [`SiftMap`] sized for `capacity` entries.
#[inline]
#[must_use]
pub fn sift_map_with_capacity<K, V>(capacity: usize) -> SiftMap<K, V> {
    SiftMap::with_capacity_and_hasher(capacity, FxBuildHasher)
}

/// Create a new empty [`SiftSet`].
#[inline]
#[must_use]
pub fn sift_set<T>() -> SiftSet<T> {
    SiftSet::with_hasher(FxBuildHasher)
}
