use std::hash::Hash;

use fnv::{FnvBuildHasher, FnvHashMap};
#[cfg(test)]
use fnv::FnvHashSet;

/// Hash map with room for `capacity` entries. FNV hashing is much faster than the default
/// on short keys such as coordinates and quantized positions, but not collision resistant.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    FnvHashMap::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
}

#[cfg(test)]
pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    FnvHashSet::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
}
