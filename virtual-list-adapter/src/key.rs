#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

#[cfg(feature = "std")]
pub(crate) type PoolMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type PoolMap<K, V> = BTreeMap<K, V>;

#[cfg(feature = "std")]
pub(crate) type KeySet<'a, K> = HashSet<&'a K>;
#[cfg(not(feature = "std"))]
pub(crate) type KeySet<'a, K> = BTreeSet<&'a K>;

/// Identity of a pooled item.
///
/// Keys must stay stable across item updates: a key that changes its value while realized is
/// destroyed and recreated.
#[cfg(feature = "std")]
pub trait PoolKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> PoolKey for K {}

#[cfg(not(feature = "std"))]
pub trait PoolKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> PoolKey for K {}
