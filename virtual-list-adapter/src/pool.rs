use alloc::vec::Vec;

use coho_virtual_list::HeightTable;

use crate::key::{KeySet, PoolMap};
use crate::{PoolKey, RenderBoundary, RenderError};

/// One item that should be realized after a sync.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncTarget<K> {
    pub key: K,
    pub index: usize,
    pub top: u64,
}

/// What one [`ItemPool::sync`] did to the render surface.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub created: usize,
    pub repositioned: usize,
    pub destroyed: usize,
    pub failed: usize,
    /// The last creation failure of this sync, if any.
    pub last_error: Option<RenderError>,
}

impl SyncStats {
    /// `true` when the sync touched no node.
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.repositioned == 0 && self.destroyed == 0
    }
}

/// A realized item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolEntry<N> {
    pub node: N,
    pub index: usize,
    pub top: u64,
}

/// Realized nodes by key.
///
/// Keys absent from a sync's targets are destroyed, keys already present are only repositioned,
/// and only missing keys are created. Nodes are never re-rendered in place.
#[derive(Clone, Debug)]
pub struct ItemPool<K, N> {
    entries: PoolMap<K, PoolEntry<N>>,
}

impl<K: PoolKey, N> Default for ItemPool<K, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PoolKey, N> ItemPool<K, N> {
    pub fn new() -> Self {
        Self {
            entries: PoolMap::default(),
        }
    }

    /// Reconciles the pool with `targets`.
    ///
    /// Removals run before creations so a surface never holds more than the old and the new
    /// window combined. `content` is only called for keys that need a new node.
    pub fn sync<B>(
        &mut self,
        boundary: &mut B,
        targets: &[SyncTarget<K>],
        mut content: impl FnMut(usize) -> B::Content,
    ) -> SyncStats
    where
        B: RenderBoundary<K, Node = N>,
    {
        let mut stats = SyncStats::default();

        let stale: Vec<K> = {
            let wanted: KeySet<'_, K> = targets.iter().map(|t| &t.key).collect();
            self.entries
                .keys()
                .filter(|k| !wanted.contains(k))
                .cloned()
                .collect()
        };
        for key in stale {
            if self.remove(boundary, &key) {
                stats.destroyed += 1;
            }
        }

        for target in targets {
            if let Some(entry) = self.entries.get_mut(&target.key) {
                if entry.index != target.index || entry.top != target.top {
                    entry.index = target.index;
                    entry.top = target.top;
                    boundary.place(&mut entry.node, target.index, target.top);
                    stats.repositioned += 1;
                }
                continue;
            }

            match boundary.create(&target.key, content(target.index)) {
                Ok(mut node) => {
                    boundary.place(&mut node, target.index, target.top);
                    boundary.observe(&target.key, &node);
                    self.entries.insert(
                        target.key.clone(),
                        PoolEntry {
                            node,
                            index: target.index,
                            top: target.top,
                        },
                    );
                    stats.created += 1;
                }
                Err(error) => {
                    vwarn!(index = target.index, %error, "ItemPool::sync: create failed");
                    stats.failed += 1;
                    stats.last_error = Some(error);
                }
            }
        }

        vtrace!(
            created = stats.created,
            repositioned = stats.repositioned,
            destroyed = stats.destroyed,
            failed = stats.failed,
            "ItemPool::sync"
        );
        stats
    }

    /// Destroys entries whose index is `>= len`. Returns how many were removed.
    pub fn remove_from<B>(&mut self, boundary: &mut B, len: usize) -> usize
    where
        B: RenderBoundary<K, Node = N>,
    {
        let removed: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.index >= len)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &removed {
            self.remove(boundary, key);
        }
        removed.len()
    }

    /// Re-places every entry whose top moved in `table`. Returns how many nodes were touched.
    pub fn reposition_all<B>(&mut self, boundary: &mut B, table: &HeightTable) -> usize
    where
        B: RenderBoundary<K, Node = N>,
    {
        let mut moved = 0;
        for entry in self.entries.values_mut() {
            let Some(top) = table.offset(entry.index) else {
                continue;
            };
            if top != entry.top {
                entry.top = top;
                boundary.place(&mut entry.node, entry.index, top);
                moved += 1;
            }
        }
        moved
    }

    /// Destroys every entry.
    pub fn clear<B>(&mut self, boundary: &mut B)
    where
        B: RenderBoundary<K, Node = N>,
    {
        let keys: Vec<K> = self.entries.keys().cloned().collect();
        for key in &keys {
            self.remove(boundary, key);
        }
    }

    fn remove<B>(&mut self, boundary: &mut B, key: &K) -> bool
    where
        B: RenderBoundary<K, Node = N>,
    {
        let Some(entry) = self.entries.remove(key) else {
            return false;
        };
        boundary.unobserve(key, &entry.node);
        boundary.destroy(key, entry.node);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Index the key's node was last placed at.
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.entries.get(key).map(|entry| entry.index)
    }

    pub fn node(&self, key: &K) -> Option<&N> {
        self.entries.get(key).map(|entry| &entry.node)
    }

    pub fn entry(&self, key: &K) -> Option<&PoolEntry<N>> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &PoolEntry<N>)> {
        self.entries.iter()
    }
}
