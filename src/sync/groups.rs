use std::collections::HashMap;
use std::hash::Hash;

use smallvec::{SmallVec, smallvec};

/// Disjoint sets of mutually-synchronized instances.
///
/// Union-find with path compression and union by size; each root additionally
/// keeps its member list (folded smaller-into-larger on union) so propagation
/// can enumerate a set in time proportional to the set, not the structure.
///
/// The collection of sets is always a true partition: no instance is ever in
/// two sets, [`SyncGroups::sync`] merges sets and never splits them, and
/// removal prunes a member from exactly one set. Emptied sets simply stop
/// being reachable.
#[derive(Debug)]
pub(crate) struct SyncGroups<K> {
    slots: HashMap<K, usize>,
    parent: Vec<usize>,
    size: Vec<usize>,
    members: Vec<Vec<K>>,
}

impl<K: Copy + Eq + Hash> SyncGroups<K> {
    pub(crate) fn new() -> Self {
        Self {
            slots: HashMap::new(),
            parent: Vec::new(),
            size: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Merge the sets containing each of `items` (registering unknown items
    /// as fresh singletons) into one set. Sets disjoint from the call are
    /// untouched.
    pub(crate) fn sync(&mut self, items: &[K]) {
        let Some((&first, rest)) = items.split_first() else {
            return;
        };
        let s = self.slot(first);
        let mut root = self.find(s);
        for &k in rest {
            let s = self.slot(k);
            let other = self.find(s);
            if other == root {
                continue;
            }
            let (big, small) = if self.size[root] >= self.size[other] {
                (root, other)
            } else {
                (other, root)
            };
            self.parent[small] = big;
            self.size[big] += self.size[small];
            let moved = std::mem::take(&mut self.members[small]);
            self.members[big].extend(moved);
            root = big;
        }
    }

    /// Every member of `k`'s set, including `k` itself.
    ///
    /// An instance that was never synced degrades to the singleton `[k]`.
    pub(crate) fn members(&mut self, k: K) -> SmallVec<[K; 8]> {
        match self.slots.get(&k).copied() {
            Some(s) => {
                let root = self.find(s);
                SmallVec::from_slice(&self.members[root])
            }
            None => smallvec![k],
        }
    }

    /// Prune a disposed instance from its set. Unknown keys are a no-op.
    pub(crate) fn remove(&mut self, k: K) {
        let Some(s) = self.slots.remove(&k) else {
            return;
        };
        let root = self.find(s);
        self.members[root].retain(|m| *m != k);
    }

    fn slot(&mut self, k: K) -> usize {
        if let Some(&s) = self.slots.get(&k) {
            return s;
        }
        let s = self.parent.len();
        self.parent.push(s);
        self.size.push(1);
        self.members.push(vec![k]);
        self.slots.insert(k, s);
        s
    }

    fn find(&mut self, mut s: usize) -> usize {
        while self.parent[s] != s {
            let grandparent = self.parent[self.parent[s]];
            self.parent[s] = grandparent;
            s = grandparent;
        }
        s
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/groups.rs"]
mod tests;
