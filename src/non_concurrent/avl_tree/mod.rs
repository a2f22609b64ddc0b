use std::cmp::Ordering;
use std::fmt;

use log::debug;

mod error;
mod iter;
mod keys;
mod node;

pub use error::{EmptyCollection, ParseKeysError};
pub use iter::Iter;

use node::Link;

/// An ordered set of keys kept in a height-balanced binary search tree.
///
/// After every mutation the heights of the two subtrees of any node differ
/// by at most one, so lookups, insertions and removals are all O(log(n)).
///
/// Not synchronized: shared use across threads needs an outside lock.
#[derive(Clone)]
pub struct AvlTree<K> {
    root: Link<K>,
}

impl<K> AvlTree<K> {
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Complexity: O(1)
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of keys in the tree.
    ///
    /// Complexity: O(n), nodes are counted every time
    pub fn size(&self) -> usize {
        node::size(&self.root)
    }

    /// Height of the tree, 0 when empty. Complexity: O(1)
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Checks that no node has subtrees whose heights differ by more than one.
    ///
    /// This walks the whole tree and recomputes every height instead of
    /// trusting the stored ones. Complexity: O(n)
    pub fn is_balanced(&self) -> bool {
        node::balanced_height(&self.root).is_some()
    }

    /// Complexity: O(log(n))
    pub fn find_min(&self) -> Result<&K, EmptyCollection> {
        let mut node = self.root.as_deref().ok_or(EmptyCollection)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(&node.key)
    }

    /// Complexity: O(log(n))
    pub fn find_max(&self) -> Result<&K, EmptyCollection> {
        let mut node = self.root.as_deref().ok_or(EmptyCollection)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.key)
    }

    /// Iterates over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.root)
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.root = None;
    }
}

impl<K: Ord> AvlTree<K> {
    /// Inserts `key`, returning `false` (and leaving the tree alone) if it was already present.
    ///
    /// Complexity: O(log(n))
    pub fn insert(&mut self, key: K) -> bool {
        let (root, step) = node::insert(self.root.take(), key);
        self.root = Some(root);

        let inserted = step.is_some();
        if inserted {
            debug!("inserted key, height now {}", self.height());
        }
        inserted
    }

    /// Removes `key`, returning `false` (and leaving the tree alone) if it wasn't present.
    ///
    /// Complexity: O(log(n))
    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Removes `key` and hands it back, if it was present.
    pub fn take(&mut self, key: &K) -> Option<K> {
        let (root, removed) = node::remove(self.root.take(), key);
        self.root = root;

        if removed.is_some() {
            debug!("removed key, height now {}", self.height());
        }
        removed
    }

    /// Swaps `old` for `new`: removes `old` if present, then inserts `new`.
    ///
    /// Returns whether `old` was present. `new` is inserted either way.
    pub fn replace(&mut self, old: &K, new: K) -> bool {
        let had_old = self.remove(old);
        self.insert(new);
        had_old
    }

    /// Looks up the stored key equal to `key`. Complexity: O(log(n))
    pub fn search(&self, key: &K) -> Option<&K> {
        let mut link = &self.root;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &node.left,
                Ordering::Greater => &node.right,
                Ordering::Equal => return Some(&node.key),
            };
        }
        None
    }

    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<K: Ord> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
