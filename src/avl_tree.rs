use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{self, RawAvlTree};

/// A self-balancing binary search tree (AVL tree) storing one value per key.
///
/// Keys must implement [`Ord`]. After every insertion each node's subtrees differ in
/// height by at most one, which keeps [`insert`](AvlTree::insert) and
/// [`find`](AvlTree::find) at O(log n).
///
/// Nodes live in an arena owned by the tree and are linked by handle. Rotations only
/// re-link nodes; a node's key and value stay where they were allocated. Dropping the
/// tree releases every node exactly once. There is no removal of single entries; use
/// [`clear`](AvlTree::clear) to release everything.
///
/// Moving a tree transfers all of its nodes. [`core::mem::take`] leaves an empty tree
/// behind. [`Clone`] makes a deep copy.
///
/// # Examples
///
/// ```
/// use avl_collections::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for key in [50, 30, 70, 20, 40, 60, 80] {
///     tree.insert(key, key * 10);
/// }
///
/// assert_eq!(tree.find(&40), Some(&400));
/// assert_eq!(tree.find(&45), None);
///
/// let mut keys = Vec::new();
/// tree.traverse_in_order(|key, _| keys.push(*key));
/// assert_eq!(keys, [20, 30, 40, 50, 60, 70, 80]);
/// ```
pub struct AvlTree<K, V> {
    raw: RawAvlTree<K, V>,
}

/// An in-order iterator over the entries of an [`AvlTree`].
///
/// This `struct` is created by [`AvlTree::iter`] and [`AvlMap::iter`](crate::AvlMap::iter).
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    inner: raw::Iter<'a, K, V>,
}

impl<K, V> AvlTree<K, V> {
    /// Makes a new, empty `AvlTree`. Does not allocate.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> Self {
        AvlTree { raw: RawAvlTree::new() }
    }

    /// Creates an empty tree with room for at least `capacity` entries before its
    /// node arena reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::AvlTree;
    ///
    /// let tree: AvlTree<u32, ()> = AvlTree::with_capacity(16);
    /// assert!(tree.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlTree {
            raw: RawAvlTree::with_capacity(capacity),
        }
    }

    /// Number of entries the node arena can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the number of entries in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Height of the tree: 0 when empty, 1 for a single entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// for key in 0..1000 {
    ///     tree.insert(key, ());
    /// }
    /// assert_eq!(tree.height(), 10);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Key currently at the root, if any. Rotations during insertion change it.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(50, ());
    /// tree.insert(30, ());
    /// assert_eq!(tree.root_key(), Some(&50));
    ///
    /// tree.insert(20, ());
    /// assert_eq!(tree.root_key(), Some(&30));
    /// ```
    #[must_use]
    pub fn root_key(&self) -> Option<&K> {
        self.raw.root().map(|root| self.raw.node(root).key())
    }

    /// Releases every entry.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Gets an iterator over the entries of the tree, sorted by key.
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; O(1) amortized per step.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { inner: self.raw.iter() }
    }

    /// Calls `visit` once per entry in strictly ascending key order.
    ///
    /// Every call walks the whole tree.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn traverse_in_order<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in self.raw.iter() {
            visit(key, value);
        }
    }
}

impl<K: Ord, V> AvlTree<K, V> {
    /// Inserts a key-value pair into the tree.
    ///
    /// If the key was absent a new node is linked in and the tree is rebalanced on the
    /// way back up to the root; `None` is returned. If the key was present its value is
    /// overwritten in place, the shape of the tree does not change, and the previous
    /// value is returned.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.insert(37, "a"), None);
    /// assert_eq!(tree.insert(37, "b"), Some("a"));
    /// assert_eq!(tree.find(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Returns the value under `key`, inserting `default()` first if the key is absent.
    ///
    /// The value of a freshly inserted key is returned even though the insertion may
    /// have rotated the tree.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// *tree.get_or_insert_with("hits", || 0) += 1;
    /// *tree.get_or_insert_with("hits", || 0) += 1;
    /// assert_eq!(tree.find("hits"), Some(&2));
    /// ```
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        self.raw.get_or_insert_with(key, default)
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// The key may be any borrowed form of the tree's key type, but the ordering on the
    /// borrowed form *must* match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns the stored key and its value.
    pub fn find_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key)
    }

    /// Returns `true` if the tree holds `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains_key(key)
    }
}

impl<K: Clone, V: Clone> Clone for AvlTree<K, V> {
    fn clone(&self) -> Self {
        AvlTree { raw: self.raw.clone() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        AvlTree::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTree<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlTree<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a AvlTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
