use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;

use crate::avl_tree::{AvlTree, Iter};

mod capacity;

/// An ordered map backed by an [`AvlTree`].
///
/// Every entry the map exposes is stored in exactly one node of the wrapped tree; the
/// map adds no state of its own. Entries are enumerated in ascending key order.
///
/// Reading a missing key is side-effect free through [`get`](AvlMap::get),
/// [`contains`](AvlMap::contains) and indexing (which panics). Only
/// [`get_or_default`](AvlMap::get_or_default) inserts on a miss.
///
/// # Examples
///
/// ```
/// use avl_collections::AvlMap;
///
/// let mut scores = AvlMap::new();
/// *scores.get_or_default("Math") = 90;
/// *scores.get_or_default("Science") = 85;
/// *scores.get_or_default("History") = 88;
/// *scores.get_or_default("Science") = 95;
///
/// let mut lines = Vec::new();
/// scores.for_each_in_order(|subject, score| lines.push(format!("{subject} : {score}")));
/// assert_eq!(lines, ["History : 88", "Math : 90", "Science : 95"]);
///
/// // A missing key reads as the default and is stored from then on.
/// assert_eq!(*scores.get_or_default("Art"), 0);
/// assert!(scores.contains("Art"));
/// ```
pub struct AvlMap<K, V> {
    tree: AvlTree<K, V>,
}

impl<K, V> AvlMap<K, V> {
    /// Makes a new, empty `AvlMap`. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        AvlMap { tree: AvlTree::new() }
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    /// Calls `visit` once per entry in ascending key order.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn for_each_in_order<F>(&self, visit: F)
    where
        F: FnMut(&K, &V),
    {
        self.tree.traverse_in_order(visit);
    }

    /// Borrows the tree behind the map.
    #[must_use]
    pub fn as_tree(&self) -> &AvlTree<K, V> {
        &self.tree
    }

    /// Unwraps the map into its tree.
    #[must_use]
    pub fn into_tree(self) -> AvlTree<K, V> {
        self.tree
    }
}

impl<K: Ord, V> AvlMap<K, V> {
    /// Returns a mutable reference to the value under `key`, first inserting
    /// `V::default()` if the key is absent.
    ///
    /// Calling it again for the same key, with no insertion of that key in between,
    /// reaches the same stored value.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::AvlMap;
    ///
    /// let mut inventory: AvlMap<&str, u32> = AvlMap::new();
    /// assert_eq!(*inventory.get_or_default("Apple"), 0);
    /// assert!(inventory.contains("Apple"));
    ///
    /// *inventory.get_or_default("Apple") += 3;
    /// assert_eq!(inventory.get("Apple"), Some(&3));
    /// ```
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.tree.get_or_insert_with(key, V::default)
    }

    /// Returns `true` if the map holds `key`. Never inserts.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.contains_key(key)
    }

    /// Inserts or overwrites the value under `key`, returning the previous value.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.tree.insert(key, value)
    }

    /// Returns a reference to the value under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.find(key)
    }

    /// Returns a mutable reference to the value under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.find_mut(key)
    }
}

impl<K: Clone, V: Clone> Clone for AvlMap<K, V> {
    fn clone(&self) -> Self {
        AvlMap { tree: self.tree.clone() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for AvlMap<K, V> {
    fn default() -> Self {
        AvlMap::new()
    }
}

impl<K, V> From<AvlTree<K, V>> for AvlMap<K, V> {
    fn from(tree: AvlTree<K, V>) -> Self {
        AvlMap { tree }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        AvlMap {
            tree: iter.into_iter().collect(),
        }
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.tree.extend(iter);
    }
}

impl<'a, K, V> IntoIterator for &'a AvlMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// Read-only lookup. Unlike [`AvlMap::get_or_default`] this never inserts.
///
/// # Panics
///
/// Panics if the key is not present in the map.
impl<K, Q, V> Index<&Q> for AvlMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for AvlMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}
