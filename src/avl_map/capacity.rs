use super::AvlMap;
use crate::AvlTree;

impl<K, V> AvlMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::AvlMap;
    ///
    /// let map: AvlMap<i32, i32> = AvlMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlMap {
            tree: AvlTree::with_capacity(capacity),
        }
    }

    /// Returns how many entries the map can hold before its node storage reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::AvlMap;
    ///
    /// let map: AvlMap<i32, i32> = AvlMap::with_capacity(32);
    /// assert!(map.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }
}
