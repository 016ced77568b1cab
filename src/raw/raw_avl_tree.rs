use core::borrow::Borrow;
use core::cmp::Ordering;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};

/// Inline capacity of the insertion path and iterator stacks.
///
/// An AVL tree of height 64 holds more nodes than a `u32` handle can address, so
/// these stacks never spill to the heap.
pub(crate) const STACK_INLINE: usize = 64;

/// The core AVL implementation backing `AvlTree` and `AvlMap`.
#[derive(Clone)]
pub(crate) struct RawAvlTree<K, V> {
    /// Arena storing all tree nodes. Nodes are never freed individually, so the
    /// arena length is also the number of entries.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

/// Path element recorded while descending for an insertion.
struct PathElement {
    /// Handle to the ancestor.
    node: Handle,
    /// Which child of the ancestor the descent continued into.
    side: Side,
}

type Path = SmallVec<[PathElement; STACK_INLINE]>;

/// Outcome of descending towards a key.
#[allow(clippy::large_enum_variant)]
enum Descent {
    /// The key is stored in this node.
    Found(Handle),
    /// The key is absent; the path ends at the empty link where it belongs.
    Vacant(Path),
}

/// Shape of the imbalance a rebalancing step repaired.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Rotation {
    LeftLeft,
    RightRight,
    LeftRight,
    RightLeft,
}

impl<K, V> RawAvlTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Releases every node.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    /// Height of the whole tree; 0 when empty.
    pub(crate) fn height(&self) -> usize {
        usize::from(self.height_of(self.root))
    }

    /// Iterates entries in ascending key order.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    #[inline]
    fn height_of(&self, handle: Option<Handle>) -> u8 {
        handle.map_or(0, |h| self.nodes.get(h).height())
    }

    fn update_height(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let height = 1 + self.height_of(node.left()).max(self.height_of(node.right()));
        self.nodes.get_mut(handle).set_height(height);
    }

    fn balance_factor(&self, handle: Handle) -> i16 {
        let node = self.nodes.get(handle);
        i16::from(self.height_of(node.left())) - i16::from(self.height_of(node.right()))
    }

    /// Lifts the left child of `y` above it and returns the new subtree root.
    ///
    /// ```text
    ///       y            x
    ///      / \          / \
    ///     x   c   =>   a   y
    ///    / \              / \
    ///   a   b            b   c
    /// ```
    fn rotate_right(&mut self, y: Handle) -> Handle {
        let x = self.nodes.get(y).left().expect("`RawAvlTree::rotate_right()` - node has no left child!");
        let b = self.nodes.get(x).right();

        self.nodes.get_mut(x).set_right(Some(y));
        self.nodes.get_mut(y).set_left(b);

        // `y` is now below `x`, so it must be refreshed first.
        self.update_height(y);
        self.update_height(x);
        x
    }

    /// Mirror image of [`Self::rotate_right`].
    fn rotate_left(&mut self, x: Handle) -> Handle {
        let y = self.nodes.get(x).right().expect("`RawAvlTree::rotate_left()` - node has no right child!");
        let b = self.nodes.get(y).left();

        self.nodes.get_mut(y).set_left(Some(x));
        self.nodes.get_mut(x).set_right(b);

        self.update_height(x);
        self.update_height(y);
        y
    }
}

impl<K: Ord, V> RawAvlTree<K, V> {
    /// Searches for a key and returns the handle of its node.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.key().borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(handle),
            };
        }

        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.nodes.get(handle).value())
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.nodes.get_mut(handle).value_mut())
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = self.nodes.get(self.search(key)?);
        Some((node.key(), node.value()))
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    /// Inserts a key-value pair.
    ///
    /// An existing key has its value replaced in place (the old value is returned)
    /// and the shape of the tree is left alone. A new key becomes a leaf, and every
    /// ancestor on the way back to the root gets its height refreshed and, if it
    /// went out of balance, a rotation.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.descend(&key) {
            Descent::Found(handle) => Some(self.nodes.get_mut(handle).replace_value(value)),
            Descent::Vacant(path) => {
                self.attach(&path, key, value);
                None
            }
        }
    }

    /// Returns the value under `key`, inserting `default()` first if it is absent.
    ///
    /// The new node's handle survives the rebalancing rotations, so the freshly
    /// inserted value is reached without a second search.
    pub(crate) fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let handle = match self.descend(&key) {
            Descent::Found(handle) => handle,
            Descent::Vacant(path) => self.attach(&path, key, default()),
        };
        self.nodes.get_mut(handle).value_mut()
    }

    /// Finds the node holding `key`, or the path to the empty link where it belongs.
    fn descend(&self, key: &K) -> Descent {
        let mut path: Path = SmallVec::new();
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let side = match key.cmp(node.key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Descent::Found(handle),
            };
            path.push(PathElement { node: handle, side });
            current = node.child(side);
        }

        Descent::Vacant(path)
    }

    /// Links a new leaf at the end of `path` and rebalances back up to the root.
    fn attach(&mut self, path: &Path, key: K, value: V) -> Handle {
        let leaf = self.nodes.alloc(Node::leaf(key, value));
        self.link(path, path.len(), leaf);
        self.rebalance_path(path, leaf);
        leaf
    }

    /// Hangs `subtree` where the path step at `depth` was: under the ancestor at
    /// `depth - 1`, or at the root when `depth` is 0.
    fn link(&mut self, path: &Path, depth: usize, subtree: Handle) {
        match depth.checked_sub(1) {
            Some(parent_depth) => {
                let parent = &path[parent_depth];
                self.nodes.get_mut(parent.node).set_child(parent.side, Some(subtree));
            }
            None => self.root = Some(subtree),
        }
    }

    /// Walks the insertion path bottom-up, rebalancing every ancestor.
    fn rebalance_path(&mut self, path: &Path, inserted: Handle) {
        for depth in (0..path.len()).rev() {
            let node = path[depth].node;
            let subtree = self.rebalance(node, inserted);
            if subtree != node {
                self.link(path, depth, subtree);
            }
        }
    }

    /// Refreshes the height of `handle` and repairs an imbalance there.
    ///
    /// The rotation is chosen by where the inserted key falls relative to the
    /// heavy child, which pins down the shape of the imbalance. Returns the root
    /// of the (possibly rotated) subtree.
    fn rebalance(&mut self, handle: Handle, inserted: Handle) -> Handle {
        self.update_height(handle);
        let balance = self.balance_factor(handle);

        let (rotation, root) = if balance > 1 {
            let left = self.nodes.get(handle).left().expect("`RawAvlTree::rebalance()` - left-heavy node has no left child!");
            match self.compare(inserted, left) {
                Ordering::Less => (Rotation::LeftLeft, self.rotate_right(handle)),
                Ordering::Greater => {
                    let left = self.rotate_left(left);
                    self.nodes.get_mut(handle).set_left(Some(left));
                    (Rotation::LeftRight, self.rotate_right(handle))
                }
                Ordering::Equal => return handle,
            }
        } else if balance < -1 {
            let right = self.nodes.get(handle).right().expect("`RawAvlTree::rebalance()` - right-heavy node has no right child!");
            match self.compare(inserted, right) {
                Ordering::Greater => (Rotation::RightRight, self.rotate_left(handle)),
                Ordering::Less => {
                    let right = self.rotate_right(right);
                    self.nodes.get_mut(handle).set_right(Some(right));
                    (Rotation::RightLeft, self.rotate_left(handle))
                }
                Ordering::Equal => return handle,
            }
        } else {
            return handle;
        };

        tracing::trace!(target: "avl_collections::tree", ?rotation, balance, "rotated unbalanced subtree");
        root
    }

    fn compare(&self, a: Handle, b: Handle) -> Ordering {
        self.nodes.get(a).key().cmp(self.nodes.get(b).key())
    }
}

/// In-order iterator over a [`RawAvlTree`].
///
/// Keeps the pending left spine on an explicit stack, so memory use is bounded by
/// the tree height.
pub(crate) struct Iter<'a, K, V> {
    tree: &'a RawAvlTree<K, V>,
    stack: SmallVec<[Handle; STACK_INLINE]>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(tree: &'a RawAvlTree<K, V>) -> Self {
        let mut iter = Self {
            tree,
            stack: SmallVec::new(),
            remaining: tree.len(),
        };
        iter.descend_left(tree.root);
        iter
    }

    fn descend_left(&mut self, mut current: Option<Handle>) {
        while let Some(handle) = current {
            self.stack.push(handle);
            current = self.tree.node(handle).left();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        let tree = self.tree;
        let node = tree.node(handle);
        self.descend_left(node.right());
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}
