use alloc::boxed::Box;
use core::fmt;
use core::mem::MaybeUninit;
use core::ops::{Index, IndexMut};
use core::ptr;
use core::slice;

use crate::OutOfRange;
use crate::algorithm::RandomAccess;

mod cursor;

pub use cursor::Cursor;

/// Capacity of the first block allocated by an empty sequence.
const MIN_NON_ZERO_CAPACITY: usize = 2;

/// An owning, growable, contiguous sequence with explicit capacity management.
///
/// The sequence owns exactly one heap block of `capacity()` slots. The first `len()`
/// slots hold live elements; the rest are allocated but uninitialised. When
/// [`push`](Sequence::push) finds the block full it allocates a new block of
/// `max(2, 2 * capacity)` slots, moves the elements across in order, and frees the old
/// block. That doubling is what makes `push` amortized O(1).
///
/// # Copy and move
///
/// [`Clone`] duplicates every element into a fresh block with the source's capacity;
/// the two sequences share nothing afterwards. A Rust move transfers the block, and
/// [`take`](Sequence::take) (or [`core::mem::take`]) moves the block out while leaving
/// the source empty, with capacity 0 and no allocation.
///
/// # Invalidation
///
/// A reallocating `push` replaces the block, so every [`Cursor`] taken before it is
/// invalidated. References are kept safe by the borrow checker; cursors are plain
/// offsets and are only checked in debug builds.
///
/// # Examples
///
/// ```
/// use avl_collections::Sequence;
///
/// let mut original = Sequence::new();
/// original.push(10);
/// original.push(20);
///
/// let mut copy = original.clone();
/// copy[0] = 99;
/// assert_eq!(original[0], 10);
/// assert_eq!(copy[0], 99);
///
/// let moved = original.take();
/// assert_eq!(moved.len(), 2);
/// assert_eq!(original.len(), 0);
/// assert_eq!(original.capacity(), 0);
///
/// assert!(moved.at(2).is_err());
/// ```
pub struct Sequence<T> {
    block: Box<[MaybeUninit<T>]>,
    len: usize,
    // Bumped on every reallocation; never 0 so untracked cursors stay distinguishable.
    generation: u32,
}

impl<T> Sequence<T> {
    /// Makes a new, empty `Sequence`. Does not allocate.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty sequence whose block has exactly `capacity` slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::Sequence;
    ///
    /// let mut values = Sequence::with_capacity(3);
    /// values.push('a');
    /// assert_eq!(values.capacity(), 3);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            block: Box::new_uninit_slice(capacity),
            len: 0,
            generation: 1,
        }
    }

    /// Number of elements in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the sequence holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the owned block.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.block.len()
    }

    /// Appends `value`, growing the block first if it is full.
    ///
    /// Pass `value.clone()` to append a copy.
    ///
    /// # Complexity
    ///
    /// Amortized O(1); O(n) on the push that reallocates.
    pub fn push(&mut self, value: T) {
        if self.len == self.capacity() {
            self.grow();
        }
        self.block[self.len].write(value);
        self.len += 1;
    }

    /// Returns the element at `index`, or [`OutOfRange`] if `index >= len()`.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] when `index` is not below the current length.
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        let len = self.len;
        self.as_slice().get(index).ok_or(OutOfRange { index, len })
    }

    /// Returns the element at `index` mutably, or [`OutOfRange`] if `index >= len()`.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] when `index` is not below the current length.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len;
        self.as_mut_slice().get_mut(index).ok_or(OutOfRange { index, len })
    }

    /// Cursor at the first element (equal to [`end`](Sequence::end) when empty).
    #[must_use]
    pub fn begin(&self) -> Cursor {
        Cursor::tracked(0, self.generation)
    }

    /// Cursor one past the last element.
    #[must_use]
    pub fn end(&self) -> Cursor {
        Cursor::tracked(self.len, self.generation)
    }

    /// The live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `[0, len)` are initialised and the block outlives the borrow.
        unsafe { slice::from_raw_parts(self.block.as_ptr().cast::<T>(), self.len) }
    }

    /// The live elements as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: slots `[0, len)` are initialised and the block outlives the borrow.
        unsafe { slice::from_raw_parts_mut(self.block.as_mut_ptr().cast::<T>(), self.len) }
    }

    /// Iterates the elements front to back.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterates the elements front to back, mutably.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Drops every element, keeping the block.
    pub fn clear(&mut self) {
        let elements: *mut [T] = self.as_mut_slice();
        // Forget the elements before dropping them so a panicking destructor cannot
        // lead to a double drop.
        self.len = 0;
        // SAFETY: `elements` covered the initialised prefix, which is no longer tracked.
        unsafe { ptr::drop_in_place(elements) };
    }

    /// Moves the whole sequence out, leaving `self` empty with capacity 0.
    #[must_use = "the taken elements are dropped if the result is unused"]
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = MIN_NON_ZERO_CAPACITY.max(old_capacity * 2);
        let mut block: Box<[MaybeUninit<T>]> = Box::new_uninit_slice(new_capacity);

        // SAFETY: the new block is larger than `len` and distinct from the old one. The
        // elements are moved bitwise; the old block is then freed as `MaybeUninit`,
        // which never drops its contents.
        unsafe {
            ptr::copy_nonoverlapping(self.block.as_ptr(), block.as_mut_ptr(), self.len);
        }
        self.block = block;
        self.generation = self.generation.checked_add(1).unwrap_or(1);

        tracing::debug!(
            target: "avl_collections::sequence",
            old_capacity,
            new_capacity,
            len = self.len,
            "reallocated sequence block"
        );
    }

    #[inline]
    fn check_cursor(&self, cursor: Cursor) {
        debug_assert!(
            cursor.generation() == 0 || cursor.generation() == self.generation,
            "`Sequence` - cursor was invalidated by a reallocation!"
        );
    }
}

impl<T> Drop for Sequence<T> {
    fn drop(&mut self) {
        // SAFETY: the initialised prefix is dropped exactly once; the block itself is
        // freed afterwards by `Box` without touching its contents.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) };
    }
}

impl<T: Clone> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        let mut copy = Sequence::with_capacity(self.capacity());
        for value in self {
            copy.push(value.clone());
        }
        copy
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Sequence::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Sequence<T> {}

/// Bounds-checked indexing.
///
/// # Panics
///
/// Panics with the [`OutOfRange`] message if `index >= len()`.
impl<T> Index<usize> for Sequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T> IndexMut<usize> for Sequence<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

/// Dereferences a cursor.
///
/// # Panics
///
/// Panics if the cursor is at or past the end. Debug builds also panic if the cursor
/// was invalidated by a reallocation.
impl<T> Index<Cursor> for Sequence<T> {
    type Output = T;

    fn index(&self, cursor: Cursor) -> &T {
        self.check_cursor(cursor);
        &self[cursor.offset()]
    }
}

impl<T> IndexMut<Cursor> for Sequence<T> {
    fn index_mut(&mut self, cursor: Cursor) -> &mut T {
        self.check_cursor(cursor);
        &mut self[cursor.offset()]
    }
}

impl<T> RandomAccess for Sequence<T> {
    type Item = T;

    fn begin(&self) -> Cursor {
        Sequence::begin(self)
    }

    fn end(&self) -> Cursor {
        Sequence::end(self)
    }

    fn element(&self, cursor: Cursor) -> &T {
        &self[cursor]
    }

    fn swap_elements(&mut self, a: Cursor, b: Cursor) {
        self.check_cursor(a);
        self.check_cursor(b);
        self.as_mut_slice().swap(a.offset(), b.offset());
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sequence = Sequence::new();
        sequence.extend(iter);
        sequence
    }
}

impl<T, const N: usize> From<[T; N]> for Sequence<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Sequence<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.iter_mut()
    }
}
