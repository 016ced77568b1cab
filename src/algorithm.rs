//! Cursor-based algorithms over random-access containers.
//!
//! Ranges are half-open: `[first, last)` covers every position from `first` up to but
//! not including `last`, so `(range.begin(), range.end())` spans a whole container.
//!
//! ```
//! use avl_collections::{Sequence, algorithm};
//!
//! let mut values = Sequence::from([3.8, 2.5, 3.9, 3.2]);
//! let (first, last) = (values.begin(), values.end());
//! algorithm::quicksort(&mut values, first, last);
//! assert_eq!(values.as_slice(), &[2.5, 3.2, 3.8, 3.9]);
//!
//! let found = algorithm::linear_search(&values, values.begin(), values.end(), &3.8);
//! assert_eq!(found.offset(), 2);
//! ```

use crate::Cursor;

/// A container whose elements can be reached and swapped in O(1) through a [`Cursor`].
pub trait RandomAccess {
    /// The element type.
    type Item;

    /// Cursor at the first element.
    fn begin(&self) -> Cursor;

    /// Cursor one past the last element.
    fn end(&self) -> Cursor;

    /// The element at `cursor`.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` is not before [`end`](RandomAccess::end).
    fn element(&self, cursor: Cursor) -> &Self::Item;

    /// Swaps the elements at `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either cursor is not before [`end`](RandomAccess::end).
    fn swap_elements(&mut self, a: Cursor, b: Cursor);
}

impl<T> RandomAccess for [T] {
    type Item = T;

    fn begin(&self) -> Cursor {
        Cursor::from_offset(0)
    }

    fn end(&self) -> Cursor {
        Cursor::from_offset(self.len())
    }

    fn element(&self, cursor: Cursor) -> &T {
        &self[cursor.offset()]
    }

    fn swap_elements(&mut self, a: Cursor, b: Cursor) {
        self.swap(a.offset(), b.offset());
    }
}

/// Returns the first cursor in `[first, last)` whose element equals `target`, or `last`
/// if there is none.
///
/// # Complexity
///
/// O(n)
pub fn linear_search<R>(range: &R, first: Cursor, last: Cursor, target: &R::Item) -> Cursor
where
    R: RandomAccess + ?Sized,
    R::Item: PartialEq,
{
    let mut cursor = first;
    while cursor != last {
        if range.element(cursor) == target {
            return cursor;
        }
        cursor += 1;
    }
    last
}

/// Lomuto partition of the inclusive range `[low, high]` around the element at `high`.
///
/// Every element that compares less than the pivot is moved before the pivot's final
/// position, which is returned. Elements at or after the returned cursor are not less
/// than the pivot.
///
/// # Panics
///
/// Panics if `high` is not a valid element position or `low > high`.
pub fn partition<R>(range: &mut R, low: Cursor, high: Cursor) -> Cursor
where
    R: RandomAccess + ?Sized,
    R::Item: PartialOrd,
{
    assert!(low <= high, "`partition()` - `low` is after `high`!");

    let mut boundary = low;
    let mut cursor = low;
    while cursor != high {
        if range.element(cursor) < range.element(high) {
            range.swap_elements(boundary, cursor);
            boundary += 1;
        }
        cursor += 1;
    }
    range.swap_elements(boundary, high);
    boundary
}

/// Sorts `[first, last)` in place using last-element-pivot quicksort.
///
/// The sort is not stable. Ranges of zero or one element are left untouched.
///
/// # Complexity
///
/// O(n log n) on average. The pivot is always the last element of the range, so
/// already-sorted, reverse-sorted or otherwise adversarial input degrades to O(n²)
/// comparisons. Only the smaller side of each partition is recursed into, keeping the
/// call depth at O(log n) even then.
pub fn quicksort<R>(range: &mut R, first: Cursor, last: Cursor)
where
    R: RandomAccess + ?Sized,
    R::Item: PartialOrd,
{
    let (mut first, mut last) = (first, last);
    while first + 1 < last {
        let pivot = partition(range, first, last - 1);
        if pivot - first < last - (pivot + 1) {
            quicksort(range, first, pivot);
            first = pivot + 1;
        } else {
            quicksort(range, pivot + 1, last);
            last = pivot;
        }
    }
}
