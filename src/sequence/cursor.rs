use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::ops::{Add, AddAssign, Sub, SubAssign};

/// A position inside a random-access container.
///
/// A cursor is an offset from the start of the container's storage. It supports
/// stepping (`+= 1`, `-= 1`), offset arithmetic (`+ n`, `- n`), distance (`a - b`)
/// and comparison, which is what the [`algorithm`](crate::algorithm) functions need.
///
/// # Invalidation
///
/// Any reallocation of a [`Sequence`](crate::Sequence), which a
/// [`push`](crate::Sequence::push) beyond the current capacity performs, invalidates
/// every cursor previously taken from it. Using an invalidated cursor is a logic error.
/// Debug builds detect it and panic; release builds do not check, but access through
/// a cursor is still bounds-checked against the current length.
///
/// # Examples
///
/// ```
/// use avl_collections::Sequence;
///
/// let mut values = Sequence::from([1, 2, 3]);
/// let mut sum = 0;
/// let mut cursor = values.begin();
/// while cursor != values.end() {
///     sum += values[cursor];
///     cursor += 1;
/// }
/// assert_eq!(sum, 6);
///
/// let first = values.begin();
/// values[first] = 20;
/// assert_eq!(values[0], 20);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Cursor {
    offset: usize,
    // Reallocation count of the owning sequence when the cursor was made; 0 means untracked.
    generation: u32,
}

impl Cursor {
    /// A cursor at `offset` that is not tied to any particular allocation.
    #[must_use]
    pub const fn from_offset(offset: usize) -> Self {
        Self { offset, generation: 0 }
    }

    pub(crate) const fn tracked(offset: usize, generation: u32) -> Self {
        Self { offset, generation }
    }

    /// Offset from the start of the storage.
    #[must_use]
    pub const fn offset(self) -> usize {
        self.offset
    }

    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl Eq for Cursor {}

impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl Hash for Cursor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.offset.hash(state);
    }
}

impl Add<usize> for Cursor {
    type Output = Cursor;

    fn add(self, n: usize) -> Cursor {
        Cursor {
            offset: self.offset + n,
            ..self
        }
    }
}

impl Sub<usize> for Cursor {
    type Output = Cursor;

    fn sub(self, n: usize) -> Cursor {
        Cursor {
            offset: self.offset - n,
            ..self
        }
    }
}

/// Number of steps from `rhs` forward to `self`.
///
/// # Panics
///
/// Panics in debug builds if `rhs` lies after `self`.
impl Sub for Cursor {
    type Output = usize;

    fn sub(self, rhs: Cursor) -> usize {
        self.offset - rhs.offset
    }
}

impl AddAssign<usize> for Cursor {
    fn add_assign(&mut self, n: usize) {
        self.offset += n;
    }
}

impl SubAssign<usize> for Cursor {
    fn sub_assign(&mut self, n: usize) {
        self.offset -= n;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let mut cursor = Cursor::from_offset(3);
        cursor += 1;
        assert_eq!(cursor.offset(), 4);
        cursor -= 2;
        assert_eq!(cursor.offset(), 2);
        assert_eq!((cursor + 5).offset(), 7);
        assert_eq!((cursor - 2).offset(), 0);
        assert_eq!(Cursor::from_offset(9) - Cursor::from_offset(4), 5);
    }

    #[test]
    fn comparison_ignores_generation() {
        let tracked = Cursor::tracked(2, 7);
        assert_eq!(tracked, Cursor::from_offset(2));
        assert!(Cursor::from_offset(1) < tracked);
        assert!(tracked + 1 > tracked);
        assert_eq!((tracked + 1).generation(), 7);
    }
}
