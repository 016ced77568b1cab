use thiserror::Error;

/// An index at or past the end of a [`Sequence`](crate::Sequence).
///
/// Returned by [`Sequence::at`](crate::Sequence::at) and
/// [`Sequence::at_mut`](crate::Sequence::at_mut). The failed access leaves the sequence
/// untouched.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
#[error("index {index} out of range for sequence of length {len}")]
pub struct OutOfRange {
    /// The rejected index.
    pub index: usize,
    /// Length of the sequence at the time of the access.
    pub len: usize,
}
