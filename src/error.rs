use std::fmt::{self, Display, Formatter};

/// Alias of [`core::result::Result`] with this crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Failures reported by [`SegmentedDeque`] operations.
///
/// Allocation failures are not represented here; they abort through
/// [`std::alloc::handle_alloc_error`].
///
/// [`SegmentedDeque`]: crate::SegmentedDeque
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// An element was read or removed from an empty deque.
    EmptyContainer,

    /// An index was not less than the length of the deque.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the deque at the time of the access.
        len: usize,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyContainer => f.write_str("deque is empty"),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index out of bounds: the len is {len} but the index is {index}")
            }
        }
    }
}

impl std::error::Error for Error {}
