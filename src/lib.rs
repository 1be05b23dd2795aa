#![warn(missing_docs)]
#![doc(test(attr(deny(warnings))))]

//! A double-ended queue stored in fixed-size blocks.
//!
//! # [`SegmentedDeque`] vs [`VecDeque`]
//!
//! ## Growth
//!
//! The standard [`VecDeque`] uses a single ring buffer. When it is full, the
//! whole buffer is reallocated and its elements are moved to the new memory.
//!
//! The [`SegmentedDeque`] provided by this lib keeps its elements in blocks of
//! a fixed capacity, referenced by a block map. When a boundary block is full,
//! a new block is allocated and only the map of block handles may grow.
//! Elements already in the deque are never moved, whatever end grows.
//!
//! ## Indexing
//!
//! Since every block has the same capacity, the block and the offset of any
//! logical index are found in constant time, without scanning the map.
//!
//! ## Memory Usage
//!
//! Boundary blocks are usually partially filled, so a [`SegmentedDeque`] may
//! hold up to two blocks worth of unused slots. Blocks that become empty at
//! either end are freed right away, except the last one, which is kept for
//! reuse.
//!
//! # Logging
//!
//! With the `tracing` feature enabled, block allocations, block releases and
//! block map growth are reported as [`tracing`] events.
//!
//! [`VecDeque`]: std::collections::VecDeque
//! [`tracing`]: https://docs.rs/tracing

#[macro_use]
mod macros;

mod block;
mod block_map;
mod error;

#[cfg(test)]
mod drop_tracker;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut};
use std::ptr;

use block_map::{BlockMap, Cursor};

pub use error::{Error, Result};

/// Size in bytes targeted by the blocks of a deque created with
/// [`SegmentedDeque::new`].
pub const DEFAULT_BLOCK_BYTES: usize = 4096;

/// Lower bound of the block capacity chosen by [`SegmentedDeque::new`].
pub const MIN_BLOCK_CAPACITY: usize = 16;

/// A double-ended queue implemented with a map of fixed-capacity blocks.
///
/// A `SegmentedDeque` with a known list of items can be initialized from an
/// array:
///
/// ```
/// use segmented_deque::SegmentedDeque;
///
/// let deq = SegmentedDeque::from([-1, 0, 1]);
/// assert_eq!(deq, [-1, 0, 1]);
/// ```
///
/// Elements are accessed by their logical position, 0 being the front:
///
/// ```
/// use segmented_deque::SegmentedDeque;
///
/// let mut deq = SegmentedDeque::with_block_capacity(2);
/// deq.push_back('b');
/// deq.push_back('c');
/// deq.push_front('a');
/// assert_eq!(deq[0], 'a');
/// assert_eq!(deq[2], 'c');
/// ```
pub struct SegmentedDeque<T> {
    map: BlockMap<T>,
    head: Cursor,
    len: usize,
    marker: PhantomData<T>,
}

impl<T> SegmentedDeque<T> {
    /// Creates an empty deque.
    ///
    /// The capacity of its blocks is chosen so that a block takes about
    /// [`DEFAULT_BLOCK_BYTES`], holding at least [`MIN_BLOCK_CAPACITY`]
    /// elements.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_deque::SegmentedDeque;
    ///
    /// let deque: SegmentedDeque<u64> = SegmentedDeque::new();
    /// assert_eq!(deque.block_capacity(), 512);
    /// ```
    pub fn new() -> Self {
        Self::with_block_capacity(default_block_capacity::<T>())
    }

    /// Creates an empty deque whose blocks hold `block_capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `block_capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_deque::SegmentedDeque;
    ///
    /// let deque: SegmentedDeque<u32> = SegmentedDeque::with_block_capacity(4);
    ///
    /// assert_eq!(deque.block_capacity(), 4);
    /// assert_eq!(deque.block_count(), 1);
    /// assert_eq!(deque.len(), 0);
    /// ```
    pub fn with_block_capacity(block_capacity: usize) -> Self {
        assert!(block_capacity > 0, "block capacity must be non-zero");

        SegmentedDeque {
            map: BlockMap::new(block_capacity),
            head: Cursor {
                block: 0,
                offset: 0,
            },
            len: 0,
            marker: PhantomData,
        }
    }

    /// Returns the number of elements in the deque.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements a single block holds.
    pub fn block_capacity(&self) -> usize {
        self.map.block_cap()
    }

    /// Returns the number of blocks currently allocated.
    ///
    /// It is never less than one: the last block is kept even when the deque
    /// is emptied.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_deque::SegmentedDeque;
    ///
    /// let mut deque = SegmentedDeque::with_block_capacity(4);
    /// deque.extend(0..4);
    /// assert_eq!(deque.block_count(), 1);
    ///
    /// deque.push_back(4);
    /// assert_eq!(deque.block_count(), 2);
    ///
    /// deque.clear();
    /// assert_eq!(deque.block_count(), 1);
    /// ```
    pub fn block_count(&self) -> usize {
        self.map.live()
    }

    /// Returns the number of slots of the block map, including the slots
    /// reserved for blocks that are not allocated.
    pub fn map_capacity(&self) -> usize {
        self.map.len()
    }

    /// Provides a reference to the front element, or
    /// [`Error::EmptyContainer`] if the deque is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_deque::{Error, SegmentedDeque};
    ///
    /// let mut d = SegmentedDeque::new();
    /// assert_eq!(d.front(), Err(Error::EmptyContainer));
    ///
    /// d.push_back(1);
    /// d.push_back(2);
    /// assert_eq!(d.front(), Ok(&1));
    /// ```
    pub fn front(&self) -> Result<&T> {
        self.get(0).ok_or(Error::EmptyContainer)
    }

    /// Provides a mutable reference to the front element, or
    /// [`Error::EmptyContainer`] if the deque is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_deque::SegmentedDeque;
    ///
    /// let mut d = SegmentedDeque::new();
    /// d.push_back(1);
    /// d.push_back(2);
    /// if let Ok(x) = d.front_mut() {
    ///     *x = 9;
    /// }
    /// assert_eq!(d.front(), Ok(&9));
    /// ```
    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.get_mut(0).ok_or(Error::EmptyContainer)
    }

    /// Provides a reference to the back element, or
    /// [`Error::EmptyContainer`] if the deque is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_deque::{Error, SegmentedDeque};
    ///
    /// let mut d = SegmentedDeque::new();
    /// assert_eq!(d.back(), Err(Error::EmptyContainer));
    ///
    /// d.push_back(1);
    /// d.push_back(2);
    /// assert_eq!(d.back(), Ok(&2));
    /// ```
    pub fn back(&self) -> Result<&T> {
        let last = self.len.checked_sub(1).ok_or(Error::EmptyContainer)?;
        self.at(last)
    }

    /// Provides a mutable reference to the back element, or
    /// [`Error::EmptyContainer`] if the deque is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_deque::SegmentedDeque;
    ///
    /// let mut d = SegmentedDeque::new();
    /// d.push_back(1);
    /// d.push_back(2);
    /// if let Ok(x) = d.back_mut() {
    ///     *x = 9;
    /// }
    /// assert_eq!(d.back(), Ok(&9));
    /// ```
    pub fn back_mut(&mut self) -> Result<&mut T> {
        let last = self.len.checked_sub(1).ok_or(Error::EmptyContainer)?;
        self.at_mut(last)
    }

    /// Provides a reference to the element at `index`, or `None` if it is
    /// out of bounds.
    ///
    /// Element at index 0 is the front of the queue.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_deque::SegmentedDeque;
    ///
    /// let deque = SegmentedDeque::from([3, 4, 5]);
    /// assert_eq!(deque.get(1), Some(&4));
    /// assert_eq!(deque.get(3), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            unsafe { Some(&*self.map.slot(self.locate(index))) }
        } else {
            None
        }
    }

    /// Provides a mutable reference to the element at `index`, or `None` if
    /// it is out of bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            unsafe { Some(&mut *self.map.slot(self.locate(index))) }
        } else {
            None
        }
    }

    /// Provides a reference to the element at `index`, or
    /// [`Error::IndexOutOfRange`] if it is out of bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_deque::{Error, SegmentedDeque};
    ///
    /// let deque = SegmentedDeque::from(['a', 'b']);
    /// assert_eq!(deque.at(1), Ok(&'b'));
    /// assert_eq!(deque.at(2), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        self.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.len,
        })
    }

    /// Provides a mutable reference to the element at `index`, or
    /// [`Error::IndexOutOfRange`] if it is out of bounds.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Prepends an element to the deque.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_deque::SegmentedDeque;
    ///
    /// let mut d = SegmentedDeque::new();
    /// d.push_front(1);
    /// d.push_front(2);
    /// assert_eq!(d.front(), Ok(&2));
    /// ```
    pub fn push_front(&mut self, elem: T) {
        let block_cap = self.block_capacity();

        if self.len == 0 {
            self.head.offset = block_cap - 1;
        } else if self.head.offset == 0 {
            let last = self.tail().block;
            self.head.block = self.map.grow_front(self.head.block, last);
            self.head.offset = block_cap - 1;
        } else {
            self.head.offset -= 1;
        }

        unsafe {
            ptr::write(self.map.slot(self.head), elem);
        }
        self.len += 1;
    }

    /// Appends an element to the back of the deque.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_deque::SegmentedDeque;
    ///
    /// let mut buf = SegmentedDeque::new();
    /// buf.push_back(1);
    /// buf.push_back(3);
    /// assert_eq!(buf.back(), Ok(&3));
    /// ```
    pub fn push_back(&mut self, elem: T) {
        if self.len == 0 {
            self.head.offset = 0;
        } else {
            let tail = self.tail();
            if tail.offset + 1 == self.block_capacity() {
                self.head.block = self.map.grow_back(self.head.block, tail.block);
            }
        }

        unsafe {
            ptr::write(self.map.slot(self.locate(self.len)), elem);
        }
        self.len += 1;
    }

    /// Removes the first element and returns it, or
    /// [`Error::EmptyContainer`] if the deque is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_deque::{Error, SegmentedDeque};
    ///
    /// let mut d = SegmentedDeque::new();
    /// d.push_back(1);
    /// d.push_back(2);
    ///
    /// assert_eq!(d.pop_front(), Ok(1));
    /// assert_eq!(d.pop_front(), Ok(2));
    /// assert_eq!(d.pop_front(), Err(Error::EmptyContainer));
    /// ```
    pub fn pop_front(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::EmptyContainer);
        }

        let elem = unsafe { ptr::read(self.map.slot(self.head)) };
        self.len -= 1;

        if self.len == 0 {
            self.head.offset = 0;
        } else if self.head.offset + 1 == self.block_capacity() {
            self.map.release(self.head.block);
            self.head = Cursor {
                block: self.head.block + 1,
                offset: 0,
            };
        } else {
            self.head.offset += 1;
        }

        Ok(elem)
    }

    /// Removes the last element from the deque and returns it, or
    /// [`Error::EmptyContainer`] if it is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_deque::{Error, SegmentedDeque};
    ///
    /// let mut buf = SegmentedDeque::new();
    /// assert_eq!(buf.pop_back(), Err(Error::EmptyContainer));
    /// buf.push_back(1);
    /// buf.push_back(3);
    /// assert_eq!(buf.pop_back(), Ok(3));
    /// ```
    pub fn pop_back(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::EmptyContainer);
        }

        let tail = self.tail();
        let elem = unsafe { ptr::read(self.map.slot(tail)) };
        self.len -= 1;

        // a tail at offset 0 of a non-empty deque is never in the front block
        if self.len > 0 && tail.offset == 0 {
            self.map.release(tail.block);
        }

        Ok(elem)
    }

    /// Clears the deque, removing all values.
    ///
    /// All blocks but one are freed.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_deque::SegmentedDeque;
    ///
    /// let mut deque = SegmentedDeque::new();
    /// deque.push_back(1);
    /// deque.clear();
    /// assert!(deque.is_empty());
    /// ```
    pub fn clear(&mut self) {
        while self.pop_back().is_ok() {}
    }

    /// Translates a logical index into the position of its slot.
    ///
    /// `index` may be `len`, the slot right after the back element, as long
    /// as the caller made sure its block is live.
    fn locate(&self, index: usize) -> Cursor {
        let block_cap = self.block_capacity();
        let abs = self.head.offset + index;
        Cursor {
            block: self.head.block + abs / block_cap,
            offset: abs % block_cap,
        }
    }

    fn tail(&self) -> Cursor {
        debug_assert!(self.len > 0);
        self.locate(self.len - 1)
    }
}

impl<T> Default for SegmentedDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for SegmentedDeque<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Index<usize> for SegmentedDeque<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(elem) => elem,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for SegmentedDeque<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(elem) => elem,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: Clone> Clone for SegmentedDeque<T> {
    fn clone(&self) -> Self {
        let mut deque = Self::with_block_capacity(self.block_capacity());
        for i in 0..self.len {
            deque.push_back(self[i].clone());
        }
        deque
    }
}

impl<T: fmt::Debug> fmt::Debug for SegmentedDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.len).map(|i| &self[i]))
            .finish()
    }
}

macro_rules! impl_partial_eq {
    ([$($n:tt)*] $rhs:ty) => {
        impl<T, U, $($n)*> PartialEq<$rhs> for SegmentedDeque<T>
        where
            T: PartialEq<U>,
        {
            fn eq(&self, other: & $rhs) -> bool {
                let other: &[U] = &other[..];
                self.len == other.len()
                    && other.iter().enumerate().all(|(i, elem)| self[i] == *elem)
            }
        }
    };
}

impl_partial_eq!([const N: usize] [U; N]);
impl_partial_eq!([const N: usize] &[U; N]);
impl_partial_eq!([const N: usize] &mut [U; N]);
impl_partial_eq!([] & [U]);
impl_partial_eq!([] &mut [U]);
impl_partial_eq!([] Vec<U>);

impl<T, U> PartialEq<SegmentedDeque<U>> for SegmentedDeque<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &SegmentedDeque<U>) -> bool {
        self.len == other.len && (0..self.len).all(|i| self[i] == other[i])
    }
}

impl<T: Eq> Eq for SegmentedDeque<T> {}

impl<T: PartialOrd> PartialOrd for SegmentedDeque<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        for i in 0..self.len.min(other.len) {
            match self[i].partial_cmp(&other[i]) {
                Some(Ordering::Equal) => (),
                non_eq => return non_eq,
            }
        }
        self.len.partial_cmp(&other.len)
    }
}

impl<T: Ord> Ord for SegmentedDeque<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in 0..self.len.min(other.len) {
            match self[i].cmp(&other[i]) {
                Ordering::Equal => (),
                non_eq => return non_eq,
            }
        }
        self.len.cmp(&other.len)
    }
}

impl<T: Hash> Hash for SegmentedDeque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for i in 0..self.len {
            self[i].hash(state);
        }
    }
}

impl<T, const N: usize> From<[T; N]> for SegmentedDeque<T> {
    /// Converts a `[T; N]` into a `SegmentedDeque<T>`.
    ///
    /// ```
    /// use segmented_deque::SegmentedDeque;
    ///
    /// let deq = SegmentedDeque::from([1, 2, 3, 4]);
    /// assert_eq!(deq, [1, 2, 3, 4]);
    /// ```
    fn from(value: [T; N]) -> Self {
        Self::from_iter(value)
    }
}

impl<T> From<Vec<T>> for SegmentedDeque<T> {
    /// Turn a [`Vec<T>`] into a [`SegmentedDeque<T>`].
    fn from(value: Vec<T>) -> Self {
        Self::from_iter(value)
    }
}

impl<T> FromIterator<T> for SegmentedDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T> Extend<T> for SegmentedDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.push_back(elem);
        }
    }
}

fn default_block_capacity<T>() -> usize {
    match mem::size_of::<T>() {
        0 => MIN_BLOCK_CAPACITY,
        size => (DEFAULT_BLOCK_BYTES / size).max(MIN_BLOCK_CAPACITY),
    }
}
