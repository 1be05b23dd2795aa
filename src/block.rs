use std::alloc::{self, Layout};
use std::mem;
use std::ptr::NonNull;

/// Raw storage for one block of the map.
///
/// A block with `cap == 0` is absent. A block never knows which of its slots
/// are initialized; the deque owning it is responsible for dropping elements.
#[derive(Debug)]
pub struct Block<T> {
    pub ptr: NonNull<T>,
    pub cap: usize,
}

unsafe impl<T: Send> Send for Block<T> {}
unsafe impl<T: Sync> Sync for Block<T> {}

impl<T> Block<T> {
    pub fn absent() -> Self {
        Block {
            ptr: NonNull::dangling(),
            cap: 0,
        }
    }

    pub fn allocated(cap: usize) -> Self {
        let mut block = Block::absent();
        block.allocate(cap);
        block
    }

    pub fn is_live(&self) -> bool {
        self.cap != 0
    }

    pub fn allocate(&mut self, cap: usize) {
        assert!(cap > 0, "can't allocate a zero length block");
        debug_assert!(!self.is_live(), "block is already allocated");

        if mem::size_of::<T>() != 0 {
            let layout = layout::<T>(cap);
            let ptr = unsafe { alloc::alloc(layout) };
            self.ptr = match NonNull::new(ptr as *mut T) {
                Some(p) => p,
                None => alloc::handle_alloc_error(layout),
            };
        }
        self.cap = cap;
    }

    /// Frees the storage. Any element still stored in the block is leaked, so
    /// callers move elements out first.
    pub fn release(&mut self) {
        if self.cap != 0 && mem::size_of::<T>() != 0 {
            unsafe {
                alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout::<T>(self.cap));
            }
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }

    /// Pointer to the slot at `offset`.
    ///
    /// # Safety
    ///
    /// The block must be live and `offset < cap`.
    pub unsafe fn slot(&self, offset: usize) -> *mut T {
        debug_assert!(offset < self.cap, "slot {offset} out of block");
        self.ptr.as_ptr().add(offset)
    }
}

impl<T> Drop for Block<T> {
    fn drop(&mut self) {
        self.release();
    }
}

fn layout<T>(cap: usize) -> Layout {
    match Layout::array::<T>(cap) {
        Ok(layout) => layout,
        Err(_) => panic!("capacity overflow"),
    }
}
