use std::iter;

use crate::block::Block;

/// A position in the map: the slot index of a block and an offset inside it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cursor {
    pub block: usize,
    pub offset: usize,
}

/// The ordered slots of block handles backing a deque.
///
/// Live blocks always form one contiguous run of slots; the absent slots on
/// either side of the run are slack that growth consumes before adding slots.
/// Growing or recentering moves block handles only, never the elements they
/// hold.
#[derive(Debug)]
pub struct BlockMap<T> {
    slots: Vec<Block<T>>,
    block_cap: usize,
    live: usize,
}

impl<T> BlockMap<T> {
    /// Creates a map with a single live block at slot 0.
    pub fn new(block_cap: usize) -> Self {
        let mut slots = Vec::with_capacity(1);
        slots.push(Block::allocated(block_cap));

        BlockMap {
            slots,
            block_cap,
            live: 1,
        }
    }

    pub fn block_cap(&self) -> usize {
        self.block_cap
    }

    /// Number of slots, live or absent.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Number of allocated blocks.
    pub fn live(&self) -> usize {
        self.live
    }

    #[cfg(test)]
    pub fn is_live(&self, block: usize) -> bool {
        self.slots.get(block).map_or(false, Block::is_live)
    }

    /// Pointer to the element slot at `cursor`.
    ///
    /// # Safety
    ///
    /// `cursor.block` must be a live slot and `cursor.offset` less than the
    /// block capacity.
    pub unsafe fn slot(&self, cursor: Cursor) -> *mut T {
        debug_assert!(self.slots[cursor.block].is_live(), "slot {} is absent", cursor.block);
        self.slots.get_unchecked(cursor.block).slot(cursor.offset)
    }

    /// Allocates a block in the slot just before the live run `first..=last`.
    ///
    /// Returns the slot of the new block, which is the new first block. Slot
    /// indices of the existing blocks may shift if the map had to make room.
    pub fn grow_front(&mut self, first: usize, last: usize) -> usize {
        let live = last - first + 1;
        let mut first = first;

        if first == 0 {
            let back_slack = self.slots.len() - 1 - last;
            if back_slack > live {
                let shift = back_slack / 2;
                self.slots[..=last + shift].rotate_right(shift);
                first += shift;
                _debug!(shift, slots = self.slots.len(), "recentered block map toward the back");
            } else {
                let added = live;
                let mut slots = Vec::with_capacity(self.slots.len() + added);
                slots.extend(iter::repeat_with(Block::absent).take(added));
                slots.append(&mut self.slots);
                self.slots = slots;
                first += added;
                _debug!(added, slots = self.slots.len(), "grew block map at the front");
            }
        }

        first -= 1;
        self.slots[first].allocate(self.block_cap);
        self.live += 1;
        _trace!(slot = first, live = self.live, "allocated front block");

        first
    }

    /// Allocates a block in the slot just after the live run `first..=last`.
    ///
    /// Returns the slot now holding the block that was at `first`; the new
    /// block sits right after the (possibly moved) run.
    pub fn grow_back(&mut self, first: usize, last: usize) -> usize {
        let live = last - first + 1;
        let mut first = first;
        let mut last = last;

        if last + 1 == self.slots.len() {
            if first > live {
                let shift = first / 2;
                self.slots[first - shift..].rotate_left(shift);
                first -= shift;
                last -= shift;
                _debug!(shift, slots = self.slots.len(), "recentered block map toward the front");
            } else {
                let added = live;
                self.slots
                    .extend(iter::repeat_with(Block::absent).take(added));
                _debug!(added, slots = self.slots.len(), "grew block map at the back");
            }
        }

        self.slots[last + 1].allocate(self.block_cap);
        self.live += 1;
        _trace!(slot = last + 1, live = self.live, "allocated back block");

        first
    }

    /// Frees the block at `block`, turning its slot into slack.
    ///
    /// The block must not hold any element anymore.
    pub fn release(&mut self, block: usize) {
        debug_assert!(self.live > 1, "the last live block is never released");
        self.slots[block].release();
        self.live -= 1;
        _trace!(slot = block, live = self.live, "released block");
    }
}
