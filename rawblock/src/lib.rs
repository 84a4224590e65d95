#![no_std]

//! `RawBlock`: an owning handle to fixed-capacity uninitialized element storage.
//!
//! A `RawBlock<T>` owns one contiguous allocation sized for exactly
//! `capacity` values of `T` and nothing more: it never constructs, reads,
//! or drops elements. The owner (such as a growable vector) decides which
//! slots hold live values and must destroy them before the block goes away.
//! All addressing is bounds-checked against the capacity; which slots are
//! safe to dereference is the owner's contract, not this crate's.
//!
//! This crate is `no_std` compatible; storage comes from the global
//! allocator through `alloc`.
//!
//! ```
//! use rawblock::RawBlock;
//!
//! let block: RawBlock<u64> = RawBlock::allocate(4).unwrap();
//! assert_eq!(block.capacity(), 4);
//!
//! // The block hands out addresses; writing through them is the owner's
//! // responsibility and requires unsafe code.
//! unsafe { block.slot(0).as_ptr().write(7) };
//! assert_eq!(unsafe { block.slot(0).as_ptr().read() }, 7);
//! ```

extern crate alloc;

mod error;

pub use error::RawBlockError;

use alloc::alloc::{alloc, dealloc, Layout};
use core::{fmt, mem, ptr::NonNull};

/// An owning handle to a contiguous block of uninitialized element slots.
///
/// The empty state (capacity 0) holds no allocation; its pointer is a
/// well-aligned dangling sentinel.
pub struct RawBlock<T> {
    ptr: NonNull<T>,
    capacity: usize,
}

impl<T> RawBlock<T> {
    /// Creates an empty block without touching the allocator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
        }
    }

    /// Allocates a block able to hold `capacity` elements, constructing none
    /// of them. A capacity of zero yields the empty block.
    ///
    /// # Errors
    ///
    /// - `RawBlockError::ZeroSizedType` if `T` has zero size
    /// - `RawBlockError::CapacityOverflow` if `capacity` elements cannot be
    ///   laid out in a single allocation
    /// - `RawBlockError::AllocFailed` if the global allocator returns null
    pub fn allocate(capacity: usize) -> Result<Self, RawBlockError> {
        if mem::size_of::<T>() == 0 {
            return Err(RawBlockError::ZeroSizedType);
        }
        if capacity == 0 {
            return Ok(Self::new());
        }
        let layout = Layout::array::<T>(capacity)
            .map_err(|_| RawBlockError::CapacityOverflow { capacity })?;
        // Safety: the layout has non-zero size (capacity > 0, sized T).
        let raw = unsafe { alloc(layout) };
        match NonNull::new(raw.cast::<T>()) {
            Some(ptr) => Ok(Self { ptr, capacity }),
            None => Err(RawBlockError::AllocFailed {
                bytes: layout.size(),
                capacity,
            }),
        }
    }

    /// Number of elements the block can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[must_use]
    pub fn as_non_null(&self) -> NonNull<T> {
        self.ptr
    }

    /// Address of the slot at `index`.
    ///
    /// This is a memory-safety guard against addressing outside the block,
    /// not a liveness check: whether the slot holds a constructed value is
    /// the owner's bookkeeping.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[must_use]
    pub fn slot(&self, index: usize) -> NonNull<T> {
        assert!(
            index < self.capacity,
            "slot index {} out of range for capacity {}",
            index,
            self.capacity
        );
        // Safety: index is within the allocation.
        unsafe { NonNull::new_unchecked(self.ptr.as_ptr().add(index)) }
    }

    /// Address `n` slots past the start of the block.
    ///
    /// Unlike [`slot`](Self::slot), the one-past-the-end address is allowed;
    /// it may be compared against but never dereferenced.
    ///
    /// # Panics
    ///
    /// Panics if `n > capacity`.
    #[must_use]
    pub fn offset(&self, n: usize) -> NonNull<T> {
        assert!(
            n <= self.capacity,
            "offset {} out of range for capacity {}",
            n,
            self.capacity
        );
        // Safety: n is at most one past the allocation.
        unsafe { NonNull::new_unchecked(self.ptr.as_ptr().add(n)) }
    }

    /// Exchanges the two blocks' allocations in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }
}

impl<T> Default for RawBlock<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBlock<T> {
    /// Releases the allocation. Element destructors never run here; a block
    /// dropped while the owner still counts live elements leaks them.
    #[allow(clippy::expect_used)]
    fn drop(&mut self) {
        if self.capacity == 0 {
            return;
        }
        // A non-zero capacity only comes out of `allocate`, where this
        // layout computation already succeeded.
        let layout = Layout::array::<T>(self.capacity).expect("layout validated at allocation");
        // Safety: ptr was returned by `alloc` with this exact layout.
        unsafe { dealloc(self.ptr.as_ptr().cast(), layout) };
    }
}

impl<T> fmt::Debug for RawBlock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBlock")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

// The block is exclusively owned; transferring it across threads transfers
// the allocation with it.
unsafe impl<T: Send> Send for RawBlock<T> {}
unsafe impl<T: Sync> Sync for RawBlock<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_block() {
        let block: RawBlock<u32> = RawBlock::new();
        assert_eq!(block.capacity(), 0);
    }

    #[test]
    fn test_zero_capacity_does_not_allocate() {
        let block: RawBlock<u32> = RawBlock::allocate(0).unwrap();
        assert_eq!(block.capacity(), 0);
    }

    #[test]
    fn test_allocate_and_address_slots() {
        let block: RawBlock<u64> = RawBlock::allocate(8).unwrap();
        assert_eq!(block.capacity(), 8);

        for i in 0..8 {
            unsafe { block.slot(i).as_ptr().write(i as u64 * 10) };
        }
        for i in 0..8 {
            assert_eq!(unsafe { block.slot(i).as_ptr().read() }, i as u64 * 10);
        }
    }

    #[test]
    fn test_offset_arithmetic() {
        let block: RawBlock<u16> = RawBlock::allocate(4).unwrap();

        let base = block.offset(0);
        let end = block.offset(4); // one past the end is addressable
        let distance = unsafe { end.as_ptr().offset_from(base.as_ptr()) };
        assert_eq!(distance, 4);
    }

    #[test]
    #[should_panic(expected = "slot index 4 out of range for capacity 4")]
    fn test_slot_out_of_range() {
        let block: RawBlock<u16> = RawBlock::allocate(4).unwrap();
        let _ = block.slot(4);
    }

    #[test]
    #[should_panic(expected = "offset 5 out of range for capacity 4")]
    fn test_offset_out_of_range() {
        let block: RawBlock<u16> = RawBlock::allocate(4).unwrap();
        let _ = block.offset(5);
    }

    #[test]
    fn test_swap_exchanges_ownership() {
        let mut a: RawBlock<u32> = RawBlock::allocate(2).unwrap();
        let mut b: RawBlock<u32> = RawBlock::allocate(6).unwrap();
        let a_ptr = a.as_ptr();
        let b_ptr = b.as_ptr();

        a.swap(&mut b);

        assert_eq!(a.capacity(), 6);
        assert_eq!(b.capacity(), 2);
        assert_eq!(a.as_ptr(), b_ptr);
        assert_eq!(b.as_ptr(), a_ptr);
    }

    #[test]
    fn test_zero_sized_type_rejected() {
        let result: Result<RawBlock<()>, _> = RawBlock::allocate(4);
        assert_eq!(result.unwrap_err(), RawBlockError::ZeroSizedType);
    }

    #[test]
    fn test_capacity_overflow() {
        let result: Result<RawBlock<u64>, _> = RawBlock::allocate(usize::MAX);
        assert_eq!(
            result.unwrap_err(),
            RawBlockError::CapacityOverflow {
                capacity: usize::MAX
            }
        );
    }
}
