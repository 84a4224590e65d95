use core::{
    cmp, fmt,
    marker::PhantomData,
    mem,
    ops::{Deref, DerefMut, Index, IndexMut},
    ptr, slice,
};

use rawblock::RawBlock;

use crate::error::GrowVecError;
use crate::iter::{Iter, IterMut};

/// A growable contiguous vector over an explicitly managed storage block.
///
/// Slots `[0, len)` of the block hold live values; slots `[len, capacity)`
/// are uninitialized memory that only the growth machinery touches. The
/// vector never allocates directly: every block comes from
/// [`RawBlock`], and the old block is released by its own `Drop` once its
/// elements have been relocated out.
pub struct GrowVec<T> {
    block: RawBlock<T>,
    len: usize,
    // The vector owns its elements even though the block type does not.
    _owns: PhantomData<T>,
}

impl<T> GrowVec<T> {
    /// Creates an empty vector with no allocation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            block: RawBlock::new(),
            len: 0,
            _owns: PhantomData,
        }
    }

    /// Creates a vector of `len` default-constructed elements.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the block cannot be allocated.
    pub fn with_len(len: usize) -> Result<Self, GrowVecError>
    where
        T: Default,
    {
        let mut vec = Self::new();
        vec.resize(len)?;
        Ok(vec)
    }

    /// Creates a vector holding clones of the elements of `values`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the block cannot be allocated.
    pub fn from_slice(values: &[T]) -> Result<Self, GrowVecError>
    where
        T: Clone,
    {
        let mut vec = Self::new();
        vec.reserve(values.len())?;
        for value in values {
            vec.push(value.clone())?;
        }
        Ok(vec)
    }

    /// Fallible copy construction; [`Clone::clone`] forwards here.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the block cannot be allocated. `self` is
    /// never modified.
    pub fn try_clone(&self) -> Result<Self, GrowVecError>
    where
        T: Clone,
    {
        Self::from_slice(self.as_slice())
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the current block can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.block.capacity()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // Safety: slots [0, len) are initialized by the vector's invariant.
        unsafe { slice::from_raw_parts(self.block.as_ptr(), self.len) }
    }

    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: slots [0, len) are initialized by the vector's invariant.
        unsafe { slice::from_raw_parts_mut(self.block.as_mut_ptr(), self.len) }
    }

    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.block.as_ptr()
    }

    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.block.as_mut_ptr()
    }

    /// Returns a reference to the element at `index`, or `None` if it is out
    /// of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Grows the block to hold at least `new_capacity` elements. A request
    /// at or below the current capacity is a no-op.
    ///
    /// Live elements are relocated into the new block by moving. A Rust
    /// move is a bitwise transfer that cannot fail, so the relocation step
    /// itself never observes a partial state; copy-based relocation exists
    /// only in the cloning paths ([`try_clone`](Self::try_clone),
    /// `clone_from`).
    ///
    /// # Errors
    ///
    /// Returns a storage error if the new block cannot be allocated; the
    /// vector is unchanged (no partial allocation is ever adopted).
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), GrowVecError> {
        if new_capacity <= self.block.capacity() {
            return Ok(());
        }
        let mut new_block = RawBlock::allocate(new_capacity)?;
        // Safety: the blocks are distinct allocations and both sides are
        // valid for `len` elements.
        unsafe {
            ptr::copy_nonoverlapping(self.block.as_ptr(), new_block.as_mut_ptr(), self.len);
        }
        self.block.swap(&mut new_block);
        // The old block leaves through `new_block`; its elements were moved
        // out, so only the raw allocation is released.
        Ok(())
    }

    /// Doubled capacity for an unplanned append, minimum 1.
    fn grown_capacity(&self) -> usize {
        if self.block.capacity() == 0 {
            1
        } else {
            self.block.capacity() * 2
        }
    }

    /// Grows to the doubled capacity with the new element constructed at
    /// `index` in the new block *before* the old elements relocate around
    /// it. If allocation fails or `f` panics, nothing has been adopted and
    /// the vector is unchanged; the candidate block frees itself.
    fn grow_with_gap<F>(&mut self, index: usize, f: F) -> Result<&mut T, GrowVecError>
    where
        F: FnOnce() -> T,
    {
        let mut new_block: RawBlock<T> = RawBlock::allocate(self.grown_capacity())?;
        let dst = new_block.slot(index);
        unsafe {
            dst.as_ptr().write(f());
            ptr::copy_nonoverlapping(self.block.as_ptr(), new_block.as_mut_ptr(), index);
            ptr::copy_nonoverlapping(
                self.block.as_ptr().add(index),
                new_block.as_mut_ptr().add(index + 1),
                self.len - index,
            );
        }
        self.block.swap(&mut new_block);
        self.len += 1;
        Ok(unsafe { &mut *dst.as_ptr() })
    }

    /// Appends an element, growing the block if needed, and returns a
    /// reference to it.
    ///
    /// Strong guarantee: on any failure the vector is unchanged.
    ///
    /// # Errors
    ///
    /// Returns a storage error if growth is needed and allocation fails.
    pub fn push(&mut self, value: T) -> Result<&mut T, GrowVecError> {
        let index = self.len;
        self.insert_with(index, move || value)
    }

    /// Appends an element produced by `f`, constructing it directly into
    /// its final slot. If `f` panics the vector is unchanged.
    ///
    /// # Errors
    ///
    /// Returns a storage error if growth is needed and allocation fails.
    pub fn push_with<F>(&mut self, f: F) -> Result<&mut T, GrowVecError>
    where
        F: FnOnce() -> T,
    {
        let index = self.len;
        self.insert_with(index, f)
    }

    /// Inserts an element at `index`, shifting the tail up one slot.
    /// `index == len` behaves like [`push`](Self::push). Returns a
    /// reference to the inserted element.
    ///
    /// The in-capacity shift is a bitwise move and cannot fail, so the only
    /// fallible steps (constructing the value, allocating on growth) happen
    /// before the vector is touched; there is no mid-shift failure window
    /// because element moves never run user code.
    ///
    /// # Errors
    ///
    /// - `GrowVecError::IndexOutOfBounds` if `index > len`
    /// - a storage error if growth is needed and allocation fails
    pub fn insert(&mut self, index: usize, value: T) -> Result<&mut T, GrowVecError> {
        self.insert_with(index, move || value)
    }

    /// Inserts an element produced by `f` at `index`. See
    /// [`insert`](Self::insert) for the position and failure contract; a
    /// panicking `f` leaves the vector unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert).
    pub fn insert_with<F>(&mut self, index: usize, f: F) -> Result<&mut T, GrowVecError>
    where
        F: FnOnce() -> T,
    {
        if index > self.len {
            return Err(GrowVecError::IndexOutOfBounds {
                index,
                length: self.len,
            });
        }
        if self.len == self.block.capacity() {
            return self.grow_with_gap(index, f);
        }
        let value = f();
        unsafe {
            let base = self.block.slot(index).as_ptr();
            ptr::copy(base, base.add(1), self.len - index);
            base.write(value);
            self.len += 1;
            Ok(&mut *base)
        }
    }

    /// Removes the last element and returns it, or `None` if the vector is
    /// empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // Safety: the slot was live; reducing len first retires it from the
        // live range before the value moves out.
        Some(unsafe { self.block.slot(self.len).as_ptr().read() })
    }

    /// Removes the last element and returns it.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::EmptyVector` if there is nothing to pop.
    pub fn try_pop(&mut self) -> Result<T, GrowVecError> {
        self.pop().ok_or(GrowVecError::EmptyVector)
    }

    /// Removes the element at `index` and returns it, shifting the tail
    /// down one slot. The element that followed it now lives at `index`.
    ///
    /// The shift is bitwise and cannot fail, so no element is ever lost;
    /// there is deliberately no rollback of the shift itself.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::IndexOutOfBounds` if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<T, GrowVecError> {
        if index >= self.len {
            return Err(GrowVecError::IndexOutOfBounds {
                index,
                length: self.len,
            });
        }
        unsafe {
            let base = self.block.slot(index).as_ptr();
            let value = base.read();
            ptr::copy(base.add(1), base, self.len - index - 1);
            self.len -= 1;
            Ok(value)
        }
    }

    /// Resizes to `new_len` elements, filling new slots with
    /// `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if growth is needed and allocation fails.
    pub fn resize(&mut self, new_len: usize) -> Result<(), GrowVecError>
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    /// Resizes to `new_len` elements, filling new slots with values from
    /// `f`. Shrinking drops the surplus tail in place.
    ///
    /// The live count is advanced one element at a time, so a panicking `f`
    /// leaves a consistent vector holding everything constructed so far.
    ///
    /// # Errors
    ///
    /// Returns a storage error if growth is needed and allocation fails.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F) -> Result<(), GrowVecError>
    where
        F: FnMut() -> T,
    {
        if new_len < self.len {
            self.truncate(new_len);
            return Ok(());
        }
        if new_len > self.block.capacity() {
            self.reserve(cmp::max(self.block.capacity() * 2, new_len))?;
        }
        while self.len < new_len {
            unsafe { self.block.slot(self.len).as_ptr().write(f()) };
            self.len += 1;
        }
        Ok(())
    }

    /// Drops every element past `new_len`. Capacity is unchanged; a
    /// `new_len` at or above the current length is a no-op.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail = self.len - new_len;
        // Retire the tail from the live range before destroying it.
        self.len = new_len;
        unsafe {
            let base = self.block.slot(new_len).as_ptr();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base, tail));
        }
    }

    /// Drops all elements, keeping the allocation.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Exchanges the contents and capacity of two vectors in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        self.block.swap(&mut other.block);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Returns an iterator over the live elements.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Returns an iterator yielding mutable references to the live
    /// elements.
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    pub(crate) fn bounds(&self) -> (ptr::NonNull<T>, ptr::NonNull<T>) {
        (self.block.offset(0), self.block.offset(self.len))
    }
}

impl<T> Default for GrowVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for GrowVec<T> {
    fn drop(&mut self) {
        self.clear();
        // The block releases its allocation in its own Drop.
    }
}

impl<T: Clone> Clone for GrowVec<T> {
    /// Copy construction.
    ///
    /// # Panics
    ///
    /// Panics if the new block cannot be allocated; use
    /// [`try_clone`](Self::try_clone) to handle that case.
    #[allow(clippy::expect_used)]
    fn clone(&self) -> Self {
        self.try_clone().expect("allocation failed while cloning")
    }

    /// Capacity-aware copy assignment.
    ///
    /// If `source` does not fit in the current block, a fresh copy is built
    /// and swapped in (either it fully succeeds or `self` is unchanged).
    /// Otherwise the existing block is reused: the overlapping prefix is
    /// clone-assigned, and the remainder is either clone-constructed into
    /// spare slots or dropped as surplus.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.block.capacity() {
            let mut fresh = source.clone();
            self.swap(&mut fresh);
            return;
        }
        let shared = cmp::min(self.len, source.len);
        self.as_mut_slice()[..shared].clone_from_slice(&source.as_slice()[..shared]);
        if source.len > self.len {
            for value in &source.as_slice()[self.len..] {
                // Count each tail element as soon as it is constructed so a
                // panicking clone cannot leave it outside the live range.
                unsafe { self.block.slot(self.len).as_ptr().write(value.clone()) };
                self.len += 1;
            }
        } else {
            self.truncate(source.len);
        }
    }
}

impl<T> Deref for GrowVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for GrowVec<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for GrowVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        assert!(
            index < self.len,
            "index {} out of bounds for length {}",
            index,
            self.len
        );
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for GrowVec<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        assert!(
            index < self.len,
            "index {} out of bounds for length {}",
            index,
            self.len
        );
        let slice = self.as_mut_slice();
        &mut slice[index]
    }
}

impl<T: PartialEq> PartialEq for GrowVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for GrowVec<T> {}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for GrowVec<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, const N: usize> From<[T; N]> for GrowVec<T> {
    /// Builds a vector from a fixed sequence of values.
    ///
    /// # Panics
    ///
    /// Panics if the block cannot be allocated; use
    /// [`from_slice`](Self::from_slice) for the fallible equivalent.
    #[allow(clippy::expect_used)]
    fn from(values: [T; N]) -> Self {
        let mut vec = Self::new();
        vec.reserve(N)
            .expect("allocation failed while building from an array");
        for value in values {
            vec.push(value).expect("capacity reserved above");
        }
        vec
    }
}

impl<T> FromIterator<T> for GrowVec<T> {
    /// Collects an iterator into a vector.
    ///
    /// # Panics
    ///
    /// Panics if a block cannot be allocated.
    #[allow(clippy::expect_used)]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut vec = Self::new();
        vec.reserve(iter.size_hint().0)
            .expect("allocation failed while collecting");
        for value in iter {
            vec.push(value).expect("allocation failed while collecting");
        }
        vec
    }
}
