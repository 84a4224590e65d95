use core::{marker::PhantomData, ptr::NonNull};

use crate::core::GrowVec;

/// Iterator over the live elements of a [`GrowVec`].
///
/// This iterator implements `Clone` for any element type.
pub struct Iter<'a, T> {
    ptr: NonNull<T>,
    end: NonNull<T>,
    _marker: PhantomData<&'a T>,
}

// Derived Clone would require `T: Clone`; the iterator only holds
// pointers.
impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            ptr: self.ptr,
            end: self.end,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(vec: &'a GrowVec<T>) -> Self {
        let (ptr, end) = vec.bounds();
        Self {
            ptr,
            end,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.ptr == self.end {
            return None;
        }
        // Safety: ptr is below end, so it addresses a live element.
        let item = unsafe { self.ptr.as_ref() };
        self.ptr = unsafe { NonNull::new_unchecked(self.ptr.as_ptr().add(1)) };
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = unsafe { self.end.as_ptr().offset_from(self.ptr.as_ptr()) } as usize;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.ptr == self.end {
            return None;
        }
        self.end = unsafe { NonNull::new_unchecked(self.end.as_ptr().sub(1)) };
        // Safety: end has moved onto the last unvisited live element.
        Some(unsafe { self.end.as_ref() })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Iterator yielding mutable references to the live elements of a
/// [`GrowVec`].
pub struct IterMut<'a, T> {
    ptr: NonNull<T>,
    end: NonNull<T>,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(vec: &'a mut GrowVec<T>) -> Self {
        let (ptr, end) = vec.bounds();
        Self {
            ptr,
            end,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.ptr == self.end {
            return None;
        }
        // Safety: ptr is below end; each element is handed out once.
        let item = unsafe { &mut *self.ptr.as_ptr() };
        self.ptr = unsafe { NonNull::new_unchecked(self.ptr.as_ptr().add(1)) };
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = unsafe { self.end.as_ptr().offset_from(self.ptr.as_ptr()) } as usize;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.ptr == self.end {
            return None;
        }
        self.end = unsafe { NonNull::new_unchecked(self.end.as_ptr().sub(1)) };
        Some(unsafe { &mut *self.end.as_ptr() })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<'a, T> IntoIterator for &'a GrowVec<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowVec<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
