use core::{fmt, marker::PhantomData, ptr::NonNull};

use alloc::boxed::Box;

use crate::error::ListError;

struct Node<T> {
    value: T,
    next: Option<NonNull<Node<T>>>,
}

/// A singly-linked list with O(1) operations at both ends.
///
/// Positions are plain indices; the node representation never leaves this
/// module. Indexed operations walk the chain and cost O(n).
pub struct SinglyList<T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    _owns: PhantomData<Box<Node<T>>>,
}

impl<T> SinglyList<T> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _owns: PhantomData,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Prepends an element in O(1).
    pub fn push_front(&mut self, value: T) {
        let node = NonNull::from(Box::leak(Box::new(Node {
            value,
            next: self.head,
        })));
        self.head = Some(node);
        if self.len == 0 {
            self.tail = Some(node);
        }
        self.len += 1;
    }

    /// Appends an element in O(1).
    pub fn push_back(&mut self, value: T) {
        let node = NonNull::from(Box::leak(Box::new(Node { value, next: None })));
        match self.tail {
            // Safety: tail is a live node owned by this list.
            Some(mut tail) => unsafe { tail.as_mut().next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
    }

    /// Removes and returns the first element, or `None` if the list is
    /// empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        // Safety: head came out of Box::leak and is owned by this list.
        let node = unsafe { Box::from_raw(head.as_ptr()) };
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        Some(node.value)
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// Returns `ListError::EmptyList` if there is nothing to pop.
    pub fn try_pop_front(&mut self) -> Result<T, ListError> {
        self.pop_front().ok_or(ListError::EmptyList)
    }

    #[must_use]
    pub fn front(&self) -> Option<&T> {
        // Safety: head is a live node owned by this list.
        self.head.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    #[must_use]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Walks to the node at `index`. Callers must have checked
    /// `index < len`.
    #[allow(clippy::expect_used)]
    fn node_at(&self, index: usize) -> NonNull<Node<T>> {
        debug_assert!(index < self.len);
        let mut current = self.head.expect("index checked against a non-zero length");
        for _ in 0..index {
            current = unsafe { current.as_ref().next.expect("chain is len nodes long") };
        }
        current
    }

    /// Returns a reference to the element at `index`, or `None` if it is
    /// out of bounds. O(n).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let node = self.node_at(index);
        Some(unsafe { &(*node.as_ptr()).value })
    }

    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let node = self.node_at(index);
        Some(unsafe { &mut (*node.as_ptr()).value })
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ListError::IndexOutOfBounds` if `index >= len`.
    pub fn try_get(&self, index: usize) -> Result<&T, ListError> {
        self.get(index).ok_or(ListError::IndexOutOfBounds {
            index,
            length: self.len,
        })
    }

    /// Inserts an element at `index`, shifting nothing: the splice itself
    /// is O(1) once the predecessor is reached. `index == len` appends.
    ///
    /// # Errors
    ///
    /// Returns `ListError::IndexOutOfBounds` if `index > len`; the list is
    /// unchanged.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), ListError> {
        if index > self.len {
            return Err(ListError::IndexOutOfBounds {
                index,
                length: self.len,
            });
        }
        if index == 0 {
            self.push_front(value);
            return Ok(());
        }
        if index == self.len {
            self.push_back(value);
            return Ok(());
        }
        let mut prev = self.node_at(index - 1);
        unsafe {
            let node = NonNull::from(Box::leak(Box::new(Node {
                value,
                next: prev.as_ref().next,
            })));
            prev.as_mut().next = Some(node);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes the element at `index` and returns it.
    ///
    /// # Errors
    ///
    /// Returns `ListError::IndexOutOfBounds` if `index >= len`.
    #[allow(clippy::expect_used)]
    pub fn remove(&mut self, index: usize) -> Result<T, ListError> {
        if index >= self.len {
            return Err(ListError::IndexOutOfBounds {
                index,
                length: self.len,
            });
        }
        if index == 0 {
            return Ok(self.pop_front().expect("length checked above"));
        }
        let mut prev = self.node_at(index - 1);
        unsafe {
            let target = prev.as_ref().next.expect("removed node has a predecessor");
            let node = Box::from_raw(target.as_ptr());
            prev.as_mut().next = node.next;
            if node.next.is_none() {
                self.tail = Some(prev);
            }
            self.len -= 1;
            Ok(node.value)
        }
    }

    /// Drops every element. O(n), iterative.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Returns an iterator over the elements, front to back.
    #[must_use]
    pub fn iter(&self) -> SinglyIter<'_, T> {
        SinglyIter {
            next: self.head,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator yielding mutable references, front to back.
    #[must_use]
    pub fn iter_mut(&mut self) -> SinglyIterMut<'_, T> {
        SinglyIterMut {
            next: self.head,
            remaining: self.len,
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SinglyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for SinglyList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for SinglyList<T> {
    /// Copy construction: clones every element into a fresh chain of
    /// nodes.
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for SinglyList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SinglyList<T> {}

impl<T: fmt::Debug> fmt::Debug for SinglyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const N: usize> From<[T; N]> for SinglyList<T> {
    fn from(values: [T; N]) -> Self {
        let mut list = Self::new();
        for value in values {
            list.push_back(value);
        }
        list
    }
}

impl<T> FromIterator<T> for SinglyList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push_back(value);
        }
        list
    }
}

// The list exclusively owns its nodes.
unsafe impl<T: Send> Send for SinglyList<T> {}
unsafe impl<T: Sync> Sync for SinglyList<T> {}

/// Iterator over a [`SinglyList`]
///
/// This iterator implements `Clone` for any element type.
pub struct SinglyIter<'a, T> {
    next: Option<NonNull<Node<T>>>,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

// Derived Clone would require `T: Clone`; the iterator only holds a
// pointer and a count.
impl<T> Clone for SinglyIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for SinglyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.remaining -= 1;
        unsafe {
            self.next = node.as_ref().next;
            Some(&(*node.as_ptr()).value)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for SinglyIter<'_, T> {}

/// Iterator yielding mutable references into a [`SinglyList`]
pub struct SinglyIterMut<'a, T> {
    next: Option<NonNull<Node<T>>>,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for SinglyIterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.remaining -= 1;
        unsafe {
            self.next = node.as_ref().next;
            Some(&mut (*node.as_ptr()).value)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for SinglyIterMut<'_, T> {}

impl<'a, T> IntoIterator for &'a SinglyList<T> {
    type Item = &'a T;
    type IntoIter = SinglyIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SinglyList<T> {
    type Item = &'a mut T;
    type IntoIter = SinglyIterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
