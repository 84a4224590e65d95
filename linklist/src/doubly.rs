use core::{fmt, marker::PhantomData, ptr::NonNull};

use alloc::boxed::Box;

use crate::error::ListError;

struct Node<T> {
    value: T,
    prev: Option<NonNull<Node<T>>>,
    next: Option<NonNull<Node<T>>>,
}

/// A doubly-linked list with O(1) operations at both ends and
/// bidirectional iteration.
///
/// Positions are plain indices. Indexed operations walk from whichever end
/// is nearer.
pub struct DoublyList<T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    _owns: PhantomData<Box<Node<T>>>,
}

impl<T> DoublyList<T> {
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
            prev: None,
            next: self.head,
        })));
        match self.head {
            // Safety: head is a live node owned by this list.
            Some(mut head) => unsafe { head.as_mut().prev = Some(node) },
            None => self.tail = Some(node),
        }
        self.head = Some(node);
        self.len += 1;
    }

    /// Appends an element in O(1).
    pub fn push_back(&mut self, value: T) {
        let node = NonNull::from(Box::leak(Box::new(Node {
            value,
            prev: self.tail,
            next: None,
        })));
        match self.tail {
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
        match self.head {
            Some(mut new_head) => unsafe { new_head.as_mut().prev = None },
            None => self.tail = None,
        }
        self.len -= 1;
        Some(node.value)
    }

    /// Removes and returns the last element, or `None` if the list is
    /// empty.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        let node = unsafe { Box::from_raw(tail.as_ptr()) };
        self.tail = node.prev;
        match self.tail {
            Some(mut new_tail) => unsafe { new_tail.as_mut().next = None },
            None => self.head = None,
        }
        self.len -= 1;
        Some(node.value)
    }

    /// # Errors
    ///
    /// Returns `ListError::EmptyList` if there is nothing to pop.
    pub fn try_pop_front(&mut self) -> Result<T, ListError> {
        self.pop_front().ok_or(ListError::EmptyList)
    }

    /// # Errors
    ///
    /// Returns `ListError::EmptyList` if there is nothing to pop.
    pub fn try_pop_back(&mut self) -> Result<T, ListError> {
        self.pop_back().ok_or(ListError::EmptyList)
    }

    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.head.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    #[must_use]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    #[must_use]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.tail.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Walks to the node at `index` from the nearer end. Callers must have
    /// checked `index < len`.
    #[allow(clippy::expect_used)]
    fn node_at(&self, index: usize) -> NonNull<Node<T>> {
        debug_assert!(index < self.len);
        if index <= self.len / 2 {
            let mut current = self.head.expect("index checked against a non-zero length");
            for _ in 0..index {
                current = unsafe { current.as_ref().next.expect("chain is len nodes long") };
            }
            current
        } else {
            let mut current = self.tail.expect("index checked against a non-zero length");
            for _ in 0..(self.len - 1 - index) {
                current = unsafe { current.as_ref().prev.expect("chain is len nodes long") };
            }
            current
        }
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

    /// Inserts an element at `index`; `index == len` appends.
    ///
    /// # Errors
    ///
    /// Returns `ListError::IndexOutOfBounds` if `index > len`; the list is
    /// unchanged.
    #[allow(clippy::expect_used)]
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
        let mut successor = self.node_at(index);
        let mut predecessor =
            unsafe { successor.as_ref().prev.expect("interior position has a predecessor") };
        let node = NonNull::from(Box::leak(Box::new(Node {
            value,
            prev: Some(predecessor),
            next: Some(successor),
        })));
        unsafe {
            predecessor.as_mut().next = Some(node);
            successor.as_mut().prev = Some(node);
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
        if index == self.len - 1 {
            return Ok(self.pop_back().expect("length checked above"));
        }
        let target = self.node_at(index);
        let node = unsafe { Box::from_raw(target.as_ptr()) };
        let mut predecessor = node.prev.expect("interior node has a predecessor");
        let mut successor = node.next.expect("interior node has a successor");
        unsafe {
            predecessor.as_mut().next = Some(successor);
            successor.as_mut().prev = Some(predecessor);
        }
        self.len -= 1;
        Ok(node.value)
    }

    /// Drops every element. O(n), iterative.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Returns a double-ended iterator over the elements.
    #[must_use]
    pub fn iter(&self) -> DoublyIter<'_, T> {
        DoublyIter {
            head: self.head,
            tail: self.tail,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns a double-ended iterator yielding mutable references.
    #[must_use]
    pub fn iter_mut(&mut self) -> DoublyIterMut<'_, T> {
        DoublyIterMut {
            head: self.head,
            tail: self.tail,
            remaining: self.len,
            _marker: PhantomData,
        }
    }
}

impl<T> Default for DoublyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for DoublyList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for DoublyList<T> {
    /// Copy construction: clones every element into a fresh chain of
    /// nodes.
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for DoublyList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for DoublyList<T> {}

impl<T: fmt::Debug> fmt::Debug for DoublyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const N: usize> From<[T; N]> for DoublyList<T> {
    fn from(values: [T; N]) -> Self {
        let mut list = Self::new();
        for value in values {
            list.push_back(value);
        }
        list
    }
}

impl<T> FromIterator<T> for DoublyList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push_back(value);
        }
        list
    }
}

// The list exclusively owns its nodes.
unsafe impl<T: Send> Send for DoublyList<T> {}
unsafe impl<T: Sync> Sync for DoublyList<T> {}

/// Double-ended iterator over a [`DoublyList`]
///
/// This iterator implements `Clone` for any element type.
pub struct DoublyIter<'a, T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

// Derived Clone would require `T: Clone`; the iterator only holds
// pointers and a count.
impl<T> Clone for DoublyIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head,
            tail: self.tail,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for DoublyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.head?;
        self.remaining -= 1;
        unsafe {
            self.head = node.as_ref().next;
            Some(&(*node.as_ptr()).value)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for DoublyIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.tail?;
        self.remaining -= 1;
        unsafe {
            self.tail = node.as_ref().prev;
            Some(&(*node.as_ptr()).value)
        }
    }
}

impl<T> ExactSizeIterator for DoublyIter<'_, T> {}

/// Double-ended iterator yielding mutable references into a
/// [`DoublyList`]
pub struct DoublyIterMut<'a, T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for DoublyIterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.head?;
        self.remaining -= 1;
        unsafe {
            self.head = node.as_ref().next;
            Some(&mut (*node.as_ptr()).value)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for DoublyIterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.tail?;
        self.remaining -= 1;
        unsafe {
            self.tail = node.as_ref().prev;
            Some(&mut (*node.as_ptr()).value)
        }
    }
}

impl<T> ExactSizeIterator for DoublyIterMut<'_, T> {}

impl<'a, T> IntoIterator for &'a DoublyList<T> {
    type Item = &'a T;
    type IntoIter = DoublyIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DoublyList<T> {
    type Item = &'a mut T;
    type IntoIter = DoublyIterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
