#![no_std]

//! Singly- and doubly-linked lists with index-based positions.
//!
//! [`SinglyList`] links each node forward only; [`DoublyList`] links both
//! ways and adds O(1) access to the back. Both lists address elements by
//! plain `usize` index, so there is no cursor or node handle to invalidate:
//! positional operations validate the index and report
//! `ListError::IndexOutOfBounds` when it is out of range.
//!
//! This crate is `no_std` compatible; nodes are individual heap
//! allocations.
//!
//! ```
//! use linklist::SinglyList;
//!
//! let mut list = SinglyList::new();
//! list.push_back(1);
//! list.push_back(3);
//! list.insert(1, 2).unwrap();
//!
//! assert_eq!(list.len(), 3);
//! assert!(list.iter().eq([1, 2, 3].iter()));
//! ```
//!
//! The doubly-linked list iterates from either end:
//!
//! ```
//! use linklist::DoublyList;
//!
//! let list = DoublyList::from([1, 2, 3]);
//! assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), [3, 2, 1]);
//! ```
//!
//! # Complexity
//!
//! - `push_front`, `pop_front`: O(1) on both lists
//! - `push_back`: O(1) on both lists (singly keeps a tail pointer)
//! - `pop_back`: O(1) on [`DoublyList`] only
//! - `get`, `insert`, `remove`: O(n) walk to the position; [`DoublyList`]
//!   walks from the nearer end

extern crate alloc;

mod doubly;
mod error;
mod singly;

pub use crate::doubly::{DoublyIter, DoublyIterMut, DoublyList};
pub use crate::error::ListError;
pub use crate::singly::{SinglyIter, SinglyIterMut, SinglyList};
