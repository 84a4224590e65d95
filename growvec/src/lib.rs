#![no_std]

//! `GrowVec`: a growable contiguous vector built on an explicit raw-storage
//! layer.
//!
//! `GrowVec` keeps its elements in a [`rawblock::RawBlock`], a block of
//! uninitialized slots that never constructs or destroys elements itself.
//! The vector is the sole authority on which slots are live: slots
//! `[0, len)` hold constructed values, slots `[len, capacity)` are raw
//! memory. Every mutating operation re-establishes that invariant before
//! returning.
//!
//! This crate is `no_std` compatible; storage comes from the global
//! allocator through the `rawblock` layer.
//!
//! # Growth and relocation
//!
//! Appending past the capacity doubles it (minimum 1), giving O(1)
//! amortized appends. Growth allocates a fresh block, relocates the live
//! elements into it with bitwise moves, and swaps the blocks; the old
//! allocation is released by its own destructor. An allocation failure is
//! returned as an error before anything is adopted, so the vector is
//! always left in its prior state.
//!
//! ```
//! use growvec::GrowVec;
//!
//! let mut vec = GrowVec::new();
//! vec.push(1).unwrap();
//! vec.push(2).unwrap();
//! vec.push(3).unwrap();
//!
//! assert_eq!(vec.len(), 3);
//! assert_eq!(vec, [1, 2, 3]);
//! assert!(vec.capacity() >= 3);
//! ```
//!
//! # Positional operations
//!
//! `insert` accepts any position in `[0, len]` (inserting at `len`
//! appends); `remove` accepts `[0, len)` and returns the removed value.
//! Out-of-range positions are reported as errors, never silently clamped.
//!
//! ```
//! use growvec::GrowVec;
//!
//! let mut vec = GrowVec::from([1, 3]);
//! vec.insert(1, 2).unwrap();
//! assert_eq!(vec, [1, 2, 3]);
//!
//! assert_eq!(vec.remove(0).unwrap(), 1);
//! assert_eq!(vec, [2, 3]);
//! ```
//!
//! # Failure contract
//!
//! - Out-of-range positions: `GrowVecError::IndexOutOfBounds`, surfaced
//!   immediately; indexing through `[]` panics like any Rust container.
//! - Allocation failure: propagated from the storage layer with the vector
//!   unchanged.
//! - Panics from element code (`Clone`, closures passed to `push_with`,
//!   `insert_with`, `resize_with`): the vector never leaks or double-drops;
//!   the per-operation documentation states what has and has not happened
//!   when such a panic unwinds through it.
//!
//! # Complexity
//!
//! - `push`, `pop`: O(1) amortized / O(1)
//! - `insert`, `remove`: O(n) in the distance to the end
//! - `get`, indexing: O(1)
//! - `reserve`, `clone_from`: O(n)
//!
//! Zero-sized element types are rejected by the storage layer with
//! `RawBlockError::ZeroSizedType`.

mod core;
mod error;
mod iter;

pub use crate::core::GrowVec;
pub use crate::error::GrowVecError;
pub use crate::iter::{Iter, IterMut};
