//! Behavior when element code panics: constructors passed to the
//! `_with` operations and `Clone` implementations may unwind, and the
//! vector must come out consistent, with every constructed element
//! dropped exactly once.

use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use growvec::GrowVec;

/// Counts drops and panics once its clone budget runs out.
struct Volatile {
    drops: Rc<Cell<usize>>,
    clones_left: Rc<Cell<usize>>,
}

impl Volatile {
    fn new(drops: &Rc<Cell<usize>>, clones_left: &Rc<Cell<usize>>) -> Self {
        Self {
            drops: Rc::clone(drops),
            clones_left: Rc::clone(clones_left),
        }
    }
}

impl Clone for Volatile {
    fn clone(&self) -> Self {
        let left = self.clones_left.get();
        assert!(left > 0, "clone budget exhausted");
        self.clones_left.set(left - 1);
        Self {
            drops: Rc::clone(&self.drops),
            clones_left: Rc::clone(&self.clones_left),
        }
    }
}

impl Drop for Volatile {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

#[test]
fn test_panicking_push_with_leaves_vector_unchanged() {
    let mut vec = GrowVec::from([1, 2, 3]);
    vec.reserve(8).unwrap();
    let block = vec.as_ptr();

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = vec.push_with(|| -> i32 { panic!("constructor failed") });
    }));

    assert!(result.is_err());
    assert_eq!(vec, [1, 2, 3]);
    assert_eq!(vec.as_ptr(), block);
    assert_eq!(vec.capacity(), 8);
}

#[test]
fn test_panicking_push_with_on_growth_path() {
    let mut vec = GrowVec::from([1, 2, 3]);
    assert_eq!(vec.len(), vec.capacity()); // the next append must grow
    let block = vec.as_ptr();

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = vec.push_with(|| -> i32 { panic!("constructor failed") });
    }));

    assert!(result.is_err());
    // The candidate block was never adopted; the old one is untouched.
    assert_eq!(vec, [1, 2, 3]);
    assert_eq!(vec.as_ptr(), block);
    assert_eq!(vec.capacity(), 3);
}

#[test]
fn test_panicking_insert_with_leaves_vector_unchanged() {
    let mut vec = GrowVec::from([1, 2, 3]);
    vec.reserve(8).unwrap();

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = vec.insert_with(1, || -> i32 { panic!("constructor failed") });
    }));

    assert!(result.is_err());
    // The shift never started: the closure runs before any mutation.
    assert_eq!(vec, [1, 2, 3]);
}

#[test]
fn test_panicking_growth_path_drops_nothing() {
    let drops = Rc::new(Cell::new(0));
    let clones = Rc::new(Cell::new(usize::MAX));
    let mut vec = GrowVec::new();
    for _ in 0..4 {
        vec.push(Volatile::new(&drops, &clones)).unwrap();
    }
    assert_eq!(vec.len(), vec.capacity());

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = vec.insert_with(2, || -> Volatile { panic!("constructor failed") });
    }));

    assert!(result.is_err());
    // The live elements were never relocated, so none may be destroyed.
    assert_eq!(drops.get(), 0);
    assert_eq!(vec.len(), 4);

    drop(vec);
    assert_eq!(drops.get(), 4);
}

#[test]
fn test_panicking_resize_generator_keeps_constructed_prefix() {
    let drops = Rc::new(Cell::new(0));
    let clones = Rc::new(Cell::new(usize::MAX));
    let mut vec: GrowVec<Volatile> = GrowVec::new();
    vec.reserve(8).unwrap();

    let result = catch_unwind(AssertUnwindSafe(|| {
        let mut built = 0;
        let _ = vec.resize_with(5, || {
            assert!(built < 3, "generator failed");
            built += 1;
            Volatile::new(&drops, &clones)
        });
    }));

    assert!(result.is_err());
    // Everything constructed before the panic is live and counted.
    assert_eq!(vec.len(), 3);
    assert_eq!(drops.get(), 0);

    drop(vec);
    assert_eq!(drops.get(), 3);
}

#[test]
fn test_panicking_clone_mid_tail_keeps_drop_counts_exact() {
    let drops = Rc::new(Cell::new(0));
    // Prefix assignment clones once, then one tail element succeeds and
    // the second tail clone panics.
    let clones = Rc::new(Cell::new(2));

    let mut target = GrowVec::new();
    target.reserve(4).unwrap();
    target.push(Volatile::new(&drops, &clones)).unwrap();

    let mut source = GrowVec::new();
    source.reserve(3).unwrap();
    for _ in 0..3 {
        source.push(Volatile::new(&drops, &clones)).unwrap();
    }

    let result = catch_unwind(AssertUnwindSafe(|| {
        target.clone_from(&source);
    }));

    assert!(result.is_err());
    // The overwritten prefix element is the only drop so far, and the
    // tail element constructed before the panic is inside the live range.
    assert_eq!(drops.get(), 1);
    assert_eq!(target.len(), 2);

    drop(target);
    drop(source);
    // 1 original target element, 3 source elements, 2 successful clones:
    // six constructions, six drops.
    assert_eq!(drops.get(), 6);
}
