use growvec::{GrowVec, GrowVecError};
use rawblock::RawBlockError;

#[test]
fn test_capacity_doubles_from_one() {
    let mut vec = GrowVec::new();
    let mut seen = Vec::new();

    for i in 0..9 {
        vec.push(i).unwrap();
        seen.push(vec.capacity());
    }

    // 1, then doubling on each exhaustion.
    assert_eq!(seen, vec![1, 2, 4, 4, 8, 8, 8, 8, 16]);
}

#[test]
fn test_capacity_never_shrinks_during_growth() {
    let mut vec = GrowVec::new();
    let mut previous = 0;

    for i in 0..100 {
        vec.push(i).unwrap();
        assert!(vec.capacity() >= vec.len());
        assert!(vec.capacity() >= previous);
        previous = vec.capacity();
    }
}

#[test]
fn test_reserve_allocates_exactly() {
    let mut vec: GrowVec<u8> = GrowVec::new();
    vec.reserve(10).unwrap();

    assert_eq!(vec.capacity(), 10);
    assert_eq!(vec.len(), 0);
}

#[test]
fn test_reserve_below_capacity_is_noop() {
    let mut vec: GrowVec<u8> = GrowVec::new();
    vec.reserve(10).unwrap();
    let ptr = vec.as_ptr();

    vec.reserve(5).unwrap();
    vec.reserve(10).unwrap();

    assert_eq!(vec.capacity(), 10);
    assert_eq!(vec.as_ptr(), ptr); // same block
}

#[test]
fn test_reserve_preserves_elements() {
    let mut vec = GrowVec::from([1, 2, 3]);
    vec.reserve(100).unwrap();

    assert_eq!(vec.capacity(), 100);
    assert_eq!(vec, [1, 2, 3]);
}

#[test]
fn test_push_within_reserved_capacity_keeps_block() {
    let mut vec = GrowVec::new();
    vec.reserve(8).unwrap();
    let ptr = vec.as_ptr();

    for i in 0..8 {
        vec.push(i).unwrap();
    }

    assert_eq!(vec.as_ptr(), ptr);
    assert_eq!(vec.capacity(), 8);
}

#[test]
fn test_resize_grows_with_defaults() {
    let mut vec = GrowVec::from([1, 2]);
    vec.resize(5).unwrap();

    assert_eq!(vec, [1, 2, 0, 0, 0]);
}

#[test]
fn test_resize_shrinks() {
    let mut vec = GrowVec::from([1, 2, 3, 4, 5]);
    let capacity = vec.capacity();

    vec.resize(2).unwrap();

    assert_eq!(vec, [1, 2]);
    assert_eq!(vec.capacity(), capacity); // shrinking keeps the block
}

#[test]
fn test_resize_with_generator() {
    let mut vec: GrowVec<usize> = GrowVec::new();
    let mut next = 0;
    vec.resize_with(4, || {
        next += 1;
        next
    })
    .unwrap();

    assert_eq!(vec, [1, 2, 3, 4]);
}

#[test]
fn test_resize_beyond_capacity_at_least_doubles() {
    let mut vec: GrowVec<u8> = GrowVec::new();
    vec.reserve(8).unwrap();
    vec.resize(9).unwrap();

    // Growth takes max(2 * capacity, requested).
    assert_eq!(vec.capacity(), 16);
}

#[test]
fn test_truncate_and_clear_keep_capacity() {
    let mut vec = GrowVec::from([1, 2, 3, 4]);
    let capacity = vec.capacity();

    vec.truncate(2);
    assert_eq!(vec, [1, 2]);

    vec.clear();
    assert!(vec.is_empty());
    assert_eq!(vec.capacity(), capacity);
}

#[test]
fn test_truncate_past_len_is_noop() {
    let mut vec = GrowVec::from([1, 2]);
    vec.truncate(10);

    assert_eq!(vec, [1, 2]);
}

#[test]
fn test_zero_sized_elements_are_rejected() {
    let mut vec: GrowVec<()> = GrowVec::new();

    let err = vec.push(()).unwrap_err();
    assert_eq!(
        err,
        GrowVecError::Storage(RawBlockError::ZeroSizedType)
    );
    assert!(vec.is_empty());
}

#[test]
fn test_failed_reserve_leaves_vector_unchanged() {
    let mut vec = GrowVec::from([1u64, 2, 3]);

    // A capacity that cannot be laid out must be reported, not adopted.
    let err = vec.reserve(usize::MAX).unwrap_err();
    assert_eq!(
        err,
        GrowVecError::Storage(RawBlockError::CapacityOverflow {
            capacity: usize::MAX
        })
    );
    assert_eq!(vec, [1, 2, 3]);
    assert_eq!(vec.capacity(), 3);
}
