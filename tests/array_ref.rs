//! Integration tests for the array views.
//!
//! - `test_view_over_three_elements`: length, indexing and write-through
//! - `test_constructors_agree`: block, slice, pointer+count and pointer range
//!   produce the same view
//! - `test_rebind_is_whole`: rebinding updates address and length together
//! - `test_iteration_matches_storage`: iteration yields `len` elements in order
//!   and reflects later writes
//! - `test_views_share_storage`: writes are visible through other views
//! - `test_out_of_range_*`: out-of-range indexing panics

use std::{cell::Cell, ptr::NonNull};

use viewref::{ArrayMut, ArrayRef};

#[test]
fn test_view_over_three_elements() {
    let mut storage = [1, 2, 3];
    let mut view = ArrayMut::new(&mut storage);

    assert_eq!(view.len(), 3);
    assert_eq!(view[0], 1);
    assert_eq!(view[2], 3);

    view[0] = 100;
    assert_eq!(view[0], 100);
    assert_eq!(storage, [100, 2, 3]);
}

#[test]
fn test_constructors_agree() {
    let storage = vec![4u32, 5, 6, 7];
    let block: &[u32; 4] = storage.as_slice().try_into().unwrap();

    let from_block = ArrayRef::new(block);
    let from_slice = ArrayRef::from_slice(&storage);
    let from_into: ArrayRef<'_, u32> = storage.as_slice().into();

    let begin = NonNull::from(storage.as_slice()).cast::<u32>();
    // SAFETY: `begin` points to the four initialized elements of `storage`.
    let from_parts = unsafe { ArrayRef::from_raw_parts(begin, storage.len()) };
    // SAFETY: `begin + 4` is one past the end of the same allocation.
    let end = unsafe { begin.add(storage.len()) };
    // SAFETY: `begin..end` spans exactly the elements of `storage`.
    let from_range = unsafe { ArrayRef::from_ptr_range(begin, end) };

    for view in [from_slice, from_into, from_parts, from_range] {
        assert!(view.ptr_eq(from_block));
        assert_eq!(view.len(), 4);
        assert_eq!(view.as_slice(), [4, 5, 6, 7]);
    }
}

#[test]
fn test_rebind_is_whole() {
    let three = [1, 2, 3];
    let one = [42];

    let mut view = ArrayRef::new(&three);
    let before = (view.as_ptr(), view.len());
    assert_eq!(before, (three.as_ptr(), 3));

    view = ArrayRef::new(&one);
    assert_eq!((view.as_ptr(), view.len()), (one.as_ptr(), 1));

    view.assign(&three);
    assert_eq!((view.as_ptr(), view.len()), before);

    let tail = NonNull::from(&three[1]);
    // SAFETY: `tail` points to the last two elements of `three`.
    unsafe { view.assign_raw_parts(tail, 2) };
    assert_eq!(view.as_slice(), [2, 3]);

    let begin = NonNull::from(&one).cast::<i32>();
    // SAFETY: one past the end of `one`.
    let end = unsafe { begin.add(1) };
    // SAFETY: `begin..end` spans `one`.
    unsafe { view.assign_ptr_range(begin, end) };
    assert_eq!((view.as_ptr(), view.len()), (one.as_ptr(), 1));
}

#[test]
fn test_iteration_matches_storage() {
    let storage = [Cell::new(1), Cell::new(2), Cell::new(3)];
    let view = ArrayRef::new(&storage);

    let range = view.as_ptr_range();
    assert_eq!(range.start, view.as_ptr());
    assert_eq!(range.end, view.as_ptr().wrapping_add(view.len()));
    assert_eq!(view.iter().count(), view.len());

    let first: Vec<i32> = view.iter().map(Cell::get).collect();
    assert_eq!(first, [1, 2, 3]);

    storage[1].set(20);
    let second: Vec<i32> = view.into_iter().map(Cell::get).collect();
    assert_eq!(second, [1, 20, 3]);
}

#[test]
fn test_views_share_storage() {
    let mut storage = vec![0u8; 3];
    let mut writer = ArrayMut::from_slice(&mut storage);

    {
        let mut second = writer.reborrow();
        second[1] = 9;
        for value in second.iter_mut() {
            *value += 1;
        }
    }

    let reader = writer.as_ref();
    assert_eq!(reader.as_slice(), [1, 10, 1]);
    assert_eq!(reader.get(3), None);
    assert_eq!(storage, [1, 10, 1]);
}

#[test]
fn test_empty_view() {
    let empty: Vec<String> = Vec::new();
    let view = ArrayRef::from_slice(&empty);

    assert!(view.is_empty());
    assert!(!view.as_ptr().is_null());
    assert_eq!(view.iter().next(), None);
    assert_eq!(format!("{view:?}"), "[]");
}

#[test]
#[should_panic(expected = "index out of bounds: the len is 3 but the index is 3")]
fn test_out_of_range_read() {
    let storage = [1, 2, 3];
    let view = ArrayRef::new(&storage);
    let _element = view[3];
}

#[test]
#[should_panic(expected = "index out of bounds: the len is 0 but the index is 0")]
fn test_out_of_range_empty() {
    let mut storage: [u8; 0] = [];
    let mut view = ArrayMut::new(&mut storage);
    view[0] = 1;
}
