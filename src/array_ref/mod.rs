//! Bounds-aware views over contiguous elements.
//!
//! [`ArrayRef`] is the read-only view and [`ArrayMut`] the mutable one. Both
//! store a never-null start address and an element count and can be built
//! from:
//!
//! - a fixed-size block (`new(&[T; N])`, length `N`),
//! - a slice (`from_slice`, or [`From`]),
//! - a pointer and an element count (`unsafe from_raw_parts`),
//! - a pointer range (`unsafe from_ptr_range`).
//!
//! All four produce the same view when given the same elements. Rebinding
//! (plain assignment, `assign`, `assign_raw_parts`, `assign_ptr_range`)
//! always replaces address and count together.
//!
//! Views never copy elements: a write through an [`ArrayMut`] is visible in
//! the backing storage and through every other view of it.
//!
//! ```
//! use viewref::{ArrayMut, ArrayRef};
//!
//! let mut storage = [1, 2, 3];
//! let mut view = ArrayMut::new(&mut storage);
//! view[0] = 100;
//!
//! let read_only: ArrayRef<'_, i32> = view.into_ref();
//! assert_eq!(read_only.as_slice(), [100, 2, 3]);
//! ```

mod mut_;
mod ref_;

pub use self::{mut_::ArrayMut, ref_::ArrayRef};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebind_replaces_both_fields() {
        let three = [1u16, 2, 3];
        let one = [7u16];

        let mut view = ArrayRef::new(&three);
        assert_eq!(view.len(), 3);
        assert_eq!(view.as_ptr(), three.as_ptr());

        view = ArrayRef::new(&one);
        assert_eq!(view.len(), 1);
        assert_eq!(view.as_ptr(), one.as_ptr());

        view.assign(&three[1..]);
        assert_eq!(view.len(), 2);
        assert_eq!(view.as_ptr(), three[1..].as_ptr());
    }

    #[test]
    fn test_mut_and_ref_agree() {
        let mut storage = [3u8, 1, 4, 1, 5];
        let mut view = ArrayMut::new(&mut storage);
        view[4] = 9;

        let read_only = ArrayRef::from(view);
        let collected: alloc::vec::Vec<u8> = read_only.iter().copied().collect();
        assert_eq!(collected, [3, 1, 4, 1, 9]);
    }
}
