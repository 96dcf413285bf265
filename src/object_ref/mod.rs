//! Never-null references to a single value.
//!
//! Three flavours share the same representation (one non-null address plus a
//! lifetime) and differ only in what they allow:
//!
//! | type          | behaves like  | `Copy` | access     | consumed by        |
//! |---------------|---------------|--------|------------|--------------------|
//! | [`ObjectRef`] | `&'a T`       | yes    | read-only  | nothing            |
//! | [`ObjectMut`] | `&'a mut T`   | no     | read/write | nothing            |
//! | [`MoveRef`]   | `&'a mut T`   | no     | read/write | [`take`] once      |
//!
//! # Comparisons
//!
//! Comparing two references (of any flavour, in either order) compares
//! *addresses*: `a == b` iff both denote the same object. Comparing a
//! reference with a borrowed value (`a == &value`) compares *values* using
//! `T: PartialEq`. For the reverse direction, dereference the reference:
//! `value == *a`.
//!
//! ```
//! use viewref::{ObjectMut, ObjectRef};
//!
//! let mut first = 1;
//! let second = 1;
//!
//! let a = ObjectMut::new(&mut first);
//! let b = ObjectRef::new(&second);
//!
//! assert_ne!(a, b); // different objects
//! assert_eq!(a, &second); // equal values
//! assert!(second == *a);
//! ```
//!
//! # Helpers
//!
//! - [`with`] applies a closure to the referent, with mutable access when the
//!   reference is mutable.
//! - [`copy`] produces an independent copy of the referent.
//! - [`take`] consumes a [`MoveRef`] and moves the referent out.

mod move_;
mod mut_;
mod ref_;

pub use self::{move_::MoveRef, mut_::ObjectMut, ref_::ObjectRef};

/// A reference that can hand out access to its referent for [`with`].
///
/// Read-only references hand out `&T`, mutable ones hand out `&mut T`. This
/// trait is sealed.
pub trait Referent: sealed::Sealed {
    /// The kind of access handed out: `&T` or `&mut T`.
    type Access;

    /// Converts the reference into the access it grants.
    fn into_access(self) -> Self::Access;
}

mod sealed {
    pub trait Sealed {}
}

impl<'a, T: ?Sized> sealed::Sealed for ObjectRef<'a, T> {}
impl<'a, T: ?Sized> Referent for ObjectRef<'a, T> {
    type Access = &'a T;

    #[inline]
    fn into_access(self) -> &'a T {
        self.get()
    }
}

impl<'a, T: ?Sized> sealed::Sealed for ObjectMut<'a, T> {}
impl<'a, T: ?Sized> Referent for ObjectMut<'a, T> {
    type Access = &'a mut T;

    #[inline]
    fn into_access(self) -> &'a mut T {
        self.into_mut()
    }
}

impl<'r, 'a, T: ?Sized> sealed::Sealed for &'r mut ObjectMut<'a, T> {}
impl<'r, 'a, T: ?Sized> Referent for &'r mut ObjectMut<'a, T> {
    type Access = &'r mut T;

    #[inline]
    fn into_access(self) -> &'r mut T {
        self.get_mut()
    }
}

impl<'a, T: ?Sized> sealed::Sealed for MoveRef<'a, T> {}
impl<'a, T: ?Sized> Referent for MoveRef<'a, T> {
    type Access = &'a mut T;

    #[inline]
    fn into_access(self) -> &'a mut T {
        self.into_object_mut().into_mut()
    }
}

/// Invokes `f` with the referent of `reference` and the extra `args`,
/// forwarding the return value.
///
/// The referent is passed as `&T` for an [`ObjectRef`] and as `&mut T` for an
/// [`ObjectMut`] (owned or borrowed) or a [`MoveRef`]. This makes it visible at
/// the call site that the code touches the live object, not a copy.
///
/// # Examples
///
/// ```
/// use viewref::{ObjectMut, with};
///
/// let mut total = 10;
/// let mut reference = ObjectMut::new(&mut total);
///
/// let doubled = with(&mut reference, 5, |value, extra| {
///     *value += extra;
///     *value * 2
/// });
///
/// assert_eq!(doubled, 30);
/// assert_eq!(total, 15);
/// ```
#[inline]
pub fn with<R, A, F, Out>(reference: R, args: A, f: F) -> Out
where
    R: Referent,
    F: FnOnce(R::Access, A) -> Out,
{
    f(reference.into_access(), args)
}

/// Produces an independent copy of the referent.
///
/// Accepts anything that widens into an [`ObjectRef`]: a plain `&T`, an
/// [`ObjectRef`] or an [`ObjectMut`].
///
/// # Examples
///
/// ```
/// use viewref::{ObjectRef, copy};
///
/// let original = String::from("data");
/// let reference = ObjectRef::new(&original);
///
/// let mut duplicate = copy(reference);
/// duplicate.push('!');
/// assert_eq!(original, "data");
/// assert_eq!(duplicate, "data!");
/// ```
#[inline]
#[must_use]
pub fn copy<'a, T>(reference: impl Into<ObjectRef<'a, T>>) -> T
where
    T: Clone + 'a,
{
    reference.into().copied()
}

/// Moves the referent out of a [`MoveRef`], leaving `T::default()` behind.
///
/// # Examples
///
/// ```
/// use viewref::{MoveRef, take};
///
/// let mut name = String::from("ferris");
/// let moved = take(MoveRef::new(&mut name));
/// assert_eq!(moved, "ferris");
/// assert!(name.is_empty());
/// ```
#[inline]
#[must_use = "moving out of a MoveRef without using the value only resets the referent"]
pub fn take<T: Default>(reference: MoveRef<'_, T>) -> T {
    reference.take()
}

/// Implements address-identity comparisons between every pair of reference
/// flavours.
macro_rules! impl_address_eq {
    ($($lhs:ident => $($rhs:ident),+;)+) => {$($(
        impl<'a, 'b, T: ?Sized> PartialEq<$rhs<'b, T>> for $lhs<'a, T> {
            #[inline]
            fn eq(&self, other: &$rhs<'b, T>) -> bool {
                core::ptr::addr_eq(self.as_ptr(), other.as_ptr())
            }
        }
    )+)+};
}

impl_address_eq! {
    ObjectRef => ObjectRef, ObjectMut, MoveRef;
    ObjectMut => ObjectRef, ObjectMut, MoveRef;
    MoveRef => ObjectRef, ObjectMut, MoveRef;
}

/// Implements value comparisons between a reference and a borrowed value.
macro_rules! impl_value_eq {
    ($($lhs:ident),+) => {$(
        impl<'a, 'b, T: ?Sized + PartialEq> PartialEq<&'b T> for $lhs<'a, T> {
            #[inline]
            fn eq(&self, other: &&'b T) -> bool {
                *self.get() == **other
            }
        }
    )+};
}

impl_value_eq!(ObjectRef, ObjectMut, MoveRef);

impl<'a, T: ?Sized> Eq for ObjectRef<'a, T> {}
impl<'a, T: ?Sized> Eq for ObjectMut<'a, T> {}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Tracked {
        id: u32,
        copies: u32,
    }

    #[test]
    fn test_with_read_only() {
        let value = Tracked { id: 4, copies: 0 };
        let reference = ObjectRef::new(&value);

        let id = with(reference, (), |tracked: &Tracked, ()| tracked.id);
        assert_eq!(id, 4);
    }

    #[test]
    fn test_with_consuming_object_mut() {
        let mut value = Tracked::default();
        let id = with(ObjectMut::new(&mut value), 9, |tracked, id| {
            tracked.id = id;
            tracked.id + 1
        });
        assert_eq!(id, 10);
        assert_eq!(value.id, 9);
    }

    #[test]
    fn test_with_move_ref() {
        let mut text = String::from("a");
        with(MoveRef::new(&mut text), 'b', |text, c| text.push(c));
        assert_eq!(text, "ab");
    }

    #[test]
    fn test_copy_is_independent() {
        let original = Tracked { id: 1, copies: 0 };
        let mut duplicate = copy(&original);
        duplicate.copies += 1;

        assert_eq!(original.copies, 0);
        assert_eq!(duplicate.id, original.id);
    }

    #[test]
    fn test_copy_from_object_mut() {
        let mut original = Tracked { id: 2, copies: 0 };
        let reference = ObjectMut::new(&mut original);
        let duplicate = copy(reference);
        assert_eq!(duplicate, Tracked { id: 2, copies: 0 });
    }

    #[test]
    fn test_mixed_address_eq() {
        let mut first = 1u8;
        let second = 1u8;

        let a = ObjectMut::new(&mut first);
        let b = ObjectRef::new(&second);
        let c = a.as_ref();

        assert_eq!(c, a);
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_ne!(b, a);
        assert_eq!(a, &second);
        assert_eq!(b, &first_value());
    }

    fn first_value() -> u8 {
        1
    }
}
