use core::ptr::NonNull;

use unsize::CoerciblePtr;

use crate::ObjectRef;

/// FIXME: Once rust-lang/rust#132922 gets resolved, we can make the `ptr` field
/// an unsafe field and remove this module.
mod limit_field_access {
    use core::{marker::PhantomData, ptr::NonNull};

    /// A mutable, never-null reference to a single value.
    ///
    /// [`ObjectMut`] behaves like a `&'a mut T`. It grants exclusive access
    /// to the referent for `'a`, so it is neither `Copy` nor `Clone`; use
    /// [`reborrow`](ObjectMut::reborrow) to hand out a shorter-lived
    /// [`ObjectMut`] without giving this one up.
    ///
    /// # Key Characteristics
    ///
    /// - **Not `Copy` or `Clone`**: Ensures exclusive mutable access
    /// - **Lifetime-bound**: Tied to the lifetime of the referent
    /// - **Widening only**: converts into an [`ObjectRef`] via
    ///   [`as_ref`](ObjectMut::as_ref), [`into_ref`](ObjectMut::into_ref) or
    ///   [`From`]; there is no way back from [`ObjectRef`] to [`ObjectMut`]
    ///
    /// # Examples
    ///
    /// ```
    /// use viewref::{ObjectMut, ObjectRef};
    ///
    /// let mut counter = 0;
    /// let mut reference = ObjectMut::new(&mut counter);
    /// *reference += 1;
    ///
    /// let read_only: ObjectRef<'_, i32> = reference.into_ref();
    /// assert_eq!(read_only, &1);
    /// ```
    ///
    /// [`ObjectRef`]: crate::ObjectRef
    // # Safety invariants
    //
    // This reference behaves like a `&'a mut T` and upholds the usual safety
    // invariants of mutable references:
    //
    // 1. The pointee is properly initialized for the entire lifetime `'a`.
    // 2. The pointee is not accessed through any pointer not derived from this
    //    one for the entire lifetime `'a`.
    #[repr(transparent)]
    pub struct ObjectMut<'a, T: ?Sized> {
        /// # Safety
        ///
        /// The following safety invariants are guaranteed to be upheld as long
        /// as this struct exists:
        ///
        /// 1. The pointer was derived from a `&'a mut T`.
        /// 2. The pointer is not changed for the lifetime of this struct.
        ptr: NonNull<T>,
        _marker: PhantomData<&'a mut T>,
    }

    impl<'a, T: ?Sized> ObjectMut<'a, T> {
        /// Binds a new [`ObjectMut`] to `value`.
        #[inline]
        #[must_use]
        pub fn new(value: &'a mut T) -> Self {
            // SAFETY: We must uphold the safety invariants of the ptr field:
            // 1. The pointer is derived from a `&'a mut T`.
            // 2. The pointer is never changed after construction.
            Self {
                ptr: NonNull::from(value),
                _marker: PhantomData,
            }
        }

        /// Creates a new [`ObjectMut`] from a pointer.
        ///
        /// # Safety
        ///
        /// The caller must ensure:
        ///
        /// 1. The pointee is properly initialized for the entire lifetime
        ///    `'a`.
        /// 2. The pointee is not accessed through any pointer not derived
        ///    from `ptr` for the entire lifetime `'a`.
        #[inline]
        #[must_use]
        pub(crate) const unsafe fn from_non_null(ptr: NonNull<T>) -> Self {
            // SAFETY: We must uphold the safety invariants of the ptr field:
            // 1. Guaranteed by the caller
            // 2. The pointer is never changed after construction.
            Self {
                ptr,
                _marker: PhantomData,
            }
        }

        /// Returns the address of the referent as a [`NonNull`].
        #[inline]
        #[must_use]
        pub const fn as_non_null(&self) -> NonNull<T> {
            self.ptr
        }
    }
}

pub use limit_field_access::ObjectMut;

impl<'a, T: ?Sized> ObjectMut<'a, T> {
    /// Returns shared access to the referent.
    #[inline]
    #[must_use]
    pub fn get(&self) -> &T {
        let ptr = self.as_non_null();

        // SAFETY:
        // 1. The pointee is properly initialized (guaranteed by the invariants of
        //    this type)
        // 2. `self` is borrowed shared for the lifetime of the result, so no mutable
        //    access through `self` can happen while it is alive
        unsafe { ptr.as_ref() }
    }

    /// Returns mutable access to the referent.
    #[inline]
    #[must_use]
    pub fn get_mut(&mut self) -> &mut T {
        let mut ptr = self.as_non_null();

        // SAFETY:
        // 1. The pointee is properly initialized (guaranteed by the invariants of
        //    this type)
        // 2. `self` is borrowed mutably for the lifetime of the result, and this
        //    pointer is the only way to reach the pointee (guaranteed by the
        //    invariants of this type)
        unsafe { ptr.as_mut() }
    }

    /// Consumes the [`ObjectMut`] and returns the underlying mutable
    /// reference with the full lifetime `'a`.
    #[inline]
    #[must_use]
    pub fn into_mut(self) -> &'a mut T {
        let mut ptr = self.as_non_null();

        // SAFETY:
        // 1. The pointee is properly initialized for `'a` (guaranteed by the
        //    invariants of this type)
        // 2. `self` is consumed, so the returned reference is the only remaining way
        //    to reach the pointee for `'a`
        unsafe { ptr.as_mut() }
    }

    /// Returns the address of the referent.
    #[inline]
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.as_non_null().as_ptr().cast_const()
    }

    /// Returns the mutable address of the referent.
    #[inline]
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.as_non_null().as_ptr()
    }

    /// Reborrows the [`ObjectMut`] with a shorter lifetime.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewref::ObjectMut;
    ///
    /// fn bump(mut counter: ObjectMut<'_, u32>) {
    ///     *counter += 1;
    /// }
    ///
    /// let mut value = 0;
    /// let mut reference = ObjectMut::new(&mut value);
    /// bump(reference.reborrow());
    /// bump(reference.reborrow());
    /// assert_eq!(*reference, 2);
    /// ```
    #[inline]
    #[must_use]
    pub fn reborrow<'b>(&'b mut self) -> ObjectMut<'b, T> {
        let ptr = self.as_non_null();

        // SAFETY:
        // 1. The pointee is initialized for `'a`, which outlives `'b`
        // 2. `self` is borrowed mutably for `'b`, so it cannot be used to access the
        //    pointee while the new reference is alive
        unsafe { ObjectMut::from_non_null(ptr) }
    }

    /// Returns a read-only reference to the referent.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewref::{ObjectMut, ObjectRef};
    ///
    /// let mut value = 5;
    /// let reference = ObjectMut::new(&mut value);
    /// let read_only: ObjectRef<'_, i32> = reference.as_ref();
    /// assert_eq!(read_only, reference);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_ref(&self) -> ObjectRef<'_, T> {
        ObjectRef::new(self.get())
    }

    /// Consumes the [`ObjectMut`] and returns a read-only [`ObjectRef`] with
    /// the same lifetime.
    #[inline]
    #[must_use]
    pub fn into_ref(self) -> ObjectRef<'a, T> {
        ObjectRef::new(self.into_mut())
    }
}

impl<'a, T: ?Sized> core::ops::Deref for ObjectMut<'a, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        self.get()
    }
}

impl<'a, T: ?Sized> core::ops::DerefMut for ObjectMut<'a, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<'a, T: ?Sized> AsRef<T> for ObjectMut<'a, T> {
    #[inline]
    fn as_ref(&self) -> &T {
        self.get()
    }
}

impl<'a, T: ?Sized> AsMut<T> for ObjectMut<'a, T> {
    #[inline]
    fn as_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<'a, T: ?Sized> From<&'a mut T> for ObjectMut<'a, T> {
    #[inline]
    fn from(value: &'a mut T) -> Self {
        Self::new(value)
    }
}

impl<'a, T: ?Sized> From<ObjectMut<'a, T>> for ObjectRef<'a, T> {
    #[inline]
    fn from(value: ObjectMut<'a, T>) -> Self {
        value.into_ref()
    }
}

impl<'a, T: ?Sized + core::fmt::Debug> core::fmt::Debug for ObjectMut<'a, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self.get(), f)
    }
}

impl<'a, T: ?Sized + core::fmt::Display> core::fmt::Display for ObjectMut<'a, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(self.get(), f)
    }
}

impl<'a, T: ?Sized> core::fmt::Pointer for ObjectMut<'a, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Pointer::fmt(&self.as_ptr(), f)
    }
}

// SAFETY: `ObjectMut<'a, T>` behaves like `&'a mut T`, which is `Send` iff `T:
// Send`.
unsafe impl<'a, T: ?Sized + Send> Send for ObjectMut<'a, T> {}

// SAFETY: `ObjectMut<'a, T>` behaves like `&'a mut T`, which is `Sync` iff `T:
// Sync`.
unsafe impl<'a, T: ?Sized + Sync> Sync for ObjectMut<'a, T> {}

// SAFETY:
// 1. `as_sized_ptr` returns the address this reference was bound to.
// 2. `replace_ptr` is only handed a pointer to the same object with different
//    pointer metadata (an unsizing coercion of the pointer returned by
//    `as_sized_ptr`), and `self` is consumed, so the new `ObjectMut` is the only
//    way to reach the object for `'a`.
unsafe impl<'a, T, U: ?Sized + 'a> CoerciblePtr<U> for ObjectMut<'a, T> {
    type Pointee = T;
    type Output = ObjectMut<'a, U>;

    #[inline]
    fn as_sized_ptr(&mut self) -> *mut T {
        self.as_mut_ptr()
    }

    #[inline]
    unsafe fn replace_ptr(self, new: *mut U) -> ObjectMut<'a, U> {
        // SAFETY: `new` is an unsized version of the non-null pointer returned by
        // `as_sized_ptr` (guaranteed by the caller), so it is non-null as well.
        let ptr = unsafe { NonNull::new_unchecked(new) };

        // SAFETY:
        // 1. The pointee is the referent of `self`, which is initialized for `'a`.
        // 2. `self` is consumed here, so `ptr` is the only remaining way to reach the
        //    pointee.
        unsafe { ObjectMut::from_non_null(ptr) }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec, vec::Vec};
    use core::{cell::Cell, fmt::Write};

    use super::*;

    #[allow(dead_code)]
    struct NonSend(*const ());
    static_assertions::assert_not_impl_any!(NonSend: Send, Sync);

    #[test]
    fn test_object_mut_send_sync() {
        static_assertions::assert_impl_all!(ObjectMut<'static, u32>: Send, Sync);
        static_assertions::assert_impl_all!(ObjectMut<'static, Cell<u32>>: Send);
        static_assertions::assert_not_impl_any!(ObjectMut<'static, Cell<u32>>: Sync);
        static_assertions::assert_not_impl_any!(ObjectMut<'static, NonSend>: Send, Sync);
    }

    #[test]
    fn test_object_mut_not_copy() {
        static_assertions::assert_not_impl_any!(ObjectMut<'static, u32>: Copy, Clone, Default);
    }

    #[test]
    fn test_widening_is_one_way() {
        static_assertions::assert_impl_all!(ObjectRef<'static, u32>: From<ObjectMut<'static, u32>>);
        static_assertions::assert_not_impl_any!(ObjectMut<'static, u32>: From<ObjectRef<'static, u32>>);
    }

    #[test]
    fn test_object_mut_mutation_visible() {
        let mut values: Vec<u32> = vec![1, 2];
        {
            let mut reference = ObjectMut::new(&mut values);
            reference.push(3);
            reference.get_mut()[0] = 10;
        }
        assert_eq!(values, [10, 2, 3]);
    }

    #[test]
    fn test_object_mut_address() {
        let mut value = String::from("abc");
        let expected: *const String = &value;
        let mut reference = ObjectMut::new(&mut value);

        assert_eq!(reference.as_ptr(), expected);
        assert_eq!(reference.reborrow().as_ptr(), expected);
        assert_eq!(reference.as_ref().as_ptr(), expected);
        assert_eq!(reference.into_ref().as_ptr(), expected);
    }

    #[test]
    fn test_object_mut_unsize() {
        use unsize::CoerceUnsize;

        let mut text = String::new();
        let mut writer: ObjectMut<'_, dyn Write> =
            ObjectMut::new(&mut text).unsize(unsize::Coercion!(to dyn Write));
        writer.write_str("hello").unwrap();
        write!(writer, " {}", 42).unwrap();
        assert_eq!(text, "hello 42");
    }
}
