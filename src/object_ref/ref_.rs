use core::ptr::NonNull;

use unsize::CoerciblePtr;

/// FIXME: Once rust-lang/rust#132922 gets resolved, we can make the `ptr` field
/// an unsafe field and remove this module.
mod limit_field_access {
    use core::{marker::PhantomData, ptr::NonNull};

    /// A read-only, never-null reference to a single value.
    ///
    /// [`ObjectRef`] behaves like a `&'a T`: it is `Copy`, it is tied to the
    /// lifetime of the value it was bound to, and it only grants shared
    /// access. Unlike an `Option<&T>` or a raw pointer there is no empty
    /// state: every [`ObjectRef`] denotes a live value.
    ///
    /// # Key Characteristics
    ///
    /// - **Always `Copy` + `Clone`**: copying the reference copies the
    ///   address, never the referent
    /// - **Lifetime-bound**: Tied to the lifetime of the referent
    /// - **Address identity**: two [`ObjectRef`]s compare equal iff they
    ///   denote the same object; compare against `&value` to compare values
    ///
    /// # Examples
    ///
    /// ```
    /// use viewref::ObjectRef;
    ///
    /// let value = 42;
    /// let a = ObjectRef::new(&value);
    /// let b = a;
    ///
    /// assert!(core::ptr::eq(a.get(), &value));
    /// assert_eq!(a, b);
    /// assert_eq!(a, &42);
    /// ```
    // # Safety invariants
    //
    // This reference behaves like a `&'a T` and upholds the usual safety
    // invariants of shared references:
    //
    // 1. The pointee is properly initialized for the entire lifetime `'a`.
    // 2. The pointee is not mutated for the entire lifetime `'a`, except
    //    through interior mutability.
    #[repr(transparent)]
    pub struct ObjectRef<'a, T: ?Sized> {
        /// # Safety
        ///
        /// The following safety invariants are guaranteed to be upheld as long
        /// as this struct exists:
        ///
        /// 1. The pointer was derived from a `&'a T` (or from a `&'a mut T`
        ///    whose exclusive access was given up for `'a`).
        /// 2. The pointer is not changed for the lifetime of this struct.
        ptr: NonNull<T>,
        _marker: PhantomData<&'a T>,
    }

    impl<'a, T: ?Sized> ObjectRef<'a, T> {
        /// Binds a new [`ObjectRef`] to `value`.
        #[inline]
        #[must_use]
        pub fn new(value: &'a T) -> Self {
            // SAFETY: We must uphold the safety invariants of the ptr field:
            // 1. The pointer is derived from a `&'a T`.
            // 2. The pointer is never changed after construction.
            Self {
                ptr: NonNull::from(value),
                _marker: PhantomData,
            }
        }

        /// Creates a new [`ObjectRef`] from a pointer.
        ///
        /// # Safety
        ///
        /// The caller must ensure:
        ///
        /// 1. The pointee is properly initialized for the entire lifetime
        ///    `'a`.
        /// 2. The pointee is not mutated for the entire lifetime `'a`, except
        ///    through interior mutability.
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
        pub const fn as_non_null(self) -> NonNull<T> {
            self.ptr
        }
    }
}

pub use limit_field_access::ObjectRef;

impl<'a, T: ?Sized> ObjectRef<'a, T> {
    /// Returns the referenced value.
    ///
    /// The returned reference lives as long as the value this
    /// [`ObjectRef`] was bound to, not as long as the [`ObjectRef`] itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewref::ObjectRef;
    ///
    /// let text = String::from("hello");
    /// fn get_ref<'a>(reference: ObjectRef<'a, String>) -> &'a String {
    ///     reference.get()
    /// }
    ///
    /// let inner = get_ref(ObjectRef::new(&text));
    /// assert_eq!(inner, "hello");
    /// ```
    #[inline]
    #[must_use]
    pub const fn get(self) -> &'a T {
        let ptr = self.as_non_null();

        // SAFETY:
        // 1. The pointee is properly initialized for `'a` (guaranteed by the
        //    invariants of this type)
        // 2. The pointee is not mutated for `'a` except through interior mutability
        //    (guaranteed by the invariants of this type)
        unsafe { ptr.as_ref() }
    }

    /// Returns the address of the referent.
    #[inline]
    #[must_use]
    pub const fn as_ptr(self) -> *const T {
        self.as_non_null().as_ptr().cast_const()
    }

    /// Returns `true` if both references denote the same object.
    ///
    /// Only the address is compared; pointer metadata (slice lengths, vtables)
    /// is ignored.
    #[inline]
    #[must_use]
    pub fn ptr_eq<U: ?Sized>(self, other: ObjectRef<'_, U>) -> bool {
        core::ptr::addr_eq(self.as_ptr(), other.as_ptr())
    }

    /// Produces an independent copy of the referent.
    ///
    /// Mutating the returned value never affects the referent.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewref::ObjectRef;
    ///
    /// let original = vec![1, 2, 3];
    /// let mut copy = ObjectRef::new(&original).copied();
    /// copy.push(4);
    /// assert_eq!(original, [1, 2, 3]);
    /// ```
    #[inline]
    #[must_use]
    pub fn copied(self) -> T
    where
        T: Clone,
    {
        self.get().clone()
    }
}

impl<'a, T: ?Sized> Clone for ObjectRef<'a, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T: ?Sized> Copy for ObjectRef<'a, T> {}

impl<'a, T: ?Sized> core::ops::Deref for ObjectRef<'a, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        self.get()
    }
}

impl<'a, T: ?Sized> AsRef<T> for ObjectRef<'a, T> {
    #[inline]
    fn as_ref(&self) -> &T {
        self.get()
    }
}

impl<'a, T: ?Sized> From<&'a T> for ObjectRef<'a, T> {
    #[inline]
    fn from(value: &'a T) -> Self {
        Self::new(value)
    }
}

impl<'a, T: ?Sized> From<&'a mut T> for ObjectRef<'a, T> {
    #[inline]
    fn from(value: &'a mut T) -> Self {
        Self::new(value)
    }
}

impl<'a, T: ?Sized> core::hash::Hash for ObjectRef<'a, T> {
    /// Hashes the address of the referent, consistent with the address
    /// identity used by [`PartialEq`].
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.as_ptr().cast::<()>().hash(state);
    }
}

impl<'a, T: ?Sized + core::fmt::Debug> core::fmt::Debug for ObjectRef<'a, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self.get(), f)
    }
}

impl<'a, T: ?Sized + core::fmt::Display> core::fmt::Display for ObjectRef<'a, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(self.get(), f)
    }
}

impl<'a, T: ?Sized> core::fmt::Pointer for ObjectRef<'a, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Pointer::fmt(&self.as_ptr(), f)
    }
}

// SAFETY: `ObjectRef<'a, T>` behaves like `&'a T`, which is `Send` iff `T: Sync`.
unsafe impl<'a, T: ?Sized + Sync> Send for ObjectRef<'a, T> {}

// SAFETY: `ObjectRef<'a, T>` behaves like `&'a T`, which is `Sync` iff `T: Sync`.
unsafe impl<'a, T: ?Sized + Sync> Sync for ObjectRef<'a, T> {}

// SAFETY:
// 1. `as_sized_ptr` returns the address this reference was bound to.
// 2. `replace_ptr` is only handed a pointer to the same object with different
//    pointer metadata (an unsizing coercion of the pointer returned by
//    `as_sized_ptr`), so the new `ObjectRef` denotes the same live, unmutated
//    object for the same lifetime `'a`.
unsafe impl<'a, T, U: ?Sized + 'a> CoerciblePtr<U> for ObjectRef<'a, T> {
    type Pointee = T;
    type Output = ObjectRef<'a, U>;

    #[inline]
    fn as_sized_ptr(&mut self) -> *mut T {
        self.as_non_null().as_ptr()
    }

    #[inline]
    unsafe fn replace_ptr(self, new: *mut U) -> ObjectRef<'a, U> {
        // SAFETY: `new` is an unsized version of the non-null pointer returned by
        // `as_sized_ptr` (guaranteed by the caller), so it is non-null as well.
        let ptr = unsafe { NonNull::new_unchecked(new) };

        // SAFETY:
        // 1. The pointee is the referent of `self`, which is initialized for `'a`.
        // 2. The pointee is the referent of `self`, which is not mutated for `'a`.
        unsafe { ObjectRef::from_non_null(ptr) }
    }
}
