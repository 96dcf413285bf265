use core::{ops::Range, ptr::NonNull};

use crate::{
    ArrayRef,
    contract::{self, ViolationKind},
};

/// FIXME: Once rust-lang/rust#132922 gets resolved, we can make the `ptr` and
/// `len` fields unsafe fields and remove this module.
mod limit_field_access {
    use core::{marker::PhantomData, ptr::NonNull};

    /// A mutable view over a contiguous run of elements.
    ///
    /// [`ArrayMut`] behaves like a `&'a mut [T]` split into a start address
    /// and an element count. Writes through the view land directly in the
    /// backing storage. Like [`ObjectMut`](crate::ObjectMut) it grants
    /// exclusive access, so it is neither `Copy` nor `Clone`; use
    /// [`reborrow`](ArrayMut::reborrow) or [`as_ref`](ArrayMut::as_ref) to
    /// hand out shorter-lived views.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewref::ArrayMut;
    ///
    /// let mut values = [1, 2, 3];
    /// let mut view = ArrayMut::new(&mut values);
    /// view[0] = 100;
    /// for value in view.iter_mut() {
    ///     *value += 1;
    /// }
    ///
    /// assert_eq!(values, [101, 3, 4]);
    /// ```
    // # Safety invariants
    //
    // This view behaves like a `&'a mut [T]`:
    //
    // 1. `ptr` points to `len` consecutive, properly initialized values of
    //    type `T` for the entire lifetime `'a`.
    // 2. Those values are not accessed through any pointer not derived from
    //    this one for the entire lifetime `'a`.
    // 3. `len * size_of::<T>()` does not exceed `isize::MAX`.
    pub struct ArrayMut<'a, T> {
        /// # Safety
        ///
        /// The following safety invariants are guaranteed to be upheld as long
        /// as this struct exists:
        ///
        /// 1. The pointer and `len` were derived from a `&'a mut [T]` (or from
        ///    pointers satisfying the same guarantees).
        /// 2. The pointer and `len` are only changed together, by replacing
        ///    the whole struct.
        ptr: NonNull<T>,
        len: usize,
        _marker: PhantomData<&'a mut [T]>,
    }

    impl<'a, T> ArrayMut<'a, T> {
        /// Creates a view over all elements of `slice`.
        #[inline]
        #[must_use]
        pub fn from_slice(slice: &'a mut [T]) -> Self {
            let len = slice.len();

            // SAFETY: We must uphold the safety invariants of the fields:
            // 1. The pointer and length are derived from a `&'a mut [T]`.
            // 2. The fields are never changed after construction.
            Self {
                ptr: NonNull::from(slice).cast::<T>(),
                len,
                _marker: PhantomData,
            }
        }

        /// Creates a view from a start pointer and an element count.
        ///
        /// # Safety
        ///
        /// The caller must ensure the same conditions as for
        /// [`core::slice::from_raw_parts_mut`]:
        ///
        /// 1. `ptr` points to `len` consecutive, properly initialized values
        ///    of type `T` which live for the entire lifetime `'a`.
        /// 2. Those values are not accessed through any pointer not derived
        ///    from `ptr` for the entire lifetime `'a`.
        /// 3. `len * size_of::<T>()` does not exceed `isize::MAX`.
        #[inline]
        #[must_use]
        pub const unsafe fn from_raw_parts(ptr: NonNull<T>, len: usize) -> Self {
            // SAFETY: We must uphold the safety invariants of the fields:
            // 1. Guaranteed by the caller
            // 2. The fields are never changed after construction.
            Self {
                ptr,
                len,
                _marker: PhantomData,
            }
        }

        /// Returns the start address of the view as a [`NonNull`].
        #[inline]
        #[must_use]
        pub const fn as_non_null(&self) -> NonNull<T> {
            self.ptr
        }

        /// Returns the number of elements in the view.
        #[inline]
        #[must_use]
        pub const fn len(&self) -> usize {
            self.len
        }
    }
}

pub use limit_field_access::ArrayMut;

impl<'a, T> ArrayMut<'a, T> {
    /// Creates a view over a fixed-size block. The length is `N`.
    #[inline]
    #[must_use]
    pub fn new<const N: usize>(block: &'a mut [T; N]) -> Self {
        Self::from_slice(block)
    }

    /// Creates a view over the elements in `begin..end`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `begin` and `end` are derived from the same allocation, with
    ///    `begin <= end`, and the distance between them is an exact multiple
    ///    of `size_of::<T>()`.
    /// 2. Every value in `begin..end` is properly initialized and lives for
    ///    the entire lifetime `'a`.
    /// 3. Those values are not accessed through any pointer not derived from
    ///    `begin` for the entire lifetime `'a`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is a zero-sized type.
    #[inline]
    #[must_use]
    pub unsafe fn from_ptr_range(begin: NonNull<T>, end: NonNull<T>) -> Self {
        // SAFETY: Both pointers come from the same allocation with `begin <= end`
        // and an exact multiple of `size_of::<T>()` between them (guaranteed by
        // the caller)
        let len = unsafe { end.offset_from_unsigned(begin) };

        // SAFETY:
        // 1. `begin` points to `len` initialized values living for `'a` (guaranteed
        //    by the caller)
        // 2. Guaranteed by the caller
        // 3. The values lie inside a single allocation, which is never larger than
        //    `isize::MAX` bytes
        unsafe { Self::from_raw_parts(begin, len) }
    }

    /// Returns the start address of the view.
    #[inline]
    #[must_use]
    pub const fn as_ptr(&self) -> *const T {
        self.as_non_null().as_ptr().cast_const()
    }

    /// Returns the mutable start address of the view.
    #[inline]
    #[must_use]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.as_non_null().as_ptr()
    }

    /// Returns `true` if the view has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the viewed elements as a shared slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.as_ref().as_slice()
    }

    /// Returns the viewed elements as a mutable slice.
    #[inline]
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.reborrow().into_slice()
    }

    /// Consumes the view and returns the viewed elements as a mutable slice
    /// living for `'a`.
    #[inline]
    #[must_use]
    pub fn into_slice(self) -> &'a mut [T] {
        let ptr = self.as_non_null().as_ptr();
        let len = self.len();

        // SAFETY:
        // 1. `ptr` points to `len` initialized values living for `'a` (guaranteed
        //    by the invariants of this type)
        // 2. `self` is consumed, so the returned slice is the only remaining way
        //    to reach those values for `'a`
        // 3. `len * size_of::<T>()` does not exceed `isize::MAX` (guaranteed by
        //    the invariants of this type)
        unsafe { core::slice::from_raw_parts_mut(ptr, len) }
    }

    /// Returns the half-open pointer range spanned by the view.
    #[inline]
    #[must_use]
    pub fn as_ptr_range(&self) -> Range<*const T> {
        self.as_slice().as_ptr_range()
    }

    /// Returns the half-open mutable pointer range spanned by the view.
    #[inline]
    #[must_use]
    pub fn as_mut_ptr_range(&mut self) -> Range<*mut T> {
        self.as_mut_slice().as_mut_ptr_range()
    }

    /// Returns an iterator over the viewed elements.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns an iterator that allows modifying each viewed element.
    #[inline]
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns the element at `index`, or `None` if it is out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Returns the element at `index` mutably, or `None` if it is out of
    /// range.
    #[inline]
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Reborrows the view with a shorter lifetime.
    #[inline]
    #[must_use]
    pub fn reborrow<'b>(&'b mut self) -> ArrayMut<'b, T> {
        let ptr = self.as_non_null();
        let len = self.len();

        // SAFETY:
        // 1. The values are initialized for `'a`, which outlives `'b`
        // 2. `self` is borrowed mutably for `'b`, so it cannot be used to access the
        //    values while the new view is alive
        // 3. Guaranteed by the invariants of this type
        unsafe { ArrayMut::from_raw_parts(ptr, len) }
    }

    /// Returns a read-only view over the same elements.
    #[inline]
    #[must_use]
    pub fn as_ref(&self) -> ArrayRef<'_, T> {
        let ptr = self.as_non_null();
        let len = self.len();

        // SAFETY:
        // 1. The values are initialized for `'a`, which outlives the borrow of
        //    `self`
        // 2. `self` is borrowed shared for the lifetime of the result, so no
        //    mutation through `self` can happen while it is alive
        // 3. Guaranteed by the invariants of this type
        unsafe { ArrayRef::from_raw_parts(ptr, len) }
    }

    /// Consumes the view and returns a read-only view with the same lifetime.
    #[inline]
    #[must_use]
    pub fn into_ref(self) -> ArrayRef<'a, T> {
        ArrayRef::from_slice(self.into_slice())
    }

    /// Rebinds the view to `source`, replacing address and length together.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewref::ArrayMut;
    ///
    /// let mut three = [1, 2, 3];
    /// let mut one = [9];
    ///
    /// let mut view = ArrayMut::new(&mut three);
    /// view[2] = 30;
    /// view.assign(&mut one);
    /// view[0] = 90;
    ///
    /// assert_eq!(three, [1, 2, 30]);
    /// assert_eq!(one, [90]);
    /// ```
    #[inline]
    pub fn assign(&mut self, source: impl Into<ArrayMut<'a, T>>) {
        *self = source.into();
    }

    /// Rebinds the view to `len` elements starting at `ptr`.
    ///
    /// # Safety
    ///
    /// Same conditions as [`from_raw_parts`](ArrayMut::from_raw_parts).
    #[inline]
    pub unsafe fn assign_raw_parts(&mut self, ptr: NonNull<T>, len: usize) {
        // SAFETY: Guaranteed by the caller
        *self = unsafe { Self::from_raw_parts(ptr, len) };
    }

    /// Rebinds the view to the elements in `begin..end`.
    ///
    /// # Safety
    ///
    /// Same conditions as [`from_ptr_range`](ArrayMut::from_ptr_range).
    ///
    /// # Panics
    ///
    /// Panics if `T` is a zero-sized type.
    #[inline]
    pub unsafe fn assign_ptr_range(&mut self, begin: NonNull<T>, end: NonNull<T>) {
        // SAFETY: Guaranteed by the caller
        *self = unsafe { Self::from_ptr_range(begin, end) };
    }
}

impl<'a, T> core::ops::Index<usize> for ArrayMut<'a, T> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &T {
        let len = self.len();
        match self.get(index) {
            Some(element) => element,
            None => contract::violated(ViolationKind::IndexOutOfBounds { index, len }),
        }
    }
}

impl<'a, T> core::ops::IndexMut<usize> for ArrayMut<'a, T> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(element) => element,
            None => contract::violated(ViolationKind::IndexOutOfBounds { index, len }),
        }
    }
}

impl<'a, T, const N: usize> From<&'a mut [T; N]> for ArrayMut<'a, T> {
    #[inline]
    fn from(block: &'a mut [T; N]) -> Self {
        Self::new(block)
    }
}

impl<'a, T> From<&'a mut [T]> for ArrayMut<'a, T> {
    #[inline]
    fn from(slice: &'a mut [T]) -> Self {
        Self::from_slice(slice)
    }
}

impl<'a, T> From<ArrayMut<'a, T>> for ArrayRef<'a, T> {
    #[inline]
    fn from(view: ArrayMut<'a, T>) -> Self {
        view.into_ref()
    }
}

impl<'a, T> IntoIterator for ArrayMut<'a, T> {
    type IntoIter = core::slice::IterMut<'a, T>;
    type Item = &'a mut T;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.into_slice().iter_mut()
    }
}

impl<'a, 'b, T> IntoIterator for &'b ArrayMut<'a, T> {
    type IntoIter = core::slice::Iter<'b, T>;
    type Item = &'b T;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, 'b, T> IntoIterator for &'b mut ArrayMut<'a, T> {
    type IntoIter = core::slice::IterMut<'b, T>;
    type Item = &'b mut T;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<'a, T: core::fmt::Debug> core::fmt::Debug for ArrayMut<'a, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// SAFETY: `ArrayMut<'a, T>` behaves like `&'a mut [T]`, which is `Send` iff `T:
// Send`.
unsafe impl<'a, T: Send> Send for ArrayMut<'a, T> {}

// SAFETY: `ArrayMut<'a, T>` behaves like `&'a mut [T]`, which is `Sync` iff `T:
// Sync`.
unsafe impl<'a, T: Sync> Sync for ArrayMut<'a, T> {}
