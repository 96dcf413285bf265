use core::{ops::Range, ptr::NonNull};

use crate::contract::{self, ViolationKind};

/// FIXME: Once rust-lang/rust#132922 gets resolved, we can make the `ptr` and
/// `len` fields unsafe fields and remove this module.
mod limit_field_access {
    use core::{marker::PhantomData, ptr::NonNull};

    /// A read-only view over a contiguous run of elements.
    ///
    /// [`ArrayRef`] behaves like a `&'a [T]` that is explicit about its two
    /// halves: a start address and an element count. The address is never
    /// null, even for an empty view, so an empty [`ArrayRef`] still denotes
    /// "no elements of this array" rather than "no array".
    ///
    /// Indexing with `view[i]` requires `i < view.len()`. An out-of-range
    /// index is a [contract violation](crate::contract), which is reported
    /// and then panics; use [`get`](ArrayRef::get) for a non-fatal probe.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewref::ArrayRef;
    ///
    /// let values = [1, 2, 3];
    /// let view = ArrayRef::new(&values);
    ///
    /// assert_eq!(view.len(), 3);
    /// assert_eq!(view[0], 1);
    /// assert_eq!(view[2], 3);
    /// assert_eq!(view.iter().sum::<i32>(), 6);
    /// ```
    // # Safety invariants
    //
    // This view behaves like a `&'a [T]`:
    //
    // 1. `ptr` points to `len` consecutive, properly initialized values of
    //    type `T` for the entire lifetime `'a`.
    // 2. Those values are not mutated for the entire lifetime `'a`, except
    //    through interior mutability.
    // 3. `len * size_of::<T>()` does not exceed `isize::MAX`.
    pub struct ArrayRef<'a, T> {
        /// # Safety
        ///
        /// The following safety invariants are guaranteed to be upheld as long
        /// as this struct exists:
        ///
        /// 1. The pointer and `len` were derived from a `&'a [T]` (or from
        ///    pointers satisfying the same guarantees).
        /// 2. The pointer and `len` are only changed together, by replacing
        ///    the whole struct.
        ptr: NonNull<T>,
        len: usize,
        _marker: PhantomData<&'a [T]>,
    }

    impl<'a, T> ArrayRef<'a, T> {
        /// Creates a view over all elements of `slice`.
        #[inline]
        #[must_use]
        pub fn from_slice(slice: &'a [T]) -> Self {
            // SAFETY: We must uphold the safety invariants of the fields:
            // 1. The pointer and length are derived from a `&'a [T]`.
            // 2. The fields are never changed after construction.
            Self {
                ptr: NonNull::from(slice).cast::<T>(),
                len: slice.len(),
                _marker: PhantomData,
            }
        }

        /// Creates a view from a start pointer and an element count.
        ///
        /// # Safety
        ///
        /// The caller must ensure the same conditions as for
        /// [`core::slice::from_raw_parts`]:
        ///
        /// 1. `ptr` points to `len` consecutive, properly initialized values
        ///    of type `T` which live for the entire lifetime `'a`.
        /// 2. Those values are not mutated for the entire lifetime `'a`,
        ///    except through interior mutability.
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
        pub const fn as_non_null(self) -> NonNull<T> {
            self.ptr
        }

        /// Returns the number of elements in the view.
        #[inline]
        #[must_use]
        pub const fn len(self) -> usize {
            self.len
        }
    }
}

pub use limit_field_access::ArrayRef;

impl<'a, T> ArrayRef<'a, T> {
    /// Creates a view over a fixed-size block. The length is `N`.
    #[inline]
    #[must_use]
    pub fn new<const N: usize>(block: &'a [T; N]) -> Self {
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
    /// 3. Those values are not mutated for the entire lifetime `'a`, except
    ///    through interior mutability.
    ///
    /// # Panics
    ///
    /// Panics if `T` is a zero-sized type, since the element count of a
    /// pointer range cannot be recovered for those.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::ptr::NonNull;
    ///
    /// use viewref::ArrayRef;
    ///
    /// let values = [10, 20, 30, 40];
    /// let range = values[1..3].as_ptr_range();
    ///
    /// // SAFETY: Both pointers come from the same live, unmutated array.
    /// let view = unsafe {
    ///     ArrayRef::from_ptr_range(
    ///         NonNull::new(range.start.cast_mut()).unwrap(),
    ///         NonNull::new(range.end.cast_mut()).unwrap(),
    ///     )
    /// };
    /// assert_eq!(view.as_slice(), [20, 30]);
    /// ```
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
    ///
    /// The address is never null, even for an empty view.
    #[inline]
    #[must_use]
    pub const fn as_ptr(self) -> *const T {
        self.as_non_null().as_ptr().cast_const()
    }

    /// Returns `true` if the view has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Returns the viewed elements as a slice living for `'a`.
    #[inline]
    #[must_use]
    pub const fn as_slice(self) -> &'a [T] {
        let ptr = self.as_ptr();
        let len = self.len();

        // SAFETY:
        // 1. `ptr` points to `len` initialized values living for `'a` (guaranteed
        //    by the invariants of this type)
        // 2. Those values are not mutated for `'a` except through interior
        //    mutability (guaranteed by the invariants of this type)
        // 3. `len * size_of::<T>()` does not exceed `isize::MAX` (guaranteed by
        //    the invariants of this type)
        unsafe { core::slice::from_raw_parts(ptr, len) }
    }

    /// Returns the half-open pointer range spanned by the view.
    ///
    /// `start` equals [`as_ptr`](ArrayRef::as_ptr) and `end` is `start` plus
    /// [`len`](ArrayRef::len) elements.
    #[inline]
    #[must_use]
    pub const fn as_ptr_range(self) -> Range<*const T> {
        self.as_slice().as_ptr_range()
    }

    /// Returns an iterator over the viewed elements.
    ///
    /// The iterator reads the backing storage directly, so calling this again
    /// yields the same elements until the view is reassigned.
    #[inline]
    pub fn iter(self) -> core::slice::Iter<'a, T> {
        self.as_slice().iter()
    }

    /// Returns the element at `index`, or `None` if it is out of range.
    #[inline]
    #[must_use]
    pub fn get(self, index: usize) -> Option<&'a T> {
        self.as_slice().get(index)
    }

    /// Returns `true` if both views have the same start address and length.
    #[inline]
    #[must_use]
    pub fn ptr_eq(self, other: ArrayRef<'_, T>) -> bool {
        core::ptr::eq(self.as_ptr(), other.as_ptr()) && self.len() == other.len()
    }

    /// Rebinds the view to `source`, replacing address and length together.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewref::ArrayRef;
    ///
    /// let three = [1, 2, 3];
    /// let one = [9];
    ///
    /// let mut view = ArrayRef::new(&three);
    /// view.assign(&one);
    /// assert_eq!(view.len(), 1);
    /// assert_eq!(view.as_ptr(), one.as_ptr());
    /// ```
    #[inline]
    pub fn assign(&mut self, source: impl Into<ArrayRef<'a, T>>) {
        *self = source.into();
    }

    /// Rebinds the view to `len` elements starting at `ptr`.
    ///
    /// # Safety
    ///
    /// Same conditions as [`from_raw_parts`](ArrayRef::from_raw_parts).
    #[inline]
    pub unsafe fn assign_raw_parts(&mut self, ptr: NonNull<T>, len: usize) {
        // SAFETY: Guaranteed by the caller
        *self = unsafe { Self::from_raw_parts(ptr, len) };
    }

    /// Rebinds the view to the elements in `begin..end`.
    ///
    /// # Safety
    ///
    /// Same conditions as [`from_ptr_range`](ArrayRef::from_ptr_range).
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

impl<'a, T> Clone for ArrayRef<'a, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for ArrayRef<'a, T> {}

impl<'a, T> core::ops::Index<usize> for ArrayRef<'a, T> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(element) => element,
            None => contract::violated(ViolationKind::IndexOutOfBounds {
                index,
                len: self.len(),
            }),
        }
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for ArrayRef<'a, T> {
    #[inline]
    fn from(block: &'a [T; N]) -> Self {
        Self::new(block)
    }
}

impl<'a, T> From<&'a [T]> for ArrayRef<'a, T> {
    #[inline]
    fn from(slice: &'a [T]) -> Self {
        Self::from_slice(slice)
    }
}

impl<'a, T> From<&'a mut [T]> for ArrayRef<'a, T> {
    #[inline]
    fn from(slice: &'a mut [T]) -> Self {
        Self::from_slice(slice)
    }
}

impl<'a, T> IntoIterator for ArrayRef<'a, T> {
    type IntoIter = core::slice::Iter<'a, T>;
    type Item = &'a T;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, 'b, T> IntoIterator for &'b ArrayRef<'a, T> {
    type IntoIter = core::slice::Iter<'a, T>;
    type Item = &'a T;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: core::fmt::Debug> core::fmt::Debug for ArrayRef<'a, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// SAFETY: `ArrayRef<'a, T>` behaves like `&'a [T]`, which is `Send` iff `T: Sync`.
unsafe impl<'a, T: Sync> Send for ArrayRef<'a, T> {}

// SAFETY: `ArrayRef<'a, T>` behaves like `&'a [T]`, which is `Sync` iff `T: Sync`.
unsafe impl<'a, T: Sync> Sync for ArrayRef<'a, T> {}
