use crate::{ObjectMut, ObjectRef};

/// A mutable reference that authorizes moving the referent out.
///
/// Binding a [`MoveRef`] is an explicit statement by the binder that the
/// value may be treated as moved-from once the reference is consumed. The
/// only way to consume it is [`take`](MoveRef::take) (or
/// [`replace`](MoveRef::replace)), which moves the value out and leaves the
/// referent in its moved-from state:
///
/// - For [`take`](MoveRef::take) the moved-from state is [`Default::default`],
///   the same state [`core::mem::take`] leaves behind.
/// - For [`replace`](MoveRef::replace) the caller supplies it.
///
/// The wrapper never extends the lifetime of the referent; it only records
/// the intent.
///
/// # Examples
///
/// ```
/// use viewref::MoveRef;
///
/// let mut buffer = vec![1, 2, 3];
/// let intent = MoveRef::new(&mut buffer);
/// assert_eq!(intent.len(), 3);
///
/// let moved = intent.take();
/// assert_eq!(moved, [1, 2, 3]);
/// assert!(buffer.is_empty());
/// ```
#[repr(transparent)]
pub struct MoveRef<'a, T: ?Sized> {
    inner: ObjectMut<'a, T>,
}

impl<'a, T: ?Sized> MoveRef<'a, T> {
    /// Binds a new [`MoveRef`] to `value`, recording that it may be moved
    /// from.
    #[inline]
    #[must_use]
    pub fn new(value: &'a mut T) -> Self {
        Self {
            inner: ObjectMut::new(value),
        }
    }

    /// Returns shared access to the referent.
    #[inline]
    #[must_use]
    pub fn get(&self) -> &T {
        self.inner.get()
    }

    /// Returns mutable access to the referent.
    #[inline]
    #[must_use]
    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }

    /// Returns the address of the referent.
    #[inline]
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.inner.as_ptr()
    }

    /// Returns a read-only reference to the referent.
    #[inline]
    #[must_use]
    pub fn as_ref(&self) -> ObjectRef<'_, T> {
        self.inner.as_ref()
    }

    /// Gives up the move intent, returning a plain [`ObjectMut`].
    #[inline]
    #[must_use]
    pub fn into_object_mut(self) -> ObjectMut<'a, T> {
        self.inner
    }
}

impl<'a, T> MoveRef<'a, T> {
    /// Moves the referent out, leaving `T::default()` in its place.
    #[inline]
    #[must_use = "moving out of a MoveRef without using the value only resets the referent"]
    pub fn take(self) -> T
    where
        T: Default,
    {
        core::mem::take(self.inner.into_mut())
    }

    /// Moves the referent out, leaving `moved_from` in its place.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewref::MoveRef;
    ///
    /// let mut state = String::from("active");
    /// let previous = MoveRef::new(&mut state).replace(String::from("<moved>"));
    /// assert_eq!(previous, "active");
    /// assert_eq!(state, "<moved>");
    /// ```
    #[inline]
    #[must_use = "moving out of a MoveRef without using the value only resets the referent"]
    pub fn replace(self, moved_from: T) -> T {
        core::mem::replace(self.inner.into_mut(), moved_from)
    }
}

impl<'a, T: ?Sized> core::ops::Deref for MoveRef<'a, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        self.get()
    }
}

impl<'a, T: ?Sized> core::ops::DerefMut for MoveRef<'a, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<'a, T: ?Sized + core::fmt::Debug> core::fmt::Debug for MoveRef<'a, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("MoveRef").field(&self.get()).finish()
    }
}
