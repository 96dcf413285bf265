#[cfg(feature = "std")]
use std::sync as impl_;

#[cfg(not(feature = "std"))]
use spin as impl_;

/// A global slot holding at most one violation hook.
///
/// Backed by `spin::RwLock` by default and by `std::sync::RwLock` with the
/// `std` feature. Readers never run the hook under the lock: [`fetch`]
/// clones a handle out and releases the lock before returning, so the hook
/// is free to install, replace or remove hooks itself.
///
/// [`fetch`]: HookSlot::fetch
#[repr(transparent)]
pub(crate) struct HookSlot<T: 'static + Send + Sync>(impl_::RwLock<Option<T>>);

#[repr(transparent)]
pub(crate) struct HookSlotWriter<T: 'static + Send + Sync>(
    impl_::RwLockWriteGuard<'static, Option<T>>,
);

impl<T: 'static + Send + Sync> HookSlot<T> {
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self(impl_::RwLock::new(None))
    }

    /// Returns a clone of the stored hook handle, if any.
    ///
    /// The read lock is only held for the duration of the clone.
    #[inline]
    pub(crate) fn fetch(&'static self) -> Option<T>
    where
        T: Clone,
    {
        #[cfg(not(feature = "std"))]
        let guard = self.0.read();

        #[cfg(feature = "std")]
        let guard = self.0.read().expect("violation hook lock poisoned");

        (*guard).clone()
    }

    #[inline]
    pub(crate) fn write(&'static self) -> HookSlotWriter<T> {
        #[cfg(not(feature = "std"))]
        let guard = self.0.write();

        #[cfg(feature = "std")]
        let guard = self.0.write().expect("violation hook lock poisoned");

        HookSlotWriter(guard)
    }
}

impl<T: 'static + Send + Sync> HookSlotWriter<T> {
    /// Stores `value` if the slot is empty, handing it back otherwise.
    #[inline]
    pub(crate) fn try_insert(&mut self, value: T) -> Result<(), T> {
        if self.0.is_some() {
            return Err(value);
        }
        *self.0 = Some(value);
        Ok(())
    }

    #[inline]
    pub(crate) fn replace(&mut self, value: T) -> Option<T> {
        self.0.replace(value)
    }

    #[inline]
    pub(crate) fn take(&mut self) -> Option<T> {
        self.0.take()
    }
}
