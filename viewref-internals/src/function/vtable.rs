//! Vtable for type-erased callable operations.
//!
//! This module contains the [`FunctionVtable`] which enables calling a
//! borrowed callable when its concrete type `F` and call strategy `T` have
//! been erased. The vtable stores function pointers that dispatch to the
//! correct typed implementations.
//!
//! This module encapsulates the fields of [`FunctionVtable`] so they cannot
//! be accessed directly. This visibility restriction guarantees the safety
//! invariant: **the vtable's type parameters must match the actual callable
//! type behind the pointer it is paired with**.
//!
//! # Safety Invariant
//!
//! This invariant is maintained because vtables are only created via
//! [`FunctionVtable::new`], which pairs the function pointers with specific
//! types `F` and `T` at compile time, and because the only constructor that
//! pairs a vtable with a pointer ([`RawFunctionRef::new`]) derives both from
//! the same `&F`.
//!
//! Unlike vtables for owned data, this one is stored by value: the argument
//! and output types may carry non-`'static` lifetimes, so a `&'static` table
//! cannot be named for them.
//!
//! [`RawFunctionRef::new`]: crate::RawFunctionRef::new

use core::ptr::NonNull;

use crate::{handlers::Thunk, util::Erased};

/// Vtable for type-erased callable operations.
///
/// Contains function pointers for calling and describing a callable without
/// knowing its concrete type at compile time.
///
/// # Safety Invariant
///
/// The field `call` is guaranteed to point to the function `call::<F, T, _,
/// _>` defined below, instantiated with the callable type `F` and the
/// strategy `T` that were used to create this [`FunctionVtable`].
pub(crate) struct FunctionVtable<Args, Output> {
    /// Gets the [`core::any::type_name`] of the callable type.
    callable_type_name: fn() -> &'static str,
    /// Gets the [`core::any::type_name`] of the call strategy.
    thunk_type_name: fn() -> &'static str,
    /// Calls the callable behind the pointer using the strategy.
    call: unsafe fn(NonNull<Erased>, Args) -> Output,
}

impl<Args, Output> Clone for FunctionVtable<Args, Output> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<Args, Output> Copy for FunctionVtable<Args, Output> {}

impl<Args, Output> FunctionVtable<Args, Output> {
    /// Creates a new [`FunctionVtable`] for the callable type `F` and the
    /// strategy `T`.
    #[inline]
    pub(crate) fn new<F, T: Thunk<F, Args, Output>>() -> Self {
        Self {
            callable_type_name: core::any::type_name::<F>,
            thunk_type_name: core::any::type_name::<T>,
            call: call::<F, T, Args, Output>,
        }
    }

    /// Gets the [`core::any::type_name`] of the callable type that was used
    /// to create this [`FunctionVtable`].
    #[inline]
    pub(crate) fn callable_type_name(&self) -> &'static str {
        (self.callable_type_name)()
    }

    /// Gets the [`core::any::type_name`] of the strategy that was used to
    /// create this [`FunctionVtable`].
    #[inline]
    pub(crate) fn thunk_type_name(&self) -> &'static str {
        (self.thunk_type_name)()
    }

    /// Calls the callable pointed to by `ptr` with `args`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` points to a live, properly aligned value of the callable type
    ///    `F` this [`FunctionVtable`] was created for.
    /// 2. Shared access to that value is allowed for the duration of the call.
    #[inline]
    pub(crate) unsafe fn call(&self, ptr: NonNull<Erased>, args: Args) -> Output {
        // SAFETY: We know that `self.call` points to the function `call::<F, T, _, _>`
        // below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe {
            // @add-unsafe-context: call
            (self.call)(ptr, args)
        }
    }
}

/// Calls the callable behind `ptr` using the strategy `T`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` points to a live, properly aligned value of type `F`.
/// 2. Shared access to that value is allowed for the duration of the call.
unsafe fn call<F, T: Thunk<F, Args, Output>, Args, Output>(
    ptr: NonNull<Erased>,
    args: Args,
) -> Output {
    let ptr: NonNull<F> = ptr.cast::<F>();
    // SAFETY:
    // 1. The pointer is non-null, aligned and points to a live `F` (guaranteed by
    //    the caller)
    // 2. Shared access is allowed (guaranteed by the caller), and the reference
    //    does not escape this function
    let callable: &F = unsafe { ptr.as_ref() };
    T::invoke(callable, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Twice;

    impl<F: Fn(u32) -> u32> Thunk<F, (u32,), u32> for Twice {
        fn invoke(callable: &F, (value,): (u32,)) -> u32 {
            callable(callable(value))
        }
    }

    #[test]
    fn test_function_vtable_names() {
        fn increment(value: u32) -> u32 {
            value + 1
        }

        let vtable = FunctionVtable::<(u32,), u32>::new::<fn(u32) -> u32, Twice>();
        assert_eq!(vtable.callable_type_name(), "fn(u32) -> u32");
        assert!(vtable.thunk_type_name().ends_with("Twice"));

        let f: fn(u32) -> u32 = increment;
        let ptr = NonNull::from(&f).cast::<Erased>();
        // SAFETY: `ptr` points to a live `fn(u32) -> u32`, which is the callable type
        // the vtable was created for.
        let result = unsafe { vtable.call(ptr, (5,)) };
        assert_eq!(result, 7);
    }
}
