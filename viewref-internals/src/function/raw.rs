//! Type-erased callable pointer type.
//!
//! This module encapsulates the `ptr` and `vtable` fields of
//! [`RawFunctionRef`], ensuring they are only visible within this module. This
//! visibility restriction guarantees the safety invariant: **the pointer always
//! comes from a `&'a F` and the vtable was created for that same `F`**.
//!
//! # Safety Invariant
//!
//! Since both fields can only be set via [`RawFunctionRef::new`] (which derives
//! them from the same `&'a F`), and cannot be modified afterward (no `pub` or
//! `pub(crate)` fields), the pairing remains valid throughout the value's
//! lifetime. Copying a [`RawFunctionRef`] copies both fields together, and
//! assigning a new one replaces both together.
//!
//! # Type Erasure
//!
//! The concrete callable type `F` is erased by casting `NonNull<F>` to
//! `NonNull<Erased>`. The vtable stored next to it provides the monomorphised
//! call path needed to invoke the callable again.

use core::{marker::PhantomData, ptr::NonNull};

use crate::{function::vtable::FunctionVtable, handlers::Thunk, util::Erased};

/// A lifetime-bound pointer to some callable `F` that is guaranteed to be
/// initialized for the lifetime `'a`, together with the vtable that knows how
/// to call it with `Args` and produce `Output`.
///
/// We cannot use a [`&'a dyn Fn(..)`] directly, because the call strategy
/// (argument conversions, discarding the output) must be chosen when the
/// reference is created, not when it is called.
///
/// [`&'a dyn Fn(..)`]: core::ops::Fn
pub struct RawFunctionRef<'a, Args, Output> {
    /// Pointer to the callable
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer must have been created from a `&'a F` for some `F`.
    /// 2. The pointer will point to the same `F` for the entire lifetime of
    ///    this object.
    /// 3. `vtable` was created for that same `F`.
    ptr: NonNull<Erased>,

    /// Dispatch table created for the callable type behind `ptr`
    vtable: FunctionVtable<Args, Output>,

    /// Marker to tell the compiler that we should
    /// behave the same as a `&'a Erased`
    _marker: PhantomData<&'a Erased>,
}

impl<'a, Args, Output> Clone for RawFunctionRef<'a, Args, Output> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, Args, Output> Copy for RawFunctionRef<'a, Args, Output> {}

impl<'a, Args, Output> RawFunctionRef<'a, Args, Output> {
    /// Creates a new [`RawFunctionRef`] borrowing `callable`, which will be
    /// invoked through the strategy `T` on every call.
    ///
    /// The strategy is fixed here; the returned value never re-resolves how
    /// to call `callable`.
    #[inline]
    pub fn new<F, T>(callable: &'a F) -> Self
    where
        T: Thunk<F, Args, Output>,
    {
        let ptr: NonNull<F> = NonNull::from(callable);
        let ptr: NonNull<Erased> = ptr.cast::<Erased>();

        Self {
            ptr,
            vtable: FunctionVtable::new::<F, T>(),
            _marker: PhantomData,
        }
    }

    /// Calls the referenced callable with `args`.
    #[inline]
    pub fn call(&self, args: Args) -> Output {
        // SAFETY:
        // 1. `self.ptr` was created from a `&'a F` and `'a` has not ended, since `self`
        //    is still alive (guaranteed by the invariants of this type)
        // 2. The vtable was created for that same `F` (guaranteed by the invariants of
        //    this type)
        // 3. We only ever hand out shared access to the callable
        unsafe {
            // @add-unsafe-context: FunctionVtable
            self.vtable.call(self.ptr, args)
        }
    }

    /// Returns the address of the referenced callable.
    ///
    /// Two [`RawFunctionRef`]s created from the same callable report the same
    /// address, regardless of the strategy they use.
    #[inline]
    pub fn as_ptr(&self) -> *const () {
        self.ptr.as_ptr().cast_const().cast::<()>()
    }

    /// Returns the [`core::any::type_name`] of the referenced callable.
    #[inline]
    pub fn callable_type_name(&self) -> &'static str {
        self.vtable.callable_type_name()
    }

    /// Returns the [`core::any::type_name`] of the strategy used to call the
    /// referenced callable.
    #[inline]
    pub fn thunk_type_name(&self) -> &'static str {
        self.vtable.thunk_type_name()
    }
}

impl<'a, Args, Output> core::fmt::Debug for RawFunctionRef<'a, Args, Output> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawFunctionRef")
            .field("ptr", &self.ptr)
            .field("callable", &self.callable_type_name())
            .field("thunk", &self.thunk_type_name())
            .finish()
    }
}
