//! Non-owning references to callables.
//!
//! A [`FunctionRef<'a, S>`](FunctionRef) borrows something callable for `'a`
//! and calls it with the signature `S`, a function pointer type such as
//! `fn(i32, i16) -> i32`. The callable can be:
//!
//! - a closure, a function item or a function pointer,
//! - a method path such as `i32::pow`, called with the receiver as the first
//!   argument,
//! - a user type implementing [`Callable`], possibly several times to form an
//!   overload set,
//! - another [`FunctionRef`], whose signature only has to be compatible.
//!
//! How the callable is called is decided once, in the constructor:
//!
//! - [`FunctionRef::new`] requires an exact match of arguments and output.
//! - [`FunctionRef::adapt`] converts each argument and the output with
//!   [`Into`].
//! - [`FunctionRef::discarding`] converts the arguments like `adapt` and drops
//!   the output, for signatures returning `()`.
//!
//! Calls that have no matching constructor, such as narrowing an `i64`
//! parameter to an `i16` one, do not compile. There is no runtime failure
//! path and no empty [`FunctionRef`].
//!
//! ```
//! use viewref::FunctionRef;
//!
//! fn add(a: i32, b: i32) -> i32 {
//!     a + b
//! }
//!
//! let exact: FunctionRef<'_, fn(i32, i32) -> i32> = FunctionRef::new(&add);
//! assert_eq!(exact.call(1, 3), 4);
//!
//! let narrower_args: FunctionRef<'_, fn(i32, i16) -> i32> = FunctionRef::adapt(&add);
//! assert_eq!(narrower_args.call(1, 3), 4);
//!
//! let from_view: FunctionRef<'_, fn(i32, i32)> = FunctionRef::discarding(&exact);
//! from_view.call(1, 3);
//! ```

mod callable;
mod signature;

use core::marker::PhantomData;

use viewref_internals::RawFunctionRef;

pub use self::{
    callable::{Callable, ConvertArgs},
    signature::Signature,
};
use crate::markers::{Convert, Discard, Exact};

/// A borrowed callable with the call signature `S`.
///
/// [`FunctionRef`] behaves like a `&'a dyn Fn(..)` whose call strategy was
/// picked when it was created. It is `Copy`; assigning a new [`FunctionRef`]
/// replaces the target and the strategy together, and copies are not
/// affected by later assignments to the original.
///
/// See the [module documentation](self) for the supported callables.
///
/// # Examples
///
/// ```
/// use viewref::FunctionRef;
///
/// let double = |x: i32| x * 2;
/// let negate = |x: i32| -x;
///
/// let mut current: FunctionRef<'_, fn(i32) -> i32> = FunctionRef::new(&double);
/// let snapshot = current;
/// current = FunctionRef::new(&negate);
///
/// assert_eq!(current.call(5), -5);
/// assert_eq!(snapshot.call(5), 10);
/// ```
pub struct FunctionRef<'a, S: Signature> {
    raw: RawFunctionRef<'a, S::Args, S::Output>,
    _signature: PhantomData<S>,
}

impl<'a, S: Signature> FunctionRef<'a, S> {
    /// Creates a [`FunctionRef`] that calls `callable` with exactly the
    /// declared arguments and returns its output unchanged.
    ///
    /// For a user type with several [`Callable`] impls, the impl whose
    /// arguments equal the declared ones is chosen.
    #[inline]
    #[must_use]
    pub fn new<F>(callable: &'a F) -> Self
    where
        F: Callable<S::Args, Output = S::Output>,
    {
        Self {
            raw: RawFunctionRef::new::<F, Exact>(callable),
            _signature: PhantomData,
        }
    }

    /// Creates a [`FunctionRef`] whose declared arguments are converted into
    /// the arguments `callable` takes, and whose output is converted into the
    /// declared output.
    ///
    /// `CalleeArgs` is inferred for closures, functions and other
    /// [`FunctionRef`]s. For user types with several [`Callable`] impls it
    /// must be named explicitly.
    ///
    /// # Examples
    ///
    /// ```
    /// use viewref::FunctionRef;
    ///
    /// fn scale(value: f64, factor: f64) -> f64 {
    ///     value * factor
    /// }
    ///
    /// let from_ints: FunctionRef<'_, fn(i32, f32) -> f64> = FunctionRef::adapt(&scale);
    /// assert_eq!(from_ints.call(3, 0.5), 1.5);
    /// ```
    #[inline]
    #[must_use]
    pub fn adapt<F, CalleeArgs>(callable: &'a F) -> Self
    where
        F: Callable<CalleeArgs>,
        F::Output: Into<S::Output>,
        S::Args: ConvertArgs<CalleeArgs>,
    {
        Self {
            raw: RawFunctionRef::new::<F, Convert<CalleeArgs>>(callable),
            _signature: PhantomData,
        }
    }

    /// Creates a [`FunctionRef`] returning `()` that converts its arguments
    /// like [`adapt`](FunctionRef::adapt) and drops whatever `callable`
    /// returns.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::Cell;
    ///
    /// use viewref::FunctionRef;
    ///
    /// let total = Cell::new(0u64);
    /// let add = |n: u64| {
    ///     total.set(total.get() + n);
    ///     total.get()
    /// };
    ///
    /// let sink: FunctionRef<'_, fn(u32)> = FunctionRef::discarding(&add);
    /// sink.call(2);
    /// sink.call(3);
    /// assert_eq!(total.get(), 5);
    /// ```
    #[inline]
    #[must_use]
    pub fn discarding<F, CalleeArgs>(callable: &'a F) -> Self
    where
        S: Signature<Output = ()>,
        F: Callable<CalleeArgs>,
        S::Args: ConvertArgs<CalleeArgs>,
    {
        Self {
            raw: RawFunctionRef::new::<F, Discard<CalleeArgs>>(callable),
            _signature: PhantomData,
        }
    }

    /// Calls the target with an argument tuple.
    ///
    /// Equivalent to the per-arity `call` methods, for use in generic code.
    #[inline]
    pub fn call_tuple(&self, args: S::Args) -> S::Output {
        self.raw.call(args)
    }

    /// Returns the address of the borrowed callable.
    ///
    /// Zero-sized callables (closures without captures, function items) may
    /// share an address with unrelated values.
    #[inline]
    #[must_use]
    pub fn as_ptr(&self) -> *const () {
        self.raw.as_ptr()
    }

    /// Returns the [`core::any::type_name`] of the borrowed callable.
    #[inline]
    #[must_use]
    pub fn callable_type_name(&self) -> &'static str {
        self.raw.callable_type_name()
    }
}

macro_rules! impl_call {
    ($($arg:ident $val:ident),*) => {
        impl<'a, $($arg,)* R> FunctionRef<'a, fn($($arg),*) -> R> {
            /// Calls the target.
            ///
            /// Always runs the code path selected when this [`FunctionRef`]
            /// was created.
            #[inline]
            pub fn call(&self, $($val: $arg),*) -> R {
                self.raw.call(($($val,)*))
            }
        }
    };
}

impl_call!();
impl_call!(A1 a1);
impl_call!(A1 a1, A2 a2);
impl_call!(A1 a1, A2 a2, A3 a3);
impl_call!(A1 a1, A2 a2, A3 a3, A4 a4);
impl_call!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_call!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);

impl<'a, S: Signature> Callable<S::Args> for FunctionRef<'a, S> {
    type Output = S::Output;

    #[inline]
    fn invoke(&self, args: S::Args) -> S::Output {
        self.raw.call(args)
    }
}

impl<'a, S: Signature> Clone for FunctionRef<'a, S> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, S: Signature> Copy for FunctionRef<'a, S> {}

impl<'a, S, F> From<&'a F> for FunctionRef<'a, S>
where
    S: Signature,
    F: Callable<S::Args, Output = S::Output>,
{
    #[inline]
    fn from(callable: &'a F) -> Self {
        Self::new(callable)
    }
}

impl<'a, S: Signature> core::fmt::Debug for FunctionRef<'a, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FunctionRef")
            .field("signature", &core::any::type_name::<S>())
            .field("callable", &self.raw.callable_type_name())
            .field("thunk", &self.raw.thunk_type_name())
            .finish()
    }
}
