//! Call strategies for type-erased callables.
//!
//! A [`Thunk`] describes *how* a callable of type `F` is invoked when a caller
//! supplies an argument tuple `Args` and expects an `Output`. The strategy is
//! chosen once, when a [`RawFunctionRef`] is created, and is baked into its
//! vtable. Every later call goes through exactly that code path.
//!
//! The [`viewref`] crate provides the strategies (exact match, converting
//! arguments and output, discarding the output). This crate only knows the
//! trait.
//!
//! [`RawFunctionRef`]: crate::RawFunctionRef
//! [`viewref`]: https://docs.rs/viewref/latest/viewref/

/// Invokes a callable of type `F` with an argument tuple `Args`, producing
/// `Output`.
///
/// Implementors are usually zero-sized marker types. The trait is static (no
/// `self` receiver) so that a monomorphised `invoke` can be stored as a plain
/// function pointer.
///
/// # Examples
///
/// ```
/// use viewref_internals::{RawFunctionRef, handlers::Thunk};
///
/// struct AddPair;
///
/// impl<F: Fn(i32, i32) -> i32> Thunk<F, (i32, i32), i32> for AddPair {
///     fn invoke(callable: &F, (a, b): (i32, i32)) -> i32 {
///         callable(a, b)
///     }
/// }
///
/// let add = |a: i32, b: i32| a + b;
/// let raw = RawFunctionRef::<(i32, i32), i32>::new::<_, AddPair>(&add);
/// assert_eq!(raw.call((1, 3)), 4);
/// ```
pub trait Thunk<F, Args, Output> {
    /// Calls `callable` with `args`.
    fn invoke(callable: &F, args: Args) -> Output;
}
