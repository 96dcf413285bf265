//! Call strategies fixed into a [`FunctionRef`] when it is created.
//!
//! A [`FunctionRef`] does not decide how to call its target when it is
//! called. The constructor picks one of the strategies below and stores it
//! next to the target; every later call runs exactly that code path.
//!
//! | constructor                    | strategy              | arguments          | output               |
//! |--------------------------------|-----------------------|--------------------|----------------------|
//! | [`FunctionRef::new`]           | [`Exact`]             | passed through     | returned as is       |
//! | [`FunctionRef::adapt`]         | [`Convert<CalleeArgs>`] | converted with `Into` | converted with `Into` |
//! | [`FunctionRef::discarding`]    | [`Discard<CalleeArgs>`] | converted with `Into` | dropped              |
//!
//! The strategies are zero-sized and only ever used as type parameters.
//! Their type names show up in the [`Debug`](core::fmt::Debug) output of a
//! [`FunctionRef`], which tells which path a given reference takes.
//!
//! ```
//! use viewref::FunctionRef;
//!
//! let add = |a: i32, b: i32| a + b;
//!
//! let exact: FunctionRef<'_, fn(i32, i32) -> i32> = FunctionRef::new(&add);
//! let widened: FunctionRef<'_, fn(i16, i16) -> i64> = FunctionRef::adapt(&add);
//! let ignored: FunctionRef<'_, fn(i32, i32)> = FunctionRef::discarding(&add);
//!
//! assert!(format!("{exact:?}").contains("Exact"));
//! assert!(format!("{widened:?}").contains("Convert"));
//! assert!(format!("{ignored:?}").contains("Discard"));
//! ```
//!
//! [`FunctionRef`]: crate::FunctionRef
//! [`FunctionRef::new`]: crate::FunctionRef::new
//! [`FunctionRef::adapt`]: crate::FunctionRef::adapt
//! [`FunctionRef::discarding`]: crate::FunctionRef::discarding

use core::marker::PhantomData;

use viewref_internals::handlers::Thunk;

use crate::{Callable, function_ref::ConvertArgs};

/// Calls the target with the declared arguments and returns its output
/// unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Exact;

impl<F, Args, Output> Thunk<F, Args, Output> for Exact
where
    F: Callable<Args, Output = Output>,
{
    #[inline]
    fn invoke(callable: &F, args: Args) -> Output {
        callable.invoke(args)
    }
}

/// Converts the declared arguments into `CalleeArgs`, calls the target and
/// converts its output into the declared output.
pub struct Convert<CalleeArgs>(PhantomData<fn(CalleeArgs)>);

impl<F, Args, CalleeArgs, Output> Thunk<F, Args, Output> for Convert<CalleeArgs>
where
    F: Callable<CalleeArgs>,
    F::Output: Into<Output>,
    Args: ConvertArgs<CalleeArgs>,
{
    #[inline]
    fn invoke(callable: &F, args: Args) -> Output {
        callable.invoke(args.convert_args()).into()
    }
}

/// Converts the declared arguments into `CalleeArgs`, calls the target and
/// drops its output.
pub struct Discard<CalleeArgs>(PhantomData<fn(CalleeArgs)>);

impl<F, Args, CalleeArgs> Thunk<F, Args, ()> for Discard<CalleeArgs>
where
    F: Callable<CalleeArgs>,
    Args: ConvertArgs<CalleeArgs>,
{
    #[inline]
    fn invoke(callable: &F, args: Args) {
        let _output = callable.invoke(args.convert_args());
    }
}

macro_rules! impl_marker_traits {
    ($($marker:ident),*) => {$(
        impl<CalleeArgs> Clone for $marker<CalleeArgs> {
            #[inline]
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<CalleeArgs> Copy for $marker<CalleeArgs> {}

        impl<CalleeArgs> core::fmt::Debug for $marker<CalleeArgs> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(core::any::type_name::<Self>())
            }
        }
    )*};
}

impl_marker_traits!(Convert, Discard);

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;

    #[test]
    fn test_markers_are_zero_sized() {
        assert_eq!(core::mem::size_of::<Exact>(), 0);
        assert_eq!(core::mem::size_of::<Convert<(i32, i32)>>(), 0);
        assert_eq!(core::mem::size_of::<Discard<(i32,)>>(), 0);
    }

    #[test]
    fn test_convert_strategy() {
        let multiply = |a: i32, b: i32| a * b;
        let product: i64 = <Convert<(i32, i32)> as Thunk<_, (i16, u8), i64>>::invoke(
            &multiply,
            (300i16, 200u8),
        );
        assert_eq!(product, 60_000);
    }

    #[test]
    fn test_discard_strategy_still_calls() {
        let calls = Cell::new(0);
        let count = |step: u32| {
            calls.set(calls.get() + step);
            calls.get()
        };
        <Discard<(u32,)> as Thunk<_, (u16,), ()>>::invoke(&count, (5u16,));
        <Discard<(u32,)> as Thunk<_, (u16,), ()>>::invoke(&count, (2u16,));
        assert_eq!(calls.get(), 7);
    }
}
