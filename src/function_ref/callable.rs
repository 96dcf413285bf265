/// Something that can be invoked with the argument tuple `Args`.
///
/// Every closure, function item and function pointer implementing
/// `Fn(A1, .., An) -> R` (up to six parameters) implements
/// `Callable<(A1, .., An)>` with `Output = R`. Method paths such as
/// `str::len` or `Point::dot` are function items as well; their receiver is
/// the first argument.
///
/// A user type forms an overload set by implementing the trait several
/// times, once per argument tuple. [`FunctionRef::new`] picks the overload
/// whose arguments match the declared signature exactly.
///
/// # Examples
///
/// ```
/// use viewref::{Callable, FunctionRef};
///
/// struct Describe;
///
/// impl Callable<(i32,)> for Describe {
///     type Output = &'static str;
///
///     fn invoke(&self, _: (i32,)) -> &'static str {
///         "integer"
///     }
/// }
///
/// impl Callable<(f64,)> for Describe {
///     type Output = &'static str;
///
///     fn invoke(&self, _: (f64,)) -> &'static str {
///         "float"
///     }
/// }
///
/// let integer: FunctionRef<'_, fn(i32) -> &'static str> = FunctionRef::new(&Describe);
/// let float: FunctionRef<'_, fn(f64) -> &'static str> = FunctionRef::new(&Describe);
/// assert_eq!(integer.call(1), "integer");
/// assert_eq!(float.call(1.0), "float");
/// ```
///
/// [`FunctionRef::new`]: crate::FunctionRef::new
pub trait Callable<Args> {
    /// The value returned by the call.
    type Output;

    /// Invokes the callable.
    fn invoke(&self, args: Args) -> Self::Output;
}

/// Element-wise [`Into`] conversion between argument tuples.
///
/// `(A1, .., An): ConvertArgs<(B1, .., Bn)>` holds when every `Ai: Into<Bi>`.
/// Narrowing conversions without an `Into` impl (such as `i64` to `i16`)
/// are therefore rejected at compile time.
pub trait ConvertArgs<Target> {
    /// Converts every element of the tuple.
    fn convert_args(self) -> Target;
}

macro_rules! impl_callable {
    ($($arg:ident $target:ident $val:ident),*) => {
        impl<Func, R, $($arg,)*> Callable<($($arg,)*)> for Func
        where
            Func: ?Sized + Fn($($arg),*) -> R,
        {
            type Output = R;

            #[inline]
            fn invoke(&self, ($($val,)*): ($($arg,)*)) -> R {
                self($($val),*)
            }
        }

        impl<$($arg, $target,)*> ConvertArgs<($($target,)*)> for ($($arg,)*)
        where
            $($arg: Into<$target>,)*
        {
            #[inline]
            #[allow(clippy::unused_unit)]
            fn convert_args(self) -> ($($target,)*) {
                let ($($val,)*) = self;
                ($($val.into(),)*)
            }
        }
    };
}

impl_callable!();
impl_callable!(A1 B1 a1);
impl_callable!(A1 B1 a1, A2 B2 a2);
impl_callable!(A1 B1 a1, A2 B2 a2, A3 B3 a3);
impl_callable!(A1 B1 a1, A2 B2 a2, A3 B3 a3, A4 B4 a4);
impl_callable!(A1 B1 a1, A2 B2 a2, A3 B3 a3, A4 B4 a4, A5 B5 a5);
impl_callable!(A1 B1 a1, A2 B2 a2, A3 B3 a3, A4 B4 a4, A5 B5 a5, A6 B6 a6);

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};
    use core::cell::RefCell;

    use super::*;

    #[test]
    fn test_closure_is_callable() {
        let add = |a: i32, b: i32| a + b;
        assert_eq!(add.invoke((1, 3)), 4);

        let unit = || 7u8;
        assert_eq!(unit.invoke(()), 7);
    }

    #[test]
    fn test_dyn_fn_is_callable() {
        let log = RefCell::new(Vec::new());
        let push = |s: &'static str| log.borrow_mut().push(String::from(s));
        let erased: &dyn Fn(&'static str) = &push;

        erased.invoke(("a",));
        Callable::invoke(erased, ("b",));
        assert_eq!(*log.borrow(), ["a", "b"]);
    }

    #[test]
    fn test_convert_args() {
        let converted: (i64, f64, String) = (1i32, 2.5f32, "x").convert_args();
        assert_eq!(converted, (1i64, 2.5f64, String::from("x")));

        let (): () = ().convert_args();
    }

    #[test]
    fn test_method_path_is_callable() {
        assert_eq!(i32::pow.invoke((2, 10)), 1024);
        assert_eq!(str::len.invoke(("four",)), 4);
    }
}
