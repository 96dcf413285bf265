/// A call signature usable with [`FunctionRef`](crate::FunctionRef).
///
/// Implemented for function pointer types of up to six parameters, such as
/// `fn(i32, i16) -> i32` or `fn(&'s str)`. The parameters are exposed as a
/// tuple in [`Args`](Signature::Args) and the return type as
/// [`Output`](Signature::Output).
///
/// Reference parameters need a named lifetime (`fn(&'s str)`), since
/// higher-ranked function pointer types such as `for<'r> fn(&'r str)` are
/// not covered.
///
/// This trait is sealed and cannot be implemented outside this crate.
pub trait Signature: sealed::Sealed {
    /// The parameter types, as a tuple.
    type Args;

    /// The return type.
    type Output;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! impl_signature {
    ($($arg:ident),*) => {
        impl<$($arg,)* R> sealed::Sealed for fn($($arg),*) -> R {}

        impl<$($arg,)* R> Signature for fn($($arg),*) -> R {
            type Args = ($($arg,)*);
            type Output = R;
        }
    };
}

impl_signature!();
impl_signature!(A1);
impl_signature!(A1, A2);
impl_signature!(A1, A2, A3);
impl_signature!(A1, A2, A3, A4);
impl_signature!(A1, A2, A3, A4, A5);
impl_signature!(A1, A2, A3, A4, A5, A6);
