//! Module containing the type-erased callable reference

mod raw;
pub(crate) mod vtable;

pub use self::raw::RawFunctionRef;
