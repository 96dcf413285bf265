//! Commonly used items for convenient importing.
//!
//! ```rust
//! use viewref::prelude::*;
//!
//! let value = 3;
//! let reference = ObjectRef::new(&value);
//! let square = |x: i32| x * x;
//! let view: FunctionRef<'_, fn(i32) -> i32> = FunctionRef::new(&square);
//!
//! assert_eq!(with(reference, view, |x, f| f.call(*x)), 9);
//! ```

pub use crate::{
    ArrayMut, ArrayRef, Callable, FunctionRef, MoveRef, ObjectMut, ObjectRef, copy, take, with,
};
