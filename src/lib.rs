#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Extra checks on nightly
#![cfg_attr(nightly_extra_checks, feature(rustdoc_missing_doc_code_examples))]
#![cfg_attr(nightly_extra_checks, forbid(rustdoc::missing_doc_code_examples))]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Never-null references, bounds-aware array views and non-owning function
//! references.
//!
//! ## Overview
//!
//! This crate provides three small, independent reference primitives. None of
//! them owns or allocates what it refers to; each one is a view onto data
//! owned by someone else, tied to that data by a lifetime.
//!
//! | primitive | types | behaves like |
//! |-----------|-------|--------------|
//! | object reference | [`ObjectRef`], [`ObjectMut`], [`MoveRef`] | `&T`, `&mut T` |
//! | array view | [`ArrayRef`], [`ArrayMut`] | `&[T]`, `&mut [T]` |
//! | function view | [`FunctionRef`] | `&dyn Fn(..)` with a fixed call strategy |
//!
//! ## Quick Example
//!
//! ```
//! use viewref::{ArrayMut, FunctionRef, ObjectMut, with};
//!
//! let mut scores = [10, 20, 30];
//! let mut view = ArrayMut::new(&mut scores);
//! view[1] += 5;
//!
//! let mut best = 0;
//! let mut best_ref = ObjectMut::new(&mut best);
//! for score in view.iter() {
//!     with(&mut best_ref, *score, |best, score| *best = (*best).max(score));
//! }
//! assert_eq!(*best_ref, 30);
//!
//! let double = |x: i32| x * 2;
//! let transform: FunctionRef<'_, fn(i16) -> i64> = FunctionRef::adapt(&double);
//! assert_eq!(transform.call(21), 42);
//! ```
//!
//! ## Object references
//!
//! [`ObjectRef`] is a `Copy`, read-only reference; [`ObjectMut`] is the
//! unique, mutable one and widens into an [`ObjectRef`] but never the other
//! way around. [`MoveRef`] is a mutable reference that additionally
//! authorizes moving the referent out with [`take`]. Comparing two references
//! compares addresses; comparing a reference with `&value` compares values.
//!
//! ## Array views
//!
//! [`ArrayRef`] and [`ArrayMut`] keep a start address and an element count.
//! Indexing past the end is a [contract violation](contract): it is reported
//! through the installed [violation hook](hooks) and through `tracing` (with
//! the `tracing` feature), and then panics.
//!
//! ## Function views
//!
//! [`FunctionRef<'a, S>`](FunctionRef) borrows any [`Callable`] and calls it
//! with the signature `S`. The call strategy (exact, converting, or
//! discarding the output) is picked by the constructor and never changes
//! afterwards; see [`markers`].
//!
//! ## Features
//!
//! - `std`: guard the violation hook with `std::sync::RwLock` instead of a
//!   spin lock.
//! - `tracing`: emit a `tracing` event for every contract violation.
//!
//! The crate is `no_std` and only needs `alloc` for the violation hook and
//! the [`utf16`] adapter.

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod array_ref;
pub mod contract;
pub mod function_ref;
pub mod hooks;
pub mod markers;
pub mod object_ref;
pub mod prelude;
pub mod utf16;

pub use self::{
    array_ref::{ArrayMut, ArrayRef},
    function_ref::{Callable, FunctionRef, Signature},
    object_ref::{MoveRef, ObjectMut, ObjectRef, copy, take, with},
};
