#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`viewref`].
//!
//! # Overview
//!
//! This crate contains the low-level, type-erased data structure and unsafe
//! operations behind [`viewref`]'s `FunctionRef`. It provides the foundation
//! for calling a borrowed callable whose concrete type has been erased, by
//! pairing an untyped pointer with a small table of monomorphised function
//! pointers.
//!
//! **This crate is an implementation detail.** No semantic versioning guarantees
//! are provided. Users should depend on the [`viewref`] crate, not this one.
//!
//! # Architecture
//!
//! - **[`function`]**: Type-erased callable references
//!   - [`RawFunctionRef`]: Borrowed, lifetime-bound pointer to some callable
//!     `F` plus the vtable that knows how to call it
//!   - [`FunctionVtable`]: Function pointers for type-erased dispatch
//!
//! - **[`handlers`]**: Trait definitions for call strategies
//!   - [`Thunk`]: Defines how a callable `F` is invoked for a given argument
//!     tuple and output type
//!
//! # Safety Strategy
//!
//! When we erase `&'a F` to `NonNull<Erased>`, we must ensure that the vtable
//! function pointers still match the actual concrete type behind the pointer.
//!
//! This crate maintains safety through:
//!
//! - **Module-based encapsulation**: The pointer and vtable fields of
//!   [`RawFunctionRef`] are module-private and are only ever set together in
//!   [`RawFunctionRef::new`], making the pairing locally verifiable
//! - **Lifetime tracking**: [`RawFunctionRef<'a, _, _>`] behaves like a
//!   `&'a F`, so the borrow checker prevents it from outliving the callable
//! - **Documented vtable contracts**: Each vtable method specifies exactly when
//!   it can be safely called
//!
//! [`viewref`]: https://docs.rs/viewref/latest/viewref/
//! [`FunctionVtable`]: function::vtable::FunctionVtable
//! [`Thunk`]: handlers::Thunk
//! [`RawFunctionRef<'a, _, _>`]: RawFunctionRef

mod function;
pub mod handlers;
mod util;

pub use function::RawFunctionRef;
