//! Internal utility types.

/// Marker type used when type-erasing callables.
///
/// This zero-sized type serves as a placeholder pointee when the actual
/// concrete callable type has been erased. A `NonNull<Erased>` is a pointer to
/// some callable `F` whose type is only known to the vtable stored next to it.
///
/// Using a distinct marker type (rather than `()`) makes the intent clearer
/// in type signatures and error messages.
pub(crate) struct Erased;
