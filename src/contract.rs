//! Contract violations.
//!
//! A contract violation is a caller bug that the primitives of this crate
//! detect at runtime, such as indexing an [`ArrayRef`](crate::ArrayRef) past
//! its end. Violations are never returned as errors. Instead the crate:
//!
//! 1. passes a [`ContractViolation`] describing the failure to the installed
//!    [violation hook](crate::hooks), if any,
//! 2. emits a `tracing` event at `ERROR` level when the `tracing` feature is
//!    enabled,
//! 3. panics with the violation's [`Display`](core::fmt::Display) output.
//!
//! ```should_panic
//! use viewref::ArrayRef;
//!
//! let values = [1, 2, 3];
//! let view = ArrayRef::new(&values);
//! let _element = view[3]; // panics: index out of bounds
//! ```

use core::panic::Location;

/// The kind of contract that was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ViolationKind {
    /// An element index was not below the length of the view.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The length of the view at the time of the access.
        len: usize,
    },
}

impl ViolationKind {
    /// Returns a short, stable name for the kind, suitable for log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ViolationKind::IndexOutOfBounds { .. } => "index_out_of_bounds",
        }
    }
}

impl core::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ViolationKind::IndexOutOfBounds { index, len } => {
                write!(f, "index out of bounds: the len is {len} but the index is {index}")
            }
        }
    }
}

/// A description of a detected contract violation.
///
/// Passed to the installed [`ViolationHook`](crate::hooks::ViolationHook)
/// right before the violation panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractViolation {
    kind: ViolationKind,
    location: &'static Location<'static>,
}

impl ContractViolation {
    /// Returns what went wrong.
    #[must_use]
    pub const fn kind(&self) -> &ViolationKind {
        &self.kind
    }

    /// Returns the source location of the offending call.
    #[must_use]
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl core::fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} at {}", self.kind, self.location)
    }
}

/// Reports a contract violation and panics.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn violated(kind: ViolationKind) -> ! {
    let violation = ContractViolation {
        kind,
        location: Location::caller(),
    };

    crate::hooks::notify(&violation);

    #[cfg(feature = "tracing")]
    match violation.kind {
        ViolationKind::IndexOutOfBounds { index, len } => tracing::error!(
            kind = violation.kind.name(),
            index,
            len,
            location = %violation.location,
            "contract violation"
        ),
    }

    panic!("contract violation: {}", violation.kind)
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_violation_display() {
        let kind = ViolationKind::IndexOutOfBounds { index: 4, len: 2 };
        assert_eq!(
            kind.to_string(),
            "index out of bounds: the len is 2 but the index is 4"
        );
        assert_eq!(kind.name(), "index_out_of_bounds");
    }

    #[test]
    fn test_violation_send_sync() {
        static_assertions::assert_impl_all!(ContractViolation: Send, Sync, Copy);
    }

    #[test]
    #[should_panic(expected = "contract violation: index out of bounds")]
    fn test_violated_panics() {
        violated(ViolationKind::IndexOutOfBounds { index: 1, len: 0 });
    }
}
