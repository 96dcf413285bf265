//! Conversion between host strings and UTF-16 text.
//!
//! Text buffers that interoperate with UTF-16 based runtimes store their
//! contents as UTF-16 code units. This module is the boundary between such
//! buffers and the strings of the surrounding host code:
//!
//! - [`HostString`] and [`string_from_host`] turn host values into a
//!   [`Utf16String`],
//! - [`FromUtf16`] and [`string_to_host`] turn UTF-16 code units back into
//!   host values.
//!
//! Conversions are the only place in this crate that can fail recoverably.
//! Failures are reported as a [`ConversionError`].
//!
//! ```
//! use viewref::utf16::{Utf16String, string_to_host};
//!
//! let text = Utf16String::from("héllo");
//! assert_eq!(text.len(), 5);
//!
//! let back: String = string_to_host(text.as_units(), None).unwrap();
//! assert_eq!(back, "héllo");
//! ```

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::any::Any;

use crate::ArrayRef;

/// Default message attached to a failed [`string_to_host`] conversion.
pub const DEFAULT_TO_HOST_FAILURE: &str = "Couldn't convert text to a String";

/// Message attached when [`string_from_host`] receives a value that is not
/// string-like.
pub const NOT_A_STRING: &str = "Expected a string.";

/// An owned sequence of UTF-16 code units.
///
/// The code units are not required to be valid UTF-16; unpaired surrogates
/// are preserved as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Utf16String(Vec<u16>);

impl Utf16String {
    /// Creates an empty string.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a string from raw code units.
    #[must_use]
    pub const fn from_units(units: Vec<u16>) -> Self {
        Self(units)
    }

    /// Returns a read-only view over the code units.
    #[must_use]
    pub fn as_units(&self) -> ArrayRef<'_, u16> {
        ArrayRef::from_slice(&self.0)
    }

    /// Returns the number of code units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no code units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the string and returns its code units.
    #[must_use]
    pub fn into_units(self) -> Vec<u16> {
        self.0
    }
}

impl From<&str> for Utf16String {
    fn from(text: &str) -> Self {
        Self(text.encode_utf16().collect())
    }
}

impl From<Vec<u16>> for Utf16String {
    fn from(units: Vec<u16>) -> Self {
        Self(units)
    }
}

/// A host value that converts into UTF-16 without failing.
pub trait HostString {
    /// Encodes the value as UTF-16 code units.
    fn to_utf16(&self) -> Utf16String;
}

impl HostString for str {
    fn to_utf16(&self) -> Utf16String {
        Utf16String::from(self)
    }
}

impl HostString for String {
    fn to_utf16(&self) -> Utf16String {
        self.as_str().to_utf16()
    }
}

impl HostString for char {
    fn to_utf16(&self) -> Utf16String {
        let mut buffer = [0u16; 2];
        Utf16String(self.encode_utf16(&mut buffer).to_vec())
    }
}

impl HostString for Utf16String {
    fn to_utf16(&self) -> Utf16String {
        self.clone()
    }
}

/// Converts a dynamically typed host value into UTF-16.
///
/// String-like values (`String`, `&'static str`, `char`, [`Utf16String`])
/// convert directly. Booleans, integers and floats are coerced through their
/// [`Display`](core::fmt::Display) output. Anything else fails with
/// [`ConversionErrorKind::NotAString`].
///
/// # Examples
///
/// ```
/// use viewref::utf16::{ConversionErrorKind, Utf16String, string_from_host};
///
/// let text = string_from_host(&String::from("abc")).unwrap();
/// assert_eq!(text, Utf16String::from("abc"));
///
/// let number = string_from_host(&42u32).unwrap();
/// assert_eq!(number, Utf16String::from("42"));
///
/// let error = string_from_host(&vec![1, 2, 3]).unwrap_err();
/// assert_eq!(error.kind(), ConversionErrorKind::NotAString);
/// assert_eq!(error.to_string(), "Expected a string.");
/// ```
pub fn string_from_host(value: &dyn Any) -> Result<Utf16String, ConversionError> {
    if let Some(text) = value.downcast_ref::<String>() {
        return Ok(text.to_utf16());
    }
    if let Some(text) = value.downcast_ref::<&'static str>() {
        return Ok(text.to_utf16());
    }
    if let Some(c) = value.downcast_ref::<char>() {
        return Ok(c.to_utf16());
    }
    if let Some(units) = value.downcast_ref::<Utf16String>() {
        return Ok(units.clone());
    }

    macro_rules! coerce_display {
        ($($ty:ty),*) => {$(
            if let Some(value) = value.downcast_ref::<$ty>() {
                return Ok(value.to_string().to_utf16());
            }
        )*};
    }
    coerce_display!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

    Err(ConversionError::new(
        ConversionErrorKind::NotAString,
        Some(NOT_A_STRING),
    ))
}

/// A host value that can be produced from UTF-16 code units.
pub trait FromUtf16: Sized {
    /// Decodes `units`.
    fn from_utf16(units: ArrayRef<'_, u16>) -> Result<Self, ConversionErrorKind>;
}

impl FromUtf16 for String {
    /// Fails with [`ConversionErrorKind::Unrepresentable`] if `units`
    /// contains an unpaired surrogate.
    fn from_utf16(units: ArrayRef<'_, u16>) -> Result<Self, ConversionErrorKind> {
        String::from_utf16(units.as_slice()).map_err(|_| ConversionErrorKind::Unrepresentable)
    }
}

impl FromUtf16 for Utf16String {
    fn from_utf16(units: ArrayRef<'_, u16>) -> Result<Self, ConversionErrorKind> {
        Ok(Utf16String(units.as_slice().to_vec()))
    }
}

/// Converts UTF-16 code units into the host value `H`.
///
/// On failure the error carries `failure_message`, or
/// [`DEFAULT_TO_HOST_FAILURE`] if none is given.
///
/// # Examples
///
/// ```
/// use viewref::{
///     ArrayRef,
///     utf16::{ConversionErrorKind, string_to_host},
/// };
///
/// let lone_surrogate = [0xD800u16];
/// let error = string_to_host::<String>(ArrayRef::new(&lone_surrogate), Some("bad buffer"))
///     .unwrap_err();
///
/// assert_eq!(error.kind(), ConversionErrorKind::Unrepresentable);
/// assert_eq!(error.message(), Some("bad buffer"));
/// ```
pub fn string_to_host<H: FromUtf16>(
    units: ArrayRef<'_, u16>,
    failure_message: Option<&str>,
) -> Result<H, ConversionError> {
    H::from_utf16(units).map_err(|kind| {
        ConversionError::new(kind, Some(failure_message.unwrap_or(DEFAULT_TO_HOST_FAILURE)))
    })
}

/// What kind of conversion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConversionErrorKind {
    /// The host value was not string-like.
    NotAString,
    /// The code units cannot be represented as the requested host value.
    Unrepresentable,
}

impl core::fmt::Display for ConversionErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConversionErrorKind::NotAString => write!(f, "value is not a string"),
            ConversionErrorKind::Unrepresentable => {
                write!(f, "text cannot be represented as a host string")
            }
        }
    }
}

/// Error returned when a string conversion fails.
///
/// Displays the attached message if there is one, and a description of the
/// [`ConversionErrorKind`] otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    kind: ConversionErrorKind,
    message: Option<String>,
}

impl ConversionError {
    /// Creates a new error of the given kind with an optional message.
    #[must_use]
    pub fn new(kind: ConversionErrorKind, message: Option<&str>) -> Self {
        Self {
            kind,
            message: message.map(ToString::to_string),
        }
    }

    /// Returns the kind of failure.
    #[must_use]
    pub const fn kind(&self) -> ConversionErrorKind {
        self.kind
    }

    /// Returns the attached message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl core::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => core::fmt::Display::fmt(&self.kind, f),
        }
    }
}

impl core::error::Error for ConversionError {}
