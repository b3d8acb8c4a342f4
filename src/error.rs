//! Error taxonomy shared by every scanner in the crate.
//!
//! Each failure kind has a stable negative integer code and a fixed
//! human-readable description. [`placeholder_strerror`] is the lookup used by
//! layers that only carry the integer code around (e.g. across an FFI edge).

use thiserror::Error;

/// Errors produced while escaping or scanning a query template.
///
/// # Examples
///
/// ```
/// use pgph::error::PlaceholderError;
///
/// let err = PlaceholderError::MixedPlaceholders;
/// assert_eq!(err.code(), -5);
/// assert_eq!(PlaceholderError::from_code(-5), Some(err));
/// assert_eq!(
///     err.to_string(),
///     "Mixed usage of keyword and positional placeholders"
/// );
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderError {
    #[error("Null pointer dereference")]
    NullPointer,

    #[error("Dynamic allocation failure")]
    AllocationFailure,

    #[error("Unexpected empty buffer")]
    EmptyBuffer,

    /// `%(` at `offset` has no `)` before the end of the buffer.
    #[error("Unclosed keyword placeholder")]
    UnclosedKeyword { offset: usize },

    #[error("Mixed usage of keyword and positional placeholders")]
    MixedPlaceholders,

    #[error("Output buffer too small for the placeholders found")]
    BufferOverflow,

    /// The `%` at `offset` is followed by a byte that starts no known form.
    #[error("Invalid placeholder")]
    InvalidPlaceholder { offset: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PlaceholderError>;

const UNRECOGNIZED: &str = "Unrecognized return code";

impl PlaceholderError {
    /// Returns the stable negative code for this error kind.
    pub fn code(self) -> i32 {
        match self {
            Self::NullPointer => -1,
            Self::AllocationFailure => -2,
            Self::EmptyBuffer => -3,
            Self::UnclosedKeyword { .. } => -4,
            Self::MixedPlaceholders => -5,
            Self::BufferOverflow => -6,
            Self::InvalidPlaceholder { .. } => -7,
        }
    }

    /// Maps a code back to its error kind.
    ///
    /// Offsets are not part of the code, so positional variants come back
    /// with `offset: 0`.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            -1 => Self::NullPointer,
            -2 => Self::AllocationFailure,
            -3 => Self::EmptyBuffer,
            -4 => Self::UnclosedKeyword { offset: 0 },
            -5 => Self::MixedPlaceholders,
            -6 => Self::BufferOverflow,
            -7 => Self::InvalidPlaceholder { offset: 0 },
            _ => return None,
        })
    }

    /// Returns the static description for this error kind.
    pub fn description(self) -> &'static str {
        match self {
            Self::NullPointer => "Null pointer dereference",
            Self::AllocationFailure => "Dynamic allocation failure",
            Self::EmptyBuffer => "Unexpected empty buffer",
            Self::UnclosedKeyword { .. } => "Unclosed keyword placeholder",
            Self::MixedPlaceholders => "Mixed usage of keyword and positional placeholders",
            Self::BufferOverflow => "Output buffer too small for the placeholders found",
            Self::InvalidPlaceholder { .. } => "Invalid placeholder",
        }
    }

    /// Byte offset of the offending `%`, for the kinds that record one.
    pub fn offset(self) -> Option<usize> {
        match self {
            Self::UnclosedKeyword { offset } | Self::InvalidPlaceholder { offset } => Some(offset),
            _ => None,
        }
    }
}

impl From<PlaceholderError> for i32 {
    fn from(err: PlaceholderError) -> i32 {
        err.code()
    }
}

/// Returns the description for an integer error code.
///
/// Unknown codes (including non-negative ones) map to a fixed fallback.
///
/// ```
/// use pgph::error::placeholder_strerror;
///
/// assert_eq!(placeholder_strerror(-4), "Unclosed keyword placeholder");
/// assert_eq!(placeholder_strerror(42), "Unrecognized return code");
/// ```
pub fn placeholder_strerror(code: i32) -> &'static str {
    PlaceholderError::from_code(code).map_or(UNRECOGNIZED, PlaceholderError::description)
}

/// Validates a possibly-absent buffer: absence is checked before emptiness.
pub fn require_buffer(buf: Option<&[u8]>) -> Result<&[u8]> {
    let buf = buf.ok_or(PlaceholderError::NullPointer)?;
    if buf.is_empty() {
        return Err(PlaceholderError::EmptyBuffer);
    }
    Ok(buf)
}
