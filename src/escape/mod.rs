//! `%%` escape collapsing.
//!
//! A query template writes a literal percent sign as `%%`. These helpers
//! collapse every such pair into a single `%` without consulting the
//! placeholder scanner, so they can be applied to any literal span.
//!
//! A `%` in the final byte position has nothing to pair with and is copied
//! through unchanged.

use bytes::Bytes;
use tracing::trace;

use crate::error::{PlaceholderError, Result};

/// The byte that introduces placeholders and escapes.
pub const PERCENT: u8 = b'%';

/// Returns the length of `input` once every `%%` is collapsed to `%`.
///
/// # Errors
///
/// [`PlaceholderError::EmptyBuffer`] if `input` is empty.
///
/// # Examples
///
/// ```
/// use pgph::escape::escaped_len;
///
/// assert_eq!(escaped_len(b"100%% sure").unwrap(), 9);
/// assert_eq!(escaped_len(b"no escapes").unwrap(), 10);
/// ```
pub fn escaped_len(input: &[u8]) -> Result<usize> {
    if input.is_empty() {
        return Err(PlaceholderError::EmptyBuffer);
    }

    let mut len = 0;
    let mut i = 0;
    while i < input.len() {
        i += escape_width(input, i);
        len += 1;
    }
    Ok(len)
}

/// Writes `input` into `out` with every `%%` collapsed to `%`.
///
/// Writing stops silently once `out` is full, so `out` should be sized with
/// [`escaped_len`] first. Returns the number of bytes written.
///
/// # Errors
///
/// [`PlaceholderError::EmptyBuffer`] if `input` is empty.
pub fn escape(out: &mut [u8], input: &[u8]) -> Result<usize> {
    if input.is_empty() {
        return Err(PlaceholderError::EmptyBuffer);
    }

    let mut written = 0;
    let mut i = 0;
    while i < input.len() && written < out.len() {
        out[written] = input[i];
        written += 1;
        i += escape_width(input, i);
    }
    Ok(written)
}

/// Allocates a buffer of exactly [`escaped_len`] bytes and fills it via
/// [`escape`].
///
/// The returned [`Bytes`] owns its storage; dropping it releases the memory.
///
/// # Errors
///
/// - [`PlaceholderError::EmptyBuffer`] if `input` is empty.
/// - [`PlaceholderError::AllocationFailure`] if the buffer cannot be reserved.
///
/// # Examples
///
/// ```
/// use pgph::escape::escape_owned;
///
/// let out = escape_owned(b"select %s from %s %% %b").unwrap();
/// assert_eq!(&out[..], b"select %s from %s % %b");
/// ```
pub fn escape_owned(input: &[u8]) -> Result<Bytes> {
    let len = escaped_len(input)?;

    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| PlaceholderError::AllocationFailure)?;
    buf.resize(len, 0);

    let written = escape(&mut buf, input)?;
    debug_assert_eq!(written, len);
    trace!(input_len = input.len(), output_len = len, "escaped into owned buffer");

    Ok(Bytes::from(buf))
}

/// Number of input bytes consumed by the output byte starting at `i`:
/// two for a `%%` pair, one for anything else.
#[inline]
fn escape_width(input: &[u8], i: usize) -> usize {
    if input[i] == PERCENT && input.get(i + 1) == Some(&PERCENT) {
        2
    } else {
        1
    }
}
