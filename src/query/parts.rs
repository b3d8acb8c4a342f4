//! Splitting a template into literal spans and placeholder descriptors.

use std::ops::Range;

use tracing::{debug, trace};

use super::Placeholder;
use super::locator::{MatchKind, Placeholders};
use crate::error::{PlaceholderError, Result};

/// A literal span followed by the placeholder that ends it.
///
/// The literal borrows from the scanned template and still contains any
/// `%%` escapes; run it through [`crate::escape`] to collapse them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryPart<'a> {
    pre_start: usize,
    pre: &'a [u8],
    placeholder: Placeholder<'a>,
    end: usize,
}

impl<'a> QueryPart<'a> {
    /// Literal bytes between the previous placeholder (or the start of the
    /// template) and this placeholder.
    pub fn pre(&self) -> &'a [u8] {
        self.pre
    }

    /// Position of [`pre`](Self::pre) within the template.
    pub fn pre_range(&self) -> Range<usize> {
        self.pre_start..self.pre_start + self.pre.len()
    }

    pub fn placeholder(&self) -> Placeholder<'a> {
        self.placeholder
    }

    /// Offset just past the placeholder, where the next literal begins.
    pub fn end(&self) -> usize {
        self.end
    }
}

/// Fills `out` with one [`QueryPart`] per placeholder, in scan order, and
/// returns how many were written.
///
/// Positional placeholders are numbered 0, 1, 2… in the order they appear.
/// Keyword placeholders reference their name inside `input`.
///
/// This does not reject mixed styles; run [`count_placeholders`] first and
/// size `out` from its result.
///
/// [`count_placeholders`]: super::count_placeholders
///
/// # Errors
///
/// - Any locator error, unchanged.
/// - [`PlaceholderError::BufferOverflow`] when a placeholder is found with
///   `out` already full. Nothing is written past the end of `out`.
///
/// # Examples
///
/// ```
/// use pgph::query::{search_placeholders, Placeholder, QueryPart};
///
/// let query = b"select %s from %(t)";
/// let mut parts = [QueryPart::default(); 2];
/// let written = search_placeholders(&mut parts, query).unwrap();
/// assert_eq!(written, 2);
/// assert_eq!(parts[0].pre(), b"select ");
/// assert_eq!(parts[1].placeholder(), Placeholder::Keyword { name: b"t" });
/// ```
pub fn search_placeholders<'a>(out: &mut [QueryPart<'a>], input: &'a [u8]) -> Result<usize> {
    let mut written = 0;
    let mut pre_start = 0;
    let mut next_index = 0;

    for found in Placeholders::new(input) {
        let found = found?;

        let Some(slot) = out.get_mut(written) else {
            debug!(capacity = out.len(), "too many placeholders for output buffer");
            return Err(PlaceholderError::BufferOverflow);
        };

        let placeholder = match found.kind() {
            MatchKind::Positional(format) => {
                let index = next_index;
                next_index += 1;
                Placeholder::Positional { index, format }
            }
            MatchKind::Keyword => Placeholder::Keyword {
                name: &input[found.span()],
            },
        };

        *slot = QueryPart {
            pre_start,
            pre: &input[pre_start..found.start()],
            placeholder,
            end: found.end(),
        };
        trace!(part = written, pre_start, start = found.start(), "recorded query part");

        written += 1;
        pre_start = found.end();
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Format;

    fn parts(input: &[u8]) -> Vec<QueryPart<'_>> {
        let mut out = vec![QueryPart::default(); 8];
        let n = search_placeholders(&mut out, input).unwrap();
        out.truncate(n);
        out
    }

    #[test]
    fn no_placeholders_writes_nothing() {
        let mut out = [QueryPart::default(); 0];
        assert_eq!(search_placeholders(&mut out, b"select 1"), Ok(0));
        assert_eq!(search_placeholders(&mut out, b""), Ok(0));
    }

    #[test]
    fn positional_indices_follow_scan_order() {
        let got = parts(b"select %s from %t %% %b");
        let placeholders: Vec<_> = got.iter().map(QueryPart::placeholder).collect();
        assert_eq!(
            placeholders,
            vec![
                Placeholder::Positional { index: 0, format: Format::Auto },
                Placeholder::Positional { index: 1, format: Format::Text },
                Placeholder::Positional { index: 2, format: Format::Binary },
            ]
        );
    }

    #[test]
    fn literal_spans_keep_escapes() {
        let input = b"select %s from %s %% %b";
        let got = parts(input);
        assert_eq!(got[0].pre(), b"select ");
        assert_eq!(got[0].pre_range(), 0..7);
        assert_eq!(got[1].pre(), b" from ");
        assert_eq!(got[2].pre(), b" %% ");
        assert_eq!(&input[got[2].pre_range()], b" %% ");
        assert_eq!(got[2].end(), input.len());
    }

    #[test]
    fn keyword_names_recovered() {
        let got = parts(b"%(k1) %% and %% %(k2) where %(k3)");
        let names: Vec<_> = got.iter().filter_map(|p| p.placeholder().name()).collect();
        assert_eq!(names, vec![&b"k1"[..], b"k2", b"k3"]);
        assert_eq!(got[0].pre(), b"");
        assert_eq!(got[1].pre(), b" %% and %% ");
        assert_eq!(got[2].pre(), b" where ");
        assert!(got.iter().all(|p| p.placeholder().format() == Format::Auto));
    }

    #[test]
    fn overflow_guarded_before_write() {
        let sentinel = QueryPart {
            pre_start: 99,
            pre: b"untouched",
            placeholder: Placeholder::Keyword { name: b"x" },
            end: 0,
        };
        let mut out = [QueryPart::default(), QueryPart::default(), sentinel];
        assert_eq!(
            search_placeholders(&mut out[..2], b"%s %s %s"),
            Err(PlaceholderError::BufferOverflow)
        );
        assert_eq!(out[1].placeholder().index(), Some(1));
        assert_eq!(out[2], sentinel);
    }

    #[test]
    fn zero_capacity_with_placeholder_overflows() {
        let mut out: [QueryPart<'_>; 0] = [];
        assert_eq!(
            search_placeholders(&mut out, b"%s"),
            Err(PlaceholderError::BufferOverflow)
        );
    }

    #[test]
    fn locator_errors_propagate() {
        let mut out = [QueryPart::default(); 4];
        assert_eq!(
            search_placeholders(&mut out, b"%s %("),
            Err(PlaceholderError::UnclosedKeyword { offset: 3 })
        );
    }
}
