//! Forward scan for the next placeholder in a template.

use std::iter::FusedIterator;
use std::ops::Range;

use super::{Format, KEYWORD_CLOSE, KEYWORD_OPEN};
use crate::error::{PlaceholderError, Result};
use crate::escape::PERCENT;

/// Which kind of placeholder a [`Match`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// `%s`, `%t` or `%b`.
    Positional(Format),
    /// `%(name)`.
    Keyword,
}

/// A single placeholder occurrence located by [`find_placeholder`].
///
/// All positions are byte offsets into the scanned buffer:
///
/// ```text
///   select %(name) from t
///          ^ start
///            ^^^^ span (the name)
///                 ^ end
/// ```
///
/// For positional placeholders the span covers the single format letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    start: usize,
    offset: usize,
    len: usize,
    end: usize,
    kind: MatchKind,
}

impl Match {
    /// Offset of the introducing `%`; the literal text before the
    /// placeholder ends here.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset just past the placeholder; the next scan resumes here.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Offset of the matched payload (format letter or keyword name).
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the matched payload.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the payload is empty (only possible for `%()`).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The payload as a range into the scanned buffer.
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    pub fn kind(&self) -> MatchKind {
        self.kind
    }
}

/// Finds the first placeholder at or after `start`.
///
/// Rules, applied whenever a `%` with a following byte is seen:
///
/// 1. `%%` is skipped as a whole and never matched.
/// 2. `%(` opens a keyword; the name runs up to the first `)`.
/// 3. `%s`, `%t`, `%b` are positional placeholders.
/// 4. Anything else is malformed.
///
/// A `%` in the last byte position is benign and ends the scan.
///
/// # Errors
///
/// - [`PlaceholderError::UnclosedKeyword`]: `%(` without a following `)`.
/// - [`PlaceholderError::InvalidPlaceholder`]: `%` followed by an unknown byte.
///
/// # Examples
///
/// ```
/// use pgph::query::find_placeholder;
/// use pgph::query::locator::MatchKind;
///
/// let query = b"100%% of %(who)";
/// let m = find_placeholder(query, 0).unwrap().unwrap();
/// assert_eq!(m.kind(), MatchKind::Keyword);
/// assert_eq!(&query[m.span()], b"who");
/// assert_eq!(find_placeholder(query, m.end()).unwrap(), None);
/// ```
pub fn find_placeholder(input: &[u8], start: usize) -> Result<Option<Match>> {
    let mut p = start;

    while p < input.len() {
        if input[p] != PERCENT {
            p += 1;
            continue;
        }

        let Some(&next) = input.get(p + 1) else {
            break;
        };

        match next {
            PERCENT => p += 2,
            KEYWORD_OPEN => {
                let name_start = p + 2;
                let name_len = input[name_start..]
                    .iter()
                    .position(|&b| b == KEYWORD_CLOSE)
                    .ok_or(PlaceholderError::UnclosedKeyword { offset: p })?;

                return Ok(Some(Match {
                    start: p,
                    offset: name_start,
                    len: name_len,
                    end: name_start + name_len + 1,
                    kind: MatchKind::Keyword,
                }));
            }
            letter => {
                let format = Format::try_from(letter)
                    .map_err(|_| PlaceholderError::InvalidPlaceholder { offset: p })?;

                return Ok(Some(Match {
                    start: p,
                    offset: p + 1,
                    len: 1,
                    end: p + 2,
                    kind: MatchKind::Positional(format),
                }));
            }
        }
    }

    Ok(None)
}

/// Iterator over every placeholder in a template, in scan order.
///
/// Each step resumes at the previous match's [`end`](Match::end). The first
/// error is yielded once and ends the iteration.
///
/// ```
/// use pgph::query::Placeholders;
///
/// let found: Vec<_> = Placeholders::new(b"%s, %t and %b")
///     .map(|m| m.unwrap().start())
///     .collect();
/// assert_eq!(found, vec![0, 4, 11]);
/// ```
#[derive(Debug, Clone)]
pub struct Placeholders<'a> {
    input: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> Placeholders<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            done: false,
        }
    }

    /// Offset the next scan starts from.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Iterator for Placeholders<'_> {
    type Item = Result<Match>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match find_placeholder(self.input, self.pos) {
            Ok(Some(m)) => {
                self.pos = m.end();
                Some(Ok(m))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Placeholders<'_> {}
