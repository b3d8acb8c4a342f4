//! Validated, split query templates.

use std::ops::Range;

use super::counter::scan;
use super::parts::{QueryPart, search_placeholders};
use super::postgres::PgQuery;
use super::{Placeholder, Style};
use crate::error::{PlaceholderError, Result};

/// A query template that has been validated and split into parts.
///
/// Created by [`Template::parse`], which validates the whole buffer first and
/// only then materializes exactly as many parts as it counted. Everything
/// borrows from the original buffer.
///
/// # Examples
///
/// ```
/// use pgph::query::{Style, Template};
///
/// let template = Template::parse(b"select %s from t where id = %b;").unwrap();
/// assert_eq!(template.len(), 2);
/// assert_eq!(template.style(), Style::Positional);
/// assert_eq!(template.parts()[1].pre(), b" from t where id = ");
/// assert_eq!(template.tail(), b";");
/// ```
#[derive(Debug, Clone)]
pub struct Template<'a> {
    source: &'a [u8],
    parts: Vec<QueryPart<'a>>,
    style: Style,
}

impl<'a> Template<'a> {
    /// Validates `source` and splits it into parts.
    ///
    /// # Errors
    ///
    /// - Any validation error from [`scan`](super::scan).
    /// - [`PlaceholderError::AllocationFailure`] if the part list cannot be
    ///   allocated.
    pub fn parse(source: &'a [u8]) -> Result<Self> {
        let summary = scan(source)?;

        let mut parts = Vec::new();
        parts
            .try_reserve_exact(summary.count)
            .map_err(|_| PlaceholderError::AllocationFailure)?;
        parts.resize(summary.count, QueryPart::default());

        let written = search_placeholders(&mut parts, source)?;
        debug_assert_eq!(written, summary.count);

        Ok(Self {
            source,
            parts,
            style: summary.style,
        })
    }

    /// The buffer this template was parsed from.
    pub fn source(&self) -> &'a [u8] {
        self.source
    }

    pub fn parts(&self) -> &[QueryPart<'a>] {
        &self.parts
    }

    /// Iterates over the placeholder descriptors in scan order.
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder<'a>> + '_ {
        self.parts.iter().map(QueryPart::placeholder)
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Number of placeholders.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if the template has no placeholders.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Literal bytes after the last placeholder (the whole source if there
    /// are none). Escapes are not collapsed.
    pub fn tail(&self) -> &'a [u8] {
        &self.source[self.tail_range()]
    }

    /// Position of [`tail`](Self::tail) within the source.
    pub fn tail_range(&self) -> Range<usize> {
        let start = self.parts.last().map_or(0, QueryPart::end);
        start..self.source.len()
    }

    /// Rewrites the template with PostgreSQL `$n` parameters.
    ///
    /// See [`PgQuery`] for the numbering rules.
    pub fn to_postgres(&self) -> Result<PgQuery<'a>> {
        PgQuery::from_template(self)
    }
}
