//! Placeholder counting and mixed-style validation.

use serde::Serialize;
use tracing::debug;

use super::locator::{MatchKind, Placeholders};
use super::{Mode, Style};
use crate::error::{PlaceholderError, Result};

/// Outcome of a successful validation scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    /// Number of placeholders found.
    pub count: usize,
    /// The single style the template uses.
    pub style: Style,
}

/// Scans the whole template, counting placeholders and recording which
/// styles appear.
///
/// Mixed styles are only rejected once the scan completes, so a malformed
/// placeholder anywhere in the buffer takes precedence over mixing.
///
/// # Errors
///
/// - Any locator error ([`PlaceholderError::UnclosedKeyword`],
///   [`PlaceholderError::InvalidPlaceholder`]), unchanged.
/// - [`PlaceholderError::MixedPlaceholders`] if both styles were seen.
///
/// # Examples
///
/// ```
/// use pgph::query::{scan, Style};
///
/// let summary = scan(b"%(k1) %% and %% %(k2) where %(k3)").unwrap();
/// assert_eq!(summary.count, 3);
/// assert_eq!(summary.style, Style::Keyword);
/// ```
pub fn scan(input: &[u8]) -> Result<Summary> {
    let mut mode = Mode::EMPTY;
    let mut count = 0;

    for found in Placeholders::new(input) {
        let found = found?;
        mode.insert(match found.kind() {
            MatchKind::Positional(_) => Mode::POSITIONAL,
            MatchKind::Keyword => Mode::KEYWORD,
        });
        count += 1;
    }

    let Some(style) = mode.style() else {
        debug!(count, "rejecting template with mixed placeholder styles");
        return Err(PlaceholderError::MixedPlaceholders);
    };

    debug!(count, ?style, "template scanned");
    Ok(Summary { count, style })
}

/// Returns the number of placeholders in a template that uses a single style.
///
/// See [`scan`] for the errors.
///
/// ```
/// use pgph::error::PlaceholderError;
/// use pgph::query::count_placeholders;
///
/// assert_eq!(count_placeholders(b"select %s from %s %% %b"), Ok(3));
/// assert_eq!(
///     count_placeholders(b"mixed %(keyword) and %s positional %b"),
///     Err(PlaceholderError::MixedPlaceholders)
/// );
/// ```
pub fn count_placeholders(input: &[u8]) -> Result<usize> {
    scan(input).map(|summary| summary.count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_placeholders() {
        assert_eq!(count_placeholders(b"select 1"), Ok(0));
        assert_eq!(count_placeholders(b""), Ok(0));
        assert_eq!(scan(b"100%%").unwrap().style, Style::None);
    }

    #[test]
    fn positional_only() {
        let summary = scan(b"select %s from %s %% %b").unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.style, Style::Positional);
    }

    #[test]
    fn mixed_in_either_order() {
        assert_eq!(
            count_placeholders(b"%s and %(k)"),
            Err(PlaceholderError::MixedPlaceholders)
        );
        assert_eq!(
            count_placeholders(b"%(k) and %t"),
            Err(PlaceholderError::MixedPlaceholders)
        );
    }

    #[test]
    fn malformed_wins_over_mixed() {
        assert_eq!(
            count_placeholders(b"%s %(k) %("),
            Err(PlaceholderError::UnclosedKeyword { offset: 8 })
        );
        assert_eq!(
            count_placeholders(b"%s %(k) %z"),
            Err(PlaceholderError::InvalidPlaceholder { offset: 8 })
        );
    }

    #[test]
    fn summary_serializes() {
        let summary = scan(b"%t %b").unwrap();
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json, serde_json::json!({ "count": 2, "style": "positional" }));
    }
}
