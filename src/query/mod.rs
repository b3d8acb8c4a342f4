//! Query template scanning.
//!
//! A template is a byte buffer holding literal text interleaved with
//! placeholders. Two placeholder styles exist and a template must stick to
//! one of them:
//!
//! | Form       | Style      | Descriptor                           |
//! |------------|------------|--------------------------------------|
//! | `%s`       | positional | [`Format::Auto`], next ordinal index |
//! | `%t`       | positional | [`Format::Text`], next ordinal index |
//! | `%b`       | positional | [`Format::Binary`], next ordinal index |
//! | `%(name)`  | keyword    | [`Format::Auto`], `name`             |
//!
//! `%%` is a literal percent sign and never a placeholder.
//!
//! The building blocks, leaves first:
//!
//! - [`locator`]: find the next placeholder after an offset.
//! - [`counter`]: count placeholders and reject mixed styles.
//! - [`parts`]: split the template into [`QueryPart`]s.
//! - [`template`]: count, allocate and split in one call.
//! - [`postgres`]: rewrite a template to `$n` parameters.

use std::fmt;

use serde::Serialize;

pub mod counter;
pub mod locator;
pub mod parts;
pub mod postgres;
pub mod template;

pub use counter::{Summary, count_placeholders, scan};
pub use locator::{Match, Placeholders, find_placeholder};
pub use parts::{QueryPart, search_placeholders};
pub use postgres::PgQuery;
pub use template::Template;

/// Opens a keyword placeholder when it follows `%`.
pub const KEYWORD_OPEN: u8 = b'(';

/// Terminates a keyword placeholder name.
pub const KEYWORD_CLOSE: u8 = b')';

/// The wire format requested for a parameter.
///
/// # Examples
///
/// ```
/// use pgph::query::Format;
///
/// let format = Format::try_from(b't').unwrap();
/// assert_eq!(format, Format::Text);
/// assert_eq!(format.as_char(), 't');
/// assert_eq!(format.to_string(), "%t");
/// assert!(Format::try_from(b'x').is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum Format {
    /// `%s`: let the driver pick text or binary.
    #[default]
    Auto = b's',
    /// `%t`: always text.
    Text = b't',
    /// `%b`: always binary.
    Binary = b'b',
}

impl Format {
    /// Returns the format letter as a byte.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Returns the format letter as a `char`.
    pub fn as_char(self) -> char {
        char::from(self.as_byte())
    }
}

impl TryFrom<u8> for Format {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            b's' => Ok(Self::Auto),
            b't' => Ok(Self::Text),
            b'b' => Ok(Self::Binary),
            other => Err(other),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.as_char())
    }
}

/// A normalized placeholder descriptor.
///
/// Keyword names borrow from the scanned template; nothing is copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder<'a> {
    /// `%s`, `%t` or `%b`, bound by ordinal position (0-based, scan order).
    Positional { index: usize, format: Format },
    /// `%(name)`, bound by name. Always [`Format::Auto`].
    Keyword { name: &'a [u8] },
}

impl<'a> Placeholder<'a> {
    /// Returns the requested format. Keyword placeholders are always `Auto`.
    pub fn format(&self) -> Format {
        match self {
            Self::Positional { format, .. } => *format,
            Self::Keyword { .. } => Format::Auto,
        }
    }

    /// Returns the positional index, if this is a positional placeholder.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Positional { index, .. } => Some(*index),
            Self::Keyword { .. } => None,
        }
    }

    /// Returns the keyword name, if this is a keyword placeholder.
    pub fn name(&self) -> Option<&'a [u8]> {
        match self {
            Self::Positional { .. } => None,
            Self::Keyword { name } => Some(*name),
        }
    }

    /// Returns the mode bit this placeholder contributes.
    pub fn mode(&self) -> Mode {
        match self {
            Self::Positional { .. } => Mode::POSITIONAL,
            Self::Keyword { .. } => Mode::KEYWORD,
        }
    }
}

impl Default for Placeholder<'_> {
    fn default() -> Self {
        Self::Positional {
            index: 0,
            format: Format::Auto,
        }
    }
}

/// Bitset of the placeholder styles seen during a scan.
///
/// ```
/// use pgph::query::{Mode, Style};
///
/// let mut mode = Mode::EMPTY;
/// mode.insert(Mode::KEYWORD);
/// assert_eq!(mode.style(), Some(Style::Keyword));
/// mode.insert(Mode::POSITIONAL);
/// assert!(mode.is_mixed());
/// assert_eq!(mode.style(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mode(u8);

impl Mode {
    pub const EMPTY: Mode = Mode(0);
    pub const KEYWORD: Mode = Mode(1);
    pub const POSITIONAL: Mode = Mode(2);

    /// Adds the bits of `other`.
    pub fn insert(&mut self, other: Mode) {
        self.0 |= other.0;
    }

    /// Returns `true` if every bit of `other` is set.
    pub fn contains(self, other: Mode) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` once both styles have been seen.
    pub fn is_mixed(self) -> bool {
        self.contains(Mode(Self::KEYWORD.0 | Self::POSITIONAL.0))
    }

    /// Returns the single style in use, or `None` if the bitset is mixed.
    pub fn style(self) -> Option<Style> {
        match (self.contains(Self::POSITIONAL), self.contains(Self::KEYWORD)) {
            (false, false) => Some(Style::None),
            (true, false) => Some(Style::Positional),
            (false, true) => Some(Style::Keyword),
            (true, true) => None,
        }
    }

    /// Returns the raw bits.
    pub fn bits(self) -> u8 {
        self.0
    }
}

/// The placeholder style a valid template commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// No placeholders at all.
    #[default]
    None,
    Positional,
    Keyword,
}
