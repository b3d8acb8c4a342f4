//! # pgph
//!
//! A zero-copy scanner for psycopg-style query templates.
//!
//! A template is a byte buffer mixing literal SQL with placeholders:
//! positional (`%s`, `%t`, `%b`) or keyword (`%(name)`), never both. `%%`
//! writes a literal percent sign.
//!
//! ## Quick Start
//!
//! ```rust
//! use pgph::query::{count_placeholders, Template};
//! use pgph::escape::escape_owned;
//!
//! let query = b"select %s from %s %% %b";
//! assert_eq!(count_placeholders(query).unwrap(), 3);
//! assert_eq!(&escape_owned(query).unwrap()[..], b"select %s from %s % %b");
//!
//! let template = Template::parse(query).unwrap();
//! let pg = template.to_postgres().unwrap();
//! assert_eq!(&pg.text()[..], b"select $1 from $2 % $3");
//! ```
//!
//! Nothing here performs I/O or holds state between calls; every scan is a
//! single forward pass over a borrowed buffer.

pub mod error;
pub mod escape;
pub mod query;

// ── Convenience re-exports ────────────────────────────────────────────────────
pub use error::{PlaceholderError, Result, placeholder_strerror};
pub use escape::{escape, escape_owned, escaped_len};
pub use query::{
    Format, Placeholder, QueryPart, Style, Template, count_placeholders, find_placeholder,
    search_placeholders,
};
