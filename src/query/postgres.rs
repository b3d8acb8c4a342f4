//! Rewriting templates into PostgreSQL's native `$n` parameter syntax.

use std::collections::HashMap;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use super::Placeholder;
use super::template::Template;
use crate::error::Result;
use crate::escape::{escape, escaped_len};

/// A template rewritten for the PostgreSQL extended query protocol.
///
/// - Literal text has its `%%` escapes collapsed.
/// - Positional placeholders become `$1`, `$2`, … in order.
/// - Keyword placeholders are numbered by first appearance; repeating a name
///   reuses its number.
///
/// [`params`](Self::params) lists each parameter once, in `$n` order, so
/// `params()[n - 1]` describes `$n`. Values are not encoded here.
///
/// # Examples
///
/// ```
/// use pgph::query::{Placeholder, Template};
///
/// let template = Template::parse(b"%(a) + %(b) = 100%% of %(a)").unwrap();
/// let query = template.to_postgres().unwrap();
/// assert_eq!(&query.text()[..], b"$1 + $2 = 100% of $1");
/// assert_eq!(query.params()[1], Placeholder::Keyword { name: b"b" });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgQuery<'a> {
    text: Bytes,
    params: Vec<Placeholder<'a>>,
}

impl<'a> PgQuery<'a> {
    pub(crate) fn from_template(template: &Template<'a>) -> Result<Self> {
        let mut text = BytesMut::with_capacity(template.source().len());
        let mut params = Vec::with_capacity(template.len());
        let mut numbers: HashMap<&'a [u8], usize> = HashMap::new();

        for part in template.parts() {
            put_literal(&mut text, part.pre())?;

            let placeholder = part.placeholder();
            let number = match placeholder {
                Placeholder::Positional { .. } => {
                    params.push(placeholder);
                    params.len()
                }
                Placeholder::Keyword { name } => *numbers.entry(name).or_insert_with(|| {
                    params.push(placeholder);
                    params.len()
                }),
            };
            text.put(format!("${number}").as_bytes());
        }
        put_literal(&mut text, template.tail())?;

        debug!(
            placeholders = template.len(),
            params = params.len(),
            "converted template to postgres parameters"
        );

        Ok(Self {
            text: text.freeze(),
            params,
        })
    }

    /// The rewritten query text.
    pub fn text(&self) -> &Bytes {
        &self.text
    }

    /// One descriptor per `$n` parameter, in order.
    pub fn params(&self) -> &[Placeholder<'a>] {
        &self.params
    }

    /// Consumes the query, returning the text and the parameters.
    pub fn into_parts(self) -> (Bytes, Vec<Placeholder<'a>>) {
        (self.text, self.params)
    }
}

/// Appends `literal` to `buf` with `%%` collapsed.
fn put_literal(buf: &mut BytesMut, literal: &[u8]) -> Result<()> {
    if literal.is_empty() {
        return Ok(());
    }

    let start = buf.len();
    buf.resize(start + escaped_len(literal)?, 0);
    escape(&mut buf[start..], literal)?;
    Ok(())
}
