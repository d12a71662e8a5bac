use compact_str::CompactString;
use smallvec::{SmallVec, smallvec};

use crate::traits::{SqlParam, ToSql};

/// One piece of a SQL statement: literal text or a bound parameter.
#[derive(Debug, Clone)]
pub enum Chunk<V: SqlParam> {
    Text(CompactString),
    Param(V),
}

/// A SQL statement or fragment with its bound parameters.
///
/// Fragments are assembled by appending; parameter order is the order in
/// which parameter chunks were appended. Rendering replaces every parameter
/// with a positional `?` placeholder, so `sql()` and `params()` always line
/// up.
#[derive(Debug, Clone)]
pub struct Sql<V: SqlParam> {
    pub(crate) chunks: SmallVec<[Chunk<V>; 4]>,
}

impl<V: SqlParam> Default for Sql<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V: SqlParam> Sql<V> {
    /// Creates an empty fragment.
    pub fn empty() -> Self {
        Self {
            chunks: SmallVec::new(),
        }
    }

    /// Creates a fragment from raw SQL text. The text is emitted verbatim,
    /// never parameterized.
    pub fn raw(text: impl AsRef<str>) -> Self {
        Self {
            chunks: smallvec![Chunk::Text(CompactString::from(text.as_ref()))],
        }
    }

    /// Creates a fragment holding a single bound parameter.
    pub fn parameter(value: impl Into<V>) -> Self {
        Self {
            chunks: smallvec![Chunk::Param(value.into())],
        }
    }

    /// Creates a comma-separated parameter list: `?, ?, ?`.
    pub fn parameters<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<V>,
    {
        let mut chunks: SmallVec<[Chunk<V>; 4]> = SmallVec::new();
        for (idx, value) in values.into_iter().enumerate() {
            if idx > 0 {
                chunks.push(Chunk::Text(CompactString::from(", ")));
            }
            chunks.push(Chunk::Param(value.into()));
        }
        Self { chunks }
    }

    /// Creates a quoted identifier: `"name"`.
    pub fn ident(name: impl AsRef<str>) -> Self {
        let mut text = CompactString::from("\"");
        text.push_str(name.as_ref());
        text.push('"');
        Self {
            chunks: smallvec![Chunk::Text(text)],
        }
    }

    /// Creates a qualified column reference: `"table"."column"`.
    pub fn qualified(qualifier: impl AsRef<str>, column: impl AsRef<str>) -> Self {
        let mut text = CompactString::from("\"");
        text.push_str(qualifier.as_ref());
        text.push_str("\".\"");
        text.push_str(column.as_ref());
        text.push('"');
        Self {
            chunks: smallvec![Chunk::Text(text)],
        }
    }

    /// Appends another fragment; text and parameters are merged in order.
    pub fn append(mut self, other: impl ToSql<V>) -> Self {
        self.chunks.extend(other.to_sql().chunks);
        self
    }

    /// Appends raw SQL text.
    pub fn append_raw(mut self, text: impl AsRef<str>) -> Self {
        self.chunks
            .push(Chunk::Text(CompactString::from(text.as_ref())));
        self
    }

    /// Wraps the fragment in parentheses.
    pub fn parens(self) -> Self {
        Sql::raw("(").append(self).append_raw(")")
    }

    /// Joins fragments with a separator, skipping empty ones.
    pub fn join<I>(parts: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = Sql<V>>,
    {
        let mut out = Sql::empty();
        let mut first = true;
        for part in parts {
            if part.is_empty() {
                continue;
            }
            if !first {
                out = out.append_raw(separator);
            }
            out = out.append(part);
            first = false;
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Renders the SQL text with `?` placeholders for parameters.
    pub fn sql(&self) -> String {
        let mut out = String::with_capacity(self.chunks.len() * 8);
        for chunk in &self.chunks {
            match chunk {
                Chunk::Text(text) => out.push_str(text),
                Chunk::Param(_) => out.push('?'),
            }
        }
        out
    }

    /// Returns the bound parameters in placeholder order.
    pub fn params(&self) -> Vec<&V> {
        self.chunks
            .iter()
            .filter_map(|chunk| match chunk {
                Chunk::Param(value) => Some(value),
                Chunk::Text(_) => None,
            })
            .collect()
    }

    /// Consumes the fragment, returning rendered text and owned parameters.
    pub fn into_parts(self) -> (String, Vec<V>) {
        let text = self.sql();
        let params = self
            .chunks
            .into_iter()
            .filter_map(|chunk| match chunk {
                Chunk::Param(value) => Some(value),
                Chunk::Text(_) => None,
            })
            .collect();
        (text, params)
    }
}

impl<V: SqlParam> std::fmt::Display for Sql<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sql: {:?}, params: {:?}", self.sql(), self.params())
    }
}
