//! The fluent fixed-target query builder.

use std::marker::PhantomData;

use critq_core::{AsPath, Column, Error, Filter, Result, SelectSpec, SortDirection, Sql, Table};
use rusqlite::{Connection, params_from_iter};

use crate::row::FromRow;
use crate::rules::{PredicateRule, SubqueryRule};
use crate::scope::{Root, Subquery};
use crate::values::SqliteValue;

/// Builds a filtered, optionally sorted SELECT against one entity type, then
/// executes it in one of several result shapes.
///
/// Filter methods each append exactly one predicate descriptor and return
/// the builder for chaining; every terminal operation compiles a fresh
/// statement from the conjunction of everything accumulated so far and
/// executes it. Calling two terminals on one builder issues the query twice.
///
/// Duplicate-row elimination is on by default, matching the behavior callers
/// expect when list-relation filters introduce joins.
pub struct Select<'c, T: Table> {
    conn: &'c Connection,
    distinct: bool,
    filters: Vec<Filter<SqliteValue>>,
    order: Option<(&'static str, SortDirection)>,
    subquery_seq: usize,
    marker: PhantomData<fn() -> T>,
}

impl<'c, T: Table> Select<'c, T> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            distinct: true,
            filters: Vec::new(),
            order: None,
            subquery_seq: 0,
            marker: PhantomData,
        }
    }

    fn push(mut self, filter: Filter<SqliteValue>) -> Self {
        self.filters.push(filter);
        self
    }

    //--------------------------------------------------------------------
    // Filters
    //--------------------------------------------------------------------

    /// Equality on a root column or a joined path.
    pub fn has<W, P>(self, path: P, value: impl Into<W>) -> Self
    where
        P: AsPath<T, W>,
        W: Into<SqliteValue>,
    {
        self.push(Filter::Eq {
            path: path.into_path().erase(),
            value: value.into().into(),
        })
    }

    /// `IS NOT NULL` on a root column or a joined path.
    pub fn has_some<W, P>(self, path: P) -> Self
    where
        P: AsPath<T, W>,
    {
        self.push(Filter::NotNull {
            path: path.into_path().erase(),
        })
    }

    /// `IS NULL` on a root column or a joined path.
    pub fn has_null<W, P>(self, path: P) -> Self
    where
        P: AsPath<T, W>,
    {
        self.push(Filter::Null {
            path: path.into_path().erase(),
        })
    }

    /// Membership of a path's value in a collection.
    ///
    /// An empty collection excludes every row; the filter is never treated
    /// as absent.
    pub fn is_in<W, P, I>(self, path: P, values: I) -> Self
    where
        P: AsPath<T, W>,
        W: Into<SqliteValue>,
        I: IntoIterator,
        I::Item: Into<W>,
    {
        self.push(Filter::In {
            path: path.into_path().erase(),
            values: values
                .into_iter()
                .map(|value| value.into().into())
                .collect(),
        })
    }

    /// Strict less-than on a path.
    pub fn lt<W, P>(self, path: P, value: impl Into<W>) -> Self
    where
        P: AsPath<T, W>,
        W: Into<SqliteValue>,
    {
        self.push(Filter::Lt {
            path: path.into_path().erase(),
            value: value.into().into(),
        })
    }

    /// Strict greater-than on a path.
    pub fn gt<W, P>(self, path: P, value: impl Into<W>) -> Self
    where
        P: AsPath<T, W>,
        W: Into<SqliteValue>,
    {
        self.push(Filter::Gt {
            path: path.into_path().erase(),
            value: value.into().into(),
        })
    }

    /// Appends a predicate built by the caller against the query root.
    pub fn by(self, rule: impl PredicateRule<T>) -> Self {
        let root = Root::new();
        let predicate = rule(&root);
        self.push(Filter::Custom(predicate))
    }

    /// Alias of [`by`](Self::by), kept for call sites that read better as
    /// "on condition".
    pub fn on(self, rule: impl PredicateRule<T>) -> Self {
        self.by(rule)
    }

    /// Appends a predicate built against the root and a fresh correlated
    /// subquery scope over `V`.
    pub fn by_subquery<V: Table>(mut self, rule: impl SubqueryRule<T, V>) -> Self {
        self.subquery_seq += 1;
        let mut scope = Subquery::with_alias(format!("s{}", self.subquery_seq));
        let root = Root::new();
        let predicate = rule(&root, &mut scope);
        self.push(Filter::Custom(predicate))
    }

    /// Toggles duplicate-row elimination (on by default).
    pub fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    //--------------------------------------------------------------------
    // Ordering
    //--------------------------------------------------------------------

    /// Ascending order by a root column. Only the last-applied ordering
    /// takes effect.
    pub fn asc<W>(mut self, column: Column<T, W>) -> Self {
        self.order = Some((column.name, SortDirection::Asc));
        self
    }

    /// Descending order by a root column. Only the last-applied ordering
    /// takes effect.
    pub fn desc<W>(mut self, column: Column<T, W>) -> Self {
        self.order = Some((column.name, SortDirection::Desc));
        self
    }

    /// Order by a root column in the given direction.
    pub fn sort<W>(self, column: Column<T, W>, direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => self.asc(column),
            SortDirection::Desc => self.desc(column),
        }
    }

    //--------------------------------------------------------------------
    // Finalization and execution
    //--------------------------------------------------------------------

    fn spec(&self, limit: Option<usize>, count: bool) -> SelectSpec<'_, SqliteValue> {
        SelectSpec {
            table: T::NAME,
            primary_key: T::PRIMARY_KEY,
            columns: T::COLUMNS,
            lead: None,
            distinct: self.distinct,
            count,
            filters: &self.filters,
            order: self.order,
            limit,
        }
    }

    /// The statement this builder would execute, for inspection.
    pub fn to_sql(&self) -> Sql<SqliteValue> {
        self.spec(None, false).to_sql()
    }

    fn fetch(&self, limit: Option<usize>) -> Result<Vec<T>>
    where
        T: FromRow,
    {
        let (text, params) = self.spec(limit, false).to_sql().into_parts();
        tracing::debug!(sql = %text, params = params.len(), "executing select");
        let mut stmt = self.conn.prepare(&text)?;
        let rows = stmt.query_map(params_from_iter(params), |row| T::try_from(row))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    //--------------------------------------------------------------------
    // Terminals
    //--------------------------------------------------------------------

    /// Exactly one matching row; [`Error::NotFound`] on zero,
    /// [`Error::NonUnique`] on more than one.
    pub fn single(&self) -> Result<T>
    where
        T: FromRow,
    {
        let mut rows = self.fetch(Some(2))?;
        match rows.len() {
            0 => Err(Error::NotFound),
            1 => Ok(rows.remove(0)),
            _ => Err(Error::NonUnique),
        }
    }

    /// Zero or one matching row; [`Error::NonUnique`] on more than one.
    pub fn optional(&self) -> Result<Option<T>>
    where
        T: FromRow,
    {
        let mut rows = self.fetch(Some(2))?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(Some(rows.remove(0))),
            _ => Err(Error::NonUnique),
        }
    }

    /// Like [`single`](Self::single), but "no rows" maps through the
    /// caller's lazy error factory instead of [`Error::NotFound`].
    pub fn required<E>(&self, error: impl FnOnce() -> E) -> std::result::Result<T, E>
    where
        T: FromRow,
        E: From<Error>,
    {
        let mut rows = self.fetch(Some(2)).map_err(E::from)?;
        match rows.len() {
            0 => Err(error()),
            1 => Ok(rows.remove(0)),
            _ => Err(E::from(Error::NonUnique)),
        }
    }

    /// The first matching row in result order, if any.
    pub fn first(&self) -> Result<Option<T>>
    where
        T: FromRow,
    {
        Ok(self.fetch(Some(1))?.into_iter().next())
    }

    /// All matching rows.
    pub fn list(&self) -> Result<Vec<T>>
    where
        T: FromRow,
    {
        self.fetch(None)
    }

    /// At most `max` matching rows.
    pub fn list_max(&self, max: usize) -> Result<Vec<T>>
    where
        T: FromRow,
    {
        self.fetch(Some(max))
    }

    /// An iterator over all matching rows. The result set is materialized
    /// before iteration; this layer is synchronous by contract.
    pub fn stream(&self) -> Result<std::vec::IntoIter<T>>
    where
        T: FromRow,
    {
        Ok(self.fetch(None)?.into_iter())
    }

    /// The number of matching rows, honoring duplicate elimination.
    pub fn count(&self) -> Result<u64> {
        let (text, params) = self.spec(None, true).to_sql().into_parts();
        tracing::debug!(sql = %text, params = params.len(), "executing count");
        let mut stmt = self.conn.prepare(&text)?;
        let count: i64 = stmt.query_row(params_from_iter(params), |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}
