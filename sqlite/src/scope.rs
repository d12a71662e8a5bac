//! Callback scopes handed to rule closures.

use std::marker::PhantomData;

use critq_core::{Column, Sql, Table};

use crate::values::SqliteValue;

/// The root scope of a query under construction. Rule callbacks use it to
/// reference columns of the target table inside custom predicates.
pub struct Root<T: Table> {
    marker: PhantomData<fn() -> T>,
}

impl<T: Table> Root<T> {
    pub(crate) fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }

    /// A qualified reference to one of the root table's columns.
    pub fn get<W>(&self, column: Column<T, W>) -> Sql<SqliteValue> {
        Sql::qualified(T::NAME, column.name)
    }
}

/// A correlated subquery scope over table `V`.
///
/// The subquery root is always aliased, so correlating against the outer
/// root works even when both target the same table. Accumulate conditions
/// with [`filter`](Self::filter), then turn the scope into a fragment with
/// [`select`](Self::select) or [`exists`](Self::exists).
pub struct Subquery<V: Table> {
    alias: String,
    filters: Vec<Sql<SqliteValue>>,
    marker: PhantomData<fn() -> V>,
}

impl<V: Table> Subquery<V> {
    pub(crate) fn with_alias(alias: String) -> Self {
        Self {
            alias,
            filters: Vec::new(),
            marker: PhantomData,
        }
    }

    /// A reference to one of the subquery root's columns, qualified by the
    /// subquery alias.
    pub fn get<W>(&self, column: Column<V, W>) -> Sql<SqliteValue> {
        Sql::qualified(&self.alias, column.name)
    }

    /// Adds one condition to the subquery; conditions are ANDed.
    pub fn filter(&mut self, condition: Sql<SqliteValue>) -> &mut Self {
        self.filters.push(condition);
        self
    }

    fn body(&self, projection: Sql<SqliteValue>) -> Sql<SqliteValue> {
        let mut sql = Sql::raw("SELECT ")
            .append(projection)
            .append_raw(" FROM ")
            .append(Sql::ident(V::NAME))
            .append_raw(" AS ")
            .append(Sql::ident(&self.alias));
        if !self.filters.is_empty() {
            let parts = self.filters.iter().map(|f| f.clone().parens());
            sql = sql.append_raw(" WHERE ").append(Sql::join(parts, " AND "));
        }
        sql
    }

    /// The subquery as a parenthesized scalar projection of `column`,
    /// suitable for `IN (…)` membership.
    pub fn select<W>(&self, column: Column<V, W>) -> Sql<SqliteValue> {
        self.body(Sql::qualified(&self.alias, column.name)).parens()
    }

    /// The subquery as an `EXISTS (…)` predicate.
    pub fn exists(&self) -> Sql<SqliteValue> {
        Sql::raw("EXISTS (")
            .append(self.body(Sql::raw("1")))
            .append_raw(")")
    }
}

/// Builds a standalone subquery scope over `V`, for composing predicates
/// outside a builder's own `by_subquery` entry point.
pub fn subquery<V: Table>(build: impl FnOnce(&mut Subquery<V>)) -> Subquery<V> {
    let mut scope = Subquery::with_alias("sq".to_string());
    build(&mut scope);
    scope
}
