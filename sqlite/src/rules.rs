//! Named closure contracts for the predicate injection points.
//!
//! These are plain `FnOnce` aliases with blanket impls: any closure of the
//! right shape qualifies, and helper signatures stay readable without a
//! tangle of higher-order bounds at every call site.

use critq_core::{Sql, Table};

use crate::scope::{Root, Subquery};
use crate::select::Select;
use crate::values::SqliteValue;

/// Builds a predicate against a query's root scope.
pub trait PredicateRule<T: Table>: FnOnce(&Root<T>) -> Sql<SqliteValue> {}

impl<T: Table, F> PredicateRule<T> for F where F: FnOnce(&Root<T>) -> Sql<SqliteValue> {}

/// Builds a predicate against a query's root scope and a fresh correlated
/// subquery scope.
pub trait SubqueryRule<T: Table, V: Table>:
    FnOnce(&Root<T>, &mut Subquery<V>) -> Sql<SqliteValue>
{
}

impl<T: Table, V: Table, F> SubqueryRule<T, V> for F where
    F: FnOnce(&Root<T>, &mut Subquery<V>) -> Sql<SqliteValue>
{
}

/// Transforms an empty query scope into a fully constructed query.
pub trait QueryRule<'c, T: Table>: FnOnce(Select<'c, T>) -> Select<'c, T> {}

impl<'c, T: Table, F> QueryRule<'c, T> for F where F: FnOnce(Select<'c, T>) -> Select<'c, T> {}
