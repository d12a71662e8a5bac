//! critq is a fluent criteria-select convenience layer over SQLite.
//!
//! critq reduces the boilerplate of dynamic, typed SELECT queries: chainable
//! filters against one target table, joins navigated through typed relation
//! descriptors, closure injection points for predicates the fixed methods
//! don't cover, and terminals for the common result shapes (exactly one,
//! optional, list, iterator, capped list, count).
//!
//! The persistence provider is [`rusqlite`]; critq owns no storage, no
//! transactions, and no caching. Builders are plain values confined to one
//! logical thread; every terminal call compiles and executes a fresh
//! statement.
//!
//! # Example
//!
//! ```ignore
//! use critq::prelude::*;
//!
//! let db = Db::new(Connection::open_in_memory()?);
//!
//! // All adults named Alice, youngest first.
//! let people: Vec<Person> = db
//!     .find::<Person>()
//!     .has(person::NAME, "Alice")
//!     .gt(person::AGE, 17i64)
//!     .asc(person::AGE)
//!     .list()?;
//!
//! // People on a team in a given city, via a typed join path.
//! let hosts = db
//!     .find::<Person>()
//!     .has(person::TEAM.get(team::CITY), "Utrecht")
//!     .list()?;
//! ```

mod db;

pub use critq_core::{
    AsPath, Chunk, Column, Error, Filter, Hops, JoinSpec, ListRelation, Path, PathSpec, Relation,
    Result, SelectSpec, SortDirection, Sql, SqlParam, Table, ToSql, conditions,
};
pub use critq_sqlite::{
    FromRow, PredicateRule, QueryRule, Root, Select, SqliteValue, Subquery, SubqueryRule, ToRow,
    subquery,
};
pub use db::Db;

/// Everything a call site normally needs.
pub mod prelude {
    pub use crate::Db;
    pub use critq_core::{
        Column, Error, ListRelation, Relation, Result, SortDirection, Sql, Table, ToSql,
        conditions::*,
    };
    pub use critq_sqlite::{
        FromRow, PredicateRule, QueryRule, Root, Select, SqliteValue, Subquery, SubqueryRule,
        ToRow, subquery,
    };
    pub use rusqlite::Connection;
}
