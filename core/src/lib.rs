//! Provider-agnostic core for critq: SQL fragments with bound parameters,
//! typed schema descriptors, condition combinators, and the predicate
//! descriptors a fluent builder accumulates before finalization.
//!
//! Nothing in this crate talks to a database. The SQLite binding lives in
//! `critq-sqlite`; the user-facing facade is the `critq` crate.

pub mod conditions;
mod error;
mod filter;
mod order;
mod schema;
mod sql;
mod traits;

pub use error::{Error, Result};
pub use filter::{Filter, SelectSpec};
pub use order::SortDirection;
pub use schema::{AsPath, Column, Hops, JoinSpec, ListRelation, Path, PathSpec, Relation, Table};
pub use sql::{Chunk, Sql};
pub use traits::{SqlParam, ToSql};
