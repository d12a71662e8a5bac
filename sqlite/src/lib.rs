//! SQLite binding for critq: parameter values, the fluent select builder,
//! and execution over `rusqlite`.
//!
//! The connection is a plain `rusqlite::Connection` owned by the caller;
//! this crate never opens, closes, or wraps transactions around it.

mod row;
mod rules;
mod scope;
mod select;
mod values;

pub use row::{FromRow, ToRow};
pub use rules::{PredicateRule, QueryRule, SubqueryRule};
pub use scope::{Root, Subquery, subquery};
pub use select::Select;
pub use values::SqliteValue;
