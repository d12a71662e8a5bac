use critq_core::Table;
use rusqlite::Row;

use crate::values::SqliteValue;

/// Decoding bound for entity types: any `T` convertible from a result row.
///
/// Helpers may select extra leading columns ahead of the entity projection
/// (batch grouping does), so implementations should address columns by name,
/// not by index.
pub trait FromRow: for<'r> TryFrom<&'r Row<'r>, Error = rusqlite::Error> {}

impl<T> FromRow for T where T: for<'r> TryFrom<&'r Row<'r>, Error = rusqlite::Error> {}

/// Binding for the persist helper: parameter values aligned one-to-one with
/// `Table::COLUMNS` order.
pub trait ToRow: Table {
    fn values(&self) -> Vec<SqliteValue>;
}
