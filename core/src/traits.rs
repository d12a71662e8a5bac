use crate::sql::Sql;

/// Marker for types usable as bound SQL parameters.
pub trait SqlParam: Clone + std::fmt::Debug {}

impl<T: Clone + std::fmt::Debug> SqlParam for T {}

/// Conversion into a SQL fragment.
pub trait ToSql<V: SqlParam> {
    fn to_sql(&self) -> Sql<V>;
}

impl<V: SqlParam> ToSql<V> for Sql<V> {
    fn to_sql(&self) -> Sql<V> {
        self.clone()
    }
}

impl<V: SqlParam, T: ToSql<V>> ToSql<V> for &T {
    fn to_sql(&self) -> Sql<V> {
        (*self).to_sql()
    }
}
