//! Predicate descriptors and the finalizer that compiles them.
//!
//! Filter methods on the builder append one descriptor each; nothing touches
//! SQL until a terminal operation builds a [`SelectSpec`] and calls
//! [`SelectSpec::to_sql`]. That single pass assigns join aliases, renders the
//! projection, and emits the conjunction of every accumulated predicate in
//! insertion order.

use crate::conditions;
use crate::order::SortDirection;
use crate::schema::PathSpec;
use crate::sql::Sql;
use crate::traits::SqlParam;

/// One accumulated predicate.
#[derive(Debug, Clone)]
pub enum Filter<V: SqlParam> {
    /// Path equality; joins render as needed.
    Eq { path: PathSpec, value: V },
    /// `IS NULL` on a path.
    Null { path: PathSpec },
    /// `IS NOT NULL` on a path.
    NotNull { path: PathSpec },
    /// Membership; an empty value set compiles to an always-false predicate.
    In { path: PathSpec, values: Vec<V> },
    /// Strict less-than on a path.
    Lt { path: PathSpec, value: V },
    /// Strict greater-than on a path.
    Gt { path: PathSpec, value: V },
    /// A caller-built fragment (rule callbacks, subqueries). Wrapped in
    /// parentheses at finalization so embedded OR cannot leak into the
    /// surrounding conjunction.
    Custom(Sql<V>),
}

/// Everything a terminal operation needs to compile one SELECT statement.
pub struct SelectSpec<'a, V: SqlParam> {
    pub table: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [&'static str],
    /// Extra root column selected ahead of the projection (batch grouping).
    pub lead: Option<&'static str>,
    pub distinct: bool,
    /// Replace the projection with a row count.
    pub count: bool,
    pub filters: &'a [Filter<V>],
    pub order: Option<(&'static str, SortDirection)>,
    pub limit: Option<usize>,
}

/// Renders the joins for one path, allocating fresh `jN` aliases, and
/// returns the qualified terminal column plus the join fragment.
fn resolve<V: SqlParam>(
    table: &'static str,
    path: &PathSpec,
    alias_seq: &mut usize,
) -> (Sql<V>, Sql<V>) {
    let mut qualifier = table.to_string();
    let mut joins = Sql::empty();
    for hop in &path.joins {
        *alias_seq += 1;
        let alias = format!("j{alias_seq}");
        joins = joins
            .append_raw(format!(" JOIN \"{}\" AS \"{}\" ON ", hop.table, alias))
            .append(Sql::qualified(&qualifier, hop.left))
            .append_raw(" = ")
            .append(Sql::qualified(&alias, hop.right));
        qualifier = alias;
    }
    (Sql::qualified(&qualifier, path.column), joins)
}

impl<V: SqlParam> SelectSpec<'_, V> {
    /// The single finalization step: descriptors in, one statement out.
    pub fn to_sql(&self) -> Sql<V> {
        let mut alias_seq = 0usize;
        let mut join_sql = Sql::empty();
        let mut where_parts: Vec<Sql<V>> = Vec::with_capacity(self.filters.len());

        for filter in self.filters {
            let part = match filter {
                Filter::Eq { path, value } => {
                    let (col, joins) = resolve(self.table, path, &mut alias_seq);
                    join_sql = join_sql.append(joins);
                    conditions::eq(col, Sql::parameter(value.clone()))
                }
                Filter::Null { path } => {
                    let (col, joins) = resolve(self.table, path, &mut alias_seq);
                    join_sql = join_sql.append(joins);
                    conditions::is_null(col)
                }
                Filter::NotNull { path } => {
                    let (col, joins) = resolve(self.table, path, &mut alias_seq);
                    join_sql = join_sql.append(joins);
                    conditions::is_not_null(col)
                }
                Filter::In { path, values } => {
                    let (col, joins) = resolve(self.table, path, &mut alias_seq);
                    join_sql = join_sql.append(joins);
                    conditions::in_array(col, values.iter().cloned())
                }
                Filter::Lt { path, value } => {
                    let (col, joins) = resolve(self.table, path, &mut alias_seq);
                    join_sql = join_sql.append(joins);
                    conditions::lt(col, Sql::parameter(value.clone()))
                }
                Filter::Gt { path, value } => {
                    let (col, joins) = resolve(self.table, path, &mut alias_seq);
                    join_sql = join_sql.append(joins);
                    conditions::gt(col, Sql::parameter(value.clone()))
                }
                Filter::Custom(sql) => sql.clone().parens(),
            };
            where_parts.push(part);
        }

        let mut sql = if self.count {
            if self.distinct {
                Sql::raw(format!(
                    "SELECT COUNT(DISTINCT \"{}\".\"{}\") FROM ",
                    self.table, self.primary_key
                ))
            } else {
                Sql::raw("SELECT COUNT(*) FROM ")
            }
        } else {
            let mut projection: Vec<Sql<V>> = Vec::with_capacity(self.columns.len() + 1);
            if let Some(lead) = self.lead {
                projection.push(Sql::qualified(self.table, lead));
            }
            projection.extend(
                self.columns
                    .iter()
                    .map(|column| Sql::qualified(self.table, column)),
            );
            let head = if self.distinct {
                "SELECT DISTINCT "
            } else {
                "SELECT "
            };
            Sql::raw(head)
                .append(Sql::join(projection, ", "))
                .append_raw(" FROM ")
        };

        sql = sql.append(Sql::ident(self.table)).append(join_sql);

        if !where_parts.is_empty() {
            sql = sql
                .append_raw(" WHERE ")
                .append(Sql::join(where_parts, " AND "));
        }

        if !self.count
            && let Some((column, direction)) = self.order
        {
            sql = sql
                .append_raw(" ORDER BY ")
                .append(Sql::qualified(self.table, column))
                .append_raw(" ")
                .append_raw(direction.as_str());
        }

        if let Some(limit) = self.limit {
            sql = sql.append_raw(format!(" LIMIT {limit}"));
        }

        sql
    }
}
