//! Condition combinators producing [`Sql`] fragments.
//!
//! These are the building blocks handed to the rule callbacks: qualified
//! column fragments on the left, parameters (via [`param`]) or nested
//! fragments on the right.

use crate::sql::Sql;
use crate::traits::{SqlParam, ToSql};

/// Shorthand for a single bound parameter fragment.
pub fn param<V: SqlParam>(value: impl Into<V>) -> Sql<V> {
    Sql::parameter(value)
}

fn comparison<V: SqlParam>(left: impl ToSql<V>, op: &str, right: impl ToSql<V>) -> Sql<V> {
    let mut text = String::with_capacity(op.len() + 2);
    text.push(' ');
    text.push_str(op);
    text.push(' ');
    left.to_sql().append_raw(text).append(right)
}

/// Equality condition: `left = right`.
pub fn eq<V: SqlParam>(left: impl ToSql<V>, right: impl ToSql<V>) -> Sql<V> {
    comparison(left, "=", right)
}

/// Inequality condition: `left <> right`.
pub fn neq<V: SqlParam>(left: impl ToSql<V>, right: impl ToSql<V>) -> Sql<V> {
    comparison(left, "<>", right)
}

/// Strict less-than condition.
pub fn lt<V: SqlParam>(left: impl ToSql<V>, right: impl ToSql<V>) -> Sql<V> {
    comparison(left, "<", right)
}

/// Less-than-or-equal condition.
pub fn lte<V: SqlParam>(left: impl ToSql<V>, right: impl ToSql<V>) -> Sql<V> {
    comparison(left, "<=", right)
}

/// Strict greater-than condition.
pub fn gt<V: SqlParam>(left: impl ToSql<V>, right: impl ToSql<V>) -> Sql<V> {
    comparison(left, ">", right)
}

/// Greater-than-or-equal condition.
pub fn gte<V: SqlParam>(left: impl ToSql<V>, right: impl ToSql<V>) -> Sql<V> {
    comparison(left, ">=", right)
}

/// `left LIKE right`.
pub fn like<V: SqlParam>(left: impl ToSql<V>, right: impl ToSql<V>) -> Sql<V> {
    comparison(left, "LIKE", right)
}

/// `expr IS NULL`.
pub fn is_null<V: SqlParam>(expr: impl ToSql<V>) -> Sql<V> {
    expr.to_sql().append_raw(" IS NULL")
}

/// `expr IS NOT NULL`.
pub fn is_not_null<V: SqlParam>(expr: impl ToSql<V>) -> Sql<V> {
    expr.to_sql().append_raw(" IS NOT NULL")
}

/// Membership condition: `left IN (?, ?, …)`.
///
/// An empty collection renders `IN (NULL)`, which matches no row. Callers
/// relying on "empty set filters everything out" get exactly that; the
/// filter is never silently dropped.
pub fn in_array<V, I>(left: impl ToSql<V>, values: I) -> Sql<V>
where
    V: SqlParam,
    I: IntoIterator,
    I::Item: Into<V>,
{
    let params = Sql::parameters(values);
    if params.is_empty() {
        left.to_sql().append_raw(" IN (NULL)")
    } else {
        left.to_sql()
            .append_raw(" IN (")
            .append(params)
            .append_raw(")")
    }
}

/// Membership against a subquery fragment: `left IN (SELECT …)`.
///
/// The subquery fragment is expected to carry its own parentheses, as the
/// fragments produced by subquery scopes do.
pub fn in_subquery<V: SqlParam>(left: impl ToSql<V>, subquery: impl ToSql<V>) -> Sql<V> {
    left.to_sql().append_raw(" IN ").append(subquery)
}

/// `EXISTS (…)` over a bare subquery body.
pub fn exists<V: SqlParam>(subquery: impl ToSql<V>) -> Sql<V> {
    Sql::raw("EXISTS (").append(subquery).append_raw(")")
}

/// `(left BETWEEN lo AND hi)`.
pub fn between<V: SqlParam>(
    left: impl ToSql<V>,
    lo: impl ToSql<V>,
    hi: impl ToSql<V>,
) -> Sql<V> {
    Sql::raw("(")
        .append(left)
        .append_raw(" BETWEEN ")
        .append(lo)
        .append_raw(" AND ")
        .append(hi)
        .append_raw(")")
}

fn connect<V: SqlParam>(parts: impl IntoIterator<Item = Sql<V>>, separator: &str) -> Sql<V> {
    let parts: Vec<Sql<V>> = parts.into_iter().filter(|p| !p.is_empty()).collect();
    match parts.len() {
        0 => Sql::empty(),
        1 => parts.into_iter().next().unwrap_or_default(),
        _ => Sql::join(parts, separator).parens(),
    }
}

/// Conjunction of conditions: `(a AND b AND …)`.
pub fn and<V: SqlParam>(conditions: impl IntoIterator<Item = Sql<V>>) -> Sql<V> {
    connect(conditions, " AND ")
}

/// Disjunction of conditions: `(a OR b OR …)`.
pub fn or<V: SqlParam>(conditions: impl IntoIterator<Item = Sql<V>>) -> Sql<V> {
    connect(conditions, " OR ")
}

/// Negation: `NOT (…)`.
pub fn not<V: SqlParam>(condition: impl ToSql<V>) -> Sql<V> {
    Sql::raw("NOT (").append(condition).append_raw(")")
}

/// Matches an unordered value pair against two paths:
/// `(p1 = a AND p2 = b) OR (p1 = b AND p2 = a)`.
///
/// Used for relationships that are symmetric, e.g. an edge between two
/// records stored as two columns regardless of direction.
pub fn symmetric_pair<V: SqlParam>(
    path1: impl ToSql<V>,
    path2: impl ToSql<V>,
    a: impl Into<V>,
    b: impl Into<V>,
) -> Sql<V> {
    let p1 = path1.to_sql();
    let p2 = path2.to_sql();
    let a = a.into();
    let b = b.into();
    or([
        and([
            eq(p1.clone(), Sql::parameter(a.clone())),
            eq(p2.clone(), Sql::parameter(b.clone())),
        ]),
        and([eq(p1, Sql::parameter(b)), eq(p2, Sql::parameter(a))]),
    ])
}
