//! Connection facade and one-shot lookup helpers.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use critq_core::{AsPath, Column, Error, Filter, Result, SelectSpec, Sql, Table, conditions};
use critq_sqlite::{FromRow, PredicateRule, QueryRule, Root, Select, SqliteValue, ToRow};
use rusqlite::{Connection, params_from_iter, types::FromSql};

/// A thin wrapper around the provider connection that mints query builders
/// and hosts the batch lookup helpers.
///
/// Connection lifecycle and transaction boundaries stay with the caller:
/// open the [`Connection`], hand it over, take it back with
/// [`into_inner`](Self::into_inner) when done.
pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn into_inner(self) -> Connection {
        self.conn
    }

    /// Starts a fresh query against `T`, ready for filter chaining.
    pub fn find<T: Table>(&self) -> Select<'_, T> {
        Select::new(&self.conn)
    }

    /// A query for all rows of `T` whose `column` equals `value`, with
    /// duplicate elimination. Chain a terminal to execute.
    pub fn find_by<T, W>(&self, column: Column<T, W>, value: impl Into<W>) -> Select<'_, T>
    where
        T: Table,
        W: Into<SqliteValue>,
    {
        self.find().has(column, value)
    }

    /// Functional-form query construction: the rule receives the empty query
    /// scope and returns the constructed query.
    pub fn query<'c, T: Table>(&'c self, rule: impl QueryRule<'c, T>) -> Select<'c, T> {
        rule(self.find())
    }

    /// Runs a functional-form query and returns its result list.
    pub fn list<'c, T>(&'c self, rule: impl QueryRule<'c, T>) -> Result<Vec<T>>
    where
        T: Table + FromRow,
    {
        self.query(rule).list()
    }

    /// Batch relationship loading without N+1 queries: one statement fetches
    /// every row of `N` whose `key_column` value is among `keys`, selecting
    /// `group_column` ahead of the entity projection, and the result is
    /// grouped in memory by that value.
    pub fn grouped<N, G, K, I>(
        &self,
        keys: I,
        key_column: Column<N, K>,
        group_column: Column<N, G>,
    ) -> Result<HashMap<G, Vec<N>>>
    where
        N: Table + FromRow,
        G: FromSql + Eq + Hash,
        K: Into<SqliteValue>,
        I: IntoIterator<Item = K>,
    {
        let filters = vec![Filter::In {
            path: key_column.into_path().erase(),
            values: keys.into_iter().map(Into::into).collect(),
        }];
        let spec = SelectSpec {
            table: N::NAME,
            primary_key: N::PRIMARY_KEY,
            columns: N::COLUMNS,
            lead: Some(group_column.name),
            distinct: false,
            count: false,
            filters: &filters,
            order: None,
            limit: None,
        };
        let (text, params) = spec.to_sql().into_parts();
        tracing::debug!(sql = %text, params = params.len(), "executing grouped lookup");
        let mut stmt = self.conn.prepare(&text)?;
        let rows = stmt.query_map(params_from_iter(params), |row| {
            let group: G = row.get(0)?;
            let entity = N::try_from(row)?;
            Ok((group, entity))
        })?;

        let mut grouped: HashMap<G, Vec<N>> = HashMap::new();
        for row in rows {
            let (group, entity) = row?;
            grouped.entry(group).or_default().push(entity);
        }
        Ok(grouped)
    }

    /// Re-keyed join: pairs every input item with the matching row of `T`,
    /// in input order, using one query for all candidates.
    ///
    /// The rule selects the candidate rows; `target_key` extracts each
    /// candidate's identity and `source_key` the identity to look up for an
    /// input item. Candidates are sorted by key before indexing so results
    /// are deterministic, and two candidates with the same key are an error,
    /// not a silent overwrite. Items without a match pair with `None`.
    ///
    /// An empty input returns an empty list without touching the database.
    pub fn rjoin<S, T, K>(
        &self,
        items: Vec<S>,
        source_key: impl Fn(&S) -> K,
        target_key: impl Fn(&T) -> K,
        rule: impl PredicateRule<T>,
    ) -> Result<Vec<(S, Option<T>)>>
    where
        T: Table + FromRow + Clone,
        K: Ord + Eq + Hash + Debug,
    {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut candidates = self.find::<T>().by(rule).list()?;
        candidates.sort_by(|a, b| target_key(a).cmp(&target_key(b)));

        let mut index: HashMap<K, T> = HashMap::with_capacity(candidates.len());
        for candidate in candidates {
            let key = target_key(&candidate);
            if index.contains_key(&key) {
                return Err(Error::AmbiguousKey(format!("{key:?}")));
            }
            index.insert(key, candidate);
        }

        Ok(items
            .into_iter()
            .map(|item| {
                let matched = index.get(&source_key(&item)).cloned();
                (item, matched)
            })
            .collect())
    }

    /// [`rjoin`](Self::rjoin) with the candidate rule derived from an
    /// attribute: candidates are rows whose `key_column` value is among the
    /// input items' keys.
    pub fn rjoin_by<S, T, K>(
        &self,
        items: Vec<S>,
        key_column: Column<T, K>,
        source_key: impl Fn(&S) -> K,
        target_key: impl Fn(&T) -> K,
    ) -> Result<Vec<(S, Option<T>)>>
    where
        T: Table + FromRow + Clone,
        K: Ord + Eq + Hash + Debug + Clone + Into<SqliteValue>,
    {
        let keys: Vec<SqliteValue> = items.iter().map(|item| source_key(item).into()).collect();
        self.rjoin(items, source_key, target_key, move |root: &Root<T>| {
            conditions::in_array(root.get(key_column), keys)
        })
    }

    /// Inserts the entity and hands it back, for call sites that must
    /// return the value they just stored.
    pub fn persist<T: ToRow>(&self, entity: T) -> Result<T> {
        let columns: Sql<SqliteValue> =
            Sql::join(T::COLUMNS.iter().map(|column| Sql::ident(column)), ", ");
        let sql = Sql::raw("INSERT INTO ")
            .append(Sql::ident(T::NAME))
            .append_raw(" (")
            .append(columns)
            .append_raw(") VALUES (")
            .append(Sql::parameters(entity.values()))
            .append_raw(")");
        let (text, params) = sql.into_parts();
        tracing::debug!(sql = %text, "executing persist");
        self.conn.execute(&text, params_from_iter(params))?;
        Ok(entity)
    }
}
