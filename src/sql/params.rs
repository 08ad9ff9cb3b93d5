//! Positional parameters and the statement they are bound into.

use crate::config::Backend;
use chrono::NaiveDate;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};

/// A value that can be bound to either backend. Nullable variants carry the SQL type
/// so PostgreSQL still sees a typed NULL.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    I32(i32),
    I64(i64),
    Text(Option<String>),
    Date(Option<NaiveDate>),
}

/// SQL text plus its positional parameters, prepared for one backend.
#[derive(Clone, Debug)]
pub struct Statement {
    sql: &'static str,
    backend: Backend,
    params: Vec<BindValue>,
}

impl Statement {
    pub fn new(sql: &'static str, backend: Backend) -> Self {
        Statement {
            sql,
            backend,
            params: Vec::new(),
        }
    }

    /// Backend of the connection this statement will run on.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn sql(&self) -> &'static str {
        self.sql
    }

    pub fn params(&self) -> &[BindValue] {
        &self.params
    }

    /// Append the next positional parameter (`$1`, `$2`, ...).
    pub fn bind(&mut self, value: BindValue) -> &mut Self {
        self.params.push(value);
        self
    }

    pub fn bind_i64(&mut self, n: i64) -> &mut Self {
        self.bind(BindValue::I64(n))
    }

    pub fn bind_text(&mut self, s: impl Into<String>) -> &mut Self {
        self.bind(BindValue::Text(Some(s.into())))
    }

    pub(crate) fn to_pg(&self) -> Query<'_, Postgres, PgArguments> {
        let mut query = sqlx::query(self.sql);
        for p in &self.params {
            query = match p {
                BindValue::I32(n) => query.bind(*n),
                BindValue::I64(n) => query.bind(*n),
                BindValue::Text(s) => query.bind(s.as_deref()),
                BindValue::Date(d) => query.bind(*d),
            };
        }
        query
    }

    pub(crate) fn to_sqlite(&self) -> Query<'_, Sqlite, SqliteArguments<'_>> {
        let mut query = sqlx::query(self.sql);
        for p in &self.params {
            query = match p {
                BindValue::I32(n) => query.bind(*n),
                BindValue::I64(n) => query.bind(*n),
                BindValue::Text(s) => query.bind(s.as_deref()),
                BindValue::Date(d) => query.bind(*d),
            };
        }
        query
    }
}
