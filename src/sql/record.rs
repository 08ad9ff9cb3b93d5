//! Backend-neutral row: column name -> value, decoded once from the driver row.

use crate::error::StoreError;
use chrono::NaiveDate;
use sqlx::{Column, Row};
use std::collections::HashMap;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Text(String),
    Date(NaiveDate),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    columns: HashMap<String, SqlValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: SqlValue) -> Self {
        self.columns.insert(column.to_string(), value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns.get(column)
    }

    pub fn i64(&self, column: &str) -> Result<i64, StoreError> {
        match self.required(column)? {
            SqlValue::Int(n) => Ok(*n),
            SqlValue::Text(s) => s
                .parse()
                .map_err(|_| StoreError::decode(column, format!("not an integer: {}", s))),
            other => Err(StoreError::decode(column, format!("expected integer, got {:?}", other))),
        }
    }

    pub fn i32(&self, column: &str) -> Result<i32, StoreError> {
        let n = self.i64(column)?;
        i32::try_from(n).map_err(|_| StoreError::decode(column, format!("{} out of range", n)))
    }

    pub fn string(&self, column: &str) -> Result<String, StoreError> {
        match self.required(column)? {
            SqlValue::Text(s) => Ok(s.clone()),
            other => Err(StoreError::decode(column, format!("expected text, got {:?}", other))),
        }
    }

    pub fn date(&self, column: &str) -> Result<NaiveDate, StoreError> {
        self.opt_date(column)?
            .ok_or_else(|| StoreError::decode(column, "unexpected NULL"))
    }

    /// SQLite hands dates back as `yyyy-MM-dd` text; PostgreSQL as native dates.
    pub fn opt_date(&self, column: &str) -> Result<Option<NaiveDate>, StoreError> {
        match self.get(column) {
            None => Err(StoreError::decode(column, "column not in result")),
            Some(SqlValue::Null) => Ok(None),
            Some(SqlValue::Date(d)) => Ok(Some(*d)),
            Some(SqlValue::Text(s)) => NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map(Some)
                .map_err(|e| StoreError::decode(column, format!("bad date '{}': {}", s, e))),
            Some(other) => Err(StoreError::decode(column, format!("expected date, got {:?}", other))),
        }
    }

    fn required(&self, column: &str) -> Result<&SqlValue, StoreError> {
        match self.get(column) {
            None => Err(StoreError::decode(column, "column not in result")),
            Some(SqlValue::Null) => Err(StoreError::decode(column, "unexpected NULL")),
            Some(v) => Ok(v),
        }
    }
}

pub(crate) fn pg_row_to_record(row: &sqlx::postgres::PgRow) -> Record {
    let mut record = Record::new();
    for col in row.columns() {
        let name = col.name();
        record.columns.insert(name.to_string(), pg_cell(row, name));
    }
    record
}

fn pg_cell(row: &sqlx::postgres::PgRow, name: &str) -> SqlValue {
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return SqlValue::Int(n);
    }
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return SqlValue::Int(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i16>, _>(name) {
        return SqlValue::Int(n.into());
    }
    if let Ok(Some(d)) = row.try_get::<Option<NaiveDate>, _>(name) {
        return SqlValue::Date(d);
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return SqlValue::Text(s);
    }
    SqlValue::Null
}

pub(crate) fn sqlite_row_to_record(row: &sqlx::sqlite::SqliteRow) -> Record {
    let mut record = Record::new();
    for col in row.columns() {
        let name = col.name();
        record.columns.insert(name.to_string(), sqlite_cell(row, name));
    }
    record
}

fn sqlite_cell(row: &sqlx::sqlite::SqliteRow, name: &str) -> SqlValue {
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return SqlValue::Int(n);
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return SqlValue::Text(s);
    }
    SqlValue::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_dates_from_text_or_native() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let r = Record::new()
            .with("a", SqlValue::Text("2024-03-09".into()))
            .with("b", SqlValue::Date(d))
            .with("c", SqlValue::Null);
        assert_eq!(r.date("a").unwrap(), d);
        assert_eq!(r.date("b").unwrap(), d);
        assert_eq!(r.opt_date("c").unwrap(), None);
        assert!(r.date("c").is_err());
    }

    #[test]
    fn typed_accessors_reject_mismatches() {
        let r = Record::new()
            .with("id", SqlValue::Int(5))
            .with("name", SqlValue::Text("Acme".into()))
            .with("when", SqlValue::Text("09/03/2024".into()));
        assert_eq!(r.i64("id").unwrap(), 5);
        assert_eq!(r.i32("id").unwrap(), 5);
        assert_eq!(r.string("name").unwrap(), "Acme");
        assert!(r.string("id").is_err());
        assert!(r.i64("name").is_err());
        assert!(r.date("when").is_err());
        assert!(r.i64("missing").is_err());
    }

    #[test]
    fn i32_range_is_checked() {
        let r = Record::new().with("salary", SqlValue::Int(i64::from(i32::MAX) + 1));
        assert!(r.i32("salary").is_err());
    }
}
