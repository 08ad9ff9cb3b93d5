//! Connection pool manager: one pooled source per process, lending scoped connections.

use crate::config::{Backend, BackendDescriptor};
use crate::error::StoreError;
use crate::sql::{pg_row_to_record, sqlite_row_to_record, Record, Statement};
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, Postgres};
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::OnceCell;

static INSTANCE: OnceCell<Arc<ConnectionManager>> = OnceCell::const_new();

#[derive(Clone, Debug)]
enum DbPool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

#[derive(Debug)]
pub struct ConnectionManager {
    pool: DbPool,
}

impl ConnectionManager {
    /// Process-wide pool. The first call builds it; every later call returns the same
    /// instance and ignores its argument.
    pub async fn get_instance(descriptor: &BackendDescriptor) -> Result<Arc<ConnectionManager>, StoreError> {
        INSTANCE
            .get_or_try_init(|| async { Self::connect(descriptor).map(Arc::new) })
            .await
            .cloned()
    }

    /// Build a pool for `descriptor`. Connections open lazily, so an unreachable backend
    /// only shows up when a connection is requested.
    pub fn connect(descriptor: &BackendDescriptor) -> Result<ConnectionManager, StoreError> {
        let settings = &descriptor.pool;
        let pool = match descriptor.backend {
            Backend::Postgres => {
                let mut opts = PgConnectOptions::from_str(&descriptor.url)?;
                if let Some(user) = &descriptor.user {
                    opts = opts.username(user);
                }
                if let Some(password) = &descriptor.password {
                    opts = opts.password(password);
                }
                let pool = PgPoolOptions::new()
                    .max_connections(settings.max_connections)
                    .min_connections(settings.min_connections)
                    .acquire_timeout(settings.acquire_timeout)
                    .idle_timeout(settings.idle_timeout)
                    .max_lifetime(settings.max_lifetime)
                    .connect_lazy_with(opts);
                DbPool::Postgres(pool)
            }
            Backend::Sqlite => {
                let opts = SqliteConnectOptions::from_str(&descriptor.url)?
                    .create_if_missing(true)
                    .foreign_keys(true);
                let pool = SqlitePoolOptions::new()
                    .max_connections(settings.max_connections)
                    .min_connections(settings.min_connections)
                    .acquire_timeout(settings.acquire_timeout)
                    .idle_timeout(settings.idle_timeout)
                    .max_lifetime(settings.max_lifetime)
                    .connect_lazy_with(opts);
                DbPool::Sqlite(pool)
            }
        };
        tracing::info!(
            backend = %descriptor.backend,
            max_connections = settings.max_connections,
            "connection pool created"
        );
        Ok(ConnectionManager { pool })
    }

    pub fn backend(&self) -> Backend {
        match self.pool {
            DbPool::Postgres(_) => Backend::Postgres,
            DbPool::Sqlite(_) => Backend::Sqlite,
        }
    }

    /// Borrow one connection. It returns to the pool when dropped.
    pub async fn get_connection(&self) -> Result<DbConnection, StoreError> {
        let conn = match &self.pool {
            DbPool::Postgres(p) => p.acquire().await.map(DbConnection::Postgres),
            DbPool::Sqlite(p) => p.acquire().await.map(DbConnection::Sqlite),
        };
        conn.map_err(|e| {
            tracing::error!(error = %e, "failed to obtain database connection");
            StoreError::ConnectionUnavailable(e)
        })
    }

    /// Round-trip `SELECT 1` for readiness checks.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.get_connection().await?;
        conn.execute(&Statement::new("SELECT 1", self.backend())).await?;
        Ok(())
    }
}

/// A connection checked out of the pool for the duration of one call.
#[derive(Debug)]
pub enum DbConnection {
    Postgres(PoolConnection<Postgres>),
    Sqlite(PoolConnection<Sqlite>),
}

impl DbConnection {
    pub fn backend(&self) -> Backend {
        match self {
            DbConnection::Postgres(_) => Backend::Postgres,
            DbConnection::Sqlite(_) => Backend::Sqlite,
        }
    }

    /// Run a statement and return the affected row count.
    pub async fn execute(&mut self, stmt: &Statement) -> Result<u64, StoreError> {
        tracing::debug!(sql = %stmt.sql(), params = ?stmt.params(), "execute");
        let rows = match self {
            DbConnection::Postgres(c) => stmt.to_pg().execute(&mut **c).await?.rows_affected(),
            DbConnection::Sqlite(c) => stmt.to_sqlite().execute(&mut **c).await?.rows_affected(),
        };
        Ok(rows)
    }

    pub async fn fetch_optional(&mut self, stmt: &Statement) -> Result<Option<Record>, StoreError> {
        tracing::debug!(sql = %stmt.sql(), params = ?stmt.params(), "query");
        let record = match self {
            DbConnection::Postgres(c) => stmt
                .to_pg()
                .fetch_optional(&mut **c)
                .await?
                .map(|r| pg_row_to_record(&r)),
            DbConnection::Sqlite(c) => stmt
                .to_sqlite()
                .fetch_optional(&mut **c)
                .await?
                .map(|r| sqlite_row_to_record(&r)),
        };
        Ok(record)
    }

    pub async fn fetch_all(&mut self, stmt: &Statement) -> Result<Vec<Record>, StoreError> {
        tracing::debug!(sql = %stmt.sql(), params = ?stmt.params(), "query");
        let records = match self {
            DbConnection::Postgres(c) => stmt
                .to_pg()
                .fetch_all(&mut **c)
                .await?
                .iter()
                .map(pg_row_to_record)
                .collect(),
            DbConnection::Sqlite(c) => stmt
                .to_sqlite()
                .fetch_all(&mut **c)
                .await?
                .iter()
                .map(sqlite_row_to_record)
                .collect(),
        };
        Ok(records)
    }

    /// Run several statements without parameters, e.g. DDL.
    pub async fn execute_batch(&mut self, sql: &[&'static str]) -> Result<(), StoreError> {
        let backend = self.backend();
        for s in sql {
            self.execute(&Statement::new(s, backend)).await?;
        }
        Ok(())
    }
}
