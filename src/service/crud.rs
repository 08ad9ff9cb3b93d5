//! Generic CRUD for any entity type, parameterized by per-entity hooks.

use crate::error::{ServiceError, StoreError};
use crate::mapper::{PersistenceMapper, WireMapper};
use crate::model::Entity;
use crate::pool::ConnectionManager;
use crate::service::validation::validate_name;
use crate::sql::statements::LIST_LIMIT;
use crate::sql::{Record, Statement};
use std::sync::Arc;

/// SQL text for the five generic operations. Parameter order:
/// insert binds the persistence mapper's fields and must `RETURNING id`;
/// select/delete bind `$1 = id`; list binds `$1 = row cap`; update binds `$1 = name, $2 = id`.
#[derive(Clone, Copy, Debug)]
pub struct EntitySql {
    pub insert: &'static str,
    pub select_by_id: &'static str,
    pub list_all: &'static str,
    pub update_name: &'static str,
    pub delete_by_id: &'static str,
}

/// Everything entity-specific the generic service delegates to.
pub struct EntityHooks<T> {
    pub context_path: &'static str,
    pub sql: EntitySql,
    pub from_row: fn(&Record) -> Result<T, StoreError>,
    pub validate: fn(&T) -> Result<(), ServiceError>,
    pub persistence: Box<dyn PersistenceMapper<T>>,
    pub wire: Box<dyn WireMapper<T>>,
}

pub struct EntityService<T> {
    pool: Arc<ConnectionManager>,
    hooks: EntityHooks<T>,
}

impl<T: Entity> EntityService<T> {
    pub fn new(pool: Arc<ConnectionManager>, hooks: EntityHooks<T>) -> Self {
        EntityService { pool, hooks }
    }

    pub fn context_path(&self) -> &'static str {
        self.hooks.context_path
    }

    pub fn wire_mapper(&self) -> &dyn WireMapper<T> {
        self.hooks.wire.as_ref()
    }

    /// Insert one row and return the entity with its generated id.
    /// Validation runs before a connection is taken.
    pub async fn create(&self, entity: T) -> Result<T, ServiceError> {
        self.check(validate_name(entity.name()))?;
        self.check((self.hooks.validate)(&entity))?;

        let mut conn = self.pool.get_connection().await.map_err(|e| self.storage("create", e))?;
        let mut stmt = Statement::new(self.hooks.sql.insert, conn.backend());
        self.check(self.hooks.persistence.bind(&mut stmt, &entity))?;

        let key = conn
            .fetch_optional(&stmt)
            .await
            .map_err(|e| self.storage("create", e))?;
        let Some(key) = key else {
            tracing::warn!(context = self.context_path(), "insert affected no rows");
            return Err(ServiceError::NoRowsAffected);
        };
        let id = key.i64("id").map_err(|e| self.storage("create", e))?;
        tracing::info!(context = self.context_path(), id, "created");
        Ok(entity.with_id(id))
    }

    /// `Ok(None)` when no row has this id.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<T>, ServiceError> {
        let mut conn = self.pool.get_connection().await.map_err(|e| self.storage("get_by_id", e))?;
        let mut stmt = Statement::new(self.hooks.sql.select_by_id, conn.backend());
        stmt.bind_i64(id);
        let row = conn
            .fetch_optional(&stmt)
            .await
            .map_err(|e| self.storage("get_by_id", e))?;
        row.map(|r| (self.hooks.from_row)(&r))
            .transpose()
            .map_err(|e| self.storage("get_by_id", e))
    }

    /// Up to `LIST_LIMIT` rows. An empty table is `Ok(vec![])`, never an error.
    pub async fn list_all(&self) -> Result<Vec<T>, ServiceError> {
        let mut conn = self.pool.get_connection().await.map_err(|e| self.storage("list_all", e))?;
        let mut stmt = Statement::new(self.hooks.sql.list_all, conn.backend());
        stmt.bind_i64(LIST_LIMIT);
        let rows = conn
            .fetch_all(&stmt)
            .await
            .map_err(|e| self.storage("list_all", e))?;
        rows.iter()
            .map(|r| (self.hooks.from_row)(r))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.storage("list_all", e))
    }

    /// Rename one row. Returns the affected row count (0 when the id is unknown).
    pub async fn set_name(&self, id: i64, name: &str) -> Result<u64, ServiceError> {
        self.check(validate_name(name))?;
        let mut conn = self.pool.get_connection().await.map_err(|e| self.storage("set_name", e))?;
        let mut stmt = Statement::new(self.hooks.sql.update_name, conn.backend());
        stmt.bind_text(name).bind_i64(id);
        let rows = conn.execute(&stmt).await.map_err(|e| self.storage("set_name", e))?;
        tracing::info!(context = self.context_path(), id, rows, "name updated");
        Ok(rows)
    }

    /// Delete one row. Returns the affected row count (0 when the id is unknown).
    pub async fn delete_by_id(&self, id: i64) -> Result<u64, ServiceError> {
        let mut conn = self.pool.get_connection().await.map_err(|e| self.storage("delete_by_id", e))?;
        let mut stmt = Statement::new(self.hooks.sql.delete_by_id, conn.backend());
        stmt.bind_i64(id);
        let rows = conn.execute(&stmt).await.map_err(|e| self.storage("delete_by_id", e))?;
        tracing::info!(context = self.context_path(), id, rows, "deleted");
        Ok(rows)
    }

    fn check(&self, result: Result<(), ServiceError>) -> Result<(), ServiceError> {
        if let Err(e) = &result {
            tracing::warn!(context = self.context_path(), error = %e, "validation failed");
        }
        result
    }

    fn storage(&self, op: &'static str, e: StoreError) -> ServiceError {
        let code = e.code();
        tracing::error!(
            context = self.context_path(),
            op,
            code = code.as_deref().unwrap_or("-"),
            error = %e,
            "storage error"
        );
        ServiceError::Storage(e)
    }
}
