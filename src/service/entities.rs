//! Concrete entity services: SQL, row constructors and mappers for Client, Worker and Project.

use crate::error::StoreError;
use crate::mapper::{ClientMapper, JsonMapper, ProjectMapper, WorkerMapper};
use crate::model::{Client, Level, Project, Worker};
use crate::pool::ConnectionManager;
use crate::service::crud::{EntityHooks, EntityService, EntitySql};
use crate::service::validation::{validate_client, validate_project, validate_worker};
use crate::sql::statements::*;
use crate::sql::Record;
use std::sync::Arc;

pub const CLIENTS_PATH: &str = "/clients";
pub const WORKERS_PATH: &str = "/workers";
pub const PROJECTS_PATH: &str = "/projects";

pub fn client_service(pool: Arc<ConnectionManager>) -> EntityService<Client> {
    EntityService::new(
        pool,
        EntityHooks {
            context_path: CLIENTS_PATH,
            sql: EntitySql {
                insert: CLIENT_INSERT,
                select_by_id: CLIENT_SELECT_BY_ID,
                list_all: CLIENT_LIST_ALL,
                update_name: CLIENT_UPDATE_NAME,
                delete_by_id: CLIENT_DELETE_BY_ID,
            },
            from_row: client_from_row,
            validate: validate_client,
            persistence: Box::new(ClientMapper),
            wire: Box::new(JsonMapper::<Client>::new()),
        },
    )
}

pub fn worker_service(pool: Arc<ConnectionManager>) -> EntityService<Worker> {
    EntityService::new(
        pool,
        EntityHooks {
            context_path: WORKERS_PATH,
            sql: EntitySql {
                insert: WORKER_INSERT,
                select_by_id: WORKER_SELECT_BY_ID,
                list_all: WORKER_LIST_ALL,
                update_name: WORKER_UPDATE_NAME,
                delete_by_id: WORKER_DELETE_BY_ID,
            },
            from_row: worker_from_row,
            validate: validate_worker,
            persistence: Box::new(WorkerMapper),
            wire: Box::new(JsonMapper::<Worker>::new()),
        },
    )
}

pub fn project_service(pool: Arc<ConnectionManager>) -> EntityService<Project> {
    EntityService::new(
        pool,
        EntityHooks {
            context_path: PROJECTS_PATH,
            sql: EntitySql {
                insert: PROJECT_INSERT,
                select_by_id: PROJECT_SELECT_BY_ID,
                list_all: PROJECT_LIST_ALL,
                update_name: PROJECT_UPDATE_NAME,
                delete_by_id: PROJECT_DELETE_BY_ID,
            },
            from_row: project_from_row,
            validate: validate_project,
            persistence: Box::new(ProjectMapper),
            wire: Box::new(JsonMapper::<Project>::new()),
        },
    )
}

fn client_from_row(row: &Record) -> Result<Client, StoreError> {
    Ok(Client {
        id: row.i64("id")?,
        name: row.string("name")?,
    })
}

fn worker_from_row(row: &Record) -> Result<Worker, StoreError> {
    let level = row.string("level")?;
    Ok(Worker {
        id: row.i64("id")?,
        name: row.string("name")?,
        date_of_birth: row.date("birthday")?,
        email: row.string("email")?,
        level: level
            .parse::<Level>()
            .map_err(|e| StoreError::decode("level", e))?,
        salary: row.i32("salary")?,
    })
}

fn project_from_row(row: &Record) -> Result<Project, StoreError> {
    Ok(Project {
        id: row.i64("id")?,
        name: row.string("name")?,
        client_id: row.i64("client_id")?,
        start_date: row.date("start_date")?,
        finish_date: row.opt_date("finish_date")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlValue;
    use chrono::NaiveDate;

    #[test]
    fn worker_row_decodes_lowercase_level() {
        let row = Record::new()
            .with("id", SqlValue::Int(3))
            .with("name", SqlValue::Text("Tom".into()))
            .with("birthday", SqlValue::Text("1990-02-01".into()))
            .with("email", SqlValue::Text("tom@example.com".into()))
            .with("level", SqlValue::Text("senior".into()))
            .with("salary", SqlValue::Int(4200));
        let w = worker_from_row(&row).unwrap();
        assert_eq!(w.level, Level::Senior);
        assert_eq!(w.date_of_birth, NaiveDate::from_ymd_opt(1990, 2, 1).unwrap());
        assert_eq!(w.salary, 4200);
    }

    #[test]
    fn project_row_allows_open_end() {
        let row = Record::new()
            .with("id", SqlValue::Int(1))
            .with("name", SqlValue::Text("Catnip".into()))
            .with("client_id", SqlValue::Int(2))
            .with("start_date", SqlValue::Date(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()))
            .with("finish_date", SqlValue::Null);
        let p = project_from_row(&row).unwrap();
        assert_eq!(p.finish_date, None);
        assert_eq!(p.client_id, 2);
    }

    #[test]
    fn unknown_level_is_a_decode_error() {
        let row = Record::new()
            .with("id", SqlValue::Int(3))
            .with("name", SqlValue::Text("Tom".into()))
            .with("birthday", SqlValue::Text("1990-02-01".into()))
            .with("email", SqlValue::Text("tom@example.com".into()))
            .with("level", SqlValue::Text("lead".into()))
            .with("salary", SqlValue::Int(4200));
        assert!(matches!(worker_from_row(&row), Err(StoreError::Decode { .. })));
    }
}
