//! Per-entity insert binders. Dates go in as native `DATE` for PostgreSQL and as
//! `yyyy-MM-dd` text for SQLite.

use super::PersistenceMapper;
use crate::config::Backend;
use crate::error::ServiceError;
use crate::model::{Client, Project, Worker};
use crate::sql::{BindValue, Statement, DATE_FORMAT};
use chrono::NaiveDate;

/// Backend-appropriate representation of a (nullable) date parameter.
pub fn date_param(backend: Backend, date: Option<NaiveDate>) -> BindValue {
    match backend {
        Backend::Postgres => BindValue::Date(date),
        Backend::Sqlite => BindValue::Text(date.map(|d| d.format(DATE_FORMAT).to_string())),
    }
}

pub struct ClientMapper;

impl PersistenceMapper<Client> for ClientMapper {
    fn bind(&self, stmt: &mut Statement, client: &Client) -> Result<(), ServiceError> {
        stmt.bind_text(client.name.as_str());
        Ok(())
    }
}

pub struct WorkerMapper;

impl PersistenceMapper<Worker> for WorkerMapper {
    fn bind(&self, stmt: &mut Statement, worker: &Worker) -> Result<(), ServiceError> {
        if worker.salary <= 0 {
            return Err(ServiceError::validation("salary must be positive"));
        }
        let birthday = date_param(stmt.backend(), Some(worker.date_of_birth));
        stmt.bind_text(worker.name.as_str())
            .bind(birthday)
            .bind_text(worker.email.as_str())
            .bind_text(worker.level.as_db_str())
            .bind(BindValue::I32(worker.salary));
        Ok(())
    }
}

pub struct ProjectMapper;

impl PersistenceMapper<Project> for ProjectMapper {
    fn bind(&self, stmt: &mut Statement, project: &Project) -> Result<(), ServiceError> {
        let backend = stmt.backend();
        stmt.bind_text(project.name.as_str())
            .bind_i64(project.client_id)
            .bind(date_param(backend, Some(project.start_date)))
            .bind(date_param(backend, project.finish_date));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Level;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn project(finish: Option<NaiveDate>) -> Project {
        Project {
            id: 0,
            name: "Catnip".into(),
            client_id: 4,
            start_date: ymd(2023, 1, 15),
            finish_date: finish,
        }
    }

    #[test]
    fn project_dates_follow_backend() {
        let mut pg = Statement::new("", Backend::Postgres);
        ProjectMapper.bind(&mut pg, &project(None)).unwrap();
        assert_eq!(
            pg.params(),
            &[
                BindValue::Text(Some("Catnip".into())),
                BindValue::I64(4),
                BindValue::Date(Some(ymd(2023, 1, 15))),
                BindValue::Date(None),
            ]
        );

        let mut lite = Statement::new("", Backend::Sqlite);
        ProjectMapper.bind(&mut lite, &project(Some(ymd(2024, 6, 1)))).unwrap();
        assert_eq!(lite.params()[2], BindValue::Text(Some("2023-01-15".into())));
        assert_eq!(lite.params()[3], BindValue::Text(Some("2024-06-01".into())));
    }

    #[test]
    fn worker_binds_level_lowercase() {
        let worker = Worker {
            id: 0,
            name: "Tom".into(),
            date_of_birth: ymd(1990, 2, 1),
            email: "tom@example.com".into(),
            level: Level::Senior,
            salary: 4200,
        };
        let mut stmt = Statement::new("", Backend::Sqlite);
        WorkerMapper.bind(&mut stmt, &worker).unwrap();
        assert_eq!(stmt.params().len(), 5);
        assert_eq!(stmt.params()[1], BindValue::Text(Some("1990-02-01".into())));
        assert_eq!(stmt.params()[3], BindValue::Text(Some("senior".into())));
        assert_eq!(stmt.params()[4], BindValue::I32(4200));
    }

    #[test]
    fn worker_with_nonpositive_salary_fails_binding() {
        let worker = Worker {
            id: 0,
            name: "Tom".into(),
            date_of_birth: ymd(1990, 2, 1),
            email: "tom@example.com".into(),
            level: Level::Trainee,
            salary: 0,
        };
        let mut stmt = Statement::new("", Backend::Postgres);
        assert!(matches!(
            WorkerMapper.bind(&mut stmt, &worker),
            Err(ServiceError::ValidationFailed(_))
        ));
    }
}
