mod common;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use common::{exec, memory_pool};
use crud_backend::service::{client_service, project_service, worker_service};
use crud_backend::{Client, Level, Project, ServiceError, Worker};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn worker(name: &str) -> Worker {
    Worker {
        id: 0,
        name: name.to_string(),
        date_of_birth: day(1991, 3, 14),
        email: "whiskers@example.com".to_string(),
        level: Level::Junior,
        salary: 1200,
    }
}

#[tokio::test]
async fn created_client_reads_back_equal() {
    let clients = client_service(memory_pool().await);
    let created = clients.create(Client::new("Milky Meow Co.")).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(clients.get_by_id(created.id).await.unwrap(), Some(created));
}

#[tokio::test]
async fn unknown_id_is_absent_not_an_error() {
    let clients = client_service(memory_pool().await);
    assert_matches!(clients.get_by_id(404).await, Ok(None));
    assert_matches!(clients.set_name(404, "Nobody").await, Ok(0));
    assert_matches!(clients.delete_by_id(404).await, Ok(0));
}

#[tokio::test]
async fn empty_table_lists_as_empty_but_missing_table_fails() {
    let pool = memory_pool().await;
    let workers = worker_service(pool.clone());
    assert_eq!(workers.list_all().await.unwrap(), vec![]);

    exec(&pool, "DROP TABLE worker").await;
    assert_matches!(workers.list_all().await, Err(ServiceError::Storage(_)));
    // Single-connection pool: a leaked connection would time out here.
    assert_matches!(workers.get_by_id(1).await, Err(ServiceError::Storage(_)));
    assert!(pool.ping().await.is_ok());
}

#[tokio::test]
async fn invalid_name_never_reaches_the_store() {
    let clients = client_service(memory_pool().await);
    assert_matches!(clients.create(Client::new("A")).await, Err(ServiceError::ValidationFailed(_)));
    assert_eq!(clients.list_all().await.unwrap(), vec![]);

    let created = clients.create(Client::new("Tabby Tools")).await.unwrap();
    assert_matches!(
        clients.set_name(created.id, "").await,
        Err(ServiceError::ValidationFailed(_))
    );
    let long = "x".repeat(1001);
    assert_matches!(
        clients.set_name(created.id, &long).await,
        Err(ServiceError::ValidationFailed(_))
    );
    assert_eq!(clients.get_by_id(created.id).await.unwrap().unwrap().name, "Tabby Tools");
}

#[tokio::test]
async fn rename_then_delete_twice() {
    let clients = client_service(memory_pool().await);
    let created = clients.create(Client::new("Old Name")).await.unwrap();

    assert_eq!(clients.set_name(created.id, "New Name").await.unwrap(), 1);
    assert_eq!(clients.get_by_id(created.id).await.unwrap().unwrap().name, "New Name");

    assert_eq!(clients.delete_by_id(created.id).await.unwrap(), 1);
    assert_eq!(clients.delete_by_id(created.id).await.unwrap(), 0);
    assert_eq!(clients.get_by_id(created.id).await.unwrap(), None);
}

#[tokio::test]
async fn worker_round_trips_dates_and_level() {
    let workers = worker_service(memory_pool().await);
    let created = workers.create(worker("Whiskers")).await.unwrap();
    let loaded = workers.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.date_of_birth, day(1991, 3, 14));
    assert_eq!(loaded.level, Level::Junior);
}

#[tokio::test]
async fn worker_rules_are_checked_before_insert() {
    let workers = worker_service(memory_pool().await);
    let mut bad_email = worker("Whiskers");
    bad_email.email = "no-at-sign".to_string();
    assert_matches!(workers.create(bad_email).await, Err(ServiceError::ValidationFailed(_)));

    let mut unpaid = worker("Whiskers");
    unpaid.salary = 0;
    assert_matches!(workers.create(unpaid).await, Err(ServiceError::ValidationFailed(_)));

    assert!(workers.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn project_keeps_open_end() {
    let pool = memory_pool().await;
    let client = client_service(pool.clone()).create(Client::new("Purr Labs")).await.unwrap();
    let projects = project_service(pool);

    let ongoing = projects
        .create(Project {
            id: 0,
            name: "Laser Pointer".to_string(),
            client_id: client.id,
            start_date: day(2024, 1, 2),
            finish_date: None,
        })
        .await
        .unwrap();
    let done = projects
        .create(Project {
            id: 0,
            name: "Scratching Post".to_string(),
            client_id: client.id,
            start_date: day(2023, 5, 1),
            finish_date: Some(day(2023, 9, 30)),
        })
        .await
        .unwrap();

    assert_eq!(projects.get_by_id(ongoing.id).await.unwrap().unwrap().finish_date, None);
    assert_eq!(
        projects.get_by_id(done.id).await.unwrap().unwrap().finish_date,
        Some(day(2023, 9, 30))
    );
    assert_eq!(projects.list_all().await.unwrap(), vec![ongoing, done]);
}

#[tokio::test]
async fn project_for_unknown_client_is_a_storage_error() {
    let projects = project_service(memory_pool().await);
    let orphan = Project {
        id: 0,
        name: "Orphan".to_string(),
        client_id: 77,
        start_date: day(2024, 1, 1),
        finish_date: None,
    };
    assert_matches!(projects.create(orphan).await, Err(ServiceError::Storage(_)));
}

#[tokio::test]
async fn list_is_capped_and_ordered_by_id() {
    let clients = client_service(memory_pool().await);
    for i in 0..55 {
        clients.create(Client::new(format!("Client {}", i))).await.unwrap();
    }
    let listed = clients.list_all().await.unwrap();
    assert_eq!(listed.len(), 50);
    assert!(listed.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(listed[0].name, "Client 0");
}
