//! Domain rules checked before any write.

use crate::error::ServiceError;
use crate::model::{Client, Project, Worker};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 1000;

/// Name length rule shared by every entity type, counted in characters.
pub fn validate_name(name: &str) -> Result<(), ServiceError> {
    let len = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return Err(ServiceError::validation(format!(
            "name must be between {} and {} characters",
            NAME_MIN_CHARS, NAME_MAX_CHARS
        )));
    }
    Ok(())
}

pub fn validate_client(_client: &Client) -> Result<(), ServiceError> {
    Ok(())
}

pub fn validate_worker(worker: &Worker) -> Result<(), ServiceError> {
    if !worker.email.contains('@') {
        return Err(ServiceError::validation("email must contain '@'"));
    }
    if worker.salary <= 0 {
        return Err(ServiceError::validation("salary must be positive"));
    }
    Ok(())
}

pub fn validate_project(project: &Project) -> Result<(), ServiceError> {
    if project.client_id <= 0 {
        return Err(ServiceError::validation("client_id must reference an existing client"));
    }
    Ok(())
}
