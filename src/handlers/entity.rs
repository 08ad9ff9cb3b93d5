//! Entity dispatch: resolve the service by context path, route by method, render the outcome.

use crate::error::{AppError, ServiceError};
use crate::response;
use crate::service::EntityEndpoint;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{Method, StatusCode, Uri},
    response::Response,
};
use serde_json::Value;
use std::collections::HashMap;

const SERVICE_NOT_FOUND: &str = "Service not found";
const INVALID_ID: &str = "Invalid or missing ID";

/// `/:context`
pub async fn dispatch_collection(
    State(state): State<AppState>,
    method: Method,
    Path(context): Path<String>,
    body: String,
) -> Result<Response, AppError> {
    dispatch(&state, method, &context, None, body).await
}

/// `/:context/:id`
pub async fn dispatch_item(
    State(state): State<AppState>,
    method: Method,
    Path((context, id)): Path<(String, String)>,
    body: String,
) -> Result<Response, AppError> {
    dispatch(&state, method, &context, Some(&id), body).await
}

/// Any path the two routes above do not match: `/`, trailing slashes, empty segments,
/// or more than two segments. The first non-empty segment still picks the service.
pub async fn dispatch_fallback(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: String,
) -> Result<Response, AppError> {
    let mut segments = uri.path().split('/').filter(|s| !s.is_empty());
    let context = segments.next().unwrap_or_default();
    let id_segment = segments.next();
    if segments.next().is_some() {
        resolve(&state, context)?;
        return Err(AppError::NotFound(format!("No route for {}", uri.path())));
    }
    dispatch(&state, method, context, id_segment, body).await
}

fn resolve<'a>(state: &'a AppState, context: &str) -> Result<&'a dyn EntityEndpoint, AppError> {
    state
        .services
        .get(&format!("/{}", context))
        .map(|s| &**s)
        .ok_or_else(|| AppError::NotFound(SERVICE_NOT_FOUND.into()))
}

async fn dispatch(
    state: &AppState,
    method: Method,
    context: &str,
    id_segment: Option<&str>,
    body: String,
) -> Result<Response, AppError> {
    let service = resolve(state, context)?;
    let context_path = service.context_path();
    let id = id_segment.map(parse_id).transpose();
    tracing::debug!(%method, context = %context_path, id = ?id_segment, "dispatch");

    match method {
        Method::GET => match id? {
            Some(id) => get_by_id(service, id).await,
            None => list_all(service).await,
        },
        Method::POST if id_segment.is_none() => create(service, &body).await,
        Method::PUT => {
            let id = id.ok().flatten().ok_or_else(|| AppError::BadRequest(INVALID_ID.into()))?;
            set_name(service, id, &body).await
        }
        Method::DELETE => {
            let id = id.ok().flatten().ok_or_else(|| AppError::BadRequest(INVALID_ID.into()))?;
            delete_by_id(service, id).await
        }
        _ => Err(AppError::MethodNotAllowed),
    }
}

fn parse_id(segment: &str) -> Result<i64, AppError> {
    segment
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("Invalid ID: {}", segment)))
}

async fn get_by_id(service: &dyn EntityEndpoint, id: i64) -> Result<Response, AppError> {
    match service.get_by_id_json(id).await {
        Ok(Some(json)) => Ok(response::json(StatusCode::OK, json)),
        Ok(None) => Err(not_found_entity()),
        Err(e) => Err(on_failure(e, not_found_entity)),
    }
}

async fn list_all(service: &dyn EntityEndpoint) -> Result<Response, AppError> {
    match service.list_all_json().await {
        Ok(json) => Ok(response::json(StatusCode::OK, json)),
        Err(e) => Err(on_failure(e, || AppError::NotFound("No resources found".into()))),
    }
}

async fn create(service: &dyn EntityEndpoint, body: &str) -> Result<Response, AppError> {
    match service.create_json(body).await {
        Ok(json) => Ok(response::json(StatusCode::CREATED, json)),
        Err(e) => Err(on_failure(e, || AppError::BadRequest("Failed to create resource".into()))),
    }
}

async fn set_name(service: &dyn EntityEndpoint, id: i64, body: &str) -> Result<Response, AppError> {
    let fields: HashMap<String, Value> = serde_json::from_str(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;
    let name = match fields.get("name") {
        Some(Value::String(s)) if !s.is_empty() => s.as_str(),
        _ => return Err(AppError::BadRequest("Name field is required".into())),
    };
    let not_updated = || AppError::NotFound("Entity not found or no rows updated".into());
    match service.set_name(id, name).await {
        Ok(0) => Err(not_updated()),
        Ok(rows) => Ok(response::updated_rows(rows)),
        Err(e) => Err(on_failure(e, not_updated)),
    }
}

async fn delete_by_id(service: &dyn EntityEndpoint, id: i64) -> Result<Response, AppError> {
    let not_deleted = || AppError::NotFound("Entity not found or no rows deleted".into());
    match service.delete_by_id(id).await {
        Ok(0) => Err(not_deleted()),
        Ok(rows) => Ok(response::deleted_rows(rows)),
        Err(e) => Err(on_failure(e, not_deleted)),
    }
}

fn not_found_entity() -> AppError {
    AppError::NotFound("Entity not found or operation failed".into())
}

/// Validation and malformed input are the caller's fault (400). Storage faults and
/// empty inserts read as an absent result, rendered by `absent`. Anything else is a 500.
fn on_failure(e: ServiceError, absent: impl FnOnce() -> AppError) -> AppError {
    match e {
        ServiceError::ValidationFailed(msg) => AppError::BadRequest(msg),
        ServiceError::MalformedInput(msg) => AppError::BadRequest(format!("Invalid request body: {}", msg)),
        ServiceError::Storage(_) | ServiceError::NoRowsAffected => absent(),
        ServiceError::Internal(msg) => AppError::Internal(msg),
    }
}
