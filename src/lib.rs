//! Entity-agnostic CRUD backend: generic entity services dispatched over HTTP by context path.

pub mod config;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod model;
pub mod pool;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{load_from_env, Backend, BackendDescriptor, PoolSettings, ServerConfig};
pub use error::{AppError, ConfigError, ServiceError, StoreError};
pub use model::{Client, Entity, Level, Project, Worker};
pub use pool::{ConnectionManager, DbConnection};
pub use routes::{app_router, common_routes, entity_routes};
pub use service::{EntityEndpoint, EntityService, ServiceRegistry};
pub use state::AppState;
pub use store::ensure_schema;
