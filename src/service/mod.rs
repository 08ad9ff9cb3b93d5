//! Generic entity services and the registry the dispatcher resolves them from.

mod crud;
pub mod endpoint;
pub mod entities;
pub mod registry;
pub mod validation;

pub use crud::{EntityHooks, EntityService, EntitySql};
pub use endpoint::EntityEndpoint;
pub use entities::{client_service, project_service, worker_service};
pub use registry::ServiceRegistry;
pub use validation::validate_name;
