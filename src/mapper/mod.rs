//! Entity mapping pair: statement binding for the store, JSON for the wire.

pub mod persistence;
pub mod wire;

pub use persistence::{ClientMapper, ProjectMapper, WorkerMapper};
pub use wire::JsonMapper;

use crate::error::ServiceError;
use crate::sql::Statement;

/// Writes an entity's fields into the positional parameters of an insert, in table order.
pub trait PersistenceMapper<T>: Send + Sync {
    fn bind(&self, stmt: &mut Statement, entity: &T) -> Result<(), ServiceError>;
}

/// Converts an entity to and from its JSON text.
pub trait WireMapper<T>: Send + Sync {
    fn from_wire(&self, text: &str) -> Result<T, ServiceError>;
    fn to_wire(&self, entity: &T) -> Result<String, ServiceError>;
    fn to_wire_list(&self, entities: &[T]) -> Result<String, ServiceError>;
}
