//! The capability set the HTTP dispatcher needs from a service, with no knowledge of the entity type.

use crate::error::ServiceError;
use crate::model::Entity;
use crate::service::crud::EntityService;
use async_trait::async_trait;

/// Object-safe view of an [`EntityService`]. Payloads cross this boundary as JSON text,
/// encoded and decoded by the service's own wire mapper.
#[async_trait]
pub trait EntityEndpoint: Send + Sync {
    fn context_path(&self) -> &str;

    /// Decode `body`, create the entity, encode the created value.
    async fn create_json(&self, body: &str) -> Result<String, ServiceError>;

    async fn get_by_id_json(&self, id: i64) -> Result<Option<String>, ServiceError>;

    async fn list_all_json(&self) -> Result<String, ServiceError>;

    async fn set_name(&self, id: i64, name: &str) -> Result<u64, ServiceError>;

    async fn delete_by_id(&self, id: i64) -> Result<u64, ServiceError>;
}

#[async_trait]
impl<T: Entity> EntityEndpoint for EntityService<T> {
    fn context_path(&self) -> &str {
        EntityService::context_path(self)
    }

    async fn create_json(&self, body: &str) -> Result<String, ServiceError> {
        let entity = self.wire_mapper().from_wire(body)?;
        let created = self.create(entity).await?;
        self.wire_mapper().to_wire(&created)
    }

    async fn get_by_id_json(&self, id: i64) -> Result<Option<String>, ServiceError> {
        match self.get_by_id(id).await? {
            Some(entity) => self.wire_mapper().to_wire(&entity).map(Some),
            None => Ok(None),
        }
    }

    async fn list_all_json(&self) -> Result<String, ServiceError> {
        let entities = self.list_all().await?;
        self.wire_mapper().to_wire_list(&entities)
    }

    async fn set_name(&self, id: i64, name: &str) -> Result<u64, ServiceError> {
        EntityService::set_name(self, id, name).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, ServiceError> {
        EntityService::delete_by_id(self, id).await
    }
}
