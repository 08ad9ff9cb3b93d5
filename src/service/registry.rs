//! Context path -> service table consulted by the dispatcher.

use crate::error::ConfigError;
use crate::pool::ConnectionManager;
use crate::service::endpoint::EntityEndpoint;
use crate::service::entities::{client_service, project_service, worker_service};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct ServiceRegistry {
    by_path: HashMap<String, Arc<dyn EntityEndpoint>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client, Worker and Project services sharing one pool.
    pub fn with_default_services(pool: Arc<ConnectionManager>) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.register(Arc::new(client_service(pool.clone())))?;
        registry.register(Arc::new(worker_service(pool.clone())))?;
        registry.register(Arc::new(project_service(pool)))?;
        Ok(registry)
    }

    pub fn register(&mut self, service: Arc<dyn EntityEndpoint>) -> Result<(), ConfigError> {
        let path = service.context_path().to_string();
        if self.by_path.contains_key(&path) {
            return Err(ConfigError::DuplicateContextPath(path));
        }
        tracing::info!(context = %path, "service registered");
        self.by_path.insert(path, service);
        Ok(())
    }

    /// Exact match on the context path, e.g. `/clients`.
    pub fn get(&self, context_path: &str) -> Option<&Arc<dyn EntityEndpoint>> {
        self.by_path.get(context_path)
    }

    pub fn context_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.by_path.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendDescriptor;

    fn pool() -> Arc<ConnectionManager> {
        Arc::new(ConnectionManager::connect(&BackendDescriptor::sqlite_memory()).unwrap())
    }

    #[tokio::test]
    async fn default_services_cover_three_paths() {
        let registry = ServiceRegistry::with_default_services(pool()).unwrap();
        assert_eq!(registry.context_paths(), vec!["/clients", "/projects", "/workers"]);
        assert!(registry.get("/clients").is_some());
        assert!(registry.get("clients").is_none());
        assert!(registry.get("/unknownpath").is_none());
    }

    #[tokio::test]
    async fn duplicate_context_path_is_rejected() {
        let pool = pool();
        let mut registry = ServiceRegistry::new();
        registry.register(Arc::new(client_service(pool.clone()))).unwrap();
        let err = registry.register(Arc::new(client_service(pool))).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateContextPath(p) if p == "/clients"));
    }
}
