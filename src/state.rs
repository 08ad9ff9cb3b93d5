//! Shared application state for all routes.

use crate::pool::ConnectionManager;
use crate::service::ServiceRegistry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<ConnectionManager>,
    /// Built once at startup; the dispatcher only reads it.
    pub services: Arc<ServiceRegistry>,
}

impl AppState {
    pub fn new(pool: Arc<ConnectionManager>, services: ServiceRegistry) -> Self {
        AppState {
            pool,
            services: Arc::new(services),
        }
    }
}
