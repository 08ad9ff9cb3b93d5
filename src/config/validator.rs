//! Config validation: reject descriptors the pool could never honour.

use crate::config::BackendDescriptor;
use crate::error::ConfigError;

pub fn validate_descriptor(descriptor: &BackendDescriptor) -> Result<(), ConfigError> {
    if descriptor.url.trim().is_empty() {
        return Err(ConfigError::Validation("database url must not be empty".into()));
    }
    let pool = &descriptor.pool;
    if pool.max_connections == 0 {
        return Err(ConfigError::Validation("pool max_connections must be at least 1".into()));
    }
    if pool.min_connections > pool.max_connections {
        return Err(ConfigError::Validation(format!(
            "pool min_connections ({}) exceeds max_connections ({})",
            pool.min_connections, pool.max_connections
        )));
    }
    if pool.acquire_timeout.is_zero() {
        return Err(ConfigError::Validation("pool acquire timeout must be positive".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Backend;

    #[test]
    fn accepts_defaults_and_memory_descriptor() {
        validate_descriptor(&BackendDescriptor::new(Backend::Postgres, "postgres://localhost/crud")).unwrap();
        validate_descriptor(&BackendDescriptor::sqlite_memory()).unwrap();
    }

    #[test]
    fn rejects_inconsistent_pool() {
        let mut d = BackendDescriptor::new(Backend::Postgres, "postgres://localhost/crud");
        d.pool.min_connections = 20;
        assert!(validate_descriptor(&d).is_err());
        d.pool.min_connections = 0;
        d.pool.max_connections = 0;
        assert!(validate_descriptor(&d).is_err());
    }

    #[test]
    fn rejects_blank_url() {
        let d = BackendDescriptor::new(Backend::Sqlite, "  ");
        assert!(matches!(validate_descriptor(&d), Err(ConfigError::Validation(_))));
    }
}
