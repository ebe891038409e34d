//! Application state for the timetable engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::gateway::{InMemoryGateway, PersistenceGateway};

/// Shared application state.
///
/// Holds the loaded configuration and the persistence gateway used by all
/// request handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    gateway: Arc<dyn PersistenceGateway>,
}

impl AppState {
    /// Creates a new application state over the given gateway.
    pub fn new(config: ConfigLoader, gateway: impl PersistenceGateway + 'static) -> Self {
        Self {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
        }
    }

    /// Creates a state backed by an in-memory store, seeded and guarded as
    /// the configuration says.
    pub fn in_memory(config: ConfigLoader) -> Self {
        let gateway = match config.seed() {
            Some(seed) => InMemoryGateway::from_seed(seed),
            None => InMemoryGateway::new(),
        }
        .with_double_booking_guard(config.engine().persistence.reject_double_booking);

        Self::new(config, gateway)
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the persistence gateway.
    pub fn gateway(&self) -> &dyn PersistenceGateway {
        self.gateway.as_ref()
    }
}
