use std::sync::Arc;

use crate::config::{Config, ConfigError};
use crate::satellite::Propagator;

/// Shared, read-only server state. Satellites are normalised once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub propagators: Arc<Vec<Propagator>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let propagators = config.propagators()?;
        Ok(Self {
            config: Arc::new(config),
            propagators: Arc::new(propagators),
        })
    }
}
