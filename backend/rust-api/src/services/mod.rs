use std::sync::Arc;

use crate::config::Config;

pub mod analytics;
pub mod dataset_loader;

use dataset_loader::DatasetProvider;

/// Shared application state. The dataset provider is injected explicitly so
/// handlers and tests never reach for module-level transports.
pub struct AppState {
    pub config: Config,
    pub provider: Arc<dyn DatasetProvider>,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn DatasetProvider>) -> Self {
        Self { config, provider }
    }
}
