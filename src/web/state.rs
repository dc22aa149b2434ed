use std::sync::Arc;
use tokio::sync::Mutex;

use crate::fetch::{CelestrakClient, ElementSetFetcher};
use crate::registry::SatelliteRegistry;

use super::config::{Config, ConfigError};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<SatelliteRegistry>,
    pub fetcher: Arc<Mutex<ElementSetFetcher<CelestrakClient>>>,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let registry = SatelliteRegistry::from_file(&config.satellites_file)?;
        log::info!(
            "Loaded {} satellites from {}: {}",
            registry.len(),
            config.satellites_file.display(),
            registry.names().join(", ")
        );

        let client =
            CelestrakClient::new(config.celestrak.url.clone(), config.celestrak.timeout)?;
        let fetcher = ElementSetFetcher::new(client, config.cache_ttl()?);

        Ok(Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            fetcher: Arc::new(Mutex::new(fetcher)),
        })
    }
}
