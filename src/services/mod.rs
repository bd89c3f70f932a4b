//! Service wiring
//!
//! Builds the HTTP client, document source, loader and portfolio API from a
//! [`Config`]. Each `Services` owns one session cache.

use std::sync::Arc;
use tracing::debug;

use crate::config::{Config, SourceMode, StaticLocation};
use crate::core::infrastructure::{
    build_http_client, DataLoader, DirectorySource, DocumentSource, RestSource, StaticHttpSource,
};
use crate::core::services::{PortfolioApi, SharedApi, Uploader};
use crate::error::{FolioError, Result};

pub struct Services {
    config: Arc<Config>,
    rest: RestSource,
    api: SharedApi,
}

impl Services {
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(config.request_timeout())
            .map_err(|e| FolioError::Internal(anyhow::anyhow!("Failed to create HTTP client: {}", e)))?;
        let rest = RestSource::new(client.clone(), &config.api_base_url);

        let source: Arc<dyn DocumentSource> = match config.mode {
            SourceMode::Rest => Arc::new(rest.clone()),
            SourceMode::Static => match config.static_location() {
                StaticLocation::Http(base) => Arc::new(StaticHttpSource::new(client, &base)),
                StaticLocation::Directory(dir) => Arc::new(DirectorySource::new(dir)),
            },
        };
        debug!("Using {} source at {}", source.kind(), source.location());

        let backend = (config.mode == SourceMode::Rest).then(|| rest.clone());
        let api = PortfolioApi::new(DataLoader::new(source), backend, config.api_settings());

        Ok(Self {
            config: Arc::new(config),
            rest,
            api: Arc::new(api),
        })
    }

    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    pub fn api(&self) -> SharedApi {
        self.api.clone()
    }

    /// Uploads always go to the REST backend, whatever the read mode.
    pub fn create_uploader(&self) -> Uploader {
        Uploader::new(self.rest.clone())
    }
}
