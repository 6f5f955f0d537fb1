use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::notion::{NotionClient, PageSource};
use crate::render::ReportRenderer;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Where report pages are fetched from
    pub source: Arc<dyn PageSource>,

    /// Compiled report template (shared across requests)
    pub renderer: Arc<ReportRenderer>,
}

impl ServerState {
    /// Create new server state backed by the Notion API
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let client = NotionClient::new(&config)?;
        Self::with_source(config, Arc::new(client))
    }

    /// Create server state over any page source
    pub fn with_source(config: ServerConfig, source: Arc<dyn PageSource>) -> ServerResult<Self> {
        Ok(Self {
            config: Arc::new(config),
            source,
            renderer: Arc::new(ReportRenderer::new()?),
        })
    }
}
