use report::Logo;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Minimum length of a Notion integration token.
pub const MIN_TOKEN_LEN: usize = 50;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level or full `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Notion integration token
    #[serde(default, skip_serializing)]
    pub notion_token: String,

    /// Notion REST API base URL
    #[serde(default = "default_notion_api_url")]
    pub notion_api_url: String,

    /// Value of the `Notion-Version` header
    #[serde(default = "default_notion_version")]
    pub notion_version: String,

    /// PDF generation endpoint called by the rendered page
    #[serde(default = "default_pdf_service_url")]
    pub pdf_service_url: String,

    /// Header logo shown on the report
    #[serde(default)]
    pub header_logo_url: Option<String>,

    /// Footer logo shown on the report
    #[serde(default)]
    pub footer_logo_url: Option<String>,
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("notion_token must be at least {min} characters (got {actual})")]
    TokenTooShort { min: usize, actual: usize },

    #[error("notion_api_url must be an http(s) URL: {0}")]
    InvalidApiUrl(String),

    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            notion_token: String::new(),
            notion_api_url: default_notion_api_url(),
            notion_version: default_notion_version(),
            pdf_service_url: default_pdf_service_url(),
            header_logo_url: None,
            footer_logo_url: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server` config file and
    /// environment variables (`NOTION_TOKEN`, `PORT`, `LOG_LEVEL`, ...).
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }

        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("server").required(false))
            // Override with environment variables
            .add_source(config::Environment::default().try_parsing(true));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks length rules on the Notion credentials and basic sanity of the
    /// rest.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let actual = self.notion_token.chars().count();
        if actual < MIN_TOKEN_LEN {
            return Err(ConfigError::TokenTooShort {
                min: MIN_TOKEN_LEN,
                actual,
            });
        }
        if !(self.notion_api_url.starts_with("http://") || self.notion_api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(self.notion_api_url.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Report logos, when both are configured.
    pub fn logo(&self) -> Option<Logo> {
        match (&self.header_logo_url, &self.footer_logo_url) {
            (Some(header), Some(footer)) => Some(Logo {
                header_logo_url: header.clone(),
                footer_logo_url: footer.clone(),
            }),
            _ => None,
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_notion_api_url() -> String {
    "https://api.notion.com/v1".to_string()
}

fn default_notion_version() -> String {
    "2022-06-28".to_string()
}

fn default_pdf_service_url() -> String {
    "/api/pdf/generate".to_string()
}
