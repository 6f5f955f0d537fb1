//! Drone Report Server - renders drone spray reports from Notion pages
//!
//! Fetches a page through the Notion API, runs it through the report
//! pipeline and serves the result as HTML.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Endpoints
//!
//! - `GET /` - service information
//! - `GET /health` - liveness probe
//! - `GET /drone/{page_id}` - HTML report for a page
//!
//! Errors are returned as `{"error": {"code", "message"}}` JSON.

pub mod config;
pub mod error;
pub mod middleware;
pub mod notion;
pub mod render;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use notion::{NotionClient, NotionError, PageSource};
pub use render::ReportRenderer;
pub use server::{build_router, start_server};
pub use state::ServerState;
