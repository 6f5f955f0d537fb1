//! Notion page retrieval.
//!
//! [`PageSource`] is the seam the report route fetches through; the live
//! implementation is [`NotionClient`], tests substitute their own.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::ServerConfig;

const NOTION_VERSION_HEADER: &str = "notion-version";
const PAGE_ID_LEN: usize = 32;
/// Upstream bodies are truncated to this many chars in error messages.
const MAX_ERROR_BODY: usize = 512;

/// Errors while fetching a page from Notion.
#[derive(Debug, Error)]
pub enum NotionError {
    #[error("invalid page id: {0}")]
    InvalidPageId(String),

    #[error("Notion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Notion responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Notion page {0} has no properties object")]
    MissingProperties(String),

    #[error("invalid Notion client configuration: {0}")]
    Config(String),
}

impl NotionError {
    /// True when Notion reported the page as absent or not shared with the
    /// integration.
    pub fn is_not_found(&self) -> bool {
        matches!(self, NotionError::Status { status: 404, .. })
    }
}

/// Source of a page's raw property map.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Returns the `properties` object of the page.
    async fn fetch_properties(&self, page_id: &str) -> Result<Map<String, Value>, NotionError>;
}

/// Accepts a bare 32-hex id, its dashed UUID form, or a Notion URL slug
/// ending in the id. Returns the dashed form.
pub fn normalize_page_id(raw: &str) -> Result<String, NotionError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let tail = trimmed.rsplit('/').next().unwrap_or(trimmed);
    let tail = tail.split(['?', '#']).next().unwrap_or(tail);

    let hex: String = tail.chars().filter(|c| *c != '-').collect();
    // "Relatorio-Boa-Vista-<id>" style slugs keep the id at the end
    let candidate = hex
        .get(hex.len().saturating_sub(PAGE_ID_LEN)..)
        .filter(|c| c.len() == PAGE_ID_LEN && c.chars().all(|ch| ch.is_ascii_hexdigit()))
        .ok_or_else(|| NotionError::InvalidPageId(raw.to_string()))?;

    let id = candidate.to_ascii_lowercase();
    Ok(format!(
        "{}-{}-{}-{}-{}",
        &id[0..8],
        &id[8..12],
        &id[12..16],
        &id[16..20],
        &id[20..32]
    ))
}

/// Client for the Notion pages endpoint.
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    api_url: String,
}

impl NotionClient {
    pub fn new(config: &ServerConfig) -> Result<Self, NotionError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.notion_token))
            .map_err(|_| NotionError::Config("token contains invalid header characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            NOTION_VERSION_HEADER,
            HeaderValue::from_str(&config.notion_version)
                .map_err(|_| NotionError::Config("invalid notion_version".into()))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            http,
            api_url: config.notion_api_url.trim_end_matches('/').to_string(),
        })
    }

    fn page_url(&self, page_id: &str) -> String {
        format!("{}/pages/{}", self.api_url, page_id)
    }
}

#[async_trait]
impl PageSource for NotionClient {
    async fn fetch_properties(&self, page_id: &str) -> Result<Map<String, Value>, NotionError> {
        let page_id = normalize_page_id(page_id)?;
        let start = Instant::now();

        let response = self.http.get(self.page_url(&page_id)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                page_id = %page_id,
                status = status.as_u16(),
                "notion page request failed"
            );
            return Err(NotionError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let page: Value = response.json().await?;
        let properties = match page {
            Value::Object(mut object) => match object.remove("properties") {
                Some(Value::Object(properties)) => properties,
                _ => return Err(NotionError::MissingProperties(page_id)),
            },
            _ => return Err(NotionError::MissingProperties(page_id)),
        };

        tracing::debug!(
            page_id = %page_id,
            properties = properties.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "notion_page_fetched"
        );
        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_ids_are_normalized_to_dashed_form() {
        let dashed = "1a2b3c4d-5e6f-7a8b-9c0d-1e2f3a4b5c6d";
        assert_eq!(normalize_page_id(dashed).unwrap(), dashed);
        assert_eq!(
            normalize_page_id("1A2B3C4D5E6F7A8B9C0D1E2F3A4B5C6D").unwrap(),
            dashed
        );
        assert_eq!(
            normalize_page_id("https://www.notion.so/acme/Relatorio-Boa-Vista-1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d?pvs=4")
                .unwrap(),
            dashed
        );
    }

    #[test]
    fn malformed_page_ids_are_rejected() {
        for raw in [
            "",
            "abc",
            "zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz",
            "1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c",
            "relatório-de-aplicação-1a2b3c4d5e6f7a8b9c0d1e2f3a4b5cçç",
        ] {
            assert!(
                matches!(normalize_page_id(raw), Err(NotionError::InvalidPageId(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn not_found_is_detected_from_status() {
        let err = NotionError::Status {
            status: 404,
            body: String::new(),
        };
        assert!(err.is_not_found());
        assert!(!NotionError::MissingProperties("x".into()).is_not_found());
    }

    #[test]
    fn client_builds_page_urls() {
        let config = ServerConfig {
            notion_token: "secret_".to_string() + &"a".repeat(50),
            notion_api_url: "https://api.notion.com/v1/".into(),
            ..ServerConfig::default()
        };
        let client = NotionClient::new(&config).unwrap();
        assert_eq!(
            client.page_url("abc"),
            "https://api.notion.com/v1/pages/abc"
        );
    }
}
