//! Outbound HTTP for the GitHub REST API.
//!
//! The pipeline only ever talks to a [`Transport`]: "GET this path, give me the status,
//! headers and body back". [`TransportContext`] is the real, reqwest-backed implementation;
//! tests substitute an in-memory one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};

use crate::error::Error;

pub const API_BASE: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const VERSION: &str = env!("CARGO_PKG_VERSION");
const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";

/// A response as seen by the classifier: nothing but status, headers and raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// The narrow network seam the report pipeline depends on.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET for `path` (path and query, relative to the API base).
    async fn get(&self, path: &str) -> Result<RawResponse, Error>;
}

/// Settings for building a [`TransportContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub api_base: String,
    /// GitHub personal access token (`GITHUB_TOKEN` env var).
    pub token: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            api_base: API_BASE.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("repocount/{VERSION}"),
        }
    }
}

/// Reqwest-backed [`Transport`]. Owns the connection pool; dropping it releases the pool.
#[derive(Debug, Clone)]
pub struct TransportContext {
    client: reqwest::Client,
    api_base: String,
}

impl TransportContext {
    /// Build the client and its default headers. Performs no network I/O.
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_JSON));
        if let Some(auth) = auth_header(config.token.as_deref()) {
            let mut value = HeaderValue::from_str(&auth)
                .map_err(|_| Error::Transport("GITHUB_TOKEN is not a valid header value".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}

#[async_trait]
impl Transport for TransportContext {
    async fn get(&self, path: &str) -> Result<RawResponse, Error> {
        let url = self.url(path);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("GET {url}: {e}")))?;

        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    v.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("reading body of {url}: {e}")))?
            .to_vec();

        tracing::debug!(%url, status, "GET");
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

fn auth_header(token: Option<&str>) -> Option<String> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!("Bearer {t}"))
}
