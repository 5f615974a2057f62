// src/obs/client.rs

//! HTTP transport for build-service requests
//!
//! The [`Transport`] trait is the seam between the listing/download logic and
//! the network. [`HttpTransport`] is the real implementation on top of
//! `reqwest::blocking`; tests plug in an in-memory one.

use crate::error::{Error, Result};
use reqwest::blocking::Client;
use std::io::Read;
use std::time::Duration;
use tracing::debug;

use super::metadata::{join_path, Project};

/// Public OBS API endpoint
pub const DEFAULT_API_URL: &str = "https://api.opensuse.org";

/// Explicit HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base endpoint, without the `/build` suffix
    pub api_url: String,
    /// Whole-request timeout; `None` waits forever
    pub timeout: Option<Duration>,
    pub user_agent: String,
    /// Ignore `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    pub no_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
            user_agent: format!("obs-mirror/{}", env!("CARGO_PKG_VERSION")),
            no_proxy: false,
        }
    }
}

impl ClientConfig {
    /// Full URL for `resource` under `/build/<project>`
    pub fn build_url(&self, project: &str, resource: &str) -> String {
        let path = join_path(&["build", project, resource]);
        format!("{}/{}", self.api_url.trim_end_matches('/'), path)
    }
}

/// Performs one GET against the build service
///
/// `resource` is relative to `/build/<project>`; an empty string addresses
/// the project root. The returned reader yields the full response body and
/// releases the connection when dropped.
pub trait Transport {
    fn get(&self, project: &Project, resource: &str) -> Result<Box<dyn Read>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, project: &Project, resource: &str) -> Result<Box<dyn Read>> {
        (**self).get(project, resource)
    }
}

/// `reqwest` backed transport using HTTP Basic authentication
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone());
        if config.no_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }
}

impl Transport for HttpTransport {
    fn get(&self, project: &Project, resource: &str) -> Result<Box<dyn Read>> {
        let url = self.config.build_url(&project.name, resource);
        debug!(url = %url, "build service request");

        let response = self
            .client
            .get(&url)
            .basic_auth(&project.user, Some(&project.password))
            .send()
            .map_err(|e| Error::TransportError(format!("GET {url} failed: {e}")))?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(Error::TransportError(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        Ok(Box::new(response))
    }
}
