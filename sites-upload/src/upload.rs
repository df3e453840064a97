#![doc = "HTTP transport for the sites service: the real implementation of the core `Transport` trait."]
//
//! # Sites HTTP transport
//!
//! Every file becomes one request:
//!
//! ```text
//! PUT {base_url}/api/v1/sites/{space}/{name}/content/{remote_path}
//! ```
//!
//! with the raw file bytes as the body. Credential authenticators use HTTP basic
//! auth; token authenticators send a bearer token. Any non-2xx response is an
//! error carrying the status and the response body.

use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::{Client, Url};
use sites_upload_core::contract::Transport;
use sites_upload_core::{Authenticator, Site, TransportError};

use crate::load_config::ServiceConfig;

const USER_AGENT: &str = concat!("sites-upload/", env!("CARGO_PKG_VERSION"));

pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid sites base URL {:?}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Sites base URL {} cannot hold a path", base_url);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        tracing::info!(
            base_url = %base_url,
            timeout_secs = config.timeout_secs,
            "Initialized sites HTTP transport"
        );
        Ok(Self { client, base_url })
    }

    fn content_url(&self, site: &Site, remote_path: &str) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| -> TransportError {
                format!("{} cannot hold a path", self.base_url).into()
            })?
            .pop_if_empty()
            .extend([
                "api",
                "v1",
                "sites",
                site.space.as_str(),
                site.name.as_str(),
                "content",
            ])
            .extend(remote_path.split('/'));
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn put_file(
        &self,
        site: &Site,
        remote_path: &str,
        contents: Vec<u8>,
    ) -> Result<(), TransportError> {
        let url = self.content_url(site, remote_path)?;

        let request = self.client.put(url.clone()).body(contents);
        let request = match &site.authenticator {
            Authenticator::Credentials { username, password } => {
                request.basic_auth(username, Some(password))
            }
            Authenticator::Token(token) => request.bearer_auth(token),
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = ?e, url = %url, "Request to sites service failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, url = %url, body = %body, "Sites service rejected file");
            return Err(format!("{status} from {url}: {body}").into());
        }

        tracing::debug!(status = %status, url = %url, "Stored file");
        Ok(())
    }
}
