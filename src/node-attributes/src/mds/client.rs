// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::errors::MetadataError;
use reqwest::{Client as ReqwestClient, RequestBuilder};
use std::time::Duration;

/// A client for the GCP Compute Engine Metadata Service (MDS).
///
/// Each request uses a fresh HTTP client with no idle connection pool. The
/// connection is closed when the request completes, fails, or is dropped.
#[derive(Clone, Debug)]
pub(crate) struct Client {
    endpoint: String,
    connect_timeout: Duration,
    request_timeout: Duration,
    metadata_flavor: bool,
}

impl Client {
    /// Creates a new client for the Metadata Service.
    pub(crate) fn new(endpoint_override: Option<String>) -> Self {
        let endpoint = Self::resolve_endpoint(endpoint_override);
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            connect_timeout: super::DEFAULT_CONNECT_TIMEOUT,
            request_timeout: super::DEFAULT_REQUEST_TIMEOUT,
            metadata_flavor: true,
        }
    }

    pub(crate) fn with_connect_timeout(mut self, v: Duration) -> Self {
        self.connect_timeout = v;
        self
    }

    pub(crate) fn with_request_timeout(mut self, v: Duration) -> Self {
        self.request_timeout = v;
        self
    }

    pub(crate) fn with_metadata_flavor(mut self, v: bool) -> Self {
        self.metadata_flavor = v;
        self
    }

    fn resolve_endpoint(endpoint_override: Option<String>) -> String {
        if let Ok(host) = std::env::var(super::GCE_METADATA_HOST_ENV_VAR) {
            format!("http://{host}")
        } else if let Some(e) = endpoint_override {
            e
        } else {
            super::METADATA_ROOT.to_string()
        }
    }

    pub(crate) fn zone_url(&self) -> String {
        format!("{}{}", self.endpoint, super::ZONE_PATH)
    }

    /// Fetches the zone of the current instance.
    ///
    /// Returns the first line of the response, with surrounding whitespace
    /// removed.
    pub(crate) async fn zone(&self) -> crate::Result<String> {
        let url = self.zone_url();
        tracing::debug!("calling GCE metadata url {url} to get the zone");
        let line = self.get_first_line(&url).await?;
        match first_line(&line) {
            Some(zone) => Ok(zone.to_string()),
            None => Err(MetadataError::EmptyZone { url }),
        }
    }

    fn get(&self, url: &str) -> reqwest::Result<RequestBuilder> {
        let inner = ReqwestClient::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .pool_max_idle_per_host(0)
            .build()?;
        let request = inner.get(url);
        if self.metadata_flavor {
            return Ok(request.header(super::METADATA_FLAVOR, super::METADATA_FLAVOR_VALUE));
        }
        Ok(request)
    }

    /// Reads the response body up to, and including, the first line
    /// terminator. The rest of the body is discarded.
    async fn get_first_line(&self, url: &str) -> crate::Result<String> {
        let mut response = self
            .get(url)
            .map_err(|e| MetadataError::transport(url, e))?
            .send()
            .await
            .map_err(|e| MetadataError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetadataError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        let mut line = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| MetadataError::transport(url, e))?
        {
            line.extend_from_slice(&chunk);
            if chunk.iter().any(|b| *b == b'\n' || *b == b'\r') {
                break;
            }
        }
        Ok(String::from_utf8_lossy(&line).into_owned())
    }
}

fn first_line(body: &str) -> Option<&str> {
    body.split(['\r', '\n'])
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
}
