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

//! [Metadata Service] backed node attributes.
//!
//! Google Cloud environments such as [Google Compute Engine (GCE)][gce-link]
//! provide a metadata service. This is a local service to the VM which (as
//! the name implies) provides metadata information about the VM, including
//! the [zone] where it runs.
//!
//! The types in this module look up the zone and return it as a custom
//! attribute. A clustering subsystem can attach the attribute to the local
//! node and use it for topology-aware placement, for example to avoid
//! placing all the replicas of a shard in the same zone.
//!
//! Example usage:
//!
//! ```no_run
//! # use google_cloud_node_attributes::attributes::Builder;
//! # use google_cloud_node_attributes::settings::Settings;
//! # use std::time::Duration;
//! # async fn sample() {
//! let provider = Builder::new(Settings::from_env())
//!     .with_connect_timeout(Duration::from_millis(500))
//!     .build();
//! let attributes = provider.build_attributes().await.unwrap_or_default();
//! println!("zone = {:?}", attributes.get("gce_zone"));
//! # }
//! ```
//!
//! [gce-link]: https://cloud.google.com/products/compute
//! [Metadata Service]: https://cloud.google.com/compute/docs/metadata/overview
//! [zone]: https://cloud.google.com/compute/docs/regions-zones

use crate::errors::MetadataError;
use crate::mds::client::Client as MDSClient;
use crate::settings::{AUTO_ATTRIBUTES_SETTING, Settings};
use std::collections::HashMap;
use std::time::Duration;

/// The name of the attribute holding the zone of the current VM.
pub const GCE_ZONE_ATTRIBUTE: &str = "gce_zone";

/// Custom attributes for a cluster node, keyed by attribute name.
pub type NodeAttributes = HashMap<String, String>;

/// Produces custom attributes for the local cluster node.
///
/// Implementations are best-effort. They return `None` when they are
/// disabled, and an empty (or partial) set of attributes when the
/// information cannot be retrieved. They never return errors.
#[async_trait::async_trait]
pub trait CustomAttributesProvider: std::fmt::Debug + Send + Sync {
    /// Returns the attributes for the local node, or `None` if the provider
    /// is disabled.
    async fn build_attributes(&self) -> Option<NodeAttributes>;
}

/// Creates [GceNodeAttributes] instances.
///
/// ```
/// # use google_cloud_node_attributes::attributes::Builder;
/// # use google_cloud_node_attributes::settings::Settings;
/// # use std::time::Duration;
/// let provider = Builder::new(Settings::default())
///     .with_endpoint("http://127.0.0.1:8080")
///     .with_request_timeout(Duration::from_secs(1))
///     .build();
/// ```
#[derive(Debug)]
pub struct Builder {
    settings: Settings,
    endpoint: Option<String>,
    connect_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
    metadata_flavor: bool,
}

impl Builder {
    /// Creates a builder using `settings` to decide if the provider is
    /// enabled.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            endpoint: None,
            connect_timeout: None,
            request_timeout: None,
            metadata_flavor: true,
        }
    }

    /// Sets the endpoint for the metadata service.
    ///
    /// If not set, the provider uses `http://metadata`. The `GCE_METADATA_HOST`
    /// environment variable, when set, takes precedence over both.
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the maximum time to establish a connection to the metadata
    /// service.
    ///
    /// Defaults to 2 seconds.
    pub fn with_connect_timeout(mut self, v: Duration) -> Self {
        self.connect_timeout = Some(v);
        self
    }

    /// Sets the maximum time for the complete request, including reading the
    /// response body.
    ///
    /// Defaults to 5 seconds.
    pub fn with_request_timeout(mut self, v: Duration) -> Self {
        self.request_timeout = Some(v);
        self
    }

    /// Controls whether requests include the `Metadata-Flavor: Google` header.
    ///
    /// The current metadata service rejects requests without this header.
    /// Some legacy endpoints and emulators do not expect it. Defaults to
    /// `true`.
    pub fn with_metadata_flavor(mut self, v: bool) -> Self {
        self.metadata_flavor = v;
        self
    }

    /// Returns a [GceNodeAttributes] with the configured settings.
    pub fn build(self) -> GceNodeAttributes {
        let client = MDSClient::new(self.endpoint).with_metadata_flavor(self.metadata_flavor);
        let client = self
            .connect_timeout
            .into_iter()
            .fold(client, |c, t| c.with_connect_timeout(t));
        let client = self
            .request_timeout
            .into_iter()
            .fold(client, |c, t| c.with_request_timeout(t));
        GceNodeAttributes {
            enabled: self.settings.get_as_bool(AUTO_ATTRIBUTES_SETTING, true),
            client,
        }
    }
}

/// Looks up the zone of this GCE instance using the metadata service.
///
/// The zone is returned as the [GCE_ZONE_ATTRIBUTE] custom attribute. The
/// provider issues one request per call, there is no caching and no retries.
///
/// The provider is disabled when the `cloud.node.auto_attributes` setting is
/// `false`. It is enabled by default.
#[derive(Clone, Debug)]
pub struct GceNodeAttributes {
    enabled: bool,
    client: MDSClient,
}

impl GceNodeAttributes {
    /// Creates a provider with the default endpoint and timeouts.
    pub fn new(settings: Settings) -> Self {
        Builder::new(settings).build()
    }

    /// Queries the metadata service for the zone of the current VM.
    ///
    /// Unlike [build_attributes][GceNodeAttributes::build_attributes], this
    /// ignores the `cloud.node.auto_attributes` setting and returns the
    /// error, if any. Use it to diagnose why no zone attribute is produced.
    pub async fn zone(&self) -> Result<String, MetadataError> {
        self.client.zone().await
    }

    /// Returns the node attributes.
    ///
    /// Returns `None` if the provider is disabled. Otherwise it queries the
    /// metadata service and returns a map with the zone, or an empty map if
    /// the zone cannot be retrieved.
    pub async fn build_attributes(&self) -> Option<NodeAttributes> {
        if !self.enabled {
            return None;
        }

        let mut attributes = NodeAttributes::new();
        match self.zone().await {
            Ok(zone) => {
                attributes.insert(GCE_ZONE_ATTRIBUTE.to_string(), zone);
            }
            Err(e @ MetadataError::EmptyZone { .. }) => {
                tracing::error!("{e}");
            }
            Err(e) => {
                tracing::debug!("failed to get metadata: {e:?}");
            }
        }
        Some(attributes)
    }
}

#[async_trait::async_trait]
impl CustomAttributesProvider for GceNodeAttributes {
    async fn build_attributes(&self) -> Option<NodeAttributes> {
        GceNodeAttributes::build_attributes(self).await
    }
}
